//! City and training camp template loader.

use std::collections::BTreeMap;
use std::path::Path;

use armies_core::state::{CityProperties, RecruitCounters};
use armies_core::{CellValue, CityClass};

use crate::loaders::{LoadResult, read_file};

/// City templates by class plus recruit counters by camp value.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct CityCatalog {
    pub cities: BTreeMap<CityClass, CityProperties>,
    pub camps: BTreeMap<CellValue, RecruitCounters>,
}

/// Loader for city and camp templates from RON files.
pub struct CityLoader;

impl CityLoader {
    pub fn load(path: &Path) -> LoadResult<CityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse city RON {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<CityCatalog> {
        let catalog: CityCatalog = ron::from_str(content)?;
        if let Some(value) = catalog.camps.keys().find(|value| !value.is_training_camp()) {
            anyhow::bail!("{value} is not a training camp");
        }
        Ok(catalog)
    }
}
