//! Unit template loader.

use std::collections::BTreeMap;
use std::path::Path;

use armies_core::UnitClass;
use armies_core::state::UnitProperties;

use crate::loaders::{LoadResult, read_file};

/// Loader for unit templates from RON files.
///
/// RON format: `{ CLASS: (max_life_points: .., weapons: { KIND: (..) }, cost: { .. }) }`.
/// Current meters are filled from their maxima.
pub struct UnitLoader;

impl UnitLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<UnitClass, UnitProperties>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit RON {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<UnitClass, UnitProperties>> {
        let units: BTreeMap<UnitClass, UnitProperties> = ron::from_str(content)?;
        if units.contains_key(&UnitClass::None) {
            anyhow::bail!("unit class NONE cannot have a template");
        }
        Ok(units
            .into_iter()
            .map(|(class, properties)| (class, properties.at_max()))
            .collect())
    }
}
