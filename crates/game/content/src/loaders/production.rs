//! Tile production loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::ProductionRule;

/// Loader for tile production rules from RON files.
///
/// RON format: `Vec<ProductionRule>`; `impassable` and `objects` default to `NONE`.
pub struct ProductionLoader;

impl ProductionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ProductionRule>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse production RON {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ProductionRule>> {
        Ok(ron::from_str(content)?)
    }
}
