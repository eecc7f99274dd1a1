//! Terrain tables loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::TileTables;

/// Loader for move-cost tiers and build prices from TOML files.
///
/// Tile production lives in its own RON file; see
/// [`crate::loaders::ProductionLoader`].
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<TileTables> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<TileTables> {
        Ok(toml::from_str(content)?)
    }
}
