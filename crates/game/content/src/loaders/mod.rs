//! Content loaders for reading game data from files.
//!
//! RON carries the nested templates (units, cities, production rules); TOML
//! carries the flat tables and the game configuration.

pub mod cities;
pub mod config;
pub mod factory;
pub mod production;
pub mod tables;
pub mod units;

pub use cities::{CityCatalog, CityLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use production::ProductionLoader;
pub use tables::TablesLoader;
pub use units::UnitLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
