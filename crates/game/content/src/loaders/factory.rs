//! Content factory for building oracles from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use armies_core::state::UnitProperties;
use armies_core::{GameConfig, UnitClass};

use crate::loaders::{
    CityCatalog, CityLoader, ConfigLoader, LoadResult, ProductionLoader, TablesLoader, UnitLoader,
};
use crate::standard::StandardContent;
use crate::tables::{ProductionRule, TileTables};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// ├── units.ron
/// ├── cities.ron
/// └── production.ron
/// ```
///
/// Every file is optional for [`ContentFactory::load_content`] and
/// [`ContentFactory::load_config_or_default`]: a missing file keeps the
/// built-in table. A file that exists but fails to parse is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const TABLES_FILE: &'static str = "tables.toml";
    pub const UNITS_FILE: &'static str = "units.ron";
    pub const CITIES_FILE: &'static str = "cities.ron";
    pub const PRODUCTION_FILE: &'static str = "production.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.path(Self::CONFIG_FILE))
    }

    pub fn load_config_or_default(&self) -> LoadResult<GameConfig> {
        Ok(self
            .optional(Self::CONFIG_FILE, ConfigLoader::load)?
            .unwrap_or_default())
    }

    /// Load move-cost tiers and build prices from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<TileTables> {
        TablesLoader::load(&self.path(Self::TABLES_FILE))
    }

    pub fn load_units(&self) -> LoadResult<BTreeMap<UnitClass, UnitProperties>> {
        UnitLoader::load(&self.path(Self::UNITS_FILE))
    }

    pub fn load_cities(&self) -> LoadResult<CityCatalog> {
        CityLoader::load(&self.path(Self::CITIES_FILE))
    }

    pub fn load_production(&self) -> LoadResult<Vec<ProductionRule>> {
        ProductionLoader::load(&self.path(Self::PRODUCTION_FILE))
    }

    /// Builds a content oracle, overriding the built-in tables with every
    /// file present in the data directory.
    pub fn load_content(&self) -> LoadResult<StandardContent> {
        let mut content = StandardContent::standard();
        let mut tables = content.tables().clone();

        if let Some(loaded) = self.optional(Self::TABLES_FILE, TablesLoader::load)? {
            tables.move_costs = loaded.move_costs;
            tables.tile_costs = loaded.tile_costs;
        }
        if let Some(production) = self.optional(Self::PRODUCTION_FILE, ProductionLoader::load)? {
            tables.production = production;
        }
        content = content.with_tables(tables);

        if let Some(units) = self.optional(Self::UNITS_FILE, UnitLoader::load)? {
            content = content.with_units(units);
        }
        if let Some(catalog) = self.optional(Self::CITIES_FILE, CityLoader::load)? {
            content = content
                .with_cities(catalog.cities)
                .with_camps(catalog.camps);
        }
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn optional<T>(
        &self,
        file: &str,
        load: impl FnOnce(&Path) -> LoadResult<T>,
    ) -> LoadResult<Option<T>> {
        let path = self.path(file);
        if path.exists() {
            load(&path).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armies_core::{CellValue, CityClass, CityOracle, TablesOracle, UnitOracle};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn an_empty_directory_yields_the_standard_content() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        let content = factory.load_content().unwrap();
        let standard = StandardContent::standard();
        assert_eq!(
            content.unit_template(UnitClass::Knight),
            standard.unit_template(UnitClass::Knight)
        );
        assert_eq!(factory.load_config_or_default().unwrap(), GameConfig::default());
        assert!(factory.load_config().is_err());
    }

    #[test]
    fn files_override_their_tables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "army_max_size = 3\n").unwrap();
        std::fs::write(
            dir.path().join("tables.toml"),
            "[tile_costs]\nTREES = { GOLD = 1 }\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("production.ron"),
            "[(ground: SEA, resources: [GOLD, GOLD])]",
        )
        .unwrap();
        let factory = ContentFactory::new(dir.path());

        let content = factory.load_content().unwrap();
        assert_eq!(factory.load_config().unwrap().army_max_size, 3);
        assert_eq!(content.tile_cost(CellValue::Trees).map(|bag| bag.total()), Some(1));
        assert_eq!(content.tile_cost(CellValue::Mill), None);
        assert_eq!(
            content
                .tile_production(CellValue::Earth, CellValue::Empty, CellValue::Empty),
            None
        );
        assert_eq!(
            content
                .tile_production(CellValue::Sea, CellValue::Empty, CellValue::Empty)
                .map(|resources| resources.len()),
            Some(2)
        );
        // Untouched files keep the built-in templates.
        assert!(content.city_template(CityClass::Default).is_some());
    }

    #[test]
    fn broken_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("units.ron"), "{ KNIGHT: ( ").unwrap();
        let error = ContentFactory::new(dir.path())
            .load_content()
            .unwrap_err()
            .to_string();
        assert!(error.contains("units.ron"), "{error}");
    }
}
