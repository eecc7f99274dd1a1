//! Traits describing read-only game content.
//!
//! Oracles expose unit, city and camp templates plus terrain balance tables.
//! [`ContentOracle`] bundles them so the engine can hold a single
//! `Arc<dyn ContentOracle>` without coupling to a concrete content source.
mod error;
mod tables;
mod templates;

pub use error::OracleError;
pub use tables::{MoveCosts, TablesOracle};
pub use templates::{CityOracle, UnitOracle};

use crate::constants::{CellValue, CityClass, ResourceBag, UnitClass};
use crate::state::{CityProperties, RecruitCounters, UnitProperties};

/// Everything the rules read from content.
pub trait ContentOracle: UnitOracle + CityOracle + TablesOracle {
    fn require_unit(&self, class: UnitClass) -> Result<UnitProperties, OracleError> {
        self.unit_template(class)
            .ok_or(OracleError::UnitTemplateMissing(class))
    }

    fn require_city(&self, class: CityClass) -> Result<CityProperties, OracleError> {
        self.city_template(class)
            .ok_or(OracleError::CityTemplateMissing(class))
    }

    fn require_camp(&self, camp: CellValue) -> Result<RecruitCounters, OracleError> {
        self.camp_template(camp)
            .ok_or(OracleError::CampTemplateMissing(camp))
    }

    fn require_tile_cost(&self, value: CellValue) -> Result<ResourceBag, OracleError> {
        self.tile_cost(value)
            .ok_or(OracleError::TileCostMissing(value))
    }
}

impl<T> ContentOracle for T where T: UnitOracle + CityOracle + TablesOracle + ?Sized {}
