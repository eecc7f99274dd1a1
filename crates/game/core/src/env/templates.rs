use crate::constants::{CellValue, CityClass, UnitClass};
use crate::state::{CityProperties, RecruitCounters, UnitProperties};

/// Oracle providing the starting properties of every unit class.
pub trait UnitOracle: Send + Sync {
    /// Template with meters at their maxima, or `None` for unrecruitable classes.
    fn unit_template(&self, class: UnitClass) -> Option<UnitProperties>;
}

/// Oracle providing city and training camp templates.
pub trait CityOracle: Send + Sync {
    fn city_template(&self, class: CityClass) -> Option<CityProperties>;

    /// Recruit counters a freshly built camp starts with.
    fn camp_template(&self, camp: CellValue) -> Option<RecruitCounters>;
}
