//! Oracle access errors.

use crate::constants::{CellValue, CityClass, UnitClass};
use crate::error::{ErrorSeverity, GameError};

/// Content the oracles could not provide.
///
/// A missing template means the loaded content does not cover a kind the
/// rules ask for; the request is rejected rather than improvised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("no unit template for {0}")]
    UnitTemplateMissing(UnitClass),

    #[error("no city template for {0:?}")]
    CityTemplateMissing(CityClass),

    #[error("no camp template for {0}")]
    CampTemplateMissing(CellValue),

    #[error("{0} cannot be built")]
    TileCostMissing(CellValue),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::TileCostMissing(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::UnitTemplateMissing(_) => "ORACLE_UNIT_TEMPLATE_MISSING",
            OracleError::CityTemplateMissing(_) => "ORACLE_CITY_TEMPLATE_MISSING",
            OracleError::CampTemplateMissing(_) => "ORACLE_CAMP_TEMPLATE_MISSING",
            OracleError::TileCostMissing(_) => "ORACLE_TILE_COST_MISSING",
        }
    }
}
