//! Enumerations shared by state, rules and commands.
mod cell_value;
mod direction;
mod kinds;
mod resource;

pub use cell_value::CellValue;
pub use direction::{Direction, NeighborMask};
pub use kinds::{CellUsage, CityClass, LayerKind, UnitClass, WeaponKind, WorldType};
pub use resource::{Resource, ResourceBag};
