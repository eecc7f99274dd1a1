pub mod assignments;
pub mod common;
pub mod items;
pub mod layer;
#[cfg(feature = "serde")]
pub mod layer_data;
pub mod player;
pub mod world;

pub use assignments::Assignments;
pub use common::{ItemId, PlayerId, Position, Rect};
pub use items::{
    Army, City, CityProperties, Item, ItemTable, RecruitCounters, TrainingCamp, Unit,
    UnitProperties, UnitStack, WeaponStats,
};
pub use layer::{ItemCells, Layer, LayerArea};
pub use player::{Player, default_name};
pub use world::World;
