use crate::constants::{CellValue, Resource, ResourceBag};

/// Oracle providing terrain and building balance tables.
///
/// Changing these numbers rebalances the game without touching pathfinding
/// or the command engine.
pub trait TablesOracle: Send + Sync {
    /// Cost tiers used to build movement cost fields.
    fn move_costs(&self) -> MoveCosts;

    /// Price of placing `value` on the objects layer. Removal is priced under
    /// [`CellValue::Empty`]. `None` means the value cannot be built.
    fn tile_cost(&self, value: CellValue) -> Option<ResourceBag>;

    /// Resources a worker yields on a cell with this layer combination.
    fn tile_production(
        &self,
        ground: CellValue,
        impassable: CellValue,
        objects: CellValue,
    ) -> Option<Vec<Resource>>;
}

/// Movement cost per terrain tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveCosts {
    pub road_stone: u32,
    pub road_dirt: u32,
    pub ground: u32,
    /// Hills, rocks and trees.
    pub rough: u32,
}

impl MoveCosts {
    pub const fn new(road_stone: u32, road_dirt: u32, ground: u32, rough: u32) -> Self {
        Self {
            road_stone,
            road_dirt,
            ground,
            rough,
        }
    }
}

impl Default for MoveCosts {
    fn default() -> Self {
        Self::new(1, 2, 3, 4)
    }
}
