/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Largest stack of units that may share one cell in a strategic world.
    /// Never exceeds [`GameConfig::MAX_ARMY_SIZE`].
    pub army_max_size: usize,

    /// Window radius used by full-range distance maps.
    pub distance_radius: i32,

    /// Food paid back by each step of a starving city's shrink loop.
    pub food_per_shrink_step: i32,

    /// Resource units each mill-like building can double.
    pub building_bonus_per_mill: i32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum units in one army; bounds the inline unit storage.
    pub const MAX_ARMY_SIZE: usize = 10;
    /// Player ids live in `[0, MAX_PLAYERS)`.
    pub const MAX_PLAYERS: u8 = 5;
    /// Stride used to embed a cell into a command priority.
    pub const WORLD_MAX_WIDTH: u64 = 4096;
    /// Hard cap on backward steps when reconstructing a path.
    pub const PATH_STEP_LIMIT: usize = 100;
    /// Window radius of the short probe used to validate one move hop.
    pub const MOVE_PROBE_RADIUS: i32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DISTANCE_RADIUS: i32 = 31;
    pub const DEFAULT_FOOD_PER_SHRINK_STEP: i32 = 2;
    pub const DEFAULT_BUILDING_BONUS_PER_MILL: i32 = 8;

    pub fn new() -> Self {
        Self {
            army_max_size: Self::MAX_ARMY_SIZE,
            distance_radius: Self::DEFAULT_DISTANCE_RADIUS,
            food_per_shrink_step: Self::DEFAULT_FOOD_PER_SHRINK_STEP,
            building_bonus_per_mill: Self::DEFAULT_BUILDING_BONUS_PER_MILL,
        }
    }

    pub fn with_army_max_size(mut self, army_max_size: usize) -> Self {
        self.army_max_size = army_max_size.clamp(1, Self::MAX_ARMY_SIZE);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
