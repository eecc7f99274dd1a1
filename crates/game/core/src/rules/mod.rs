//! Read-only game rules.
//!
//! [`Rules`] answers questions about the current state (city geometry, cell
//! usage, production, recruitment) without mutating anything. Commands call
//! it during `check`; the few rule-driven mutations (auto-assigning
//! citizens, removing units) live on [`Logic`](crate::engine::Logic).
mod geometry;
mod production;

pub use geometry::{AreaMask, CITY_AREA, HOUSE_AREA};
pub use production::{CellYield, CityProduction, PlayerProduction, UnitUpkeep};

use crate::config::GameConfig;
use crate::constants::{CellUsage, CellValue, LayerKind, Resource, WorldType};
use crate::env::ContentOracle;
use crate::state::{City, GameState, Item, ItemId, PlayerId, Position, RecruitCounters, Unit, World};

/// A unit located by its cell and its index in the cell's stack.
#[derive(Clone, Copy, Debug)]
pub struct PlacedUnit<'a> {
    pub cell: Position,
    pub index: usize,
    pub unit: &'a Unit,
}

/// Stateless queries over a game state and its content.
#[derive(Clone, Copy)]
pub struct Rules<'a> {
    state: &'a GameState,
    content: &'a dyn ContentOracle,
    config: &'a GameConfig,
}

impl<'a> Rules<'a> {
    pub fn new(state: &'a GameState, content: &'a dyn ContentOracle, config: &'a GameConfig) -> Self {
        Self {
            state,
            content,
            config,
        }
    }

    pub fn state(&self) -> &'a GameState {
        self.state
    }

    pub fn world(&self) -> &'a World {
        &self.state.world
    }

    pub fn content(&self) -> &'a dyn ContentOracle {
        self.content
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Largest stack allowed on one cell.
    pub fn army_max_size(&self) -> usize {
        match self.world().world_type() {
            WorldType::Strategic => self.config.army_max_size.min(GameConfig::MAX_ARMY_SIZE),
            WorldType::Tactic => 1,
        }
    }

    // ===== cities =====

    /// Top-left cell of the city covering `cell`.
    pub fn city_top_left(&self, cell: Position) -> Option<Position> {
        let world = self.world();
        let id = world.city_id_at(cell)?;
        world
            .objects()
            .item_cells(id)
            .into_iter()
            .min_by_key(|cell| (cell.y, cell.x))
    }

    /// Top-left cell and id of the city covering `cell`.
    pub fn city_at(&self, cell: Position) -> Option<(Position, ItemId)> {
        let id = self.world().city_id_at(cell)?;
        Some((self.city_top_left(cell)?, id))
    }

    /// Top-left cell of a city by id.
    pub fn city_cell(&self, id: ItemId) -> Option<Position> {
        self.world()
            .objects()
            .item_cells(id)
            .into_iter()
            .min_by_key(|cell| (cell.y, cell.x))
    }

    pub fn city(&self, id: ItemId) -> Option<&'a City> {
        self.world().city(id)
    }

    /// Whether `cell` lies in the claimable disc of the city at `city_cell`.
    pub fn is_in_city_area(&self, city_cell: Position, cell: Position) -> bool {
        let top_left = self.city_top_left(city_cell).unwrap_or(city_cell);
        CITY_AREA.contains(top_left, cell)
    }

    /// Free earth cells in the house ring where a new house can appear.
    pub fn find_city_tiles_for_new_houses(&self, city_cell: Position) -> Vec<Position> {
        let world = self.world();
        HOUSE_AREA
            .cells(city_cell)
            .filter(|cell| world.contains(*cell))
            .filter(|cell| {
                world.ground().get(*cell) == CellValue::Earth
                    && world.impassable().get(*cell).is_empty()
                    && world.objects().get(*cell).is_empty()
            })
            .collect()
    }

    /// Houses in the house ring that no city claims.
    pub fn find_city_unassigned_houses(&self, city_cell: Position) -> Vec<Position> {
        let world = self.world();
        HOUSE_AREA
            .cells(city_cell)
            .filter(|cell| world.contains(*cell))
            .filter(|cell| {
                world.objects().get(*cell) == CellValue::Houses
                    && !world.assignments().has(*cell)
            })
            .collect()
    }

    /// What a worker would yield on `cell`; nothing on buildings and camps.
    pub fn compute_cell_resources(&self, cell: Position) -> Vec<Resource> {
        let world = self.world();
        if !world.contains(cell) {
            return Vec::new();
        }
        let objects = world.objects().get(cell);
        if objects.is_production_building() || objects.is_training_camp() {
            return Vec::new();
        }
        self.content
            .tile_production(world.ground().get(cell), world.impassable().get(cell), objects)
            .unwrap_or_default()
    }

    pub fn city_cell_usage(&self, cell: Position) -> CellUsage {
        let value = self.world().objects().get(cell);
        if value == CellValue::Houses {
            CellUsage::House
        } else if value.is_production_building() {
            CellUsage::ProductionBuilding
        } else if value.is_training_camp() {
            CellUsage::TrainingCamp
        } else if !self.compute_cell_resources(cell).is_empty() {
            CellUsage::Worker
        } else {
            CellUsage::None
        }
    }

    /// Production buildings the city currently runs.
    pub fn city_buildings(&self, id: ItemId) -> Vec<(Position, CellValue)> {
        let Some(city) = self.city(id) else {
            return Vec::new();
        };
        let objects = self.world().objects();
        city.cells
            .iter()
            .filter(|cell| self.city_cell_usage(**cell) == CellUsage::ProductionBuilding)
            .map(|cell| (*cell, objects.get(*cell)))
            .collect()
    }

    pub fn city_granary_size(&self, id: ItemId) -> i32 {
        self.city(id)
            .map_or(0, |city| city.properties.granary_food_max)
    }

    /// Growth points needed before the city adds a house.
    pub fn city_growth_max(&self, id: ItemId) -> i32 {
        let Some(city) = self.city(id) else {
            return 0;
        };
        let properties = &city.properties;
        let rate = properties.growth_points_rate.max(1);
        (properties.citizen_count / rate)
            .max(properties.growth_points_min)
            .min(properties.growth_points_max)
    }

    /// Every cell holding a city, by top-left cell, in raster order.
    pub fn cities(&self) -> Vec<(Position, ItemId)> {
        let world = self.world();
        let mut cities: Vec<(Position, ItemId)> = Vec::new();
        for cell in world.objects().find_values(&[CellValue::City]) {
            let Some(id) = world.city_id_at(cell) else {
                continue;
            };
            if cities.iter().any(|(_, known)| *known == id) {
                continue;
            }
            if let Some(top_left) = self.city_cell(id) {
                cities.push((top_left, id));
            }
        }
        cities
    }

    /// City with a footprint cell nearest to `cell`, first in raster order on ties.
    pub fn find_closest_city(&self, cell: Position) -> Option<(Position, ItemId)> {
        let world = self.world();
        let mut closest: Option<(i32, ItemId)> = None;
        for city_cell in world.objects().find_values(&[CellValue::City]) {
            let Some(id) = world.city_id_at(city_cell) else {
                continue;
            };
            let distance = cell.rounded_distance(city_cell);
            if closest.is_none_or(|(best, _)| distance < best) {
                closest = Some((distance, id));
            }
        }
        let (_, id) = closest?;
        Some((self.city_cell(id)?, id))
    }

    pub fn player_cities(&self, player: PlayerId) -> Vec<(Position, ItemId)> {
        self.cities()
            .into_iter()
            .filter(|(_, id)| self.city(*id).is_some_and(|city| city.player == player))
            .collect()
    }

    // ===== training camps & recruitment =====

    pub fn find_training_camps(&self) -> Vec<Position> {
        self.world()
            .objects()
            .find_values(&CellValue::TRAINING_CAMPS)
    }

    /// Recruit counters of the city summed with those of its camps.
    pub fn city_recruit_state(&self, id: ItemId) -> RecruitCounters {
        let Some(city) = self.city(id) else {
            return RecruitCounters::default();
        };
        let world = self.world();
        let mut state = city.properties.recruits.clone();
        for cell in &city.cells {
            if !world.objects().get(*cell).is_training_camp() {
                continue;
            }
            let Some(Item::TrainingCamp(camp)) = world.item_at(LayerKind::Objects, *cell) else {
                continue;
            };
            for (class, count) in &camp.recruits.recruit {
                *state.recruit.entry(*class).or_default() += count;
            }
            for (class, count) in &camp.recruits.recruit_max {
                *state.recruit_max.entry(*class).or_default() += count;
            }
        }
        state
    }

    // ===== units =====

    /// Every unit a player owns, whether alone or inside an army.
    pub fn player_units(&self, player: PlayerId) -> Vec<PlacedUnit<'a>> {
        let world = self.world();
        world
            .items_by_players(LayerKind::Units, &[player])
            .into_iter()
            .flat_map(|group| {
                let cell = group.cells[0];
                world
                    .units_at(cell)
                    .iter()
                    .enumerate()
                    .map(move |(index, unit)| PlacedUnit { cell, index, unit })
            })
            .collect()
    }
}
