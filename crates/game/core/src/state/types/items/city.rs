use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{CellValue, CityClass, Resource, ResourceBag, UnitClass};
use crate::state::{PlayerId, Position};

/// Per-class recruitment counters of a city or training camp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecruitCounters {
    pub recruit: BTreeMap<UnitClass, i32>,
    pub recruit_max: BTreeMap<UnitClass, i32>,
}

impl RecruitCounters {
    /// Counters allowing `max` recruits of one class per turn.
    pub fn single(class: UnitClass, max: i32) -> Self {
        Self {
            recruit: BTreeMap::from([(class, 0)]),
            recruit_max: BTreeMap::from([(class, max)]),
        }
    }

    pub fn recruited(&self, class: UnitClass) -> i32 {
        self.recruit.get(&class).copied().unwrap_or(0)
    }

    pub fn max(&self, class: UnitClass) -> i32 {
        self.recruit_max.get(&class).copied().unwrap_or(0)
    }

    /// Zeroes every recruited counter, keeping the classes.
    pub fn reset(&mut self) {
        self.recruit.values_mut().for_each(|count| *count = 0);
    }
}

/// Typed property set of a city. Also used as the template a city class starts from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CityProperties {
    pub name: String,
    pub citizen_count: i32,
    pub citizen_count_max: i32,
    pub worker_count: i32,
    pub worker_count_max: i32,
    pub wall_level: i32,
    pub wall_level_max: i32,
    pub base_production: Vec<Resource>,
    pub merchant_production: Vec<Resource>,
    pub granary_food: i32,
    pub granary_food_max: i32,
    pub growth_points: i32,
    pub growth_points_rate: i32,
    pub growth_points_min: i32,
    pub growth_points_max: i32,
    pub citizen_upkeep: Vec<Resource>,
    pub buildings_upkeep: BTreeMap<CellValue, ResourceBag>,
    pub recruits: RecruitCounters,
}

impl CityProperties {
    /// Idle citizens, who trade instead of working a tile.
    pub fn merchant_count(&self) -> i32 {
        self.citizen_count - self.worker_count
    }

    pub fn building_upkeep(&self, building: CellValue) -> Option<&ResourceBag> {
        self.buildings_upkeep.get(&building)
    }
}

/// A 2×2 settlement and the set of cells it claims.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub class: CityClass,
    pub player: PlayerId,
    pub cells: BTreeSet<Position>,
    pub properties: CityProperties,
}

impl City {
    pub fn new(class: CityClass, player: PlayerId, properties: CityProperties) -> Self {
        debug_assert!(player.is_valid(), "invalid player id {player}");
        Self {
            class,
            player,
            cells: BTreeSet::new(),
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.properties.name
    }

    pub fn is_assigned(&self, cell: Position) -> bool {
        self.cells.contains(&cell)
    }
}

/// Recruitment site for one unit class, owned by a player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingCamp {
    pub player: PlayerId,
    pub recruits: RecruitCounters,
}

impl TrainingCamp {
    pub fn new(player: PlayerId, recruits: RecruitCounters) -> Self {
        debug_assert!(player.is_valid(), "invalid player id {player}");
        Self { player, recruits }
    }
}
