//! Fixtures shared by the unit tests of this crate.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::constants::{
    CellValue, CityClass, LayerKind, Resource, ResourceBag, UnitClass, WeaponKind, WorldType,
};
use crate::engine::Logic;
use crate::env::{CityOracle, MoveCosts, TablesOracle, UnitOracle};
use crate::state::{
    City, CityProperties, GameState, Item, ItemId, Player, PlayerId, Position, RecruitCounters,
    Unit, UnitProperties, WeaponStats, World,
};

use Resource::{Food as F, Gold as G, Stone as S, Wood as W};

/// Small, fixed content set mirroring the default balance tables.
#[derive(Clone, Debug, Default)]
pub struct TestContent;

impl TestContent {
    pub fn new() -> Self {
        Self
    }
}

fn weapons(entries: &[(WeaponKind, i32, i32, i32)]) -> BTreeMap<WeaponKind, WeaponStats> {
    entries
        .iter()
        .map(|(kind, attack, defense, range)| {
            (
                *kind,
                WeaponStats {
                    attack: *attack,
                    defense: *defense,
                    range: *range,
                },
            )
        })
        .collect()
}

fn stats(life: i32, moves: i32, weapons: BTreeMap<WeaponKind, WeaponStats>) -> UnitProperties {
    UnitProperties {
        max_life_points: life,
        max_move_points: moves,
        max_action_points: 1,
        weapons,
        ..UnitProperties::default()
    }
}

impl UnitOracle for TestContent {
    fn unit_template(&self, class: UnitClass) -> Option<UnitProperties> {
        use WeaponKind::*;
        let (mut properties, cost, upkeep) = match class {
            UnitClass::None => return None,
            UnitClass::Worker | UnitClass::Farmer => (
                stats(5, 12, weapons(&[(Melee, 1, 1, 1)])),
                ResourceBag::from([(G, 10)]),
                ResourceBag::from([(G, 1)]),
            ),
            UnitClass::Pikeman => (
                stats(10, 9, weapons(&[(Melee, 4, 3, 1), (Mount, 0, 6, 1)])),
                ResourceBag::from([(W, 10), (G, 10)]),
                ResourceBag::from([(G, 1)]),
            ),
            UnitClass::Bowman => (
                stats(8, 9, weapons(&[(Melee, 1, 2, 1), (Bow, 5, 1, 3)])),
                ResourceBag::from([(W, 20), (G, 10)]),
                ResourceBag::from([(G, 1)]),
            ),
            UnitClass::Swordsman => (
                stats(12, 9, weapons(&[(Melee, 6, 5, 1), (Bow, 0, 3, 1)])),
                ResourceBag::from([(S, 10), (G, 20)]),
                ResourceBag::from([(G, 2)]),
            ),
            UnitClass::Knight => (
                stats(15, 15, weapons(&[(Melee, 5, 5, 1), (Mount, 8, 4, 1)])),
                ResourceBag::from([(S, 10), (G, 40)]),
                ResourceBag::from([(G, 3)]),
            ),
            UnitClass::Catapult => (
                stats(8, 6, weapons(&[(Siege, 10, 0, 5)])),
                ResourceBag::from([(W, 40), (S, 20)]),
                ResourceBag::from([(G, 2)]),
            ),
        };
        properties.cost = cost;
        properties.upkeep = upkeep;
        Some(properties.at_max())
    }
}

impl CityOracle for TestContent {
    fn city_template(&self, class: CityClass) -> Option<CityProperties> {
        match class {
            CityClass::Default => Some(CityProperties {
                name: "NoName".to_string(),
                citizen_count_max: 28,
                worker_count_max: 28,
                wall_level_max: 2,
                merchant_production: vec![G, G],
                base_production: vec![F, F, G, G],
                granary_food_max: 5,
                growth_points_rate: 4,
                growth_points_min: 1,
                growth_points_max: 4,
                citizen_upkeep: vec![F, F],
                buildings_upkeep: BTreeMap::from([
                    (CellValue::Mill, ResourceBag::from([(W, 1)])),
                    (CellValue::Bakery, ResourceBag::from([(W, 2), (S, 1)])),
                    (CellValue::Sawmill, ResourceBag::from([(W, 1)])),
                    (CellValue::Factory, ResourceBag::from([(W, 2), (S, 1)])),
                    (CellValue::Market, ResourceBag::from([(W, 1)])),
                    (CellValue::Bank, ResourceBag::from([(W, 2), (S, 1)])),
                ]),
                recruits: RecruitCounters::single(UnitClass::Worker, 1),
                ..CityProperties::default()
            }),
        }
    }

    fn camp_template(&self, camp: CellValue) -> Option<RecruitCounters> {
        let class = match camp {
            CellValue::Camp => UnitClass::Pikeman,
            CellValue::BowCamp => UnitClass::Bowman,
            CellValue::SwordCamp => UnitClass::Swordsman,
            CellValue::KnightCamp => UnitClass::Knight,
            CellValue::SiegeCamp => UnitClass::Catapult,
            _ => return None,
        };
        Some(RecruitCounters::single(class, 1))
    }
}

impl TablesOracle for TestContent {
    fn move_costs(&self) -> MoveCosts {
        MoveCosts::default()
    }

    fn tile_cost(&self, value: CellValue) -> Option<ResourceBag> {
        use CellValue::*;
        let cost = match value {
            Empty | Trees => ResourceBag::from([(G, 10)]),
            RoadDirt | Farm => ResourceBag::new(),
            RoadStone => ResourceBag::from([(S, 1)]),
            Mill | Sawmill | Market | Camp | BowCamp => ResourceBag::from([(W, 10)]),
            Bakery | Factory | Bank => ResourceBag::from([(S, 40)]),
            SwordCamp => ResourceBag::from([(W, 10), (S, 10)]),
            KnightCamp => ResourceBag::from([(W, 20), (S, 20)]),
            SiegeCamp => ResourceBag::from([(W, 20), (G, 20)]),
            _ => return None,
        };
        Some(cost)
    }

    fn tile_production(
        &self,
        ground: CellValue,
        impassable: CellValue,
        objects: CellValue,
    ) -> Option<Vec<Resource>> {
        use CellValue::*;
        let resources = match (ground, impassable, objects) {
            (Earth, Empty, Empty) => vec![F, F],
            (Earth, Empty, Hill) => vec![F],
            (Earth, Empty, Rocks) => vec![S, S],
            (Earth, Empty, Trees) => vec![W, W, F],
            (Earth, Empty, Mill) => vec![F, F, F, G],
            (Earth, Empty, RoadDirt) => vec![F, F, G],
            (Earth, Empty, RoadStone) => vec![F, F, G, G],
            (Earth, Empty, Farm) => vec![F, F, F, F],
            (Earth, Pond, Empty) => vec![F, F, F],
            (Earth, River, Empty) => vec![F, F, G],
            (Earth, Mountain, Empty) => vec![S],
            (Sea, Empty, Empty) => vec![F, G],
            _ => return None,
        };
        Some(resources)
    }
}

pub fn content() -> Arc<TestContent> {
    Arc::new(TestContent::new())
}

/// Earth world of `width`×`height` with the given layer kind.
pub fn earth_world(width: i32, height: i32, world_type: WorldType) -> World {
    let mut world = World::new(width, height, world_type);
    world.layer_mut(LayerKind::Ground).fill(CellValue::Earth);
    world
}

/// Fresh city owned by player 1 with the default template.
pub fn new_city(player: PlayerId) -> City {
    let properties = TestContent::new()
        .city_template(CityClass::Default)
        .unwrap_or_default();
    City::new(CityClass::Default, player, properties)
}

/// 32×32 earth world with an unclaimed city footprint at `top_left`.
pub fn city_world(top_left: Position) -> (GameState, ItemId) {
    let mut world = earth_world(32, 32, WorldType::Strategic);
    let footprint = [
        top_left,
        top_left.offset(1, 0),
        top_left.offset(0, 1),
        top_left.offset(1, 1),
    ];
    let id = world.attach_item(
        LayerKind::Objects,
        &footprint,
        CellValue::City,
        Item::City(new_city(PlayerId(1))),
    );
    (two_players(world), id)
}

/// State with players 1 and 2, player 1 to move.
pub fn two_players(world: World) -> GameState {
    GameState::with_players(
        world,
        vec![Player::new(PlayerId(1)), Player::new(PlayerId(2))],
    )
}

pub fn unit(class: UnitClass, player: PlayerId) -> Unit {
    let properties = TestContent::new()
        .unit_template(class)
        .unwrap_or_default();
    Unit::new(class, player, properties)
}

pub fn logic(state: GameState) -> Logic {
    Logic::new(state, content()).with_config(GameConfig::default())
}
