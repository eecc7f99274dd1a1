//! Built-in content set.

use std::collections::BTreeMap;

use armies_core::state::{CityProperties, RecruitCounters, UnitProperties, WeaponStats};
use armies_core::{
    CellValue, CityClass, CityOracle, MoveCosts, Resource, ResourceBag, TablesOracle, UnitClass,
    UnitOracle, WeaponKind,
};

use crate::tables::TileTables;

/// Content oracle backed by in-memory tables.
///
/// Start from [`StandardContent::standard`] and replace individual tables
/// with the `with_*` builders, or let [`crate::ContentFactory`] do it from
/// data files.
#[derive(Clone, Debug, Default)]
pub struct StandardContent {
    units: BTreeMap<UnitClass, UnitProperties>,
    cities: BTreeMap<CityClass, CityProperties>,
    camps: BTreeMap<CellValue, RecruitCounters>,
    tables: TileTables,
}

impl StandardContent {
    /// Empty content: every template lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        Self {
            units: standard_units(),
            cities: BTreeMap::from([(CityClass::Default, standard_city())]),
            camps: standard_camps(),
            tables: TileTables::standard(),
        }
    }

    /// Unit templates; meters are refilled to their maxima.
    pub fn with_units(mut self, units: BTreeMap<UnitClass, UnitProperties>) -> Self {
        self.units = units
            .into_iter()
            .map(|(class, properties)| (class, properties.at_max()))
            .collect();
        self
    }

    pub fn with_cities(mut self, cities: BTreeMap<CityClass, CityProperties>) -> Self {
        self.cities = cities;
        self
    }

    pub fn with_camps(mut self, camps: BTreeMap<CellValue, RecruitCounters>) -> Self {
        self.camps = camps;
        self
    }

    pub fn with_tables(mut self, tables: TileTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn tables(&self) -> &TileTables {
        &self.tables
    }
}

impl UnitOracle for StandardContent {
    fn unit_template(&self, class: UnitClass) -> Option<UnitProperties> {
        self.units.get(&class).cloned()
    }
}

impl CityOracle for StandardContent {
    fn city_template(&self, class: CityClass) -> Option<CityProperties> {
        self.cities.get(&class).cloned()
    }

    fn camp_template(&self, camp: CellValue) -> Option<RecruitCounters> {
        self.camps.get(&camp).cloned()
    }
}

impl TablesOracle for StandardContent {
    fn move_costs(&self) -> MoveCosts {
        self.tables.move_costs
    }

    fn tile_cost(&self, value: CellValue) -> Option<ResourceBag> {
        self.tables.tile_cost(value)
    }

    fn tile_production(
        &self,
        ground: CellValue,
        impassable: CellValue,
        objects: CellValue,
    ) -> Option<Vec<Resource>> {
        self.tables.tile_production(ground, impassable, objects)
    }
}

fn unit(
    life: i32,
    moves: i32,
    weapons: &[(WeaponKind, i32, i32, i32)],
    cost: ResourceBag,
    upkeep: ResourceBag,
) -> UnitProperties {
    UnitProperties {
        max_life_points: life,
        max_move_points: moves,
        max_action_points: 1,
        weapons: weapons
            .iter()
            .map(|&(kind, attack, defense, range)| {
                (
                    kind,
                    WeaponStats {
                        attack,
                        defense,
                        range,
                    },
                )
            })
            .collect(),
        cost,
        upkeep,
        ..UnitProperties::default()
    }
    .at_max()
}

fn standard_units() -> BTreeMap<UnitClass, UnitProperties> {
    use Resource::{Gold as G, Stone as S, Wood as W};
    use WeaponKind::*;

    let worker = || {
        unit(
            5,
            12,
            &[(Melee, 1, 1, 1)],
            ResourceBag::from([(G, 10)]),
            ResourceBag::from([(G, 1)]),
        )
    };
    BTreeMap::from([
        (UnitClass::Worker, worker()),
        (UnitClass::Farmer, worker()),
        (
            UnitClass::Pikeman,
            unit(
                10,
                9,
                &[(Melee, 4, 3, 1), (Mount, 0, 6, 1)],
                ResourceBag::from([(W, 10), (G, 10)]),
                ResourceBag::from([(G, 1)]),
            ),
        ),
        (
            UnitClass::Bowman,
            unit(
                8,
                9,
                &[(Melee, 1, 2, 1), (Bow, 5, 1, 3)],
                ResourceBag::from([(W, 20), (G, 10)]),
                ResourceBag::from([(G, 1)]),
            ),
        ),
        (
            UnitClass::Swordsman,
            unit(
                12,
                9,
                &[(Melee, 6, 5, 1), (Bow, 0, 3, 1)],
                ResourceBag::from([(S, 10), (G, 20)]),
                ResourceBag::from([(G, 2)]),
            ),
        ),
        (
            UnitClass::Knight,
            unit(
                15,
                15,
                &[(Melee, 5, 5, 1), (Mount, 8, 4, 1)],
                ResourceBag::from([(S, 10), (G, 40)]),
                ResourceBag::from([(G, 3)]),
            ),
        ),
        (
            UnitClass::Catapult,
            unit(
                8,
                6,
                &[(Siege, 10, 0, 5)],
                ResourceBag::from([(W, 40), (S, 20)]),
                ResourceBag::from([(G, 2)]),
            ),
        ),
    ])
}

fn standard_city() -> CityProperties {
    use Resource::{Food as F, Gold as G, Stone as S, Wood as W};

    CityProperties {
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
    }
}

fn standard_camps() -> BTreeMap<CellValue, RecruitCounters> {
    BTreeMap::from([
        (CellValue::Camp, RecruitCounters::single(UnitClass::Pikeman, 1)),
        (CellValue::BowCamp, RecruitCounters::single(UnitClass::Bowman, 1)),
        (CellValue::SwordCamp, RecruitCounters::single(UnitClass::Swordsman, 1)),
        (CellValue::KnightCamp, RecruitCounters::single(UnitClass::Knight, 1)),
        (CellValue::SiegeCamp, RecruitCounters::single(UnitClass::Catapult, 1)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use armies_core::ContentOracle;

    #[test]
    fn every_recruitable_class_has_a_template() {
        let content = StandardContent::standard();
        for class in [
            UnitClass::Worker,
            UnitClass::Farmer,
            UnitClass::Bowman,
            UnitClass::Pikeman,
            UnitClass::Swordsman,
            UnitClass::Knight,
            UnitClass::Catapult,
        ] {
            let template = content.require_unit(class).unwrap();
            assert_eq!(template.life_points, template.max_life_points);
            assert_eq!(template.move_points, template.max_move_points);
            assert!(!template.cost.is_empty());
        }
        assert!(content.unit_template(UnitClass::None).is_none());
    }

    #[test]
    fn camps_recruit_one_class_each() {
        let content = StandardContent::standard();
        for camp in CellValue::TRAINING_CAMPS {
            let counters = content.require_camp(camp).unwrap();
            assert_eq!(counters.recruit_max.len(), 1);
        }
        assert!(content.camp_template(CellValue::Mill).is_none());
    }

    #[test]
    fn empty_content_misses_everything() {
        let content = StandardContent::new();
        assert!(content.require_city(CityClass::Default).is_err());
        assert!(content.require_tile_cost(CellValue::Trees).is_err());
    }
}
