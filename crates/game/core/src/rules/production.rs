use std::collections::BTreeMap;

use super::{CITY_AREA, HOUSE_AREA, Rules};
use crate::constants::{CellUsage, CellValue, Resource, ResourceBag};
use crate::state::{ItemId, PlayerId, Position};

/// Per-turn production of one city, broken down by source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CityProduction {
    pub base: ResourceBag,
    pub merchants: ResourceBag,
    pub workers: ResourceBag,
    pub mills: ResourceBag,
    pub bakery: ResourceBag,
    pub sawmills: ResourceBag,
    pub factory: ResourceBag,
    pub markets: ResourceBag,
    pub bank: ResourceBag,
    pub total: ResourceBag,
    pub upkeep: ResourceBag,
    /// `total - upkeep`.
    pub balance: ResourceBag,
}

/// Upkeep owed by one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitUpkeep {
    pub cell: Position,
    pub index: usize,
    pub upkeep: ResourceBag,
}

/// Per-turn production of a player summed over cities and units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerProduction {
    pub total: ResourceBag,
    pub upkeep: ResourceBag,
    pub balance: ResourceBag,
    pub cities: Vec<(ItemId, CityProduction)>,
    pub units: Vec<UnitUpkeep>,
}

/// A worked or workable cell and what it yields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellYield {
    pub cell: Position,
    pub production: ResourceBag,
}

impl Rules<'_> {
    pub fn compute_city_production(&self, id: ItemId) -> CityProduction {
        let Some(city) = self.city(id) else {
            return CityProduction::default();
        };
        let properties = &city.properties;
        let objects = self.world().objects();
        let mut production = CityProduction::default();

        production.base.add_list(&properties.base_production, 1);
        production.total = production.base.clone();

        let mut buildings: BTreeMap<CellValue, i32> = BTreeMap::new();
        for cell in &city.cells {
            match self.city_cell_usage(*cell) {
                CellUsage::Worker => {
                    let resources = self.compute_cell_resources(*cell);
                    production.workers.add_list(&resources, 1);
                    production.total.add_list(&resources, 1);
                }
                CellUsage::ProductionBuilding => {
                    *buildings.entry(objects.get(*cell)).or_default() += 1;
                }
                _ => {}
            }
        }

        let merchants = properties.merchant_count();
        production
            .merchants
            .add_list(&properties.merchant_production, merchants);
        production
            .total
            .add_list(&properties.merchant_production, merchants);

        production
            .upkeep
            .add_list(&properties.citizen_upkeep, properties.citizen_count);
        for (building, count) in &buildings {
            if let Some(upkeep) = properties.building_upkeep(*building) {
                production.upkeep.add_bag(upkeep, *count);
            }
        }

        let per_building = self.config().building_bonus_per_mill;
        let count = |value: CellValue| buildings.get(&value).copied().unwrap_or(0);
        let mut bonus = |resource: Resource, first: CellValue, second: CellValue| {
            let amount = production
                .total
                .get(resource)
                .min(per_building * count(first));
            let doubled = if count(second) > 0 { amount } else { 0 };
            production.total.add(resource, amount + doubled);
            (
                ResourceBag::from([(resource, amount)]),
                ResourceBag::from([(resource, doubled)]),
            )
        };
        let (mills, bakery) = bonus(Resource::Food, CellValue::Mill, CellValue::Bakery);
        let (sawmills, factory) = bonus(Resource::Wood, CellValue::Sawmill, CellValue::Factory);
        let (markets, bank) = bonus(Resource::Gold, CellValue::Market, CellValue::Bank);
        production.mills = mills;
        production.bakery = bakery;
        production.sawmills = sawmills;
        production.factory = factory;
        production.markets = markets;
        production.bank = bank;

        production.balance = production.total.clone();
        production.balance.add_bag(&production.upkeep, -1);
        production
    }

    /// Cells the city currently works, optionally sorted by ascending yield of
    /// `sort_by` (so the least useful worker comes first).
    pub fn compute_city_workers_production(
        &self,
        id: ItemId,
        sort_by: Option<Resource>,
    ) -> Vec<CellYield> {
        let (Some(city), Some(city_cell)) = (self.city(id), self.city_cell(id)) else {
            return Vec::new();
        };
        let mut cells: Vec<CellYield> = city
            .cells
            .iter()
            .filter(|cell| self.city_cell_usage(**cell) == CellUsage::Worker)
            .map(|cell| self.cell_yield(*cell))
            .collect();
        if let Some(resource) = sort_by {
            cells.sort_by_key(|cell| yield_rank(city_cell, cell, resource));
        }
        cells
    }

    /// Workable cells of the city area nobody claims, optionally sorted by
    /// descending yield of `sort_by`.
    pub fn find_city_unworked_cells(
        &self,
        id: ItemId,
        sort_by: Option<Resource>,
    ) -> Vec<CellYield> {
        let (Some(city), Some(city_cell)) = (self.city(id), self.city_cell(id)) else {
            return Vec::new();
        };
        let world = self.world();
        let mut cells: Vec<CellYield> = CITY_AREA
            .cells(city_cell)
            .filter(|cell| world.contains(*cell))
            .filter(|cell| !world.assignments().has(*cell))
            .filter(|cell| !HOUSE_AREA.contains(city_cell, *cell))
            .filter(|cell| !city.is_assigned(*cell))
            .filter(|cell| self.city_cell_usage(*cell) == CellUsage::Worker)
            .map(|cell| self.cell_yield(cell))
            .filter(|cell| !cell.production.is_empty())
            .collect();
        if let Some(resource) = sort_by {
            cells.sort_by(|a, b| {
                yield_rank(city_cell, b, resource).cmp(&yield_rank(city_cell, a, resource))
            });
        }
        cells
    }

    fn cell_yield(&self, cell: Position) -> CellYield {
        let mut production = ResourceBag::new();
        production.add_list(&self.compute_cell_resources(cell), 1);
        CellYield { cell, production }
    }

    pub fn compute_player_production(&self, player: PlayerId) -> PlayerProduction {
        let mut production = PlayerProduction::default();
        for (_, id) in self.player_cities(player) {
            let city = self.compute_city_production(id);
            production.total.add_bag(&city.total, 1);
            production.upkeep.add_bag(&city.upkeep, 1);
            production.balance.add_bag(&city.balance, 1);
            production.cities.push((id, city));
        }
        for placed in self.player_units(player) {
            let upkeep = placed.unit.properties.upkeep.clone();
            production.upkeep.add_bag(&upkeep, 1);
            production.balance.add_bag(&upkeep, -1);
            production.units.push(UnitUpkeep {
                cell: placed.cell,
                index: placed.index,
                upkeep,
            });
        }
        production
    }
}

/// Ranks a cell by yield of `resource`, then proximity to the city, then a
/// position hash that breaks ties deterministically. Cells without the
/// resource rank 0.
///
/// Distances are measured from the footprint center and scaled by 4 to stay
/// integral.
fn yield_rank(city_cell: Position, cell: &CellYield, resource: Resource) -> i64 {
    if !cell.production.contains(resource) {
        return 0;
    }
    let amount = i64::from(cell.production.get(resource));
    let dx = i64::from(2 * (cell.cell.x - city_cell.x) - 1);
    let dy = i64::from(2 * (cell.cell.y - city_cell.y) - 1);
    let hash = i64::from((3 * cell.cell.x + 7 * cell.cell.y).rem_euclid(10));
    (amount * 40_000 + 40_000 - (dx * dx + dy * dy)) * 10 + 4 * hash
}
