//! Terrain balance tables.

use std::collections::BTreeMap;

use armies_core::{CellValue, MoveCosts, Resource, ResourceBag};

/// What a worker yields on one ground/impassable/objects combination.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductionRule {
    pub ground: CellValue,
    #[cfg_attr(feature = "serde", serde(default))]
    pub impassable: CellValue,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objects: CellValue,
    pub resources: Vec<Resource>,
}

impl ProductionRule {
    pub fn new(
        ground: CellValue,
        impassable: CellValue,
        objects: CellValue,
        resources: &[Resource],
    ) -> Self {
        Self {
            ground,
            impassable,
            objects,
            resources: resources.to_vec(),
        }
    }

    fn matches(&self, ground: CellValue, impassable: CellValue, objects: CellValue) -> bool {
        self.ground == ground && self.impassable == impassable && self.objects == objects
    }
}

/// Move-cost tiers, build prices and tile production.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TileTables {
    pub move_costs: MoveCosts,
    /// Price of placing a value on the objects layer; `NONE` prices clearing.
    pub tile_costs: BTreeMap<CellValue, ResourceBag>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub production: Vec<ProductionRule>,
}

impl TileTables {
    pub fn standard() -> Self {
        use CellValue::*;
        use Resource::{Food as F, Gold as G, Stone as S, Wood as W};

        let tile_costs = BTreeMap::from([
            (Empty, ResourceBag::from([(G, 10)])),
            (Trees, ResourceBag::from([(G, 10)])),
            (RoadDirt, ResourceBag::new()),
            (RoadStone, ResourceBag::from([(S, 1)])),
            (Farm, ResourceBag::new()),
            (Mill, ResourceBag::from([(W, 10)])),
            (Bakery, ResourceBag::from([(S, 40)])),
            (Sawmill, ResourceBag::from([(W, 10)])),
            (Factory, ResourceBag::from([(S, 40)])),
            (Market, ResourceBag::from([(W, 10)])),
            (Bank, ResourceBag::from([(S, 40)])),
            (Camp, ResourceBag::from([(W, 10)])),
            (BowCamp, ResourceBag::from([(W, 10)])),
            (SwordCamp, ResourceBag::from([(W, 10), (S, 10)])),
            (KnightCamp, ResourceBag::from([(W, 20), (S, 20)])),
            (SiegeCamp, ResourceBag::from([(W, 20), (G, 20)])),
        ]);

        let production = vec![
            ProductionRule::new(Earth, Empty, Empty, &[F, F]),
            ProductionRule::new(Earth, Empty, Hill, &[F]),
            ProductionRule::new(Earth, Empty, Rocks, &[S, S]),
            ProductionRule::new(Earth, Empty, Trees, &[W, W, F]),
            ProductionRule::new(Earth, Empty, Mill, &[F, F, F, G]),
            ProductionRule::new(Earth, Empty, RoadDirt, &[F, F, G]),
            ProductionRule::new(Earth, Empty, RoadStone, &[F, F, G, G]),
            ProductionRule::new(Earth, Empty, Farm, &[F, F, F, F]),
            ProductionRule::new(Earth, Pond, Empty, &[F, F, F]),
            ProductionRule::new(Earth, River, Empty, &[F, F, G]),
            ProductionRule::new(Earth, Mountain, Empty, &[S]),
            ProductionRule::new(Sea, Empty, Empty, &[F, G]),
        ];

        Self {
            move_costs: MoveCosts::default(),
            tile_costs,
            production,
        }
    }

    pub fn tile_cost(&self, value: CellValue) -> Option<ResourceBag> {
        self.tile_costs.get(&value).cloned()
    }

    pub fn tile_production(
        &self,
        ground: CellValue,
        impassable: CellValue,
        objects: CellValue,
    ) -> Option<Vec<Resource>> {
        self.production
            .iter()
            .find(|rule| rule.matches(ground, impassable, objects))
            .map(|rule| rule.resources.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mills_yield_more_than_bare_earth() {
        let tables = TileTables::standard();
        let bare = tables
            .tile_production(CellValue::Earth, CellValue::Empty, CellValue::Empty)
            .unwrap();
        let mill = tables
            .tile_production(CellValue::Earth, CellValue::Empty, CellValue::Mill)
            .unwrap();
        assert_eq!(bare.len(), 2);
        assert_eq!(mill.len(), 4);
    }

    #[test]
    fn unknown_combinations_yield_nothing() {
        let tables = TileTables::standard();
        assert_eq!(
            tables.tile_production(CellValue::Sea, CellValue::River, CellValue::Empty),
            None
        );
        assert_eq!(tables.tile_cost(CellValue::City), None);
        assert_eq!(tables.tile_cost(CellValue::RoadDirt), Some(ResourceBag::new()));
    }
}
