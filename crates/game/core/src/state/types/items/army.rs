use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use super::{Unit, UnitProperties};
use crate::config::GameConfig;
use crate::constants::UnitClass;
use crate::state::PlayerId;

/// Units stacked on one cell, in arrival order.
pub type UnitStack = ArrayVec<Unit, { GameConfig::MAX_ARMY_SIZE }>;

/// A player-owned stack of at least two units.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Army {
    pub player: PlayerId,
    pub units: UnitStack,
}

impl Army {
    pub fn new(player: PlayerId, units: UnitStack) -> Self {
        Self { player, units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit whose class is most common; ties go to the higher class.
    pub fn representative_unit(&self) -> Option<&Unit> {
        let mut counts: BTreeMap<UnitClass, usize> = BTreeMap::new();
        let mut best: Option<(&Unit, usize)> = None;
        for unit in &self.units {
            let count = counts.entry(unit.class).or_default();
            *count += 1;
            best = match best {
                Some((current, best_count))
                    if *count < best_count
                        || (*count == best_count && unit.class <= current.class) =>
                {
                    Some((current, best_count))
                }
                _ => Some((unit, *count)),
            };
        }
        best.map(|(unit, _)| unit)
    }

    /// Lowest value of a property among the selected units (all when `None`).
    pub fn lowest(
        &self,
        selection: Option<&[usize]>,
        read: impl Fn(&UnitProperties) -> i32,
    ) -> Option<i32> {
        self.units
            .iter()
            .enumerate()
            .filter(|(index, _)| selection.is_none_or(|selected| selected.contains(index)))
            .map(|(_, unit)| read(&unit.properties))
            .min()
    }
}
