use std::collections::BTreeMap;

use super::items::ItemRefs;
use super::{ItemId, Position};

/// Side table mapping a claimed cell to the city that claims it.
///
/// Kept in lockstep with each city's own cell set by [`super::World::assign`]
/// and [`super::World::unassign`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "AssignmentsData", try_from = "AssignmentsData")
)]
pub struct Assignments {
    width: i32,
    height: i32,
    cities: BTreeMap<Position, ItemId>,
    refs: ItemRefs,
}

impl Assignments {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cities: BTreeMap::new(),
            refs: ItemRefs::default(),
        }
    }

    fn check(&self, cell: Position) {
        assert!(
            0 <= cell.x && cell.x < self.width && 0 <= cell.y && cell.y < self.height,
            "cell {cell} outside {}x{} assignments",
            self.width,
            self.height
        );
    }

    pub fn has(&self, cell: Position) -> bool {
        self.cities.contains_key(&cell)
    }

    pub fn get(&self, cell: Position) -> Option<ItemId> {
        self.cities.get(&cell).copied()
    }

    pub fn set(&mut self, cell: Position, city: Option<ItemId>) {
        self.check(cell);
        let old = match city {
            Some(id) => self.cities.insert(cell, id),
            None => self.cities.remove(&cell),
        };
        self.refs.replace(old, city);
    }

    /// Number of cells claimed by `city`.
    pub fn refs(&self, city: ItemId) -> usize {
        self.refs.count(city)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, ItemId)> + '_ {
        self.cities.iter().map(|(cell, id)| (*cell, *id))
    }

    pub fn cells_of(&self, city: ItemId) -> Vec<Position> {
        self.iter()
            .filter(|(_, id)| *id == city)
            .map(|(cell, _)| cell)
            .collect()
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AssignmentsData {
    pub width: i32,
    pub height: i32,
    pub cities: Vec<(i32, i32, ItemId)>,
}

#[cfg(feature = "serde")]
impl From<Assignments> for AssignmentsData {
    fn from(assignments: Assignments) -> Self {
        Self {
            width: assignments.width,
            height: assignments.height,
            cities: assignments
                .iter()
                .map(|(cell, id)| (cell.x, cell.y, id))
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<AssignmentsData> for Assignments {
    type Error = crate::state::StateError;

    fn try_from(data: AssignmentsData) -> Result<Self, Self::Error> {
        let mut assignments = Assignments::new(data.width, data.height);
        for (x, y, id) in data.cities {
            let cell = Position::new(x, y);
            if !(0..data.width).contains(&x) || !(0..data.height).contains(&y) {
                return Err(crate::state::StateError::CellOutOfBounds(cell));
            }
            assignments.set(cell, Some(id));
        }
        Ok(assignments)
    }
}
