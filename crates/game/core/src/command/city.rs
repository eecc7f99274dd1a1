//! Claiming and releasing city tiles.

use super::{CommandTransition, cell_priority};
use crate::constants::CellUsage;
use crate::engine::{CommandError, Logic};
use crate::state::{City, ItemId, Position};

/// Resolved city and how it uses (or will use) the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CityCellPlan {
    pub city: ItemId,
    pub city_cell: Position,
    pub usage: CellUsage,
}

/// Finds the city at `city_cell` and checks the current player owns it.
fn resolve_city<'a>(
    logic: &'a Logic,
    city_cell: Position,
    ignore_player: bool,
) -> Result<(ItemId, Position, &'a City), CommandError> {
    let world = logic.world();
    if !world.contains(city_cell) {
        return Err(CommandError::OutsideWorld(city_cell));
    }
    let rules = logic.rules();
    let (top_left, id) = rules
        .city_at(city_cell)
        .ok_or(CommandError::NoCity(city_cell))?;
    let city = world.city(id).ok_or(CommandError::NoCity(city_cell))?;
    if !ignore_player && city.player != logic.state().player_id() {
        return Err(CommandError::NotOwner);
    }
    Ok((id, top_left, city))
}

/// Makes the city at `city_cell` claim `cell`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignCell {
    pub city_cell: Position,
    pub cell: Position,
    pub ignore_player: bool,
}

impl AssignCell {
    pub fn new(city_cell: Position, cell: Position) -> Self {
        Self {
            city_cell,
            cell,
            ignore_player: false,
        }
    }

    /// Skips the ownership check; used by rule-driven assignments.
    pub fn ignoring_player(mut self) -> Self {
        self.ignore_player = true;
        self
    }
}

impl CommandTransition for AssignCell {
    type Plan = CityCellPlan;

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<Self::Plan, CommandError> {
        let (city, city_cell, item) = resolve_city(logic, self.city_cell, self.ignore_player)?;
        let world = logic.world();
        let rules = logic.rules();
        let cell = self.cell;
        if !world.contains(cell) {
            return Err(CommandError::OutsideWorld(cell));
        }
        if world.assignments().has(cell) || item.is_assigned(cell) {
            return Err(CommandError::AlreadyAssigned(cell));
        }
        if !rules.is_in_city_area(city_cell, cell) {
            return Err(CommandError::OutsideCityArea(cell));
        }

        let properties = &item.properties;
        let usage = rules.city_cell_usage(cell);
        match usage {
            CellUsage::House => {
                if properties.citizen_count >= properties.citizen_count_max {
                    return Err(CommandError::CityFull);
                }
            }
            CellUsage::Worker => {
                if properties.citizen_count == properties.worker_count {
                    return Err(CommandError::NoIdleCitizen);
                }
                if properties.worker_count >= properties.worker_count_max {
                    return Err(CommandError::WorkerLimit);
                }
            }
            CellUsage::ProductionBuilding | CellUsage::TrainingCamp => {}
            CellUsage::None => return Err(CommandError::UnusableTile(cell)),
        }
        Ok(CityCellPlan {
            city,
            city_cell,
            usage,
        })
    }

    fn execute(&self, plan: Self::Plan, logic: &mut Logic) {
        let cell = self.cell;
        let world = logic.world_mut();
        if let Some(city) = world.city_mut(plan.city) {
            match plan.usage {
                CellUsage::House => city.properties.citizen_count += 1,
                CellUsage::Worker => city.properties.worker_count += 1,
                _ => {}
            }
        }
        world.assign(cell, plan.city);
        logic.notify(|listener, state| {
            listener.city_cell_assigned(state, plan.city_cell, cell, plan.usage);
            listener.resources_changed(state);
        });
    }
}

/// Makes the city at `city_cell` release `cell`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnassignCell {
    pub city_cell: Position,
    pub cell: Position,
    pub ignore_player: bool,
}

impl UnassignCell {
    pub fn new(city_cell: Position, cell: Position) -> Self {
        Self {
            city_cell,
            cell,
            ignore_player: false,
        }
    }

    pub fn ignoring_player(mut self) -> Self {
        self.ignore_player = true;
        self
    }
}

impl CommandTransition for UnassignCell {
    type Plan = CityCellPlan;

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<Self::Plan, CommandError> {
        let (city, city_cell, item) = resolve_city(logic, self.city_cell, self.ignore_player)?;
        let world = logic.world();
        let cell = self.cell;
        if !world.contains(cell) {
            return Err(CommandError::OutsideWorld(cell));
        }
        if !world.assignments().has(cell) || !item.is_assigned(cell) {
            return Err(CommandError::NotAssigned(cell));
        }
        let usage = logic.rules().city_cell_usage(cell);
        if usage == CellUsage::None {
            return Err(CommandError::UnusableTile(cell));
        }
        Ok(CityCellPlan {
            city,
            city_cell,
            usage,
        })
    }

    fn execute(&self, plan: Self::Plan, logic: &mut Logic) {
        let cell = self.cell;
        match plan.usage {
            CellUsage::House => {
                let mut overstaffed = false;
                if let Some(city) = logic.world_mut().city_mut(plan.city) {
                    let properties = &mut city.properties;
                    properties.citizen_count -= 1;
                    overstaffed = properties.worker_count > properties.citizen_count;
                }
                if overstaffed {
                    logic.remove_city_worker(plan.city);
                }
            }
            CellUsage::Worker => {
                if let Some(city) = logic.world_mut().city_mut(plan.city) {
                    city.properties.worker_count -= 1;
                }
            }
            _ => {}
        }
        logic.world_mut().unassign(cell);
        logic.notify(|listener, state| {
            listener.city_cell_unassigned(state, plan.city_cell, cell);
            listener.resources_changed(state);
        });
    }
}

/// Releases whatever city claims `cell`, keeping counters consistent.
/// Falls back to a plain unassignment for tiles the city can no longer use.
pub(crate) fn release_cell(logic: &mut Logic, cell: Position) {
    let Some(city) = logic.world().assigned_city(cell) else {
        return;
    };
    let Some(city_cell) = logic.rules().city_cell(city) else {
        logic.world_mut().unassign(cell);
        return;
    };
    let command = UnassignCell::new(city_cell, cell).ignoring_player();
    if let Err(error) = super::drive(&command, logic) {
        tracing::debug!(%cell, "plain unassignment: {error}");
        logic.world_mut().unassign(cell);
        logic.notify(|listener, state| {
            listener.city_cell_unassigned(state, city_cell, cell);
        });
    }
}
