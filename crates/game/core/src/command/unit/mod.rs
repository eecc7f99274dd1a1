//! Commands a player issues to their units and cities.
mod attack;
mod build;
mod disband;
mod movement;
mod recruit;

pub use attack::{AttackPlan, AttackUnit};
pub use build::{Build, BuildPlan};
pub use disband::DisbandUnit;
pub use movement::{MovePlan, MoveUnit};
pub use recruit::{RecruitPlan, RecruitUnit};

use crate::constants::{CellValue, ResourceBag};
use crate::engine::{CommandError, Logic};
use crate::state::{Position, Unit};

/// The lone unit on `cell`, owned by the current player and able to act.
fn acting_unit(logic: &Logic, cell: Position) -> Result<&Unit, CommandError> {
    let unit = single_unit(logic, cell)?;
    if unit.player != logic.state().player_id() {
        return Err(CommandError::NotOwner);
    }
    if unit.properties.action_points <= 0 {
        return Err(CommandError::NoActionPoints);
    }
    Ok(unit)
}

fn single_unit(logic: &Logic, cell: Position) -> Result<&Unit, CommandError> {
    let world = logic.world();
    if !world.contains(cell) {
        return Err(CommandError::OutsideWorld(cell));
    }
    match world.units().get(cell) {
        CellValue::Unit => world.units_at(cell).first().ok_or(CommandError::NoUnit(cell)),
        CellValue::Army => Err(CommandError::NotSingleUnit(cell)),
        _ => Err(CommandError::NoUnit(cell)),
    }
}

fn check_affordable(logic: &Logic, cost: &ResourceBag) -> Result<(), CommandError> {
    let id = logic.state().player_id();
    let player = logic
        .state()
        .player(id)
        .ok_or(CommandError::UnknownPlayer(id))?;
    if player.has_resources(cost) {
        Ok(())
    } else {
        Err(CommandError::NotEnoughResources)
    }
}

fn spend(logic: &mut Logic, cost: &ResourceBag) {
    if let Some(player) = logic.state_mut().current_player_mut() {
        player.remove_resources(cost);
    }
    logic.notify(|listener, state| listener.resources_changed(state));
}

/// Uses up one action point of the lone unit on `cell`.
fn spend_action_point(logic: &mut Logic, cell: Position) {
    if let Some(unit) = logic.world_mut().unit_at_mut(cell, 0) {
        unit.properties.action_points -= 1;
    }
    notify_unit_changed(logic, cell);
}

fn notify_unit_changed(logic: &Logic, cell: Position) {
    logic.notify(|listener, state| {
        for unit in state.world.units_at(cell) {
            listener.unit_changed(state, cell, unit);
        }
    });
}
