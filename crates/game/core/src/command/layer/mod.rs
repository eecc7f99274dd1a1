//! Editing commands, one per layer.
//!
//! Each writes a single cell and, when `fill` is set, queues the same
//! command on the four orthogonal neighbors. A fill stops where a neighbor
//! rejects the value (already set, out of the world, illegal terrain).
mod ground;
mod impassable;
mod objects;
mod units;

pub use ground::SetGroundCell;
pub use impassable::SetImpassableCell;
pub use objects::{ObjectsPlan, SetObjectsCell};
pub use units::{SetUnitsCell, UnitsPlan};

use super::Command;
use crate::constants::{CellValue, LayerKind};
use crate::engine::{CommandError, Logic};
use crate::state::Position;

/// Flood-fill order: right, left, below, above.
const SPREAD: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn spread(logic: &mut Logic, cell: Position, make: impl Fn(Position) -> Command) {
    for (dx, dy) in SPREAD {
        logic.add_command(make(cell.offset(dx, dy)));
    }
}

fn check_value(layer: LayerKind, value: CellValue) -> Result<(), CommandError> {
    if value.is_valid_for(layer) {
        Ok(())
    } else {
        Err(CommandError::InvalidValue { layer, value })
    }
}

fn check_contains(logic: &Logic, cell: Position) -> Result<(), CommandError> {
    if logic.world().contains(cell) {
        Ok(())
    } else {
        Err(CommandError::OutsideWorld(cell))
    }
}

/// Free earth cell with nothing impassable and no object.
fn check_buildable(logic: &Logic, cell: Position) -> Result<(), CommandError> {
    check_contains(logic, cell)?;
    let world = logic.world();
    let reason = if world.ground().get(cell) == CellValue::Sea {
        "Can't build on the sea"
    } else if !world.impassable().get(cell).is_empty() {
        "Can't build on this land"
    } else if !world.objects().get(cell).is_empty() {
        "There is already something here"
    } else {
        return Ok(());
    };
    Err(CommandError::CannotBuild { cell, reason })
}

fn notify_cell(logic: &Logic, layer: LayerKind, cell: Position) {
    logic.notify(|listener, state| listener.layer_cell_changed(state, layer, cell));
}
