//! Observer interface for committed state changes.
//!
//! Every method has an empty default so observers implement only what they
//! render. Calls are synchronous and happen right after the mutation commits.
use super::{GameState, Position, Unit};
use crate::constants::{CellUsage, LayerKind};

pub trait StateListener: Send + Sync {
    fn turn_changed(&self, _state: &GameState) {}

    fn resources_changed(&self, _state: &GameState) {}

    fn city_cell_assigned(
        &self,
        _state: &GameState,
        _city_cell: Position,
        _cell: Position,
        _usage: CellUsage,
    ) {
    }

    fn city_cell_unassigned(&self, _state: &GameState, _city_cell: Position, _cell: Position) {}

    fn unit_recruited(&self, _state: &GameState, _cell: Position) {}

    fn unit_moved(&self, _state: &GameState, _from: Position, _to: Position) {}

    fn unit_changed(&self, _state: &GameState, _cell: Position, _unit: &Unit) {}

    fn unit_damaged(&self, _state: &GameState, _cell: Position, _damage: i32) {}

    fn unit_died(&self, _state: &GameState, _cell: Position) {}

    fn layer_cell_changed(&self, _state: &GameState, _layer: LayerKind, _cell: Position) {}

    fn layer_content_changed(&self, _state: &GameState, _layer: LayerKind) {}
}
