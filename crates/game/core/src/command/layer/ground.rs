use super::{check_contains, check_value, notify_cell, spread};
use crate::command::{CommandTransition, cell_priority};
use crate::constants::{CellValue, LayerKind};
use crate::engine::{CommandError, Logic};
use crate::state::Position;

/// Writes a ground value (earth or sea).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetGroundCell {
    pub cell: Position,
    pub value: CellValue,
    pub fill: bool,
}

impl SetGroundCell {
    pub fn new(cell: Position, value: CellValue) -> Self {
        Self {
            cell,
            value,
            fill: false,
        }
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }
}

impl CommandTransition for SetGroundCell {
    type Plan = ();

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<(), CommandError> {
        check_value(LayerKind::Ground, self.value)?;
        check_contains(logic, self.cell)?;
        let world = logic.world();
        let cell = self.cell;
        if world.ground().get(cell) == self.value {
            return Err(CommandError::Unchanged(cell));
        }
        if self.value == CellValue::Sea {
            let covered = !world.impassable().get(cell).is_empty()
                || !world.objects().get(cell).is_empty()
                || !world.units().get(cell).is_empty();
            if covered {
                return Err(CommandError::CannotBuild {
                    cell,
                    reason: "Only bare land can be flooded",
                });
            }
        }
        Ok(())
    }

    fn execute(&self, _plan: (), logic: &mut Logic) {
        logic
            .world_mut()
            .set_value(LayerKind::Ground, self.cell, self.value);
        notify_cell(logic, LayerKind::Ground, self.cell);
        if self.fill {
            spread(logic, self.cell, |cell| Self { cell, ..*self }.into());
        }
    }
}
