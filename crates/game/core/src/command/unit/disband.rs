use crate::command::{CommandTransition, cell_priority};
use crate::engine::{CommandError, Logic};
use crate::state::Position;

/// The owner dismisses one unit of a stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisbandUnit {
    pub cell: Position,
    pub index: usize,
}

impl DisbandUnit {
    pub fn new(cell: Position, index: usize) -> Self {
        Self { cell, index }
    }
}

impl CommandTransition for DisbandUnit {
    type Plan = ();

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<(), CommandError> {
        let world = logic.world();
        if !world.contains(self.cell) {
            return Err(CommandError::OutsideWorld(self.cell));
        }
        let unit = world
            .units_at(self.cell)
            .get(self.index)
            .ok_or(CommandError::NoUnit(self.cell))?;
        if unit.player != logic.state().player_id() {
            return Err(CommandError::NotOwner);
        }
        Ok(())
    }

    fn execute(&self, _plan: (), logic: &mut Logic) {
        logic.remove_unit(self.cell, self.index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::drive;
    use crate::constants::{CellValue, UnitClass, WorldType};
    use crate::state::PlayerId;
    use crate::testing::{earth_world, logic, two_players, unit};

    #[test]
    fn disbanding_shrinks_the_stack() {
        let mut world = earth_world(2, 2, WorldType::Strategic);
        let cell = Position::new(1, 0);
        world.place_units(
            cell,
            vec![
                unit(UnitClass::Pikeman, PlayerId(1)),
                unit(UnitClass::Knight, PlayerId(1)),
            ],
        );
        let mut logic = logic(two_players(world));

        assert_eq!(
            drive(&DisbandUnit::new(cell, 2), &mut logic),
            Err(CommandError::NoUnit(cell))
        );
        drive(&DisbandUnit::new(cell, 0), &mut logic).unwrap();
        assert_eq!(logic.world().units().get(cell), CellValue::Unit);
        assert_eq!(logic.world().units_at(cell)[0].class, UnitClass::Knight);

        logic.state_mut().set_player_id(PlayerId(2));
        assert_eq!(
            drive(&DisbandUnit::new(cell, 0), &mut logic),
            Err(CommandError::NotOwner)
        );
    }
}
