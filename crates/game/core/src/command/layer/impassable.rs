use super::{check_contains, check_value, notify_cell, spread};
use crate::command::{CommandTransition, cell_priority};
use crate::constants::{CellValue, LayerKind};
use crate::engine::{CommandError, Logic};
use crate::state::Position;

/// Writes or clears an impassable value (river, pond, mountain).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetImpassableCell {
    pub cell: Position,
    pub value: CellValue,
    pub fill: bool,
}

impl SetImpassableCell {
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

impl CommandTransition for SetImpassableCell {
    type Plan = ();

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<(), CommandError> {
        check_value(LayerKind::Impassable, self.value)?;
        check_contains(logic, self.cell)?;
        let world = logic.world();
        let cell = self.cell;
        let current = world.impassable().get(cell);
        let objects = world.objects().get(cell);

        let reason = if self.value.is_empty() {
            if current.is_empty() {
                return Err(CommandError::Unchanged(cell));
            }
            if current == CellValue::River && objects.is_road() {
                "Can't remove a river under a bridge"
            } else {
                return Ok(());
            }
        } else if current == self.value {
            return Err(CommandError::Unchanged(cell));
        } else if !current.is_empty() {
            "There is already something impassable here"
        } else if world.ground().get(cell) == CellValue::Sea {
            "Can't build on the sea"
        } else if !objects.is_empty() {
            "There is already something here"
        } else if !world.units().get(cell).is_empty() {
            "A unit stands here"
        } else {
            return Ok(());
        };
        Err(CommandError::CannotBuild { cell, reason })
    }

    fn execute(&self, _plan: (), logic: &mut Logic) {
        logic
            .world_mut()
            .set_value(LayerKind::Impassable, self.cell, self.value);
        notify_cell(logic, LayerKind::Impassable, self.cell);
        if self.fill {
            spread(logic, self.cell, |cell| Self { cell, ..*self }.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::drive;
    use crate::constants::{UnitClass, WorldType};
    use crate::state::PlayerId;
    use crate::testing::{earth_world, logic, two_players, unit};

    #[test]
    fn bridges_pin_their_river() {
        let mut world = earth_world(3, 3, WorldType::Strategic);
        let cell = Position::new(1, 1);
        world.set_value(LayerKind::Impassable, cell, CellValue::River);
        world.set_value(LayerKind::Objects, cell, CellValue::RoadDirt);
        let mut logic = logic(two_players(world));

        let error = drive(&SetImpassableCell::new(cell, CellValue::Empty), &mut logic).unwrap_err();
        assert!(matches!(error, CommandError::CannotBuild { .. }));

        logic
            .world_mut()
            .set_value(LayerKind::Objects, cell, CellValue::Empty);
        drive(&SetImpassableCell::new(cell, CellValue::Empty), &mut logic).unwrap();
        assert_eq!(logic.world().impassable().get(cell), CellValue::Empty);
    }

    #[test]
    fn mountains_need_free_land() {
        let mut world = earth_world(3, 1, WorldType::Strategic);
        world.set_value(LayerKind::Ground, Position::new(0, 0), CellValue::Sea);
        world.place_units(Position::new(2, 0), vec![unit(UnitClass::Pikeman, PlayerId(1))]);
        let mut logic = logic(two_players(world));

        for x in [0, 2] {
            let command = SetImpassableCell::new(Position::new(x, 0), CellValue::Mountain);
            assert!(matches!(
                drive(&command, &mut logic),
                Err(CommandError::CannotBuild { .. })
            ));
        }
        drive(
            &SetImpassableCell::new(Position::new(1, 0), CellValue::Mountain),
            &mut logic,
        )
        .unwrap();
        assert_eq!(
            drive(
                &SetImpassableCell::new(Position::new(1, 0), CellValue::Mountain),
                &mut logic
            ),
            Err(CommandError::Unchanged(Position::new(1, 0)))
        );
    }
}
