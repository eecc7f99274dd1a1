use super::{check_contains, check_value, notify_cell, spread};
use crate::command::{CommandTransition, cell_priority};
use crate::constants::{CellValue, LayerKind, WorldType};
use crate::engine::{CommandError, Logic};
use crate::state::{Position, Unit};

/// Drops a unit on a cell, or clears the cell's units.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetUnitsCell {
    pub cell: Position,
    pub value: CellValue,
    pub fill: bool,
    pub unit: Option<Unit>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitsPlan {
    Remove,
    /// Push onto the cell's stack.
    Place,
}

impl SetUnitsCell {
    pub fn new(cell: Position, value: CellValue) -> Self {
        Self {
            cell,
            value,
            fill: false,
            unit: None,
        }
    }

    /// Places `unit` on `cell`.
    pub fn place(cell: Position, unit: Unit) -> Self {
        Self::new(cell, CellValue::Unit).with_unit(unit)
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }
}

impl CommandTransition for SetUnitsCell {
    type Plan = UnitsPlan;

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<UnitsPlan, CommandError> {
        let cell = self.cell;
        if self.value.is_empty() {
            check_contains(logic, cell)?;
            if logic.world().units().get(cell).is_empty() {
                return Err(CommandError::Unchanged(cell));
            }
            return Ok(UnitsPlan::Remove);
        }
        check_value(LayerKind::Units, self.value)?;
        let unit = self
            .unit
            .as_ref()
            .ok_or(CommandError::ItemRequired(self.value))?;
        check_contains(logic, cell)?;

        let world = logic.world();
        let impassable = world.impassable().get(cell);
        let reason = if world.ground().get(cell) == CellValue::Sea {
            Some("Units can't stand on the sea")
        } else if !impassable.is_empty()
            && !(impassable == CellValue::River && world.objects().get(cell).is_road())
        {
            Some("Units can't stand here")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(CommandError::CannotBuild { cell, reason });
        }

        let present = world.units_at(cell);
        match world.world_type() {
            WorldType::Tactic if !present.is_empty() => Err(CommandError::Occupied(cell)),
            _ if present.iter().any(|other| other.player != unit.player) => {
                Err(CommandError::Occupied(cell))
            }
            _ => {
                let max = logic.rules().army_max_size();
                if present.len() + 1 > max {
                    Err(CommandError::ArmyFull { max })
                } else {
                    Ok(UnitsPlan::Place)
                }
            }
        }
    }

    fn execute(&self, plan: UnitsPlan, logic: &mut Logic) {
        let cell = self.cell;
        let world = logic.world_mut();
        match (plan, &self.unit) {
            (UnitsPlan::Place, Some(unit)) => {
                let mut units = world.take_units(cell);
                units.push(unit.clone());
                world.place_units(cell, units);
            }
            _ => world.set_value(LayerKind::Units, cell, CellValue::Empty),
        }
        notify_cell(logic, LayerKind::Units, cell);
        if self.fill {
            spread(logic, cell, |cell| {
                Self {
                    cell,
                    ..self.clone()
                }
                .into()
            });
        }
    }
}
