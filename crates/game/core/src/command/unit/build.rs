use super::{acting_unit, check_affordable, spend, spend_action_point};
use crate::command::{CommandTransition, ObjectsPlan, SetObjectsCell, cell_priority};
use crate::constants::{CellValue, LayerKind, ResourceBag};
use crate::engine::{CommandError, Logic};
use crate::state::Position;

/// A unit builds (or clears, with [`CellValue::Empty`]) an object on its own cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Build {
    pub cell: Position,
    pub value: CellValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPlan {
    pub objects: ObjectsPlan,
    pub cost: ResourceBag,
}

impl Build {
    pub fn new(cell: Position, value: CellValue) -> Self {
        Self { cell, value }
    }

    fn objects(&self) -> SetObjectsCell {
        SetObjectsCell::new(self.cell, self.value)
    }
}

impl CommandTransition for Build {
    type Plan = BuildPlan;

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<BuildPlan, CommandError> {
        let cost = logic.content().require_tile_cost(self.value)?;
        if !self.value.is_empty() && !self.value.is_valid_for(LayerKind::Objects) {
            return Err(CommandError::InvalidValue {
                layer: LayerKind::Objects,
                value: self.value,
            });
        }
        let objects = self.objects().check(logic)?;
        check_affordable(logic, &cost)?;
        acting_unit(logic, self.cell)?;
        Ok(BuildPlan { objects, cost })
    }

    fn execute(&self, plan: BuildPlan, logic: &mut Logic) {
        self.objects().execute(plan.objects, logic);
        spend_action_point(logic, self.cell);
        spend(logic, &plan.cost);
    }
}
