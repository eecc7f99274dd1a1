//! Every state mutation, expressed as a checked command.
//!
//! A command's `check` reads the state and either rejects it with a
//! [`CommandError`] or returns a plan. `execute` consumes that plan, so a
//! command can only run after its check passed. Commands are queued on
//! [`Logic`] and ordered by [`Command::priority`].
mod city;
mod layer;
mod turn;
mod unit;

pub use city::{AssignCell, CityCellPlan, UnassignCell};
pub use layer::{
    ObjectsPlan, SetGroundCell, SetImpassableCell, SetObjectsCell, SetUnitsCell, UnitsPlan,
};
pub use turn::{NextTurn, TurnPlan};
pub use unit::{
    AttackPlan, AttackUnit, Build, BuildPlan, DisbandUnit, MovePlan, MoveUnit, RecruitPlan,
    RecruitUnit,
};

use crate::config::GameConfig;
use crate::engine::{CommandError, Logic};
use crate::state::Position;

/// Priority of commands acting on the whole state; they run first.
pub const STATE_PRIORITY: u64 = 1;

/// Base priority of commands acting on one cell.
pub const WORLD_PRIORITY: u64 = 100;

/// Priority of a command anchored at `cell`: raster order after the state
/// commands. Cells above the world collapse to 0.
pub fn cell_priority(cell: Position) -> u64 {
    let stride = GameConfig::WORLD_MAX_WIDTH as i64;
    let priority = WORLD_PRIORITY as i64 + i64::from(cell.x) + i64::from(cell.y) * stride;
    u64::try_from(priority).unwrap_or(0)
}

/// Check/execute contract shared by every command.
pub trait CommandTransition {
    /// What a successful check found out, handed to `execute`.
    type Plan;

    fn priority(&self) -> u64;

    /// Decides whether the command may run. Must not mutate anything.
    fn check(&self, logic: &Logic) -> Result<Self::Plan, CommandError>;

    /// Applies a plan produced by `check` on the same state.
    fn execute(&self, plan: Self::Plan, logic: &mut Logic);
}

/// Checks then executes a command immediately, bypassing the queue.
pub fn drive<T>(command: &T, logic: &mut Logic) -> Result<(), CommandError>
where
    T: CommandTransition + ?Sized,
{
    let plan = command.check(logic)?;
    command.execute(plan, logic);
    Ok(())
}

/// Any queued command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    AssignCell(AssignCell),
    UnassignCell(UnassignCell),
    SetGroundCell(SetGroundCell),
    SetImpassableCell(SetImpassableCell),
    SetObjectsCell(SetObjectsCell),
    SetUnitsCell(SetUnitsCell),
    MoveUnit(MoveUnit),
    AttackUnit(AttackUnit),
    Build(Build),
    RecruitUnit(RecruitUnit),
    DisbandUnit(DisbandUnit),
    NextTurn(NextTurn),
}

macro_rules! dispatch_command {
    ($command:expr, $inner:ident => $body:expr) => {
        match $command {
            Command::AssignCell($inner) => $body,
            Command::UnassignCell($inner) => $body,
            Command::SetGroundCell($inner) => $body,
            Command::SetImpassableCell($inner) => $body,
            Command::SetObjectsCell($inner) => $body,
            Command::SetUnitsCell($inner) => $body,
            Command::MoveUnit($inner) => $body,
            Command::AttackUnit($inner) => $body,
            Command::Build($inner) => $body,
            Command::RecruitUnit($inner) => $body,
            Command::DisbandUnit($inner) => $body,
            Command::NextTurn($inner) => $body,
        }
    };
}

impl Command {
    pub fn priority(&self) -> u64 {
        dispatch_command!(self, command => command.priority())
    }

    /// Runs the check only, discarding the plan.
    pub fn validate(&self, logic: &Logic) -> Result<(), CommandError> {
        dispatch_command!(self, command => command.check(logic).map(|_| ()))
    }

    pub fn run(&self, logic: &mut Logic) -> Result<(), CommandError> {
        dispatch_command!(self, command => drive(command, logic))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Command::AssignCell(_) => "assign_cell",
            Command::UnassignCell(_) => "unassign_cell",
            Command::SetGroundCell(_) => "set_ground_cell",
            Command::SetImpassableCell(_) => "set_impassable_cell",
            Command::SetObjectsCell(_) => "set_objects_cell",
            Command::SetUnitsCell(_) => "set_units_cell",
            Command::MoveUnit(_) => "move_unit",
            Command::AttackUnit(_) => "attack_unit",
            Command::Build(_) => "build",
            Command::RecruitUnit(_) => "recruit_unit",
            Command::DisbandUnit(_) => "disband_unit",
            Command::NextTurn(_) => "next_turn",
        }
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(command: $variant) -> Self {
                    Command::$variant(command)
                }
            }
        )+
    };
}

impl_from_command!(
    AssignCell,
    UnassignCell,
    SetGroundCell,
    SetImpassableCell,
    SetObjectsCell,
    SetUnitsCell,
    MoveUnit,
    AttackUnit,
    Build,
    RecruitUnit,
    DisbandUnit,
    NextTurn,
);
