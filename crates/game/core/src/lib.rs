//! Deterministic rules of a turn-based strategy game played on a layered grid.
//!
//! `armies-core` owns the world model (ground, impassable, objects and units
//! layers plus the items behind them), the rule queries built on it, and the
//! command engine that mutates it. All state mutation flows through
//! [`engine::Logic`]: callers queue [`command::Command`]s and the engine
//! checks then executes them in priority order. Content (unit, city and tile
//! tables) is injected through the [`env::ContentOracle`] trait.
pub mod command;
pub mod config;
pub mod constants;
pub mod engine;
pub mod env;
pub mod error;
pub mod pathfinding;
pub mod rules;
pub mod state;

#[cfg(test)]
mod testing;

pub use command::{
    AssignCell, AttackUnit, Build, Command, CommandTransition, DisbandUnit, MoveUnit, NextTurn,
    RecruitUnit, SetGroundCell, SetImpassableCell, SetObjectsCell, SetUnitsCell, UnassignCell,
};
pub use config::GameConfig;
pub use constants::{
    CellUsage, CellValue, CityClass, LayerKind, Resource, ResourceBag, UnitClass, WeaponKind,
    WorldType,
};
pub use engine::{CommandError, ExecutionReport, Logic};
pub use env::{CityOracle, ContentOracle, MoveCosts, OracleError, TablesOracle, UnitOracle};
pub use error::{ErrorSeverity, GameError};
pub use pathfinding::{DistanceMap, Path};
pub use rules::Rules;
pub use state::{
    City, GameState, Item, ItemId, Player, PlayerId, Position, StateError, StateListener, Unit,
    World,
};
