//! Rejection reasons produced by command checks.

use crate::constants::{CellValue, LayerKind, UnitClass};
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PlayerId, Position};

/// Why a command's check refused it. The `Display` text is shown to players.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Cell {0} is outside the world")]
    OutsideWorld(Position),

    #[error("There is no city at {0}")]
    NoCity(Position),

    #[error("The current player does not own this")]
    NotOwner,

    #[error("Tile {0} is already assigned")]
    AlreadyAssigned(Position),

    #[error("City does not use tile {0}")]
    NotAssigned(Position),

    #[error("Tile {0} is not in the area of the city")]
    OutsideCityArea(Position),

    #[error("City has reached its maximum size")]
    CityFull,

    #[error("All citizens work on tiles")]
    NoIdleCitizen,

    #[error("We are not allowed to assign more workers")]
    WorkerLimit,

    #[error("Tile {0} cannot be used by the city")]
    UnusableTile(Position),

    #[error("{value} is not a valid {layer:?} value")]
    InvalidValue { layer: LayerKind, value: CellValue },

    #[error("Cell {0} already has this value")]
    Unchanged(Position),

    #[error("{reason} at {cell}")]
    CannotBuild { cell: Position, reason: &'static str },

    #[error("No city found near {0}")]
    NoCityNearby(Position),

    #[error("This value can't carry an item")]
    UnexpectedItem,

    #[error("{0} needs a matching item")]
    ItemRequired(CellValue),

    #[error("There is no unit at {0}")]
    NoUnit(Position),

    #[error("Only a single unit can do this at {0}")]
    NotSingleUnit(Position),

    #[error("Origin and target are the same cell")]
    SameCell,

    #[error("Cell {0} is occupied")]
    Occupied(Position),

    #[error("Max army size: {max}")]
    ArmyFull { max: usize },

    #[error("Invalid unit selection")]
    InvalidSelection,

    #[error("The path is empty")]
    EmptyPath,

    #[error("Cell {0} can't be reached")]
    Unreachable(Position),

    #[error("Not enough move points ({available} for a cost of {cost})")]
    NotEnoughMovePoints { cost: u32, available: i32 },

    #[error("Not enough action points")]
    NoActionPoints,

    #[error("The attack would do no damage")]
    NoDamage,

    #[error("Can't attack your own units")]
    FriendlyTarget,

    #[error("Not enough resources")]
    NotEnoughResources,

    #[error("This city can't recruit {0}")]
    CannotRecruit(UnitClass),

    #[error("We can't recruit more {0} this turn")]
    RecruitLimit(UnitClass),

    #[error("No room")]
    NoRoom,

    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            Oracle(error) => error.severity(),
            UnknownPlayer(_) => ErrorSeverity::Internal,
            CityFull
            | NoIdleCitizen
            | NotEnoughMovePoints { .. }
            | NoActionPoints
            | NotEnoughResources
            | RecruitLimit(_)
            | NoRoom => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            OutsideWorld(_) => "COMMAND_OUTSIDE_WORLD",
            NoCity(_) => "COMMAND_NO_CITY",
            NotOwner => "COMMAND_NOT_OWNER",
            AlreadyAssigned(_) => "COMMAND_ALREADY_ASSIGNED",
            NotAssigned(_) => "COMMAND_NOT_ASSIGNED",
            OutsideCityArea(_) => "COMMAND_OUTSIDE_CITY_AREA",
            CityFull => "COMMAND_CITY_FULL",
            NoIdleCitizen => "COMMAND_NO_IDLE_CITIZEN",
            WorkerLimit => "COMMAND_WORKER_LIMIT",
            UnusableTile(_) => "COMMAND_UNUSABLE_TILE",
            InvalidValue { .. } => "COMMAND_INVALID_VALUE",
            Unchanged(_) => "COMMAND_UNCHANGED",
            CannotBuild { .. } => "COMMAND_CANNOT_BUILD",
            NoCityNearby(_) => "COMMAND_NO_CITY_NEARBY",
            UnexpectedItem => "COMMAND_UNEXPECTED_ITEM",
            ItemRequired(_) => "COMMAND_ITEM_REQUIRED",
            NoUnit(_) => "COMMAND_NO_UNIT",
            NotSingleUnit(_) => "COMMAND_NOT_SINGLE_UNIT",
            SameCell => "COMMAND_SAME_CELL",
            Occupied(_) => "COMMAND_OCCUPIED",
            ArmyFull { .. } => "COMMAND_ARMY_FULL",
            InvalidSelection => "COMMAND_INVALID_SELECTION",
            EmptyPath => "COMMAND_EMPTY_PATH",
            Unreachable(_) => "COMMAND_UNREACHABLE",
            NotEnoughMovePoints { .. } => "COMMAND_NOT_ENOUGH_MOVE_POINTS",
            NoActionPoints => "COMMAND_NO_ACTION_POINTS",
            NoDamage => "COMMAND_NO_DAMAGE",
            FriendlyTarget => "COMMAND_FRIENDLY_TARGET",
            NotEnoughResources => "COMMAND_NOT_ENOUGH_RESOURCES",
            CannotRecruit(_) => "COMMAND_CANNOT_RECRUIT",
            RecruitLimit(_) => "COMMAND_RECRUIT_LIMIT",
            NoRoom => "COMMAND_NO_ROOM",
            UnknownPlayer(_) => "COMMAND_UNKNOWN_PLAYER",
            Oracle(error) => error.error_code(),
        }
    }
}
