//! State consistency errors.
//!
//! Raised when restored or hand-built state breaks the cross-references
//! between layers, items, assignments and players.

use crate::constants::CellValue;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemId, PlayerId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Layer dimensions are non-positive or disagree with the world.
    #[error("Invalid layer size {width}x{height}")]
    InvalidLayerSize { width: i32, height: i32 },

    /// Dense cell data has the wrong length.
    #[error("Expected {expected} cells, found {found}")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("Cell {0} is out of bounds")]
    CellOutOfBounds(Position),

    /// A layer or assignment references an item the table does not hold.
    #[error("Item {0} is referenced but missing")]
    MissingItem(ItemId),

    /// Cell value disagrees with the kind of its attached item.
    #[error("Cell {cell} holds {value} which does not match its item")]
    ValueMismatch { cell: Position, value: CellValue },

    /// Assignment table and city cell set disagree.
    #[error("Assignment of cell {0} does not match its city")]
    AssignmentMismatch(Position),

    #[error("Invalid player id {0}")]
    InvalidPlayer(PlayerId),

    /// Current player is not in the player list.
    #[error("Unknown current player {0}")]
    UnknownPlayer(PlayerId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            InvalidLayerSize { .. } | CellCountMismatch { .. } | CellOutOfBounds(_) => {
                ErrorSeverity::Validation
            }
            MissingItem(_) | ValueMismatch { .. } | AssignmentMismatch(_) => {
                ErrorSeverity::Fatal
            }
            InvalidPlayer(_) | UnknownPlayer(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            InvalidLayerSize { .. } => "STATE_INVALID_LAYER_SIZE",
            CellCountMismatch { .. } => "STATE_CELL_COUNT_MISMATCH",
            CellOutOfBounds(_) => "STATE_CELL_OUT_OF_BOUNDS",
            MissingItem(_) => "STATE_MISSING_ITEM",
            ValueMismatch { .. } => "STATE_VALUE_MISMATCH",
            AssignmentMismatch(_) => "STATE_ASSIGNMENT_MISMATCH",
            InvalidPlayer(_) => "STATE_INVALID_PLAYER",
            UnknownPlayer(_) => "STATE_UNKNOWN_PLAYER",
        }
    }
}
