//! Error types for text parsing and setup validation
//!
//! Illegal moves are not errors: the board reports them with `false`.

use crate::board::Position;

/// Failure to parse a position (`"x,y"`) or a move (`"x,y-x,y"`)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePositionError {
    #[error("expected \"x,y\" or \"x,y-x,y\", got {0:?}")]
    Format(String),

    #[error("position {0} is off the board")]
    OffBoard(Position),
}

/// A setup entry that cannot be turned into a placed piece
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("unknown piece kind: {0}")]
    UnknownKind(String),

    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    #[error("entry {index} has neither a kind nor any capability")]
    NoCapabilities { index: usize },

    #[error("entry {index} is placed off the board at {pos}")]
    OffBoard { index: usize, pos: Position },

    #[error("entries {first} and {second} both occupy {pos}")]
    DuplicateSquare {
        first: usize,
        second: usize,
        pos: Position,
    },
}
