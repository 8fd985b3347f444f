//! facetchess core - board state and capability-driven move rules
//!
//! This crate provides the engine behind the facetchess front ends:
//! - Board geometry (8×8 grid, (x, y) coordinates)
//! - Pieces built from composable movement facets
//! - Legal-move generation for any facet combination
//! - The board transaction that applies a move and releases captures
//! - JSON setup files for initial placements
//!
//! Turn order, check and the other full-chess rules are left to callers.

pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod pieces;
pub mod setup;

// Re-exports for convenient access
pub use board::{Position, BOARD_SIZE};
pub use error::{ParsePositionError, SetupError};
pub use game::{Board, Move};
pub use pieces::{
    get_piece_kind, piece_id_to_index, Capabilities, Color, Facet, Piece, PieceKind, PieceKindId,
    PIECE_KINDS,
};
pub use setup::{Setup, SetupPiece};
