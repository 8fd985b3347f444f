//! Board state and the move transaction

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Position, BOARD_SIZE};
use crate::error::ParsePositionError;
use crate::pieces::{Color, Piece};

const SIDE: usize = BOARD_SIZE as usize;

// ============================================================================
// MOVE
// ============================================================================

/// A requested relocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ParsePositionError;

    /// Parse `"x,y-x,y"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once('-')
            .ok_or_else(|| ParsePositionError::Format(s.to_string()))?;
        Ok(Move::new(from.parse()?, to.parse()?))
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// 8×8 grid that owns every piece placed on it.
///
/// A seated piece's stored position always equals its cell. Captured or
/// replaced pieces are dropped, and dropping the board drops every
/// remaining occupant once.
///
/// Mutation needs `&mut Board`; share a board across threads only behind
/// a lock such as `Mutex<Board>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; SIDE]; SIDE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Piece at `pos`; None when empty or off the board
    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        let (row, col) = pos.index()?;
        self.cells[row][col].as_ref()
    }

    /// Iterate occupied cells in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.cells
            .iter()
            .flatten()
            .filter_map(|cell| cell.as_ref())
            .map(|piece| (piece.position, piece))
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().next().is_none()
    }

    /// Legal destinations of the occupant at `pos`; empty for an empty cell
    pub fn legal_moves_at(&self, pos: Position) -> Vec<Position> {
        self.get_piece(pos)
            .map(|piece| piece.legal_moves(self))
            .unwrap_or_default()
    }

    /// Total legal destinations over all pieces of `color`
    pub fn mobility(&self, color: Color) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(_, piece)| piece.legal_moves(self).len())
            .sum()
    }

    /// Check that every occupant's stored position matches its cell
    pub fn validate(&self) -> bool {
        Position::all().all(|pos| {
            self.get_piece(pos)
                .map_or(true, |piece| piece.position == pos)
        })
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Option<Piece>> {
        let (row, col) = pos.index()?;
        Some(&mut self.cells[row][col])
    }

    // ========================================================================
    // PLACEMENT
    // ========================================================================

    /// Seat `piece` at `pos`, dropping any previous occupant.
    ///
    /// Returns false (and drops `piece`) if `pos` is off the board.
    pub fn place_piece(&mut self, mut piece: Piece, pos: Position) -> bool {
        let Some(cell) = self.cell_mut(pos) else {
            tracing::debug!("Rejected placement of {} off the board at {}", piece.name, pos);
            return false;
        };

        piece.position = pos;
        tracing::trace!("Placed {} {} at {}", piece.color, piece.name, pos);
        if let Some(replaced) = cell.replace(piece) {
            tracing::debug!("Placement replaced {} {} at {}", replaced.color, replaced.name, pos);
        }
        true
    }

    /// Detach the occupant at `pos`
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.cell_mut(pos)?.take()
    }

    // ========================================================================
    // MOVE EXECUTION
    // ========================================================================

    /// Move the occupant of `from` to `to` if that is legal for it.
    ///
    /// Returns false and leaves the board untouched when `from` is empty or
    /// the move is illegal. A captured occupant is dropped.
    pub fn move_piece(&mut self, from: Position, to: Position) -> bool {
        let Some(piece) = self.remove_piece(from) else {
            tracing::debug!("No piece at {} to move", from);
            return false;
        };

        match piece.move_to(to, self) {
            Ok(_captured) => true,
            Err(piece) => {
                // Re-seat the untouched piece; `from` is still empty
                if let Some(cell) = self.cell_mut(from) {
                    *cell = Some(piece);
                }
                false
            }
        }
    }

    /// Apply a move; see [`Board::move_piece`]
    pub fn apply(&mut self, mv: Move) -> bool {
        self.move_piece(mv.from, mv.to)
    }
}

impl Piece {
    /// Move this detached piece to `target` on `board`.
    ///
    /// The piece is validated against `board` first. On success it is
    /// seated at `target` with its position updated and its has-moved latch
    /// set, and the previous occupant of `target` (if any) is returned as
    /// the capture. On failure the unchanged piece is handed back and the
    /// board is not touched.
    ///
    /// This is the only code path that changes a piece's position after
    /// placement. [`Board::move_piece`] lifts the piece off its cell before
    /// calling it. A copy of a piece that is still seated at its position
    /// is rejected, so one piece never occupies two cells.
    pub fn move_to(mut self, target: Position, board: &mut Board) -> Result<Option<Piece>, Piece> {
        if board.get_piece(self.position) == Some(&self) {
            tracing::debug!(
                "{} {} at {} is still on the board; lift it before moving",
                self.color,
                self.name,
                self.position
            );
            return Err(self);
        }

        if !self.can_move_to(target, board) {
            tracing::debug!(
                "Illegal move for {} {}: {} -> {}",
                self.color,
                self.name,
                self.position,
                target
            );
            return Err(self);
        }

        let Some(cell) = board.cell_mut(target) else {
            return Err(self);
        };

        let from = self.position;
        self.position = target;
        self.has_moved = true;

        let captured = cell.replace(self);
        if let Some(victim) = &captured {
            tracing::debug!(
                "{} {} captured at {} (from {})",
                victim.color,
                victim.name,
                target,
                from
            );
        }
        Ok(captured)
    }
}
