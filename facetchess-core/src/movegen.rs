//! Legal-move generation
//!
//! Each enabled facet contributes destinations; the union is deduplicated.
//! Generation only reads the board and never looks at the mover's own cell,
//! so a piece lifted off the board sees the same moves as a seated one.

use rustc_hash::FxHashSet;

use crate::board::{Position, DIAGONAL_DIRS, KNIGHT_OFFSETS, NEIGHBOR_OFFSETS, ORTHOGONAL_DIRS};
use crate::game::Board;
use crate::pieces::{Facet, Piece};

impl Piece {
    /// Destinations reachable in one move on `board`, without duplicates.
    ///
    /// Order follows facet order (rook, bishop, knight, pawn, king) and
    /// carries no meaning. A piece whose stored position is off the board
    /// has no moves.
    pub fn legal_moves(&self, board: &Board) -> Vec<Position> {
        let mut moves = Vec::new();
        if !self.position.is_valid() {
            return moves;
        }

        for facet in self.capabilities.facets() {
            match facet {
                Facet::Rook => generate_slide_moves(self, board, &ORTHOGONAL_DIRS, &mut moves),
                Facet::Bishop => generate_slide_moves(self, board, &DIAGONAL_DIRS, &mut moves),
                Facet::Knight => generate_leap_moves(self, board, &KNIGHT_OFFSETS, &mut moves),
                Facet::Pawn => generate_pawn_moves(self, board, &mut moves),
                Facet::King => generate_leap_moves(self, board, &NEIGHBOR_OFFSETS, &mut moves),
            }
        }

        // Facets can overlap (queen-likes reach the same cell twice)
        let mut seen = FxHashSet::default();
        moves.retain(|pos| seen.insert(*pos));
        moves
    }

    /// True iff `target` is one of [`Piece::legal_moves`]
    pub fn can_move_to(&self, target: Position, board: &Board) -> bool {
        target.is_valid() && self.legal_moves(board).contains(&target)
    }
}

/// Empty, or held by the other side
fn can_land(piece: &Piece, board: &Board, dest: Position) -> bool {
    board
        .get_piece(dest)
        .map_or(true, |occupant| occupant.color != piece.color)
}

fn generate_slide_moves(
    piece: &Piece,
    board: &Board,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Position>,
) {
    for &(dx, dy) in dirs {
        let mut current = piece.position;

        while let Some(next) = current.offset(dx, dy) {
            current = next;

            if let Some(occupant) = board.get_piece(current) {
                if occupant.color != piece.color {
                    moves.push(current);
                }
                break; // Blocked
            }

            moves.push(current);
        }
    }
}

fn generate_leap_moves(
    piece: &Piece,
    board: &Board,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Position>,
) {
    for &(dx, dy) in offsets {
        if let Some(dest) = piece.position.offset(dx, dy) {
            if can_land(piece, board, dest) {
                moves.push(dest);
            }
        }
    }
}

fn generate_pawn_moves(piece: &Piece, board: &Board, moves: &mut Vec<Position>) {
    let forward = piece.color.forward();

    // Pushes: never onto an occupied cell
    if let Some(step) = piece.position.offset(0, forward) {
        if board.get_piece(step).is_none() {
            moves.push(step);

            // Gated by the has-moved latch only, not by the starting rank
            if !piece.has_moved {
                if let Some(double) = step.offset(0, forward) {
                    if board.get_piece(double).is_none() {
                        moves.push(double);
                    }
                }
            }
        }
    }

    // Diagonals: capture only
    for dx in [-1, 1] {
        if let Some(dest) = piece.position.offset(dx, forward) {
            if board
                .get_piece(dest)
                .is_some_and(|occupant| occupant.color != piece.color)
            {
                moves.push(dest);
            }
        }
    }
}
