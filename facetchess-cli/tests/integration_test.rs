//! Integration tests for the facetchess engine
//!
//! Exercises the public core API the way a front end drives it: build a
//! board from a setup, query moves, apply moves, observe captures.

use facetchess_core::{
    Board, Capabilities, Color, Move, Piece, Position, Setup, SetupError, SetupPiece,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn pos(x: i8, y: i8) -> Position {
    Position::new(x, y)
}

fn sorted(mut moves: Vec<Position>) -> Vec<Position> {
    moves.sort();
    moves
}

fn lone(piece: Piece) -> Board {
    let at = piece.position();
    let mut board = Board::new();
    board.place_piece(piece, at);
    board
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

#[test]
fn test_rook_ranks_and_files() {
    for at in [pos(0, 0), pos(3, 5), pos(7, 2)] {
        let board = lone(Piece::rook(Color::Black, at));
        let expected: Vec<Position> = Position::all()
            .filter(|p| *p != at && (p.x == at.x || p.y == at.y))
            .collect();
        assert_eq!(sorted(board.legal_moves_at(at)), sorted(expected));
    }
}

#[test]
fn test_knight_from_d4() {
    let board = lone(Piece::knight(Color::White, pos(3, 3)));
    let expected = vec![
        pos(5, 4),
        pos(5, 2),
        pos(1, 4),
        pos(1, 2),
        pos(4, 5),
        pos(4, 1),
        pos(2, 5),
        pos(2, 1),
    ];
    assert_eq!(sorted(board.legal_moves_at(pos(3, 3))), sorted(expected));
}

#[test]
fn test_queen_equivalent_is_rook_plus_bishop() {
    for at in [pos(3, 3), pos(0, 0), pos(7, 4)] {
        let rook = sorted(lone(Piece::rook(Color::White, at)).legal_moves_at(at));
        let bishop = sorted(lone(Piece::bishop(Color::White, at)).legal_moves_at(at));
        let queen = sorted(
            lone(Piece::new(Color::White, at, Capabilities::ROOK | Capabilities::BISHOP, "Q"))
                .legal_moves_at(at),
        );

        let mut union = rook.clone();
        union.extend(bishop.iter().copied().filter(|p| !rook.contains(p)));
        assert_eq!(queen, sorted(union), "at {}", at);
    }
    assert_eq!(lone(Piece::queen(Color::White, pos(3, 3))).legal_moves_at(pos(3, 3)).len(), 27);
}

#[test]
fn test_pawn_first_move_then_single_steps() {
    let mut board = lone(Piece::pawn(Color::White, pos(2, 1)));
    assert_eq!(sorted(board.legal_moves_at(pos(2, 1))), vec![pos(2, 2), pos(2, 3)]);

    assert!(board.move_piece(pos(2, 1), pos(2, 3)));
    assert_eq!(board.legal_moves_at(pos(2, 3)), vec![pos(2, 4)]);

    board.place_piece(Piece::rook(Color::Black, pos(2, 4)), pos(2, 4));
    assert!(board.legal_moves_at(pos(2, 3)).is_empty());
}

// ============================================================================
// MOVE EXECUTION
// ============================================================================

#[test]
fn test_capture_through_board() {
    let mut board = Board::new();
    board.place_piece(Piece::knight_rook(Color::White, pos(0, 0)), pos(0, 0));
    board.place_piece(Piece::king(Color::Black, pos(1, 2)), pos(1, 2));

    assert!(board.apply(Move::new(pos(0, 0), pos(1, 2))));
    let mover = board.get_piece(pos(1, 2)).unwrap();
    assert_eq!(mover.name(), "Knight-Rook");
    assert_eq!(mover.position(), pos(1, 2));
    assert_eq!(board.piece_count(Color::Black), 0);
    assert!(board.get_piece(pos(0, 0)).is_none());
}

#[test]
fn test_illegal_move_is_not_applied() {
    let mut board = Setup::standard().to_board().unwrap();
    let from = board.get_piece(pos(2, 0)).cloned();
    let to = board.get_piece(pos(4, 2)).cloned();

    assert!(!board.move_piece(pos(2, 0), pos(4, 2)));
    assert_eq!(board.get_piece(pos(2, 0)).cloned(), from);
    assert_eq!(board.get_piece(pos(4, 2)).cloned(), to);
}

#[test]
fn test_random_play_keeps_board_consistent() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut board = Setup::random_hybrid(&mut rng, "walk", 12).to_board().unwrap();
    let mut total = board.pieces().count();

    for _ in 0..400 {
        let occupied: Vec<Position> = board.pieces().map(|(at, _)| at).collect();
        let Some(&from) = occupied.choose(&mut rng) else {
            break;
        };
        let legal = board.legal_moves_at(from);

        if legal.is_empty() || rng.gen_bool(0.2) {
            // Random target; must succeed exactly when it is legal
            let to = pos(rng.gen_range(0..8), rng.gen_range(0..8));
            let before = board.clone();
            let ok = board.move_piece(from, to);
            assert_eq!(ok, legal.contains(&to));
            if !ok {
                assert_eq!(board, before);
            }
        } else {
            let to = *legal.choose(&mut rng).unwrap();
            let mover = board.get_piece(from).map(|p| (p.name().to_string(), p.color()));
            let victim = board.get_piece(to).map(|p| p.color());
            assert!(board.move_piece(from, to));

            let moved = board.get_piece(to).unwrap();
            assert_eq!(Some((moved.name().to_string(), moved.color())), mover);
            assert!(moved.has_moved());
            assert!(board.get_piece(from).is_none());
            if let Some(color) = victim {
                assert_ne!(Some(color), mover.map(|(_, c)| c));
            }
        }

        assert!(board.validate());
        let now = board.pieces().count();
        assert!(now <= total);
        total = now;
    }
}

// ============================================================================
// SETUP FILES
// ============================================================================

#[test]
fn test_setup_file_round_trip() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("facetchess-it-{}.json", std::process::id()));

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let setup = Setup::random_hybrid(&mut rng, "roundtrip", 9);
    setup.save(&path).unwrap();
    let loaded = Setup::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.to_board().unwrap(), setup.to_board().unwrap());
}

#[test]
fn test_setup_load_errors() {
    let path = std::env::temp_dir().join(format!("facetchess-bad-{}.json", std::process::id()));
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Setup::load(&path).is_err());
    std::fs::remove_file(&path).ok();

    assert!(Setup::load(&path).is_err());

    let setup = Setup {
        name: "offboard".to_string(),
        pieces: vec![SetupPiece::catalog("Q", Color::White, pos(3, 8))],
    };
    assert_eq!(
        setup.to_board(),
        Err(SetupError::OffBoard { index: 0, pos: pos(3, 8) })
    );
}
