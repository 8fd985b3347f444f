//! Text rendering of a board
//!
//! White pieces are upper case, Black lower case. Catalog pieces show their
//! kind id; anything else shows `*`. Highlighted cells get a `>` prefix.

use facetchess_core::{Board, Piece, Position, BOARD_SIZE};

/// Glyph for one piece, padded to the cell width
fn glyph(piece: &Piece) -> String {
    let id = piece.kind().map_or("*", |kind| kind.id);
    let id = match piece.color() {
        facetchess_core::Color::White => id.to_ascii_uppercase(),
        facetchess_core::Color::Black => id.to_ascii_lowercase(),
    };
    format!("{:<2}", id)
}

/// Render `board` with rank 7 on top; `highlight` marks destination cells
pub fn render_board(board: &Board, highlight: &[Position]) -> String {
    let mut out = String::new();

    for y in (0..BOARD_SIZE).rev() {
        out.push_str(&format!("{} |", y));
        for x in 0..BOARD_SIZE {
            let pos = Position::new(x, y);
            out.push(if highlight.contains(&pos) { '>' } else { ' ' });
            match board.get_piece(pos) {
                Some(piece) => out.push_str(&glyph(piece)),
                None => out.push_str(". "),
            }
        }
        out.push('\n');
    }

    out.push_str("   ");
    out.push_str(&"---".repeat(BOARD_SIZE as usize));
    out.push('\n');
    out.push_str("   ");
    for x in 0..BOARD_SIZE {
        out.push_str(&format!(" {} ", x));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetchess_core::{Capabilities, Color, Setup};

    #[test]
    fn test_render_standard() {
        let board = Setup::standard().to_board().unwrap();
        let text = render_board(&board, &[]);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "7 | r  n  b  q  k  b  n  r ");
        assert_eq!(lines[1], "6 | p  p  p  p  p  p  p  p ");
        assert_eq!(lines[4], "3 | .  .  .  .  .  .  .  . ");
        assert_eq!(lines[9], "    0  1  2  3  4  5  6  7 ");
        assert_eq!(lines[7], "0 | R  N  B  Q  K  B  N  R ");
    }

    #[test]
    fn test_render_highlights_and_hybrids() {
        let mut board = Board::new();
        let at = Position::new(0, 0);
        board.place_piece(
            Piece::new(Color::White, at, Capabilities::BISHOP | Capabilities::KING, "Abbot"),
            at,
        );
        board.place_piece(Piece::knight_rook(Color::Black, Position::new(1, 1)), Position::new(1, 1));

        let text = render_board(&board, &[Position::new(0, 1), Position::new(1, 1)]);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[7].starts_with("0 | * "));
        assert!(lines[6].starts_with("1 |>. >nr "));
    }
}
