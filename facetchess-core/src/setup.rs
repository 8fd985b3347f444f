//! Setup - initial piece placement, loadable from JSON

use std::path::Path;

use anyhow::Context;
use rand::Rng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Position, BOARD_SIZE};
use crate::error::SetupError;
use crate::game::Board;
use crate::pieces::{
    get_piece_kind, kind_for_capabilities, piece_id_to_index, Capabilities, Color, Facet, Piece,
};

/// Name given to pieces built from a bare capability list
const CUSTOM_PIECE_NAME: &str = "Custom Piece";

/// Back rank, file 0 to 7
const BACK_RANK: [&str; 8] = ["R", "N", "B", "Q", "K", "B", "N", "R"];

/// One placed piece: a catalog `kind`, explicit `capabilities`, or both
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPiece {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    pub color: Color,
    pub pos: [i8; 2],
}

impl SetupPiece {
    /// Catalog piece entry
    pub fn catalog(id: &str, color: Color, pos: Position) -> Self {
        Self {
            kind: Some(id.to_string()),
            name: None,
            capabilities: Vec::new(),
            color,
            pos: [pos.x, pos.y],
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.pos[0], self.pos[1])
    }

    /// Build the detached piece this entry describes
    pub fn to_piece(&self, index: usize) -> Result<Piece, SetupError> {
        let mut capabilities = Capabilities::NONE;
        let mut default_name = CUSTOM_PIECE_NAME;

        if let Some(id) = &self.kind {
            let kind = piece_id_to_index(id)
                .and_then(get_piece_kind)
                .ok_or_else(|| SetupError::UnknownKind(id.clone()))?;
            capabilities = kind.capabilities;
            default_name = kind.name;
        }

        for facet in &self.capabilities {
            capabilities = capabilities | Capabilities::from(facet.parse::<Facet>()?);
        }

        if capabilities.is_empty() {
            return Err(SetupError::NoCapabilities { index });
        }

        let name = self.name.as_deref().unwrap_or(default_name);
        Ok(Piece::new(self.color, self.position(), capabilities, name))
    }
}

/// A named initial placement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub name: String,
    pub pieces: Vec<SetupPiece>,
}

impl Setup {
    /// Build a board, rejecting bad entries instead of silently replacing
    pub fn to_board(&self) -> Result<Board, SetupError> {
        let mut board = Board::new();
        let mut occupied: FxHashMap<Position, usize> = FxHashMap::default();

        for (index, entry) in self.pieces.iter().enumerate() {
            let pos = entry.position();
            if !pos.is_valid() {
                return Err(SetupError::OffBoard { index, pos });
            }
            if let Some(&first) = occupied.get(&pos) {
                return Err(SetupError::DuplicateSquare {
                    first,
                    second: index,
                    pos,
                });
            }
            occupied.insert(pos, index);

            let piece = entry.to_piece(index)?;
            board.place_piece(piece, pos);
        }

        Ok(board)
    }

    /// Describe the current contents of `board`
    pub fn from_board(name: &str, board: &Board) -> Self {
        let pieces = board
            .pieces()
            .map(|(pos, piece)| {
                let kind = kind_for_capabilities(piece.capabilities());
                SetupPiece {
                    kind: kind.map(|k| k.id.to_string()),
                    name: match kind {
                        Some(k) if k.name == piece.name() => None,
                        _ => Some(piece.name().to_string()),
                    },
                    capabilities: match kind {
                        Some(_) => Vec::new(),
                        None => piece
                            .capabilities()
                            .facets()
                            .map(|f| f.name().to_string())
                            .collect(),
                    },
                    color: piece.color(),
                    pos: [pos.x, pos.y],
                }
            })
            .collect();

        Self {
            name: name.to_string(),
            pieces,
        }
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read setup: {}", path.display()))?;
        let setup: Setup = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse setup: {}", path.display()))?;
        Ok(setup)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write setup: {}", path.display()))?;
        Ok(())
    }

    /// Usual 32-piece opening layout; White on ranks 0-1
    pub fn standard() -> Self {
        let mut pieces = Vec::with_capacity(32);

        for (color, back, front) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
            for (x, id) in (0..BOARD_SIZE).zip(BACK_RANK) {
                pieces.push(SetupPiece::catalog(id, color, Position::new(x, back)));
            }
            for x in 0..BOARD_SIZE {
                pieces.push(SetupPiece::catalog("P", color, Position::new(x, front)));
            }
        }

        Self {
            name: "standard".to_string(),
            pieces,
        }
    }

    /// Generate a mirrored random army of hybrid pieces plus one king per side
    pub fn random_hybrid<R: Rng>(rng: &mut R, name: &str, num_pieces: usize) -> Self {
        // Five facets give 31 non-empty combinations
        const MAX_MASK: u8 = (1 << Facet::ALL.len()) - 1;

        let king_square = Position::new(4, 0);
        let squares: Vec<Position> = (0..2)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Position::new(x, y)))
            .filter(|&pos| pos != king_square)
            .take(num_pieces)
            .collect();

        let mut pieces = Vec::with_capacity(2 * (squares.len() + 1));
        for color in [Color::White, Color::Black] {
            pieces.push(SetupPiece::catalog("K", color, home_side(king_square, color)));
        }

        for &square in &squares {
            let mask = rng.gen_range(1..=MAX_MASK);
            let capabilities: Capabilities = Facet::ALL
                .into_iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, facet)| facet)
                .collect();

            for color in [Color::White, Color::Black] {
                let pos = home_side(square, color);
                let entry = match kind_for_capabilities(capabilities) {
                    Some(kind) => SetupPiece::catalog(kind.id, color, pos),
                    None => SetupPiece {
                        kind: None,
                        name: Some(format!("Hybrid {}", capabilities)),
                        capabilities: capabilities.facets().map(|f| f.name().to_string()).collect(),
                        color,
                        pos: [pos.x, pos.y],
                    },
                };
                pieces.push(entry);
            }
        }

        Self {
            name: name.to_string(),
            pieces,
        }
    }

    /// Named chaos setup (seed 12345) - 8 random pieces per side
    pub fn chaos() -> Self {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(12345);
        Self::random_hybrid(&mut rng, "chaos", 8)
    }
}

/// Reflect a White-side square to `color`'s side of the board
fn home_side(pos: Position, color: Color) -> Position {
    match color {
        Color::White => pos,
        Color::Black => Position::new(pos.x, BOARD_SIZE - 1 - pos.y),
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::standard()
    }
}
