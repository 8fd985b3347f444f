//! Piece definitions: colors, capability facets and the canonical catalog

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::SetupError;

/// Piece kind identifier (index into PIECE_KINDS)
pub type PieceKindId = u8;

// ============================================================================
// COLOR
// ============================================================================

/// Side a piece belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Pawn-like direction along y: White climbs, Black descends
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

// ============================================================================
// CAPABILITIES
// ============================================================================

/// One independent movement rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Rook,
    Bishop,
    Knight,
    Pawn,
    King,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::Rook,
        Facet::Bishop,
        Facet::Knight,
        Facet::Pawn,
        Facet::King,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Facet::Rook => "rook",
            Facet::Bishop => "bishop",
            Facet::Knight => "knight",
            Facet::Pawn => "pawn",
            Facet::King => "king",
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl FromStr for Facet {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SetupError::UnknownCapability(s.to_string()))
    }
}

/// Set of facets a piece moves with. Facets combine freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Facet>", into = "Vec<Facet>")]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    pub const ROOK: Capabilities = Capabilities(Facet::Rook.bit());
    pub const BISHOP: Capabilities = Capabilities(Facet::Bishop.bit());
    pub const KNIGHT: Capabilities = Capabilities(Facet::Knight.bit());
    pub const PAWN: Capabilities = Capabilities(Facet::Pawn.bit());
    pub const KING: Capabilities = Capabilities(Facet::King.bit());

    pub const fn union(self, other: Capabilities) -> Capabilities {
        Capabilities(self.0 | other.0)
    }

    pub const fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn has(self, facet: Facet) -> bool {
        self.0 & facet.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Enabled facets in rook, bishop, knight, pawn, king order
    pub fn facets(self) -> impl Iterator<Item = Facet> {
        Facet::ALL.into_iter().filter(move |&facet| self.has(facet))
    }
}

impl From<Facet> for Capabilities {
    fn from(facet: Facet) -> Self {
        Capabilities(facet.bit())
    }
}

impl From<Vec<Facet>> for Capabilities {
    fn from(facets: Vec<Facet>) -> Self {
        facets.into_iter().collect()
    }
}

impl From<Capabilities> for Vec<Facet> {
    fn from(caps: Capabilities) -> Self {
        caps.facets().collect()
    }
}

impl FromIterator<Facet> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Facet>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Capabilities::NONE, |caps, facet| caps | Capabilities::from(facet))
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        self.union(rhs)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.facets().map(Facet::name).collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("+"))
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Canonical capability combination with a short id
#[derive(Clone, Debug)]
pub struct PieceKind {
    pub id: &'static str,
    pub name: &'static str,
    pub capabilities: Capabilities,
}

impl PieceKind {
    const fn new(id: &'static str, name: &'static str, capabilities: Capabilities) -> Self {
        Self { id, name, capabilities }
    }
}

/// All named piece kinds
pub static PIECE_KINDS: [PieceKind; 8] = [
    PieceKind::new("R", "Rook", Capabilities::ROOK),
    PieceKind::new("B", "Bishop", Capabilities::BISHOP),
    PieceKind::new("N", "Knight", Capabilities::KNIGHT),
    PieceKind::new("P", "Pawn", Capabilities::PAWN),
    PieceKind::new("K", "King", Capabilities::KING),
    PieceKind::new("Q", "Queen", Capabilities::ROOK.union(Capabilities::BISHOP)),
    // Hybrids
    PieceKind::new("NR", "Knight-Rook", Capabilities::ROOK.union(Capabilities::KNIGHT)),
    PieceKind::new("PN", "Pawn-Knight", Capabilities::KNIGHT.union(Capabilities::PAWN)),
];

/// Get piece kind index from string ID (case-insensitive)
pub fn piece_id_to_index(id: &str) -> Option<PieceKindId> {
    PIECE_KINDS
        .iter()
        .position(|kind| kind.id.eq_ignore_ascii_case(id))
        .map(|i| i as PieceKindId)
}

/// Get piece kind from index
pub fn get_piece_kind(idx: PieceKindId) -> Option<&'static PieceKind> {
    PIECE_KINDS.get(idx as usize)
}

/// Catalog entry whose capabilities match exactly, if any
pub fn kind_for_capabilities(capabilities: Capabilities) -> Option<&'static PieceKind> {
    PIECE_KINDS.iter().find(|kind| kind.capabilities == capabilities)
}

// ============================================================================
// PIECE
// ============================================================================

/// A piece, either detached or owned by a [`Board`](crate::game::Board).
///
/// Capabilities are fixed at construction. Position and the has-moved
/// latch change only through [`Piece::move_to`] and board placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) position: Position,
    pub(crate) capabilities: Capabilities,
    pub(crate) has_moved: bool,
    pub(crate) name: String,
}

impl Piece {
    /// Build a piece with an arbitrary capability combination
    pub fn new(
        color: Color,
        position: Position,
        capabilities: Capabilities,
        name: impl Into<String>,
    ) -> Self {
        Self {
            color,
            position,
            capabilities,
            has_moved: false,
            name: name.into(),
        }
    }

    /// Build a catalog piece by id ("R", "Q", "NR", ...)
    pub fn from_kind(id: &str, color: Color, position: Position) -> Option<Self> {
        let kind = get_piece_kind(piece_id_to_index(id)?)?;
        Some(Self::new(color, position, kind.capabilities, kind.name))
    }

    pub fn rook(color: Color, position: Position) -> Self {
        Self::new(color, position, Capabilities::ROOK, "Rook")
    }

    pub fn bishop(color: Color, position: Position) -> Self {
        Self::new(color, position, Capabilities::BISHOP, "Bishop")
    }

    pub fn knight(color: Color, position: Position) -> Self {
        Self::new(color, position, Capabilities::KNIGHT, "Knight")
    }

    pub fn pawn(color: Color, position: Position) -> Self {
        Self::new(color, position, Capabilities::PAWN, "Pawn")
    }

    pub fn king(color: Color, position: Position) -> Self {
        Self::new(color, position, Capabilities::KING, "King")
    }

    pub fn queen(color: Color, position: Position) -> Self {
        Self::new(color, position, Capabilities::ROOK | Capabilities::BISHOP, "Queen")
    }

    pub fn knight_rook(color: Color, position: Position) -> Self {
        Self::new(color, position, Capabilities::ROOK | Capabilities::KNIGHT, "Knight-Rook")
    }

    pub fn pawn_knight(color: Color, position: Position) -> Self {
        Self::new(color, position, Capabilities::KNIGHT | Capabilities::PAWN, "Pawn-Knight")
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Display name; has no effect on rules
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn moves_as_rook(&self) -> bool {
        self.capabilities.has(Facet::Rook)
    }

    pub fn moves_as_bishop(&self) -> bool {
        self.capabilities.has(Facet::Bishop)
    }

    pub fn moves_as_knight(&self) -> bool {
        self.capabilities.has(Facet::Knight)
    }

    pub fn moves_as_pawn(&self) -> bool {
        self.capabilities.has(Facet::Pawn)
    }

    pub fn moves_as_king(&self) -> bool {
        self.capabilities.has(Facet::King)
    }

    /// Catalog kind matching this piece's capabilities, if it has one
    pub fn kind(&self) -> Option<&'static PieceKind> {
        kind_for_capabilities(self.capabilities)
    }
}
