//! Square board geometry with (x, y) coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParsePositionError;

/// Board side length (cells per rank and per file)
pub const BOARD_SIZE: i8 = 8;

/// Board coordinates, x = file, y = rank, both in `0..BOARD_SIZE`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this position is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Neighbor at (dx, dy), or None if it falls off the board
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Position> {
        let next = Position::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?);
        next.is_valid().then_some(next)
    }

    /// Grid indices (row, column) for an on-board position
    pub(crate) fn index(&self) -> Option<(usize, usize)> {
        self.is_valid().then(|| (self.y as usize, self.x as usize))
    }

    /// All 64 on-board positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Position::new(x, y)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parse `"x,y"`; the result must be on the board
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParsePositionError::Format(s.to_string()))?;
        let x: i8 = x
            .trim()
            .parse()
            .map_err(|_| ParsePositionError::Format(s.to_string()))?;
        let y: i8 = y
            .trim()
            .parse()
            .map_err(|_| ParsePositionError::Format(s.to_string()))?;
        let pos = Position::new(x, y);
        if !pos.is_valid() {
            return Err(ParsePositionError::OffBoard(pos));
        }
        Ok(pos)
    }
}

/// Orthogonal unit vectors (dx, dy)
pub const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal unit vectors (dx, dy)
pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// L-shaped jumps
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// The eight neighbors, orthogonal first
pub const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_validity() {
        assert!(Position::new(0, 0).is_valid());
        assert!(Position::new(7, 7).is_valid());
        assert!(Position::new(3, 4).is_valid());
        assert!(!Position::new(8, 0).is_valid());
        assert!(!Position::new(0, -1).is_valid());
        assert!(!Position::new(-1, 8).is_valid());
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Position::new(0, 0).offset(1, 2), Some(Position::new(1, 2)));
        assert_eq!(Position::new(0, 0).offset(-1, 0), None);
        assert_eq!(Position::new(7, 6).offset(0, 2), None);
        assert_eq!(Position::new(i8::MAX, 0).offset(1, 0), None);
    }

    #[test]
    fn test_all_positions() {
        let all: Vec<_> = Position::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[8], Position::new(0, 1));
        assert_eq!(all[63], Position::new(7, 7));
    }

    #[test]
    fn test_parse() {
        assert_eq!("3,4".parse::<Position>(), Ok(Position::new(3, 4)));
        assert_eq!(" 0 , 7 ".parse::<Position>(), Ok(Position::new(0, 7)));
        assert!(matches!("3;4".parse::<Position>(), Err(ParsePositionError::Format(_))));
        assert!(matches!("a,1".parse::<Position>(), Err(ParsePositionError::Format(_))));
        assert_eq!(
            "8,0".parse::<Position>(),
            Err(ParsePositionError::OffBoard(Position::new(8, 0)))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let pos = Position::new(5, 2);
        assert_eq!(pos.to_string(), "5,2");
        assert_eq!(pos.to_string().parse::<Position>(), Ok(pos));
    }
}
