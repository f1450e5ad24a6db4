//! Tile kinds and their text/numeric encodings

use serde::{Deserialize, Serialize};

/// A single cell of the Sokoban board
///
/// Exactly one tile kind occupies each cell. Player and Box are mutually
/// exclusive per cell and mutually exclusive with Wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    Empty = 0,
    Wall = 1,
    Target = 2,
    Player = 3,
    Box = 4,
    BoxOnTarget = 5,
}

impl Tile {
    /// Highest tile code, used to normalize codes into [0, 1]
    pub const MAX_CODE: u8 = Tile::BoxOnTarget as u8;

    pub fn to_char(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Wall => '#',
            Tile::Target => 'x',
            Tile::Player => 'p',
            Tile::Box => 'b',
            Tile::BoxOnTarget => '!',
        }
    }

    /// A literal space is accepted as a synonym for Empty in level sources.
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' | ' ' => Some(Tile::Empty),
            '#' => Some(Tile::Wall),
            'x' => Some(Tile::Target),
            'p' => Some(Tile::Player),
            'b' => Some(Tile::Box),
            '!' => Some(Tile::BoxOnTarget),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Tile code normalized to [0, 1] (code divided by the maximum code).
    pub fn normalized(self) -> f64 {
        f64::from(self.code()) / f64::from(Self::MAX_CODE)
    }

    /// Whether the tile holds a box, on a target or not.
    pub fn is_box(self) -> bool {
        matches!(self, Tile::Box | Tile::BoxOnTarget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_roundtrip() {
        for tile in [
            Tile::Empty,
            Tile::Wall,
            Tile::Target,
            Tile::Player,
            Tile::Box,
            Tile::BoxOnTarget,
        ] {
            assert_eq!(Tile::from_char(tile.to_char()), Some(tile));
        }
    }

    #[test]
    fn space_reads_as_empty() {
        assert_eq!(Tile::from_char(' '), Some(Tile::Empty));
    }

    #[test]
    fn unknown_char_rejected() {
        assert_eq!(Tile::from_char('?'), None);
    }

    #[test]
    fn normalized_range() {
        assert_eq!(Tile::Empty.normalized(), 0.0);
        assert_eq!(Tile::BoxOnTarget.normalized(), 1.0);
        assert!((Tile::Target.normalized() - 0.4).abs() < 1e-12);
    }
}
