//! Board state representation and scan helpers

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tile::Tile;

/// A (row, column) cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular Sokoban board, row-major, dimensions fixed at load time
///
/// The grid is the sole mutable state of an episode and the single source of
/// truth: player and box positions are always derived by scanning it, never
/// cached in separate fields that could desync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a grid from equal-length rows of tiles.
    pub(crate) fn from_rows(rows: Vec<Vec<Tile>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|r| r.len() == width));
        Self {
            rows: height,
            cols: width,
            tiles: rows.into_iter().flatten().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, pos: Pos) -> Tile {
        self.tiles[pos.row * self.cols + pos.col]
    }

    pub(crate) fn set(&mut self, pos: Pos, tile: Tile) {
        self.tiles[pos.row * self.cols + pos.col] = tile;
    }

    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Scan for the Player tile in row-major order.
    pub fn player_position(&self) -> Option<Pos> {
        self.position_of(|t| t == Tile::Player)
    }

    /// Scan for the first Box or BoxOnTarget tile in row-major order.
    pub fn first_box_position(&self) -> Option<Pos> {
        self.position_of(Tile::is_box)
    }

    /// Count of Box plus BoxOnTarget tiles (invariant across an episode).
    pub fn box_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_box()).count()
    }

    /// Count of boxes currently sitting on targets.
    pub fn achieved_targets(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::BoxOnTarget).count()
    }

    /// The level is solved when no plain Box tiles remain (every box is
    /// accounted for as BoxOnTarget).
    pub fn is_solved(&self) -> bool {
        !self.tiles.iter().any(|&t| t == Tile::Box)
    }

    /// All coordinates whose tile matches the predicate, in row-major order.
    pub(crate) fn positions_where(&self, pred: impl Fn(Tile) -> bool) -> Vec<Pos> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &t)| pred(t))
            .map(|(i, _)| Pos::new(i / self.cols, i % self.cols))
            .collect()
    }

    fn position_of(&self, pred: impl Fn(Tile) -> bool) -> Option<Pos> {
        self.tiles
            .iter()
            .position(|&t| pred(t))
            .map(|i| Pos::new(i / self.cols, i % self.cols))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.cols) {
            for &tile in row {
                write!(f, "{}", tile.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sokoban::Level;

    fn grid() -> Grid {
        Level::parse("M\n#####\n#p.b#\n#..x#\n#####\nI\n")
            .unwrap()
            .into_grid()
    }

    #[test]
    fn scans_find_player_and_box() {
        let g = grid();
        assert_eq!(g.player_position(), Some(Pos::new(1, 1)));
        assert_eq!(g.first_box_position(), Some(Pos::new(1, 3)));
    }

    #[test]
    fn box_count_includes_boxes_on_targets() {
        let g = Level::parse("M\n#p b!#\nI\n").unwrap().into_grid();
        assert_eq!(g.box_count(), 2);
        assert_eq!(g.achieved_targets(), 1);
        assert!(!g.is_solved());
    }

    #[test]
    fn display_renders_rows() {
        let g = grid();
        assert_eq!(format!("{g}"), "#####\n#p.b#\n#..x#\n#####\n");
    }

    #[test]
    fn solved_when_no_plain_box_left() {
        let g = Level::parse("M\n#p.!#\nI\n").unwrap().into_grid();
        assert!(g.is_solved());
    }
}
