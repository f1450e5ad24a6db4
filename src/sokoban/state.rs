//! State encodings for the two kinds of consumers
//!
//! Two encodings coexist:
//! - [`StateKey`] is the compact discrete key the tabular agent indexes its
//!   Q-table with
//! - [`DenseObservation`] is the full normalized-float board for consumers
//!   that need it (e.g. a neural policy); the tabular agent never reads it

use serde::{Deserialize, Serialize};

use super::grid::{Grid, Pos};

/// Discretized state: (player column, player row, first-box column,
/// first-box row)
///
/// Both positions are derived by row-major scans of the grid. Only the first
/// Box-or-BoxOnTarget tile is tracked, so levels with multiple boxes alias
/// distinct true states to the same key; tabular training is state-complete
/// for single-box levels only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub player_col: usize,
    pub player_row: usize,
    pub box_col: usize,
    pub box_row: usize,
}

impl StateKey {
    /// Derive the key from a grid, or None if it lacks a player or a box.
    pub fn from_grid(grid: &Grid) -> Option<StateKey> {
        let player = grid.player_position()?;
        let first_box = grid.first_box_position()?;
        Some(StateKey {
            player_col: player.col,
            player_row: player.row,
            box_col: first_box.col,
            box_row: first_box.row,
        })
    }
}

/// The full board with each tile mapped to a normalized value in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseObservation {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl DenseObservation {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut values = Vec::with_capacity(grid.rows() * grid.cols());
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                values.push(grid.get(Pos::new(row, col)).normalized());
            }
        }
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major flattened values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sokoban::Level;

    #[test]
    fn key_uses_column_row_order() {
        let grid = Level::parse("M\n#####\n#p.b#\n#..x#\n#####\nI\n")
            .unwrap()
            .into_grid();
        let key = StateKey::from_grid(&grid).unwrap();
        assert_eq!(key.player_col, 1);
        assert_eq!(key.player_row, 1);
        assert_eq!(key.box_col, 3);
        assert_eq!(key.box_row, 1);
    }

    #[test]
    fn key_tracks_first_box_in_scan_order() {
        let grid = Level::parse("M\n#p.b#\n#b.x#\nI\n").unwrap().into_grid();
        let key = StateKey::from_grid(&grid).unwrap();
        assert_eq!((key.box_row, key.box_col), (0, 3));
    }

    #[test]
    fn observation_values_normalized() {
        let grid = Level::parse("M\n#p.b!x#\nI\n").unwrap().into_grid();
        let obs = DenseObservation::from_grid(&grid);
        assert_eq!(obs.rows(), 1);
        assert_eq!(obs.cols(), 7);
        assert_eq!(obs.get(0, 0), 0.2); // wall = 1/5
        assert_eq!(obs.get(0, 4), 1.0); // box on target = 5/5
        assert!(obs.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
