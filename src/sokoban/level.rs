//! Level-file parsing
//!
//! A level source is plain text: a line exactly `M` marks the start of the
//! map block, a line exactly `I` marks its end and the start of the
//! instruction block (ignored here). Map rows use the six tile characters,
//! with a literal space accepted as Empty; ragged rows are right-padded with
//! Empty tiles to the width of the longest row.

use std::{fs, io::ErrorKind, path::Path};

use super::{
    grid::{Grid, Pos},
    tile::Tile,
};
use crate::error::{Error, Result};

/// A parsed level: the initial grid plus the target coordinates captured at
/// load time
///
/// The grid doubles as the immutable base state an episode is reset from.
/// Target coordinates include cells that start as BoxOnTarget, so the engine
/// can restore any target the player later walks off of.
#[derive(Debug, Clone)]
pub struct Level {
    grid: Grid,
    targets: Vec<Pos>,
}

impl Level {
    /// Parse level source text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLevel`] if the `M`/`I` markers are missing
    /// or misordered, the map block is empty, an unknown character appears,
    /// or the map does not hold exactly one player and at least one box and
    /// one target.
    pub fn parse(text: &str) -> Result<Level> {
        let lines: Vec<&str> = text.lines().collect();
        let map_start = Self::marker(&lines, "M")?;
        let instr_start = Self::marker(&lines, "I")?;
        if instr_start <= map_start {
            return Err(Error::MalformedLevel {
                reason: "instruction marker 'I' precedes map marker 'M'".to_string(),
            });
        }

        let map_lines = &lines[map_start + 1..instr_start];
        if map_lines.is_empty() {
            return Err(Error::MalformedLevel {
                reason: "map block between 'M' and 'I' is empty".to_string(),
            });
        }

        let width = map_lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut rows = Vec::with_capacity(map_lines.len());
        for (row_idx, line) in map_lines.iter().enumerate() {
            let mut row = Vec::with_capacity(width);
            for (col_idx, c) in line.chars().enumerate() {
                let tile = Tile::from_char(c).ok_or_else(|| Error::MalformedLevel {
                    reason: format!("unknown character '{c}' at row {row_idx}, column {col_idx}"),
                })?;
                row.push(tile);
            }
            row.resize(width, Tile::Empty);
            rows.push(row);
        }

        let grid = Grid::from_rows(rows);
        Self::validate(&grid)?;
        let targets = grid.positions_where(|t| matches!(t, Tile::Target | Tile::BoxOnTarget));
        Ok(Level { grid, targets })
    }

    /// Load a level from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LevelNotFound`] if the file does not exist, or any
    /// [`Error::MalformedLevel`] from [`Level::parse`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Level> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::LevelNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io {
                    operation: format!("read level file {}", path.display()),
                    source: e,
                }
            }
        })?;
        Self::parse(&text)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn targets(&self) -> &[Pos] {
        &self.targets
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    fn marker(lines: &[&str], marker: &str) -> Result<usize> {
        lines
            .iter()
            .position(|l| *l == marker)
            .ok_or_else(|| Error::MalformedLevel {
                reason: format!("missing '{marker}' marker line"),
            })
    }

    fn validate(grid: &Grid) -> Result<()> {
        let players = grid.positions_where(|t| t == Tile::Player).len();
        if players != 1 {
            return Err(Error::MalformedLevel {
                reason: format!("expected exactly one player tile, found {players}"),
            });
        }
        if grid.box_count() == 0 {
            return Err(Error::MalformedLevel {
                reason: "map holds no boxes".to_string(),
            });
        }
        let targets = grid
            .positions_where(|t| matches!(t, Tile::Target | Tile::BoxOnTarget))
            .len();
        if targets == 0 {
            return Err(Error::MalformedLevel {
                reason: "map holds no targets".to_string(),
            });
        }
        Ok(())
    }
}
