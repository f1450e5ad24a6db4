//! Mutable episode state machine: action resolution, rewards, termination

use std::{fs::File, io::Write, path::Path};

use serde::{Deserialize, Serialize};

use super::{
    grid::{Grid, Pos},
    level::Level,
    state::{DenseObservation, StateKey},
    tile::Tile,
};
use crate::{
    config::RewardConfig,
    error::{Error, Result},
};

/// A player action, one unit step on the (row, column) axes
///
/// Enumeration order is the wire order: index 0-3 and trace letters U/R/D/L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    pub const COUNT: usize = 4;

    /// All actions in enumeration order (greedy tie-breaks follow this).
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] for indices outside 0-3; an
    /// out-of-enumeration action is a caller bug, never a silent no-op.
    pub fn from_index(index: usize) -> Result<Action> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidAction { index })
    }

    /// (row delta, column delta)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
        }
    }

    /// Trace-file letter
    pub fn to_letter(self) -> char {
        match self {
            Action::Up => 'U',
            Action::Right => 'R',
            Action::Down => 'D',
            Action::Left => 'L',
        }
    }
}

/// Result of one simulation step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub observation: DenseObservation,
    pub reward: f64,
    pub done: bool,
}

/// The grid simulation engine
///
/// Owns the mutable grid for the duration of a run. Each [`step`] resolves
/// one action to completion before any tile is written, so no torn state is
/// ever observable. Termination (a winning push, or the step counter
/// reaching the budget) is reported through a single `done` flag; callers
/// that need to distinguish a win from a timeout inspect the final grid via
/// [`Grid::is_solved`].
///
/// [`step`]: SokobanEngine::step
#[derive(Debug, Clone)]
pub struct SokobanEngine {
    grid: Grid,
    base: Grid,
    targets: Vec<Pos>,
    rewards: RewardConfig,
    max_steps: usize,
    steps: usize,
    record_history: bool,
    history: Vec<Grid>,
}

impl SokobanEngine {
    pub fn new(level: Level, rewards: RewardConfig, max_steps: usize) -> Self {
        let targets = level.targets().to_vec();
        let grid = level.into_grid();
        Self {
            base: grid.clone(),
            grid,
            targets,
            rewards,
            max_steps,
            steps: 0,
            record_history: false,
            history: Vec::new(),
        }
    }

    /// Record a grid snapshot per step for later replay via
    /// [`save_history`](SokobanEngine::save_history).
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Restore the grid from the base state and start a fresh episode.
    pub fn reset(&mut self) -> DenseObservation {
        self.grid = self.base.clone();
        self.steps = 0;
        self.history.clear();
        if self.record_history {
            self.history.push(self.grid.clone());
        }
        DenseObservation::from_grid(&self.grid)
    }

    /// Apply one action and resolve its outcome.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        self.steps += 1;
        let player = self
            .grid
            .player_position()
            .expect("grid holds exactly one player");

        let mut done = false;
        let reward = match self.tile_towards(player, action) {
            None | Some((_, Tile::Wall)) => self.rewards.wall_bump,
            Some((candidate, Tile::Empty | Tile::Target)) => {
                self.grid.set(player, Tile::Empty);
                self.grid.set(candidate, Tile::Player);
                self.rewards.empty_move
            }
            Some((candidate, Tile::Box | Tile::BoxOnTarget)) => {
                match self.tile_towards(candidate, action) {
                    Some((far, Tile::Target)) => {
                        self.grid.set(player, Tile::Empty);
                        self.grid.set(candidate, Tile::Player);
                        self.grid.set(far, Tile::BoxOnTarget);
                        done = true;
                        self.rewards.win
                    }
                    Some((far, Tile::Empty)) => {
                        self.grid.set(player, Tile::Empty);
                        self.grid.set(candidate, Tile::Player);
                        self.grid.set(far, Tile::Box);
                        self.rewards.box_moved
                    }
                    // Wall, another box, or out of bounds behind the box
                    _ => self.rewards.cannot_push_box,
                }
            }
            // a second player tile cannot occur
            Some((_, Tile::Player)) => self.rewards.wall_bump,
        };

        self.fix_targets();
        done = done || self.steps >= self.max_steps;

        if self.record_history {
            self.history.push(self.grid.clone());
        }

        StepOutcome {
            observation: DenseObservation::from_grid(&self.grid),
            reward,
            done,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Tabular key for the current grid.
    pub fn state_key(&self) -> StateKey {
        StateKey::from_grid(&self.grid).expect("grid holds a player and a box")
    }

    /// Grid snapshots recorded this episode (empty unless enabled).
    pub fn history(&self) -> &[Grid] {
        &self.history
    }

    /// Write the recorded episode frames as text maps separated by `-` lines.
    pub fn save_history<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|e| Error::Io {
            operation: format!("create history file {}", path.display()),
            source: e,
        })?;
        for grid in &self.history {
            writeln!(file, "{grid}-").map_err(|e| Error::Io {
                operation: format!("write history file {}", path.display()),
                source: e,
            })?;
        }
        Ok(())
    }

    /// The candidate cell one step from `from`, with its tile; None when the
    /// step leaves the board (treated as a wall by the caller).
    fn tile_towards(&self, from: Pos, action: Action) -> Option<(Pos, Tile)> {
        let (dr, dc) = action.delta();
        let row = from.row as isize + dr;
        let col = from.col as isize + dc;
        if !self.grid.contains(row, col) {
            return None;
        }
        let pos = Pos::new(row as usize, col as usize);
        Some((pos, self.grid.get(pos)))
    }

    /// Restore any target cell the player walked off of: a target vacated
    /// without a box on it reads Empty and must revert to Target.
    fn fix_targets(&mut self) {
        for i in 0..self.targets.len() {
            let pos = self.targets[i];
            if self.grid.get(pos) == Tile::Empty {
                self.grid.set(pos, Tile::Target);
            }
        }
    }
}
