//! Sokoban grid simulation
//!
//! The simulation is split into:
//! - [`Tile`] and [`Grid`]: the board representation (the grid is the single
//!   source of truth; player and box positions are derived by scanning it)
//! - [`Level`]: the level-file parser, which also captures the immutable base
//!   state and the set of target coordinates
//! - [`SokobanEngine`]: the mutable episode state machine (`reset`/`step`)
//! - [`StateKey`] and [`DenseObservation`]: the two state encodings consumed
//!   by the tabular agent and by dense-observation consumers respectively

pub mod engine;
pub mod grid;
pub mod level;
pub mod state;
pub mod tile;

pub use engine::{Action, SokobanEngine, StepOutcome};
pub use grid::{Grid, Pos};
pub use level::Level;
pub use state::{DenseObservation, StateKey};
pub use tile::Tile;
