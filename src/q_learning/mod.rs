//! Tabular Q-learning
//!
//! Strictly tabular, single-step bootstrapped TD(0): no eligibility traces,
//! no replay buffer, no function approximation. The table is dense over
//! (player position, first-box position, action), which is state-complete
//! for single-box levels only; see [`crate::sokoban::StateKey`].

pub mod agent;
pub mod q_table;

pub use agent::QLearningAgent;
pub use q_table::QTable;
