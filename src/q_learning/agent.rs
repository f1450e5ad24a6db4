//! Epsilon-greedy Q-learning agent

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::q_table::QTable;
use crate::sokoban::{Action, StateKey};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Wraps the dense [`QTable`] with ε-greedy action selection. The
/// exploration probability is supplied per call by the training loop's
/// schedule rather than decayed internally, so the same agent serves both
/// training (ε > 0) and the final greedy inference pass (ε = 0).
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent for a `cols` × `rows` board.
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    pub fn new(cols: usize, rows: usize, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_table: QTable::new(cols, rows, learning_rate, discount_factor),
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Fix the RNG seed for reproducible exploration.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_seed(seed);
        self
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// ε-greedy action selection: with probability `epsilon` a uniformly
    /// random action, otherwise the greedy action.
    pub fn select_action(&mut self, key: StateKey, epsilon: f64) -> Action {
        if self.rng.random::<f64>() < epsilon {
            *Action::ALL
                .choose(&mut self.rng)
                .expect("action space is non-empty")
        } else {
            self.q_table.greedy_action(key)
        }
    }

    /// Greedy action for the current value estimates.
    pub fn greedy_action(&self, key: StateKey) -> Action {
        self.q_table.greedy_action(key)
    }

    /// Apply the one-step Q-learning update for an observed transition.
    pub fn learn(&mut self, key: StateKey, action: Action, reward: f64, next_key: StateKey) {
        self.q_table.update(key, action, reward, next_key);
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }
}
