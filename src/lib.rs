//! Tabular Q-learning trainer for Sokoban levels
//!
//! This crate provides:
//! - A Sokoban grid simulation engine with configurable rewards
//! - A dense Q-table agent with epsilon-greedy exploration
//! - A training pipeline with a reciprocal exploration-decay schedule
//! - A retrying trace writer that emits per-episode action sequences
//!   for consumption by an external game client

pub mod config;
pub mod error;
pub mod pipeline;
pub mod q_learning;
pub mod sokoban;
pub mod trace;

pub use config::{Parameters, RewardConfig, Rule};
pub use error::{Error, Result};
pub use pipeline::{
    EpisodeSummary, EpsilonSchedule, MetricsObserver, Observer, ProgressObserver, TrainingConfig,
    TrainingPipeline, TrainingResult,
};
pub use q_learning::{QLearningAgent, QTable};
pub use sokoban::{
    Action, DenseObservation, Grid, Level, Pos, SokobanEngine, StateKey, StepOutcome, Tile,
};
pub use trace::{ActionTrace, MemorySink, RetryPolicy, TraceSink, TraceWriter};
