//! Training loop, exploration schedule and observers

pub mod observers;
pub mod schedule;
pub mod training;

pub use observers::{EpisodeSummary, MetricsObserver, Observer, ProgressObserver};
pub use schedule::EpsilonSchedule;
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};
