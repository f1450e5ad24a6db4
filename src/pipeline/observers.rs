//! Observer pattern for the training pipeline
//!
//! Observers allow composable progress reporting and bookkeeping without
//! coupling the training loop to specific outputs.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Summary of one finished episode
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode index (training episodes count from 0)
    pub episode: usize,
    /// Steps taken before termination
    pub steps: usize,
    /// Sum of step rewards
    pub total_reward: f64,
    /// Whether the episode ended with the level solved
    pub solved: bool,
}

/// Training lifecycle hooks
pub trait Observer {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    solved: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            solved: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        if summary.solved {
            self.solved += 1;
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(format!("solved: {}", self.solved));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("solved: {}", self.solved));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks solve and reward statistics across episodes
pub struct MetricsObserver {
    episodes: usize,
    solved: usize,
    total_steps: usize,
    total_reward: f64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            episodes: 0,
            solved: 0,
            total_steps: 0,
            total_reward: 0.0,
        }
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn solved(&self) -> usize {
        self.solved
    }

    pub fn solve_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.solved as f64 / self.episodes as f64
        }
    }

    pub fn mean_steps(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        }
    }

    pub fn mean_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.episodes += 1;
        if summary.solved {
            self.solved += 1;
        }
        self.total_steps += summary.steps;
        self.total_reward += summary.total_reward;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(solved: bool) -> EpisodeSummary {
        EpisodeSummary {
            episode: 0,
            steps: 10,
            total_reward: -1.0,
            solved,
        }
    }

    #[test]
    fn metrics_accumulate() {
        let mut metrics = MetricsObserver::new();
        metrics.on_episode_end(&summary(true)).unwrap();
        metrics.on_episode_end(&summary(false)).unwrap();
        assert_eq!(metrics.episodes(), 2);
        assert_eq!(metrics.solved(), 1);
        assert_eq!(metrics.solve_rate(), 0.5);
        assert_eq!(metrics.mean_steps(), 10.0);
        assert_eq!(metrics.mean_reward(), -1.0);
    }

    #[test]
    fn empty_metrics_are_zero() {
        let metrics = MetricsObserver::new();
        assert_eq!(metrics.solve_rate(), 0.0);
        assert_eq!(metrics.mean_steps(), 0.0);
    }
}
