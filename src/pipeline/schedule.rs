//! Reciprocal exploration-decay schedule

use crate::error::{Error, Result};

/// Exploration probability as a function of the episode index
///
/// ε(episode) = 1 / (1 + β · episode / action_count), with β derived once
/// from the configured exploration threshold so that the curve passes
/// through 0.5 at that threshold. ε(0) = 1 and ε decreases strictly and
/// monotonically for β > 0.
///
/// # Examples
///
/// ```
/// use sokoban_rl::EpsilonSchedule;
///
/// let schedule = EpsilonSchedule::new(50.0, 4).unwrap();
/// assert_eq!(schedule.epsilon(0), 1.0);
/// assert!((schedule.epsilon(50) - 0.5).abs() < 1e-12);
/// assert!(schedule.epsilon(200) < schedule.epsilon(100));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EpsilonSchedule {
    beta: f64,
    action_count: f64,
}

impl EpsilonSchedule {
    /// Derive the schedule from the exploration threshold (the episode at
    /// which ε = 0.5) and the size of the action space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a non-positive or
    /// non-finite threshold, or an empty action space.
    pub fn new(exploration_threshold: f64, action_count: usize) -> Result<Self> {
        if !exploration_threshold.is_finite() || exploration_threshold <= 0.0 {
            return Err(Error::InvalidConfiguration {
                message: "exploration threshold must be a positive finite number".to_string(),
            });
        }
        if action_count == 0 {
            return Err(Error::InvalidConfiguration {
                message: "action space must be non-empty".to_string(),
            });
        }
        let action_count = action_count as f64;
        let beta = action_count / exploration_threshold * (1.0 / 0.5 - 1.0);
        Ok(Self { beta, action_count })
    }

    pub fn epsilon(&self, episode: usize) -> f64 {
        1.0 / (1.0 + self.beta * (episode as f64 / self.action_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        let schedule = EpsilonSchedule::new(10.0, 4).unwrap();
        assert_eq!(schedule.epsilon(0), 1.0);
    }

    #[test]
    fn halves_at_threshold() {
        for threshold in [1.0, 25.0, 400.0] {
            let schedule = EpsilonSchedule::new(threshold, 4).unwrap();
            let at_threshold = schedule.epsilon(threshold as usize);
            assert!(
                (at_threshold - 0.5).abs() < 1e-12,
                "epsilon({threshold}) = {at_threshold}"
            );
        }
    }

    #[test]
    fn strictly_decreasing() {
        let schedule = EpsilonSchedule::new(30.0, 4).unwrap();
        let mut prev = schedule.epsilon(0);
        for episode in 1..500 {
            let eps = schedule.epsilon(episode);
            assert!(eps < prev, "epsilon not decreasing at episode {episode}");
            prev = eps;
        }
    }

    #[test]
    fn rejects_degenerate_thresholds() {
        assert!(EpsilonSchedule::new(0.0, 4).is_err());
        assert!(EpsilonSchedule::new(-1.0, 4).is_err());
        assert!(EpsilonSchedule::new(f64::INFINITY, 4).is_err());
        assert!(EpsilonSchedule::new(10.0, 0).is_err());
    }
}
