//! Run configuration: the external parameters JSON and the reward table
//!
//! The parameters file is owned by the game client; field names follow its
//! schema (`Level`, `Rules`, `ExplorationThreshold`, `NumGenerations`).
//! Everything is validated up front so a degenerate run fails fast instead
//! of training against nonsense.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One reward rule from the parameters file
///
/// `action` is the rule index, not a player action: 0 = empty-space,
/// 1 = wall, 2 = box-moved, 3 = end-of-game, 4 = cannot-move-box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "Action")]
    pub action: usize,

    #[serde(rename = "Reward")]
    pub reward: f64,
}

/// The five reward constants of the simulation
///
/// All independently tunable; the trainer only converges toward winning when
/// the win reward dominates the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    pub empty_move: f64,
    pub wall_bump: f64,
    pub box_moved: f64,
    pub win: f64,
    pub cannot_push_box: f64,
}

impl RewardConfig {
    const RULE_COUNT: usize = 5;

    /// Build the reward table from parameter rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless each of the five rule
    /// indices appears exactly once with a finite reward.
    pub fn from_rules(rules: &[Rule]) -> Result<RewardConfig> {
        let mut rewards = [None; Self::RULE_COUNT];
        for rule in rules {
            if rule.action >= Self::RULE_COUNT {
                return Err(Error::InvalidConfiguration {
                    message: format!(
                        "rule index {} is out of range (must be 0-{})",
                        rule.action,
                        Self::RULE_COUNT - 1
                    ),
                });
            }
            if !rule.reward.is_finite() {
                return Err(Error::InvalidConfiguration {
                    message: format!("reward for rule index {} is not finite", rule.action),
                });
            }
            if rewards[rule.action].replace(rule.reward).is_some() {
                return Err(Error::InvalidConfiguration {
                    message: format!("duplicate rule index {}", rule.action),
                });
            }
        }
        let value = |idx: usize| {
            rewards[idx].ok_or_else(|| Error::InvalidConfiguration {
                message: format!("missing rule index {idx}"),
            })
        };
        Ok(RewardConfig {
            empty_move: value(0)?,
            wall_bump: value(1)?,
            box_moved: value(2)?,
            win: value(3)?,
            cannot_push_box: value(4)?,
        })
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            empty_move: -0.1,
            wall_bump: -3.0,
            box_moved: 1.0,
            win: 10.0,
            cannot_push_box: -1.0,
        }
    }
}

/// The parameters file written by the game client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameters {
    /// Level number, resolved to `<levels-dir>/<level>`
    #[serde(rename = "Level")]
    pub level: u32,

    /// Reward rules, one per rule index
    #[serde(rename = "Rules")]
    pub rules: Vec<Rule>,

    /// Episode index at which exploration probability reaches 0.5
    #[serde(rename = "ExplorationThreshold")]
    pub exploration_threshold: f64,

    /// Number of training episodes
    #[serde(rename = "NumGenerations")]
    pub num_generations: usize,
}

impl Parameters {
    /// Load and validate a parameters JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Parameters> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::Io {
            operation: format!("open parameters file {}", path.display()),
            source: e,
        })?;
        let params: Parameters = serde_json::from_reader(file)?;
        params.validate()?;
        Ok(params)
    }

    /// Check the scalar options and the rule table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] on a level or episode count
    /// below 1, a non-positive or non-finite exploration threshold, or an
    /// incomplete rule table.
    pub fn validate(&self) -> Result<()> {
        if self.level < 1 {
            return Err(Error::InvalidConfiguration {
                message: "Level must be greater or equal to 1".to_string(),
            });
        }
        if self.num_generations < 1 {
            return Err(Error::InvalidConfiguration {
                message: "NumGenerations must be greater or equal to 1".to_string(),
            });
        }
        if !self.exploration_threshold.is_finite() || self.exploration_threshold <= 0.0 {
            return Err(Error::InvalidConfiguration {
                message: "ExplorationThreshold must be a positive finite number".to_string(),
            });
        }
        self.reward_config().map(|_| ())
    }

    /// The reward table assembled from the rules.
    pub fn reward_config(&self) -> Result<RewardConfig> {
        RewardConfig::from_rules(&self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<Rule> {
        vec![
            Rule { action: 0, reward: -0.1 },
            Rule { action: 1, reward: -3.0 },
            Rule { action: 2, reward: 1.0 },
            Rule { action: 3, reward: 10.0 },
            Rule { action: 4, reward: -1.0 },
        ]
    }

    #[test]
    fn rules_map_to_reward_slots() {
        let rewards = RewardConfig::from_rules(&rules()).unwrap();
        assert_eq!(rewards, RewardConfig::default());
    }

    #[test]
    fn missing_rule_rejected() {
        let mut r = rules();
        r.pop();
        let err = RewardConfig::from_rules(&r).unwrap_err();
        assert!(err.to_string().contains("missing rule index 4"));
    }

    #[test]
    fn duplicate_rule_rejected() {
        let mut r = rules();
        r.push(Rule { action: 2, reward: 5.0 });
        assert!(RewardConfig::from_rules(&r).is_err());
    }

    #[test]
    fn out_of_range_rule_rejected() {
        let r = vec![Rule { action: 9, reward: 0.0 }];
        assert!(RewardConfig::from_rules(&r).is_err());
    }

    #[test]
    fn parses_client_schema() {
        let json = r#"{
            "Level": 1,
            "Rules": [
                {"Action": 0, "Reward": -0.1},
                {"Action": 1, "Reward": -3},
                {"Action": 2, "Reward": 1},
                {"Action": 3, "Reward": 10},
                {"Action": 4, "Reward": -1}
            ],
            "ExplorationThreshold": 50.0,
            "NumGenerations": 200
        }"#;
        let params: Parameters = serde_json::from_str(json).unwrap();
        params.validate().unwrap();
        assert_eq!(params.level, 1);
        assert_eq!(params.num_generations, 200);
        assert_eq!(params.reward_config().unwrap(), RewardConfig::default());
    }

    #[test]
    fn degenerate_options_rejected() {
        let mut params = Parameters {
            level: 1,
            rules: rules(),
            exploration_threshold: 50.0,
            num_generations: 100,
        };
        params.num_generations = 0;
        assert!(params.validate().is_err());

        params.num_generations = 100;
        params.exploration_threshold = 0.0;
        assert!(params.validate().is_err());

        params.exploration_threshold = f64::NAN;
        assert!(params.validate().is_err());
    }
}
