//! Training loop: episodes, exploration schedule, trace hand-off

use serde::{Deserialize, Serialize};

use super::{observers::{EpisodeSummary, Observer}, schedule::EpsilonSchedule};
use crate::{
    error::Result,
    q_learning::QLearningAgent,
    sokoban::{Action, SokobanEngine},
    trace::{ActionTrace, TraceSink},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Episode index at which exploration probability reaches 0.5
    pub exploration_threshold: f64,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 500,
            exploration_threshold: 50.0,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Training episodes run
    pub episodes: usize,

    /// Training episodes that ended with the level solved
    pub episodes_solved: usize,

    /// Whether the final pure-greedy inference episode solved the level
    pub solved: bool,

    /// Steps taken by the inference episode
    pub inference_steps: usize,

    /// Total reward collected by the inference episode
    pub inference_reward: f64,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Orchestrates episodes over an engine, an agent and a trace sink
///
/// For each training episode the exploration probability comes from the
/// reciprocal [`EpsilonSchedule`]; the finished trace is handed to the sink
/// as soon as the episode terminates. After all training episodes one
/// additional pure-greedy (ε = 0) episode runs as the inference pass, its
/// trace is the canonical solution attempt, and the sink is finalized with
/// the end-of-output marker.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training followed by the inference pass.
    pub fn run(
        &mut self,
        engine: &mut SokobanEngine,
        agent: &mut QLearningAgent,
        sink: &mut dyn TraceSink,
    ) -> Result<TrainingResult> {
        let schedule = EpsilonSchedule::new(self.config.exploration_threshold, Action::COUNT)?;
        if let Some(seed) = self.config.seed {
            agent.set_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut episodes_solved = 0;
        for episode in 0..self.config.episodes {
            let epsilon = schedule.epsilon(episode);
            let (trace, summary) = run_episode(engine, agent, epsilon, episode, true);
            sink.write_episode(&trace)?;
            if summary.solved {
                episodes_solved += 1;
            }
            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
        }

        // Inference: one pure-greedy episode, no learning
        let (trace, summary) = run_episode(engine, agent, 0.0, self.config.episodes, false);
        sink.write_episode(&trace)?;
        sink.finish()?;

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult {
            episodes: self.config.episodes,
            episodes_solved,
            solved: summary.solved,
            inference_steps: summary.steps,
            inference_reward: summary.total_reward,
        })
    }
}

/// Play one episode to termination, optionally applying learning updates.
fn run_episode(
    engine: &mut SokobanEngine,
    agent: &mut QLearningAgent,
    epsilon: f64,
    episode: usize,
    learn: bool,
) -> (ActionTrace, EpisodeSummary) {
    engine.reset();
    let mut key = engine.state_key();
    let mut trace = ActionTrace::new();
    let mut total_reward = 0.0;

    loop {
        let action = agent.select_action(key, epsilon);
        trace.push(action);
        let outcome = engine.step(action);
        let next_key = engine.state_key();
        if learn {
            agent.learn(key, action, outcome.reward, next_key);
        }
        total_reward += outcome.reward;
        key = next_key;
        if outcome.done {
            break;
        }
    }

    let summary = EpisodeSummary {
        episode,
        steps: engine.steps(),
        total_reward,
        solved: engine.grid().is_solved(),
    };
    (trace, summary)
}
