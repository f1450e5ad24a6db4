//! sokoban-rl CLI - Train a tabular Q-learning agent on a Sokoban level
//!
//! Straight-line run: load the parameters JSON, load the level it names,
//! train for the configured number of episodes while streaming per-episode
//! action traces to the shared output file, then run the greedy inference
//! pass and report whether it solved the level.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use sokoban_rl::{
    Level, Parameters, ProgressObserver, QLearningAgent, SokobanEngine, TraceWriter,
    TrainingConfig, TrainingPipeline,
};

#[derive(Parser)]
#[command(name = "sokoban-rl")]
#[command(version, about = "Q-learning trainer for Sokoban levels", long_about = None)]
struct Cli {
    /// Path to the parameters file
    #[arg(long, default_value = "parameters.json")]
    params_path: PathBuf,

    /// Path to the action trace output file
    #[arg(long, default_value = "ai-out.txt")]
    out_path: PathBuf,

    /// Path to the levels directory
    #[arg(long, default_value = "Levels")]
    levels_path: PathBuf,

    /// Maximum steps per episode
    #[arg(long, default_value_t = 25)]
    max_steps: usize,

    /// Learning rate (alpha)
    #[arg(long, default_value_t = 1e-3)]
    learning_rate: f64,

    /// Discount factor (gamma)
    #[arg(long, default_value_t = 0.99)]
    discount: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Save the inference episode's grid frames to this file
    #[arg(long)]
    history: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    progress: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let params = Parameters::load(&cli.params_path)?;
    let rewards = params.reward_config()?;

    let level_path = cli.levels_path.join(params.level.to_string());
    let level = Level::load(&level_path)?;
    let (rows, cols) = (level.grid().rows(), level.grid().cols());

    let mut engine = SokobanEngine::new(level, rewards, cli.max_steps)
        .with_history(cli.history.is_some());
    let mut agent = QLearningAgent::new(cols, rows, cli.learning_rate, cli.discount);

    let config = TrainingConfig {
        episodes: params.num_generations,
        exploration_threshold: params.exploration_threshold,
        seed: cli.seed,
    };
    let mut pipeline = TrainingPipeline::new(config);
    if cli.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let mut writer = TraceWriter::new(&cli.out_path);
    let result = pipeline.run(&mut engine, &mut agent, &mut writer)?;

    if let Some(history_path) = &cli.history {
        engine.save_history(history_path)?;
    }

    println!("Can the model win the game? {}", result.solved);
    println!(
        "Inference episode: {} steps, total reward {}",
        result.inference_steps, result.inference_reward
    );
    println!("Successfully wrote actions to {}", cli.out_path.display());

    Ok(())
}
