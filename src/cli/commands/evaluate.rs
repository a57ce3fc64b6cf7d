//! Evaluate command - Train quietly, then judge the greedy policy

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::{HyperParams, MazeSource},
        output,
    },
    pipeline::{TrainingConfig, TrainingPipeline},
    q_learning::MazeAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate the greedy policy after training")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub maze: MazeSource,

    #[command(flatten)]
    pub hyper: HyperParams,

    /// Number of training episodes before evaluation
    #[arg(long, short = 'e', default_value_t = 500)]
    pub train_episodes: usize,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let maze = args.maze.load()?;
    let start = args.maze.resolve_start(&maze)?;
    let mut agent = MazeAgent::new(&maze, start, args.hyper.to_agent_config())?;

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: args.train_episodes,
    });
    let result = pipeline.run(&mut agent, &maze)?;

    println!(
        "Trained for {} episodes (goal rate {:.1}%)",
        result.episodes,
        result.goal_rate * 100.0
    );
    output::print_greedy_path(&agent, &maze);

    Ok(())
}
