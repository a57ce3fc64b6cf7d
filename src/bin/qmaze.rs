//! qmaze CLI - Q-learning maze navigation toolkit
//!
//! This CLI provides a unified interface for:
//! - Training agents on maze layouts or maze files
//! - Evaluating the learned greedy policy
//! - Inspecting the built-in layouts

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qmaze")]
#[command(version, about = "Q-learning maze navigation toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent on a maze
    Train(Box<qmaze::cli::commands::train::TrainArgs>),

    /// Evaluate the greedy policy after a training run
    Evaluate(qmaze::cli::commands::evaluate::EvaluateArgs),

    /// List built-in maze layouts
    Layouts(qmaze::cli::commands::layouts::LayoutsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qmaze::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => qmaze::cli::commands::evaluate::execute(args),
        Commands::Layouts(args) => qmaze::cli::commands::layouts::execute(args),
    }
}
