//! Train command - Run episodes and report learning progress

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    analysis::block_success_rates,
    cli::{
        config::{HyperParams, MazeSource},
        output,
    },
    export::episodes_csv,
    pipeline::{ProgressObserver, SharedMetrics, TraceObserver, TrainingConfig, TrainingPipeline},
    q_learning::MazeAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent on a maze", allow_negative_numbers = true)]
pub struct TrainArgs {
    #[command(flatten)]
    pub maze: MazeSource,

    #[command(flatten)]
    pub hyper: HyperParams,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 500)]
    pub episodes: usize,

    /// Optional JSONL file for per-step traces
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Optional CSV file for per-episode metrics
    #[arg(long)]
    pub episode_csv: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Episode block size for the goal-rate report
    #[arg(long, default_value_t = 50)]
    pub block: usize,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let maze = args.maze.load()?;
    let start = args.maze.resolve_start(&maze)?;
    let mut agent = MazeAgent::new(&maze, start, args.hyper.to_agent_config())?;

    println!(
        "Training {} agent on a {}x{} maze from {} for {} episodes",
        agent.policy_name(),
        maze.rows(),
        maze.cols(),
        start,
        args.episodes,
    );

    let metrics = SharedMetrics::new();
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: args.episodes,
    })
    .with_observer(Box::new(metrics.clone()));

    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.trace {
        let trace = TraceObserver::create(path)
            .with_context(|| format!("failed to create trace file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(trace));
    }

    let result = pipeline.run(&mut agent, &maze)?;

    output::print_training_summary(&result, &agent);
    output::print_block_rates(&block_success_rates(&metrics.episodes(), args.block), args.block);
    output::print_greedy_path(&agent, &maze);

    if let Some(path) = &args.episode_csv {
        episodes_csv::write_episodes_to_path(path, &metrics.episodes())
            .with_context(|| format!("failed to write episode CSV {}", path.display()))?;
        println!("\nEpisode metrics written to {}", path.display());
    }
    if let Some(path) = &args.summary {
        let path = sanitize_summary_path(path);
        result
            .save(&path)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary.json")),
            PathBuf::from("out/summary.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary.txt")),
            PathBuf::from("out/summary.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/")),
            PathBuf::from("out/training_summary.json")
        );
    }
}
