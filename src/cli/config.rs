//! Shared CLI flag groups and their mapping onto the library config.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};

use crate::{
    maze::{Maze, layouts},
    q_learning::{AgentConfig, PolicyKind},
    types::Coordinate,
};

/// Exploration strategy, CLI form.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// ε-greedy over the value table
    EpsilonGreedy,
    /// Uniform choice among currently valid moves
    ValidMoves,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::EpsilonGreedy => PolicyKind::EpsilonGreedy,
            PolicyArg::ValidMoves => PolicyKind::ValidMoves,
        }
    }
}

/// Hyperparameter flags shared by the train and evaluate commands.
#[derive(Args, Debug)]
pub struct HyperParams {
    /// Learning rate alpha, in (0, 1]
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor gamma, in [0, 1]
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Exploration rate epsilon, in [0, 1]
    #[arg(long, default_value_t = 0.3)]
    pub epsilon: f64,

    /// Multiplicative epsilon decay per episode (1.0 disables decay)
    #[arg(long, default_value_t = 1.0)]
    pub epsilon_decay: f64,

    /// Decay floor for epsilon
    #[arg(long, default_value_t = 0.0)]
    pub min_epsilon: f64,

    /// Step cap per episode
    #[arg(long, default_value_t = 200)]
    pub max_steps: usize,

    /// Exploration strategy
    #[arg(long, value_enum, default_value_t = PolicyArg::EpsilonGreedy)]
    pub policy: PolicyArg,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl HyperParams {
    /// Map the flags onto an [`AgentConfig`]. Range validation happens at
    /// agent construction.
    pub fn to_agent_config(&self) -> AgentConfig {
        let mut config = AgentConfig::default()
            .with_learning_rate(self.alpha)
            .with_discount_factor(self.gamma)
            .with_epsilon(self.epsilon)
            .with_epsilon_decay(self.epsilon_decay)
            .with_min_epsilon(self.min_epsilon)
            .with_max_steps_per_episode(self.max_steps)
            .with_policy(self.policy.into());
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Where the maze comes from and where the agent starts on it.
#[derive(Args, Debug)]
pub struct MazeSource {
    /// Maze text file
    #[arg(long, conflicts_with = "layout")]
    pub maze: Option<PathBuf>,

    /// Built-in layout name (see `qmaze layouts`)
    #[arg(long, short = 'l', default_value = "rooms")]
    pub layout: String,

    /// Starting row (defaults to the maze's `@` marker)
    #[arg(long, requires = "start_col")]
    pub start_row: Option<usize>,

    /// Starting column (defaults to the maze's `@` marker)
    #[arg(long, requires = "start_row")]
    pub start_col: Option<usize>,
}

impl MazeSource {
    /// Load the maze from the file or the named built-in layout.
    pub fn load(&self) -> Result<Maze> {
        match &self.maze {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read maze file {}", path.display()))?;
                text.parse()
                    .with_context(|| format!("failed to parse maze file {}", path.display()))
            }
            None => Ok(layouts::builtin(&self.layout)?),
        }
    }

    /// Resolve the starting coordinate from the flags or the `@` marker.
    pub fn resolve_start(&self, maze: &Maze) -> Result<Coordinate> {
        if let (Some(row), Some(col)) = (self.start_row, self.start_col) {
            return Ok(Coordinate::new(row, col));
        }
        maze.start_marker().ok_or_else(|| {
            anyhow!("maze has no '@' start marker; pass --start-row and --start-col")
        })
    }
}
