//! qmaze: tabular Q-learning for grid maze navigation
//!
//! This crate provides:
//! - A maze collaborator with bounds-checked, read-only cell access
//! - A Q-learning agent with a value table sized to the maze and pluggable
//!   exploration policies (ε-greedy or valid-moves-restricted)
//! - An observer-driven training pipeline with progress, metrics, and
//!   JSONL trace adapters
//! - CSV/JSON export and success-rate analysis of training runs

pub mod analysis;
pub mod cli;
pub mod error;
pub mod export;
pub mod maze;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use maze::{CellCode, Maze};
pub use pipeline::{TrainingConfig, TrainingPipeline, TrainingResult};
pub use q_learning::{AgentConfig, MazeAgent, PolicyKind, QTable, RewardTable, StepOutcome};
pub use types::{Action, Coordinate, Termination};
