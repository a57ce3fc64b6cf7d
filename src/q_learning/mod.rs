//! Tabular Q-learning for maze navigation
//!
//! This module implements the learning core: a value table covering the
//! maze's coordinate space, pluggable exploration policies, and the agent
//! that ties them into a step-by-step episode state machine.
//!
//! ## Update rule
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! with the max taken over all four actions at the resulting state,
//! independent of which of them are currently valid moves.
//!
//! ## Policies
//!
//! | Policy | Selection |
//! |--------|-----------|
//! | ε-greedy (canonical) | random with probability ε, else greedy |
//! | valid-moves (alternative) | uniform over currently valid moves |
//!
//! ## Usage Example
//!
//! ```
//! use qmaze::{AgentConfig, MazeAgent, maze::Maze};
//!
//! let maze: Maze = "@..\n..G\n".parse().unwrap();
//! let start = maze.start_marker().unwrap();
//! let config = AgentConfig::default().with_seed(42);
//! let mut agent = MazeAgent::new(&maze, start, config).unwrap();
//!
//! let outcome = agent.step(&maze);
//! assert_eq!(outcome.episode, 0);
//! ```

pub mod agent;
pub mod config;
pub mod policy;
pub mod q_table;

// Public re-exports
pub use agent::{MazeAgent, StepOutcome};
pub use config::{AgentConfig, PolicyKind, RewardTable};
pub use policy::{EpsilonGreedy, ValidMoves, valid_actions};
pub use q_table::QTable;
