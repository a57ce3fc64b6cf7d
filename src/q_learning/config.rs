//! Agent configuration: hyperparameters, rewards, and policy selection.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    maze::CellCode,
};

/// Reward for each cell code.
///
/// Rewards are looked up for the cell the agent ends the step on. The wall
/// entry is the invalid-move penalty: it applies whenever a move is blocked
/// (wall or grid edge) and the agent stays in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    pub empty: i32,
    pub wall: i32,
    pub goggles: i32,
    pub speed_potion: i32,
    pub fog: i32,
    pub slowpoke_potion: i32,
    pub goal: i32,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            empty: -1,
            wall: -10,
            goggles: 5,
            speed_potion: 5,
            fog: -5,
            slowpoke_potion: -5,
            goal: 100,
        }
    }
}

impl RewardTable {
    /// Reward for ending a step on a cell with the given code.
    pub fn for_cell(&self, cell: CellCode) -> i32 {
        match cell {
            CellCode::Empty => self.empty,
            CellCode::Wall => self.wall,
            CellCode::Goggles => self.goggles,
            CellCode::SpeedPotion => self.speed_potion,
            CellCode::Fog => self.fog,
            CellCode::SlowpokePotion => self.slowpoke_potion,
            CellCode::Goal => self.goal,
        }
    }
}

/// Which exploration strategy the agent uses.
///
/// Exactly one policy is active per agent instance; the strategies are never
/// mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// ε-greedy over the value table (canonical).
    #[default]
    EpsilonGreedy,
    /// Uniform choice among currently valid moves, with a
    /// reverse-of-last-action fallback (alternative strategy).
    ValidMoves,
}

/// Configuration for creating a [`crate::q_learning::MazeAgent`].
///
/// # Examples
///
/// ```
/// use qmaze::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_learning_rate(0.5)
///     .with_epsilon(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1]
    pub discount_factor: f64,
    /// Exploration rate ε, in [0, 1]
    pub epsilon: f64,
    /// Multiplicative ε decay per episode, in (0, 1]; 1.0 disables decay
    pub epsilon_decay: f64,
    /// Decay floor for ε, in [0, ε]
    pub min_epsilon: f64,
    /// Step cap triggering an episode reset
    pub max_steps_per_episode: usize,
    /// Reward per cell code
    pub rewards: RewardTable,
    /// Exploration strategy
    pub policy: PolicyKind,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 0.3,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            max_steps_per_episode: 200,
            rewards: RewardTable::default(),
            policy: PolicyKind::default(),
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_max_steps_per_episode(mut self, max_steps: usize) -> Self {
        self.max_steps_per_episode = max_steps;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardTable) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid(format!(
                "learning_rate {} must be in (0, 1]",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(invalid(format!(
                "discount_factor {} must be in [0, 1]",
                self.discount_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid(format!(
                "epsilon {} must be in [0, 1]",
                self.epsilon
            )));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(invalid(format!(
                "epsilon_decay {} must be in (0, 1]",
                self.epsilon_decay
            )));
        }
        if !(self.min_epsilon >= 0.0 && self.min_epsilon <= self.epsilon) {
            return Err(invalid(format!(
                "min_epsilon {} must be in [0, epsilon]",
                self.min_epsilon
            )));
        }
        if self.max_steps_per_episode == 0 {
            return Err(invalid(
                "max_steps_per_episode must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
