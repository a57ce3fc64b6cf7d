//! The maze-navigating Q-learning agent.
//!
//! One [`MazeAgent::step`] call performs a full decision cycle: action
//! selection through the configured policy, move validation against the
//! maze, reward lookup, value update, position commit, and the episode
//! boundary check. Both terminal conditions (goal reached, step cap
//! exhausted) run the same reset: position back to the starting coordinate,
//! step counter zeroed, learned values untouched.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    maze::{CellCode, Maze},
    ports::policy::{ExplorationPolicy, PolicyContext},
    q_learning::{
        config::{AgentConfig, PolicyKind, RewardTable},
        policy::{EpsilonGreedy, ValidMoves},
        q_table::QTable,
    },
    types::{Action, Coordinate, Termination},
};

/// Everything observable about one `step()` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Episode index at the time of the step (0-based).
    pub episode: usize,
    /// Step index within the episode (0-based).
    pub step: usize,
    /// Coordinate before the step.
    pub from: Coordinate,
    /// Action the policy chose.
    pub action: Action,
    /// Coordinate after the step; equals `from` when the move was blocked.
    pub to: Coordinate,
    /// Whether the move was invalid (grid edge or wall) and collapsed.
    pub blocked: bool,
    /// Reward applied by the value update.
    pub reward: i32,
    /// Set when this step ended the episode. The reset has already run by
    /// the time the caller sees this.
    pub termination: Option<Termination>,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

fn build_policy(config: &AgentConfig) -> Box<dyn ExplorationPolicy> {
    match config.policy {
        PolicyKind::EpsilonGreedy => Box::new(EpsilonGreedy::new(
            config.epsilon,
            config.epsilon_decay,
            config.min_epsilon,
        )),
        PolicyKind::ValidMoves => Box::new(ValidMoves),
    }
}

/// Destination of `action` from `from`, or `None` when the move is invalid.
/// The `Option` chain is the bounds check: the maze is never queried
/// off-grid.
fn action_destination(
    maze: &Maze,
    from: Coordinate,
    action: Action,
) -> Option<(Coordinate, CellCode)> {
    let to = from.offset(action.delta())?;
    let cell = maze.cell(to)?;
    (!cell.is_wall()).then_some((to, cell))
}

/// Tabular Q-learning agent for a single maze.
///
/// The agent owns its value table, run state, and random generator
/// exclusively; the maze is borrowed read-only per call, so several agents
/// can learn against one maze.
pub struct MazeAgent {
    q_table: QTable,
    position: Coordinate,
    start: Coordinate,
    goal: Coordinate,
    steps_taken: usize,
    episodes_completed: usize,
    last_action: Option<Action>,
    max_steps_per_episode: usize,
    rewards: RewardTable,
    policy: Box<dyn ExplorationPolicy>,
    rng: StdRng,
}

impl std::fmt::Debug for MazeAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MazeAgent")
            .field("q_table", &self.q_table)
            .field("position", &self.position)
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("steps_taken", &self.steps_taken)
            .field("episodes_completed", &self.episodes_completed)
            .field("last_action", &self.last_action)
            .field("max_steps_per_episode", &self.max_steps_per_episode)
            .field("rewards", &self.rewards)
            .field("policy", &self.policy.name())
            .field("rng", &self.rng)
            .finish()
    }
}

impl MazeAgent {
    /// Create an agent at `start` on `maze`.
    ///
    /// The goal coordinate is derived here, once, by scanning the maze for
    /// its [`CellCode::Goal`] cell; that scan is the single source of truth
    /// for goal detection.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidConfiguration`] for out-of-range hyperparameters
    /// * [`Error::InvalidStartPosition`] if `start` is off-grid or a wall
    /// * [`Error::MissingGoal`] if the maze has no goal cell
    pub fn new(maze: &Maze, start: Coordinate, config: AgentConfig) -> Result<Self> {
        config.validate()?;

        match maze.cell(start) {
            None => {
                return Err(Error::InvalidStartPosition {
                    row: start.row,
                    col: start.col,
                    reason: "outside the maze bounds".to_string(),
                });
            }
            Some(CellCode::Wall) => {
                return Err(Error::InvalidStartPosition {
                    row: start.row,
                    col: start.col,
                    reason: "cell is a wall".to_string(),
                });
            }
            Some(_) => {}
        }

        let goal = maze.find_cell(CellCode::Goal).ok_or(Error::MissingGoal)?;
        let (rows, cols) = maze.size();

        Ok(Self {
            q_table: QTable::new(rows, cols, config.learning_rate, config.discount_factor),
            position: start,
            start,
            goal,
            steps_taken: 0,
            episodes_completed: 0,
            last_action: None,
            max_steps_per_episode: config.max_steps_per_episode,
            rewards: config.rewards,
            policy: build_policy(&config),
            rng: build_rng(config.seed),
        })
    }

    /// Perform one full decision/update/commit cycle.
    ///
    /// Blocked moves still count as a step, still produce a reward (the wall
    /// penalty), and still update the value table with the unchanged
    /// coordinate as both current and next state.
    pub fn step(&mut self, maze: &Maze) -> StepOutcome {
        let episode = self.episodes_completed;
        let step = self.steps_taken;
        let from = self.position;

        let ctx = PolicyContext {
            q_table: &self.q_table,
            maze,
            position: from,
            last_action: self.last_action,
        };
        let action = self.policy.select_action(&ctx, &mut self.rng);

        let (to, blocked, reward) = match action_destination(maze, from, action) {
            Some((to, cell)) => (to, false, self.rewards.for_cell(cell)),
            None => (from, true, self.rewards.wall),
        };

        self.q_table
            .q_learning_update(from, action, f64::from(reward), to);
        self.position = to;
        self.last_action = Some(action);

        let termination = if self.position == self.goal {
            Some(Termination::Goal)
        } else {
            self.steps_taken += 1;
            (self.steps_taken >= self.max_steps_per_episode).then_some(Termination::StepCap)
        };

        if termination.is_some() {
            self.complete_episode();
        }

        StepOutcome {
            episode,
            step,
            from,
            action,
            to,
            blocked,
            reward,
            termination,
        }
    }

    fn complete_episode(&mut self) {
        self.episodes_completed += 1;
        self.reset();
        self.policy.on_episode_end();
    }

    /// Reset run state only: position back to start, step counter to zero.
    /// Learned values are deliberately kept.
    pub fn reset(&mut self) {
        self.position = self.start;
        self.steps_taken = 0;
        self.last_action = None;
    }

    /// Follow the greedy policy from the start without exploring or
    /// learning. Stops at the goal, at the step cap, or when the greedy
    /// action is blocked. Returns the visited coordinates, start included.
    pub fn greedy_path(&self, maze: &Maze) -> Vec<Coordinate> {
        let mut path = vec![self.start];
        let mut position = self.start;
        for _ in 0..self.max_steps_per_episode {
            let action = self.q_table.greedy_action(position);
            match action_destination(maze, position, action) {
                Some((to, _)) => position = to,
                None => break,
            }
            path.push(position);
            if position == self.goal {
                break;
            }
        }
        path
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Goal coordinate derived from the maze at construction.
    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    /// Steps taken in the current episode.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn episodes_completed(&self) -> usize {
        self.episodes_completed
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Mutable value-table access, for priming values in evaluations and
    /// tests.
    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Current ε, when the active policy has one.
    pub fn exploration_rate(&self) -> Option<f64> {
        self.policy.exploration_rate()
    }
}
