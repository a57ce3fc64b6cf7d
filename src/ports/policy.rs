//! Exploration policy port - abstraction for action selection strategies
//!
//! The agent delegates every per-step action choice to exactly one policy,
//! selected at construction. Policies read the agent's state through
//! [`PolicyContext`] and draw randomness from the agent-owned generator
//! passed in by the caller, so seeding stays under the agent's control.

use rand::rngs::StdRng;

use crate::{
    maze::Maze,
    q_learning::QTable,
    types::{Action, Coordinate},
};

/// Read-only view of the agent state a policy may consult.
pub struct PolicyContext<'a> {
    /// The agent's value table.
    pub q_table: &'a QTable,
    /// The maze being navigated (for valid-move queries).
    pub maze: &'a Maze,
    /// The agent's current coordinate.
    pub position: Coordinate,
    /// The last action the agent took, if any.
    pub last_action: Option<Action>,
}

/// Exploration policy trait - one action choice per step
///
/// # Design Philosophy
///
/// This trait represents a **port**: the boundary between the agent's step
/// logic and interchangeable exploration strategies. The two shipped
/// adapters are ε-greedy (canonical) and the valid-moves-restricted
/// alternative; they are never mixed within one agent.
pub trait ExplorationPolicy: Send {
    /// Choose the action to take from the current state.
    fn select_action(&mut self, ctx: &PolicyContext<'_>, rng: &mut StdRng) -> Action;

    /// Get the policy's name.
    ///
    /// Used for identification in summaries and logging.
    fn name(&self) -> &str;

    /// Called once per episode boundary, after the reset.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Decaying policies override this to anneal their
    /// exploration rate.
    fn on_episode_end(&mut self) {}

    /// Current exploration rate, if the policy has one.
    ///
    /// # Default Implementation
    ///
    /// Returns `None`, for policies without a tunable rate.
    fn exploration_rate(&self) -> Option<f64> {
        None
    }
}
