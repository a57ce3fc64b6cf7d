//! Exploration strategies implementing the policy port.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    maze::Maze,
    ports::policy::{ExplorationPolicy, PolicyContext},
    types::{Action, Coordinate},
};

/// Actions whose destination from `from` is in-bounds and not a wall.
///
/// Pure function of the maze and coordinate; returned in canonical action
/// order.
pub fn valid_actions(maze: &Maze, from: Coordinate) -> Vec<Action> {
    Action::ALL
        .iter()
        .copied()
        .filter(|action| {
            from.offset(action.delta())
                .and_then(|dest| maze.cell(dest))
                .is_some_and(|cell| !cell.is_wall())
        })
        .collect()
}

/// ε-greedy action selection (the canonical policy).
///
/// With probability ε, explores with a uniformly random action from the full
/// four-action set; otherwise exploits the greedy action, breaking ties by
/// the lowest action index. ε anneals multiplicatively per episode toward
/// `min_epsilon` (a decay of 1.0 disables annealing).
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64, epsilon_decay: f64, min_epsilon: f64) -> Self {
        Self {
            epsilon,
            epsilon_decay,
            min_epsilon,
        }
    }
}

impl ExplorationPolicy for EpsilonGreedy {
    fn select_action(&mut self, ctx: &PolicyContext<'_>, rng: &mut StdRng) -> Action {
        if rng.random::<f64>() < self.epsilon {
            // Explore: random action
            *Action::ALL.choose(rng).unwrap()
        } else {
            // Exploit: greedy action based on Q-values
            ctx.q_table.greedy_action(ctx.position)
        }
    }

    fn name(&self) -> &str {
        "epsilon-greedy"
    }

    fn on_episode_end(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    fn exploration_rate(&self) -> Option<f64> {
        Some(self.epsilon)
    }
}

/// Uniform choice among currently valid moves (the alternative policy).
///
/// Valid moves are derived by simulating each action's destination against
/// the maze and keeping in-bounds, non-wall results. When boxed in entirely,
/// falls back to the reverse of the last action taken, or `Up` if no action
/// has been taken yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidMoves;

impl ExplorationPolicy for ValidMoves {
    fn select_action(&mut self, ctx: &PolicyContext<'_>, rng: &mut StdRng) -> Action {
        let valid = valid_actions(ctx.maze, ctx.position);
        match valid.choose(rng) {
            Some(&action) => action,
            None => ctx
                .last_action
                .map(Action::opposite)
                .unwrap_or(Action::Up),
        }
    }

    fn name(&self) -> &str {
        "valid-moves"
    }
}
