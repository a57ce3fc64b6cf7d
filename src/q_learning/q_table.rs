//! Q-table implementation for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::types::{Action, Coordinate};

/// Q-table mapping (coordinate, action) pairs to Q-values.
///
/// Dense storage allocated from the maze's reported size at construction,
/// so the table's domain exactly covers the reachable coordinate space.
/// Initialized to zero and mutated only by the update rule; episode resets
/// never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    rows: usize,
    cols: usize,
    /// Q-values in row-major order, four entries per cell.
    values: Vec<f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-initialized table covering a `rows` x `cols` grid.
    pub fn new(rows: usize, cols: usize, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols * Action::COUNT],
            learning_rate,
            discount_factor,
        }
    }

    /// Table domain as (rows, cols).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn index(&self, state: Coordinate, action: Action) -> usize {
        debug_assert!(state.row < self.rows && state.col < self.cols);
        (state.row * self.cols + state.col) * Action::COUNT + action.index()
    }

    /// Get the Q-value for a state-action pair
    pub fn get(&self, state: Coordinate, action: Action) -> f64 {
        self.values[self.index(state, action)]
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: Coordinate, action: Action, value: f64) {
        let idx = self.index(state, action);
        self.values[idx] = value;
    }

    /// Maximum Q-value over all four actions at `state`.
    ///
    /// Deliberately ignores which actions are currently valid from `state`:
    /// the update rule wants look-ahead value, not feasibility.
    pub fn max_value(&self, state: Coordinate) -> f64 {
        Action::ALL
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action at `state`, breaking ties by the lowest action index.
    pub fn greedy_action(&self, state: Coordinate) -> Action {
        let mut best_action = Action::ALL[0];
        let mut best_value = self.get(state, best_action);
        for &action in &Action::ALL[1..] {
            let value = self.get(state, action);
            if value > best_value {
                best_value = value;
                best_action = action;
            }
        }
        best_action
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: Coordinate,
        action: Action,
        reward: f64,
        next_state: Coordinate,
    ) {
        let current_q = self.get(state, action);
        let td_target = reward + self.discount_factor * self.max_value(next_state);
        let td_error = td_target - current_q;
        self.set(state, action, current_q + self.learning_rate * td_error);
    }
}
