//! Success-rate statistics over episode summaries.

use crate::{pipeline::EpisodeSummary, types::Termination};

/// Fraction of goal-terminated episodes per block of `block_size`
/// consecutive episodes, in episode order. A trailing partial block is
/// included. Returns an empty vector when `block_size` is zero or there are
/// no episodes.
///
/// Over a learnable maze with decaying exploration these rates should trend
/// upward block over block.
pub fn block_success_rates(episodes: &[EpisodeSummary], block_size: usize) -> Vec<f64> {
    if block_size == 0 {
        return Vec::new();
    }
    episodes
        .chunks(block_size)
        .map(|block| {
            let goals = block
                .iter()
                .filter(|e| e.termination == Termination::Goal)
                .count();
            goals as f64 / block.len() as f64
        })
        .collect()
}
