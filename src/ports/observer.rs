//! Observer port - abstraction for run observation and data collection
//!
//! Observers receive structured events from the training pipeline instead of
//! the core interleaving prints with its step logic. This keeps `step()` a
//! pure state transition usable in tests without console coupling.
//!
//! # Event Sequence
//!
//! 1. `on_run_start(total_episodes)` - once at the beginning
//! 2. For each episode:
//!    - `on_episode_start(episode)`
//!    - `on_step(outcome)` - for each step, including the terminating one
//!    - `on_episode_end(summary)`
//! 3. `on_run_end()` - once at the end

use crate::{
    error::Result,
    pipeline::EpisodeSummary,
    q_learning::StepOutcome,
};

/// Observer trait for monitoring training runs
///
/// Observers compose: the pipeline notifies each registered observer in
/// registration order. All methods default to no-ops, so implementations
/// override only the events they care about.
pub trait EpisodeObserver: Send {
    /// Called when a run starts, with the number of episodes it will drive.
    fn on_run_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each step, after the value update and position commit.
    ///
    /// The outcome carries the terminating boundary, if this step ended the
    /// episode.
    fn on_step(&mut self, _outcome: &StepOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends, after the agent has reset.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when the run completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
