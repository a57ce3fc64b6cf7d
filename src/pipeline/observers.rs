//! Observer adapters for training pipelines
//!
//! Observers allow composable data collection during training without
//! coupling the episode loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex},
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error::Result,
    pipeline::runner::EpisodeSummary,
    ports::EpisodeObserver,
    q_learning::StepOutcome,
    types::Termination,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    caps: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            caps: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeObserver for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.termination {
            Termination::Goal => self.goals += 1,
            Termination::StepCap => self.caps += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(format!("G:{} C:{}", self.goals, self.caps));
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("G:{} C:{}", self.goals, self.caps));
        }
        Ok(())
    }
}

/// Metrics observer - Retains per-episode summaries
pub struct MetricsObserver {
    episodes: Vec<EpisodeSummary>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            episodes: Vec::new(),
        }
    }

    /// All retained episode summaries, in order.
    pub fn episodes(&self) -> &[EpisodeSummary] {
        &self.episodes
    }

    /// Fraction of episodes that reached the goal
    pub fn goal_rate(&self) -> f64 {
        if self.episodes.is_empty() {
            0.0
        } else {
            let goals = self
                .episodes
                .iter()
                .filter(|e| e.termination == Termination::Goal)
                .count();
            goals as f64 / self.episodes.len() as f64
        }
    }

    /// Mean steps over goal-terminated episodes
    pub fn mean_steps_to_goal(&self) -> Option<f64> {
        let goal_episodes: Vec<usize> = self
            .episodes
            .iter()
            .filter(|e| e.termination == Termination::Goal)
            .map(|e| e.steps)
            .collect();
        if goal_episodes.is_empty() {
            None
        } else {
            Some(goal_episodes.iter().sum::<usize>() as f64 / goal_episodes.len() as f64)
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeObserver for MetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.episodes.push(*summary);
        Ok(())
    }
}

/// Shared handle over a [`MetricsObserver`].
///
/// The pipeline takes observers by `Box`, so a caller that wants the
/// collected summaries after the run registers a clone of this handle and
/// keeps the other end.
#[derive(Clone, Default)]
pub struct SharedMetrics {
    inner: Arc<Mutex<MetricsObserver>>,
}

impl SharedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the episode summaries collected so far.
    pub fn episodes(&self) -> Vec<EpisodeSummary> {
        self.inner.lock().expect("metrics lock").episodes().to_vec()
    }

    /// Fraction of collected episodes that reached the goal.
    pub fn goal_rate(&self) -> f64 {
        self.inner.lock().expect("metrics lock").goal_rate()
    }
}

impl EpisodeObserver for SharedMetrics {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.inner
            .lock()
            .expect("metrics lock")
            .on_episode_end(summary)
    }
}

/// Trace observer - Streams step outcomes as JSON Lines
///
/// This is the structured replacement for printing from inside the step
/// logic: every [`StepOutcome`] becomes one JSON object per line.
pub struct TraceObserver<W: Write + Send> {
    writer: W,
}

impl TraceObserver<BufWriter<File>> {
    /// Create a trace observer writing to a file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> TraceObserver<W> {
    /// Create a trace observer over any writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the observer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EpisodeObserver for TraceObserver<W> {
    fn on_step(&mut self, outcome: &StepOutcome) -> Result<()> {
        serde_json::to_writer(&mut self.writer, outcome)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        q_learning::StepOutcome,
        types::{Action, Coordinate},
    };

    fn summary(episode: usize, termination: Termination, steps: usize) -> EpisodeSummary {
        EpisodeSummary {
            episode,
            steps,
            termination,
            total_reward: -(steps as i64),
        }
    }

    #[test]
    fn test_metrics_observer_rates() {
        let mut metrics = MetricsObserver::new();
        metrics
            .on_episode_end(&summary(0, Termination::Goal, 10))
            .unwrap();
        metrics
            .on_episode_end(&summary(1, Termination::StepCap, 50))
            .unwrap();
        metrics
            .on_episode_end(&summary(2, Termination::Goal, 20))
            .unwrap();

        assert_eq!(metrics.episodes().len(), 3);
        assert!((metrics.goal_rate() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.mean_steps_to_goal(), Some(15.0));
    }

    #[test]
    fn test_trace_observer_writes_one_json_object_per_step() {
        let mut trace = TraceObserver::new(Vec::new());
        let outcome = StepOutcome {
            episode: 0,
            step: 0,
            from: Coordinate::new(0, 0),
            action: Action::Right,
            to: Coordinate::new(0, 1),
            blocked: false,
            reward: -1,
            termination: None,
        };
        trace.on_step(&outcome).unwrap();
        trace.on_step(&outcome).unwrap();
        trace.on_run_end().unwrap();

        let text = String::from_utf8(trace.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: StepOutcome = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.action, Action::Right);
        }
    }
}
