//! Multi-episode training driver and its observer adapters.

pub mod observers;
pub mod runner;

pub use observers::{MetricsObserver, ProgressObserver, SharedMetrics, TraceObserver};
pub use runner::{EpisodeSummary, TrainingConfig, TrainingPipeline, TrainingResult};
