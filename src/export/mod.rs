//! Data export in analysis-friendly formats.

pub mod episodes_csv;

pub use episodes_csv::{write_episodes, write_episodes_to_path};
