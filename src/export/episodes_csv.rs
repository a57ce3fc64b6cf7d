//! CSV export of per-episode training metrics.

use std::{io::Write, path::Path};

use crate::{error::Result, pipeline::EpisodeSummary};

/// Write episode summaries as CSV: one row per episode with a header.
pub fn write_episodes<W: Write>(writer: W, episodes: &[EpisodeSummary]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["episode", "steps", "termination", "total_reward"])?;
    for episode in episodes {
        csv_writer.write_record([
            episode.episode.to_string(),
            episode.steps.to_string(),
            episode.termination.to_string(),
            episode.total_reward.to_string(),
        ])?;
    }
    csv_writer.flush().map_err(crate::Error::from)?;
    Ok(())
}

/// Write episode summaries as CSV to a file at `path`.
pub fn write_episodes_to_path<P: AsRef<Path>>(
    path: P,
    episodes: &[EpisodeSummary],
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_episodes(file, episodes)
}
