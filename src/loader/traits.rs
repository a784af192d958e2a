// Snapshot source trait, the seam between where input lives and the pipeline.
//
// The pipeline never parses bytes itself. Anything that can hand it an
// in-memory Snapshot (files on disk, a fixture in a test) implements this.

use anyhow::Result;

use crate::data::models::Snapshot;

/// Trait for supplying the interactions and item genres feeds.
pub trait SnapshotSource {
    /// Load both feeds into memory.
    fn load(&self) -> Result<Snapshot>;
}

/// A snapshot already held in memory.
impl SnapshotSource for Snapshot {
    fn load(&self) -> Result<Snapshot> {
        Ok(self.clone())
    }
}
