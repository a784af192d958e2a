// File-backed snapshot source.
//
// Interactions come from a CSV file with a header row
// (user_id, book_id, is_read, rating, is_reviewed; rating may be blank).
// Item genres come from a JSON-lines file, one {"book_id", "genres"}
// object per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::data::models::{InteractionRow, ItemGenres, Snapshot};

use super::traits::SnapshotSource;

/// Reads both feeds from disk.
pub struct FileSource {
    pub interactions_path: PathBuf,
    pub genres_path: PathBuf,
    /// Read at most this many interaction rows (the genre feed is always
    /// read in full)
    pub head: Option<usize>,
}

impl FileSource {
    pub fn new(interactions_path: impl Into<PathBuf>, genres_path: impl Into<PathBuf>) -> Self {
        Self {
            interactions_path: interactions_path.into(),
            genres_path: genres_path.into(),
            head: None,
        }
    }

    pub fn with_head(mut self, head: Option<usize>) -> Self {
        self.head = head;
        self
    }
}

impl SnapshotSource for FileSource {
    fn load(&self) -> Result<Snapshot> {
        let interactions = read_interactions(&self.interactions_path, self.head)?;
        let items = read_item_genres(&self.genres_path)?;

        info!(
            interactions = interactions.len(),
            items = items.len(),
            "Snapshot loaded"
        );

        Ok(Snapshot {
            interactions,
            items,
        })
    }
}

/// Read the interactions CSV, stopping after `head` rows if given.
pub fn read_interactions(path: &Path, head: Option<usize>) -> Result<Vec<InteractionRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open interactions file {}", path.display()))?;

    let limit = head.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    for (line, record) in reader.deserialize::<InteractionRow>().take(limit).enumerate() {
        let row = record.with_context(|| {
            format!(
                "Malformed interaction on row {} of {}",
                line + 1,
                path.display()
            )
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read the JSON-lines genre feed. Blank lines are skipped.
pub fn read_item_genres(path: &Path) -> Result<Vec<ItemGenres>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open genres file {}", path.display()))?;

    let mut items = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let item: ItemGenres = serde_json::from_str(&line).with_context(|| {
            format!(
                "Malformed genre record on line {} of {}",
                line_no + 1,
                path.display()
            )
        })?;
        items.push(item);
    }
    Ok(items)
}
