// Table export: JSON lines for the simulation, plus a run manifest.
//
// Layout of an output directory:
//   items.jsonl    one ItemRecord per line, ascending book_id
//   users.jsonl    one UserRecord per line, ascending user_id
//   manifest.json  when and how the tables were built

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::data::models::{FeatureTables, ItemRecord, UserRecord};
use crate::genres::CategorySet;
use crate::pipeline::PipelineConfig;

pub const ITEMS_FILE: &str = "items.jsonl";
pub const USERS_FILE: &str = "users.jsonl";
pub const MANIFEST_FILE: &str = "manifest.json";

/// What a run produced and with which parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub built_at: DateTime<Utc>,
    pub config: PipelineConfig,
    pub categories: CategorySet,
    pub items: usize,
    pub users: usize,
}

impl RunManifest {
    pub fn new(config: &PipelineConfig, categories: &CategorySet, tables: &FeatureTables) -> Self {
        Self {
            built_at: Utc::now(),
            config: config.clone(),
            categories: categories.clone(),
            items: tables.items.len(),
            users: tables.users.len(),
        }
    }
}

/// Write both tables and the manifest into `dir`, creating it if needed.
/// Returns the directory path.
pub fn write_tables(dir: &Path, tables: &FeatureTables, manifest: &RunManifest) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    write_jsonl(&dir.join(ITEMS_FILE), &tables.items)?;
    write_jsonl(&dir.join(USERS_FILE), &tables.users)?;

    let manifest_path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&manifest_path, json)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(dir.to_path_buf())
}

pub fn read_items(dir: &Path) -> Result<Vec<ItemRecord>> {
    read_jsonl(&dir.join(ITEMS_FILE))
}

pub fn read_users(dir: &Path) -> Result<Vec<UserRecord>> {
    read_jsonl(&dir.join(USERS_FILE))
}

/// Load the manifest, or None if the directory has never been written.
pub fn read_manifest(dir: &Path) -> Result<Option<RunManifest>> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest = serde_json::from_str(&json)
        .with_context(|| format!("Malformed manifest {}", path.display()))?;
    Ok(Some(manifest))
}

fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| {
        format!(
            "Failed to open {}. Run `bookworm build` first.",
            path.display()
        )
    })?;

    let mut rows = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line)
            .with_context(|| format!("Malformed row on line {} of {}", line_no + 1, path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}
