// System status display: input feeds, last build, table sizes.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::output::tables::{self, ITEMS_FILE, USERS_FILE};

/// Display system status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    println!("Data directory: {}", config.data_dir.display());
    for path in [config.interactions_path(), config.genres_path()] {
        match std::fs::metadata(&path) {
            Ok(meta) => println!("  {} ({})", path.display(), format_bytes(meta.len())),
            Err(_) => println!("  {} (missing)", path.display()),
        }
    }

    println!("\nOutput directory: {}", config.output_dir.display());
    match tables::read_manifest(&config.output_dir)? {
        Some(manifest) => {
            println!(
                "Last build: {} ({} users, {} items)",
                manifest.built_at.format("%Y-%m-%d %H:%M:%S UTC"),
                manifest.users,
                manifest.items
            );
            match manifest.config.seed {
                Some(seed) => println!("  Seed: {seed}"),
                None => println!("  Seed: none (not reproducible)"),
            }
            println!("  Priority: {}", manifest.config.priority.describe());
            for name in [ITEMS_FILE, USERS_FILE] {
                let path = config.output_dir.join(name);
                let size = file_size(&path);
                println!("  {name}: {size}");
            }
        }
        None => {
            println!("Last build: never");
            println!("  Run `bookworm build` to produce the feature tables");
        }
    }

    Ok(())
}

fn file_size(path: &Path) -> String {
    std::fs::metadata(path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "missing".to_string())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
