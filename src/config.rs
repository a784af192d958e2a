use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default file names inside the data directory (Goodreads dataset layout).
pub const DEFAULT_INTERACTIONS_FILE: &str = "goodreads_interactions.csv";
pub const DEFAULT_GENRES_FILE: &str = "goodreads_book_genres_initial.json";

/// Where input feeds live and where tables are written.
///
/// Loaded from environment variables; the .env file is read at startup
/// via dotenvy. Run parameters (sample size, seed, ...) are not here, they
/// come from CLI flags into PipelineConfig.
pub struct Config {
    /// Directory holding the dataset files
    pub data_dir: PathBuf,
    /// Interactions CSV, relative to data_dir unless absolute
    pub interactions_file: PathBuf,
    /// Item genres JSON lines, relative to data_dir unless absolute
    pub genres_file: PathBuf,
    /// Where feature tables are written
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables. Every value has a
    /// default.
    pub fn load() -> Result<Self> {
        let data_dir = env::var("BOOKWORM_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Ok(Self {
            data_dir,
            interactions_file: env::var("BOOKWORM_INTERACTIONS_FILE")
                .unwrap_or_else(|_| DEFAULT_INTERACTIONS_FILE.to_string())
                .into(),
            genres_file: env::var("BOOKWORM_GENRES_FILE")
                .unwrap_or_else(|_| DEFAULT_GENRES_FILE.to_string())
                .into(),
            output_dir: env::var("BOOKWORM_OUTPUT_DIR")
                .unwrap_or_else(|_| "./output".to_string())
                .into(),
        })
    }

    pub fn interactions_path(&self) -> PathBuf {
        self.data_dir.join(&self.interactions_file)
    }

    pub fn genres_path(&self) -> PathBuf {
        self.data_dir.join(&self.genres_file)
    }

    /// Check that both input feeds exist.
    /// Call this before any operation that loads a snapshot.
    pub fn require_data(&self) -> Result<()> {
        for path in [self.interactions_path(), self.genres_path()] {
            if !path.exists() {
                anyhow::bail!(
                    "Input file not found: {}\n\
                     Set BOOKWORM_DATA_DIR (or the BOOKWORM_*_FILE variables) in your .env file.",
                    path.display()
                );
            }
        }
        Ok(())
    }
}

/// Platform data directory, e.g. ~/.local/share/bookworm/goodreads on Linux.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookworm")
        .join("goodreads")
}
