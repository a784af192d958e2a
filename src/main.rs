use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use bookworm::config::Config;
use bookworm::features::PriorityStrategy;
use bookworm::genres::CategorySet;
use bookworm::loader::{FileSource, SnapshotSource};
use bookworm::output::{dominant_genre_counts, tables, terminal};
use bookworm::pipeline::{self, PipelineConfig};
use bookworm::sampling::Thresholds;

/// Bookworm: feature tables for agent-based reading simulations.
///
/// Samples reader personas from an interactions feed, builds genre vectors
/// for users and books, and scores every user's books for the simulation.
#[derive(Parser)]
#[command(name = "bookworm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the items and users tables from the input feeds
    Build {
        /// Users to sample across the three reading tiers
        #[arg(long, default_value = "100")]
        sample_users: usize,

        /// Only read this many interaction rows from the feed
        #[arg(long)]
        n_users: Option<usize>,

        /// Tier thresholds in books read: low,mid,high
        #[arg(long, value_delimiter = ',', num_args = 1.., default_values_t = [5u32, 20, 50])]
        thresholds: Vec<u32>,

        /// Seed for sampling, shuffles and priority draws
        #[arg(long)]
        seed: Option<u64>,

        /// Fraction of each tier marked as ignorant (0.0-1.0)
        #[arg(long, default_value = "0.0")]
        ignorant_proportion: f64,

        /// Priority strategy: "none", a probability, or a genre name
        #[arg(long, default_value = "none")]
        priority: String,

        /// Steps in the downstream simulation
        #[arg(long, default_value = "100")]
        steps: u32,

        /// Similarity recommendations per user (0 disables them)
        #[arg(long, default_value = "0")]
        n_recs: usize,

        /// Fail on genre labels outside the category set
        #[arg(long)]
        strict_categories: bool,

        /// Output directory (defaults to BOOKWORM_OUTPUT_DIR or ./output)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the category set and books per dominant genre
    Genres {
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show one user's record from the last build
    User {
        /// The user id to display
        user_id: u64,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show input files and the last build
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bookworm=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let categories = CategorySet::goodreads();

    match cli.command {
        Commands::Build {
            sample_users,
            n_users,
            thresholds,
            seed,
            ignorant_proportion,
            priority,
            steps,
            n_recs,
            strict_categories,
            output,
        } => {
            config.require_data()?;

            let thresholds = match thresholds.as_slice() {
                &[low, mid, high] => Thresholds::new(low, mid, high)?,
                other => anyhow::bail!(
                    "--thresholds takes exactly three values (low,mid,high), got {}",
                    other.len()
                ),
            };

            let run_config = PipelineConfig {
                n_users,
                sample_users,
                thresholds,
                seed,
                ignorant_proportion,
                priority: PriorityStrategy::parse(&priority, &categories)?,
                steps,
                n_recs,
                strict_categories,
            };
            run_config.validate(&categories)?;

            println!("Loading data...");
            let source = FileSource::new(config.interactions_path(), config.genres_path())
                .with_head(run_config.n_users);
            let snapshot = source.load()?;
            println!(
                "  {} interactions, {} books with genre data",
                snapshot.interactions.len(),
                snapshot.items.len()
            );

            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Scoring users [{bar:30}] {pos}/{len} ({eta})")?,
            );

            let tables_out = pipeline::run(&snapshot, &run_config, &categories, &pb)
                .context("Feature pipeline failed")?;

            let dir = output.unwrap_or_else(|| config.output_dir.clone());
            let manifest = tables::RunManifest::new(&run_config, &categories, &tables_out);
            tables::write_tables(&dir, &tables_out, &manifest)?;
            info!(dir = %dir.display(), "Feature tables written");

            terminal::display_run_summary(&tables_out);
            println!(
                "\n{}",
                format!("Tables saved to: {}", dir.display()).bold()
            );
        }

        Commands::Genres { output } => {
            let dir = output.unwrap_or_else(|| config.output_dir.clone());
            let items = tables::read_items(&dir)?;

            println!("{}", "Category set:".bold());
            for (i, label) in categories.iter().enumerate() {
                println!("  {:>2}. {}", i, label);
            }

            let counts = dominant_genre_counts(&items, &categories);
            terminal::display_genre_distribution(&counts);
        }

        Commands::User { user_id, output } => {
            let dir = output.unwrap_or_else(|| config.output_dir.clone());
            let users = tables::read_users(&dir)?;

            match users.iter().find(|u| u.user_id == user_id) {
                Some(user) => terminal::display_user_detail(user, &categories),
                None => {
                    println!("User {user_id} is not in the last build.");
                    println!(
                        "{}",
                        format!("The users table has {} users.", users.len()).dimmed()
                    );
                }
            }
        }

        Commands::Status => {
            bookworm::status::show(&config)?;
        }
    }

    Ok(())
}
