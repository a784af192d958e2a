// End-to-end pipeline run.
//
// 1. Validate the run parameters
// 2. Build the genre catalog and drop interactions on uncatalogued books
// 3. Sample users into tiers (with the ignorant overlay)
// 4. Join the sampled users' interactions with genres and personas
// 5. Aggregate the items table (with priority)
// 6. Aggregate the users table (similarities and book scores)
//
// Any error aborts the run; no partial table is returned.

use indicatif::ProgressBar;
use tracing::info;

use crate::data::models::{FeatureTables, Snapshot};
use crate::error::Result;
use crate::features::{aggregate_items, aggregate_users, PriorityScorer, ReadRates};
use crate::genres::CategorySet;
use crate::sampling::{read_counts, StratifiedSampler};

use super::config::PipelineConfig;
use super::prepare::{build_catalog, catalogued, join};

/// Run the feature pipeline over a snapshot.
///
/// `progress` is ticked once per scored user; pass `ProgressBar::hidden()`
/// when no display is wanted.
pub fn run(
    snapshot: &Snapshot,
    config: &PipelineConfig,
    categories: &CategorySet,
    progress: &ProgressBar,
) -> Result<FeatureTables> {
    config.validate(categories)?;
    let dim = categories.len();

    info!(
        interactions = snapshot.interactions.len(),
        items = snapshot.items.len(),
        sample_users = config.sample_users,
        seed = ?config.seed,
        "Starting feature pipeline"
    );

    // Step 2: genre catalog
    let catalog = build_catalog(&snapshot.items, categories, config.strict_categories)?;
    let rows = catalogued(&snapshot.interactions, &catalog);

    // Step 3: stratified sample
    let sampler = StratifiedSampler::new(config.sampler_config())?;
    let counts = read_counts(rows.iter().copied());
    let sampled = sampler.sample(&counts)?;

    // Step 4: model interactions
    let interactions = join(&rows, &sampled, &catalog);
    info!(interactions = interactions.len(), "Model interactions joined");

    // Step 5: items
    let mut priority = PriorityScorer::new(&config.priority, categories, config.seed)?;
    let items = aggregate_items(&interactions, dim, &mut priority);

    // Step 6: users
    let rates = ReadRates::new(&config.thresholds, config.steps)?;
    let users = aggregate_users(
        &interactions,
        &items,
        &config.thresholds,
        &rates,
        config.n_recs,
        dim,
        progress,
    )?;
    progress.finish_and_clear();

    Ok(FeatureTables { items, users })
}
