// Error taxonomy for the feature pipeline.
//
// Every variant is fatal for the current run: the pipeline returns it
// instead of a partially built table. Loader, export and CLI code wraps
// these in anyhow with context.

use thiserror::Error;

use crate::sampling::Tier;

/// Errors raised by the core pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A run parameter is out of range or malformed.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Tier thresholds must satisfy t0 < t1 < t2.
    #[error("Thresholds must be strictly ascending, got ({0}, {1}, {2})")]
    ThresholdsNotAscending(u32, u32, u32),

    /// A tier has fewer eligible users than its share of the sample.
    #[error("Cannot sample {requested} users from the {tier} tier: only {available} eligible")]
    SampleExceedsPopulation {
        tier: Tier,
        requested: usize,
        available: usize,
    },

    /// A priority strategy names a genre outside the category set.
    #[error("Unknown priority category '{0}'")]
    UnknownPriorityCategory(String),

    /// A Bernoulli priority outside [0, 1].
    #[error("Priority probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// A user references a book that has no item record.
    #[error("User {user_id} references book {book_id}, which is missing from the items table")]
    MissingItem { user_id: u64, book_id: u64 },

    /// A genre label outside the category set (strict mode only).
    #[error("Book {book_id} carries unknown genre label '{label}'")]
    UnknownCategory { book_id: u64, label: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
