// Bookworm: feature tables for agent-based reading simulations
//
// This is the library root. Each module corresponds to a stage or a
// surface of the feature pipeline.

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod genres;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod random;
pub mod sampling;
pub mod similarity;
pub mod status;
