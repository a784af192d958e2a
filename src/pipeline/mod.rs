// Feature pipeline: from a raw snapshot to the items and users tables.
//
// config:  run parameters and their validation
// prepare: genre catalog and the join that yields model interactions
// build:   the end-to-end run

pub mod build;
pub mod config;
pub mod prepare;

pub use build::run;
pub use config::PipelineConfig;
