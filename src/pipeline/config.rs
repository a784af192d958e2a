use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::features::PriorityStrategy;
use crate::genres::CategorySet;
use crate::sampling::{SamplerConfig, Thresholds};

/// Parameters for one pipeline run.
///
/// Built by the caller (the CLI parses flags into it) and validated once
/// before any data is touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum interaction rows the loader reads (None reads everything)
    pub n_users: Option<usize>,
    /// Users to sample across the three tiers
    pub sample_users: usize,
    pub thresholds: Thresholds,
    /// Seed for every stochastic step; None is not reproducible
    pub seed: Option<u64>,
    /// Fraction of each tier marked ignorant (0.0-1.0)
    pub ignorant_proportion: f64,
    pub priority: PriorityStrategy,
    /// Steps in the downstream simulation, used to scale read rates
    pub steps: u32,
    /// Similarity recommendations per user (0 disables them)
    pub n_recs: usize,
    /// Treat genre labels outside the category set as errors
    pub strict_categories: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            n_users: None,
            sample_users: 100,
            thresholds: Thresholds::default(),
            seed: None,
            ignorant_proportion: 0.0,
            priority: PriorityStrategy::None,
            steps: 100,
            n_recs: 0,
            strict_categories: false,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self, categories: &CategorySet) -> Result<()> {
        self.thresholds.validate()?;
        self.priority.validate(categories)?;

        if !(0.0..=1.0).contains(&self.ignorant_proportion) {
            return Err(PipelineError::InvalidConfig(format!(
                "ignorant_proportion must be within [0, 1], got {}",
                self.ignorant_proportion
            )));
        }
        if self.steps == 0 {
            return Err(PipelineError::InvalidConfig(
                "steps must be greater than zero".to_string(),
            ));
        }
        if categories.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "category set is empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            sample_users: self.sample_users,
            thresholds: self.thresholds,
            seed: self.seed,
            ignorant_proportion: self.ignorant_proportion,
        }
    }
}
