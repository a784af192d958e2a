// Item priority strategies.
//
// A priority-flagged item is a "must-recommend" book: its score in every
// user's book map is the priority value itself instead of a similarity.
//
// The strategy is chosen once, when the run is configured, and resolved
// against the category set before any item is scored:
// - None: nothing is flagged
// - Probability(p): each item is flagged independently with probability p
// - CategoryMatch(name): items whose dominant genre is `name` are flagged

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::genres::{CategorySet, GenreVector};
use crate::random::{step_rng, stream};

/// How items get their priority flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PriorityStrategy {
    #[default]
    None,
    Probability(f64),
    CategoryMatch(String),
}

impl PriorityStrategy {
    /// Parse a command-line value: empty or "none" disables priority, a
    /// number is a probability, anything else must name a category.
    pub fn parse(raw: &str, categories: &CategorySet) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        let strategy = match raw.parse::<f64>() {
            Ok(p) => Self::Probability(p),
            Err(_) => Self::CategoryMatch(raw.to_string()),
        };
        strategy.validate(categories)?;
        Ok(strategy)
    }

    pub fn validate(&self, categories: &CategorySet) -> Result<()> {
        match self {
            Self::None => Ok(()),
            Self::Probability(p) => {
                if p.is_finite() && (0.0..=1.0).contains(p) {
                    Ok(())
                } else {
                    Err(PipelineError::InvalidProbability(*p))
                }
            }
            Self::CategoryMatch(name) => {
                if categories.contains(name) {
                    Ok(())
                } else {
                    Err(PipelineError::UnknownPriorityCategory(name.clone()))
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Probability(p) => format!("random ({p})"),
            Self::CategoryMatch(name) => format!("dominant genre = {name}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Off,
    Bernoulli(f64),
    DominantAxis(usize),
}

/// A strategy resolved against a category set, ready to score items.
pub struct PriorityScorer {
    rule: Rule,
    rng: StdRng,
}

impl PriorityScorer {
    pub fn new(strategy: &PriorityStrategy, categories: &CategorySet, seed: Option<u64>) -> Result<Self> {
        strategy.validate(categories)?;
        let rule = match strategy {
            PriorityStrategy::None => Rule::Off,
            PriorityStrategy::Probability(p) if *p == 0.0 => Rule::Off,
            PriorityStrategy::Probability(p) => Rule::Bernoulli(*p),
            PriorityStrategy::CategoryMatch(name) => {
                let axis = categories
                    .index_of(name)
                    .ok_or_else(|| PipelineError::UnknownPriorityCategory(name.clone()))?;
                Rule::DominantAxis(axis)
            }
        };
        Ok(Self {
            rule,
            rng: step_rng(seed, stream::PRIORITY),
        })
    }

    /// Priority for one item: 1.0 when flagged, 0.0 otherwise.
    ///
    /// Bernoulli draws advance the scorer's RNG, so callers must score
    /// items in a fixed order for reproducible runs.
    pub fn score(&mut self, vector: &GenreVector) -> f64 {
        let flagged = match self.rule {
            Rule::Off => false,
            Rule::Bernoulli(p) => self.rng.random_bool(p),
            Rule::DominantAxis(axis) => !vector.is_zero() && vector.max_axes().contains(&axis),
        };
        if flagged {
            1.0
        } else {
            0.0
        }
    }
}
