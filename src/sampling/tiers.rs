// Reading-frequency tiers.
//
// A user's tier comes from how many books they have read, compared against
// three ascending thresholds (t0, t1, t2):
//
//   low:  count <= t0
//   mid:  t0 < count <= t1
//   high: t1 < count <= t2
//
// Users above t2 are outliers and never enter the sampling pool.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Reader persona by reading frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Mid, Tier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Mid => "mid",
            Tier::High => "high",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tier boundaries in books read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: u32,
    pub mid: u32,
    pub high: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: 5,
            mid: 20,
            high: 50,
        }
    }
}

impl Thresholds {
    /// Build thresholds, rejecting anything that is not strictly ascending.
    pub fn new(low: u32, mid: u32, high: u32) -> Result<Self> {
        let thresholds = Self { low, mid, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.low < self.mid && self.mid < self.high {
            Ok(())
        } else {
            Err(PipelineError::ThresholdsNotAscending(
                self.low, self.mid, self.high,
            ))
        }
    }

    /// Sampling tier for a read count, or None when the user is above the
    /// top threshold.
    pub fn classify(&self, count: u32) -> Option<Tier> {
        if count > self.high {
            None
        } else {
            Some(self.persona(count))
        }
    }

    /// Persona for a read count without the top cutoff: anything above the
    /// mid threshold is a high reader.
    pub fn persona(&self, count: u32) -> Tier {
        if count <= self.low {
            Tier::Low
        } else if count <= self.mid {
            Tier::Mid
        } else {
            Tier::High
        }
    }

    /// Midpoint of a tier's range, in books.
    pub fn midpoint(&self, tier: Tier) -> f64 {
        let (low, mid, high) = (self.low as f64, self.mid as f64, self.high as f64);
        match tier {
            Tier::Low => low / 2.0,
            Tier::Mid => (mid - low) / 2.0 + low,
            Tier::High => (high - mid) / 2.0 + mid,
        }
    }
}

/// Split `n` into (low, mid, high) as evenly as possible, giving any
/// remainder to the lower tiers first.
pub fn divide_into_three(n: usize) -> (usize, usize, usize) {
    let part = n / 3;
    match n % 3 {
        0 => (part, part, part),
        1 => (part + 1, part, part),
        _ => (part + 1, part + 1, part),
    }
}
