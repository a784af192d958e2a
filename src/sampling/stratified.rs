// Stratified user sampler.
//
// Picks the simulation's agents from the user population:
//
// 1. Count read books per user (is_read == 1 rows only)
// 2. Drop users above the top threshold, bucket the rest into tiers
// 3. Split the requested sample size across the three tiers
// 4. Draw each tier's share without replacement from a seeded RNG
// 5. Optionally mark a fraction of each tier as "ignorant"
//
// Candidate pools are ordered by user_id before drawing, so the outcome
// depends only on the seed and the population, never on row order.

use std::collections::{BTreeMap, HashSet};

use rand::seq::{index, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::tiers::{divide_into_three, Thresholds, Tier};
use crate::data::models::{InteractionRow, UserId};
use crate::error::{PipelineError, Result};
use crate::random::{step_rng, stream};

/// Parameters for one sampling pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Total number of users to sample across all tiers
    pub sample_users: usize,
    pub thresholds: Thresholds,
    pub seed: Option<u64>,
    /// Fraction of each tier to mark as ignorant (0.0-1.0)
    pub ignorant_proportion: f64,
}

/// A sampled user and the persona assigned at sampling time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledUser {
    pub user_id: UserId,
    pub tier: Tier,
    /// Books read in the source feed
    pub book_count: u32,
    pub ignorant: bool,
}

/// Count read interactions per user. Users without any read interaction
/// do not appear in the result.
pub fn read_counts<'a>(rows: impl IntoIterator<Item = &'a InteractionRow>) -> BTreeMap<UserId, u32> {
    let mut counts: BTreeMap<UserId, u32> = BTreeMap::new();
    for row in rows.into_iter().filter(|r| r.read()) {
        *counts.entry(row.user_id).or_insert(0) += 1;
    }
    counts
}

pub struct StratifiedSampler {
    config: SamplerConfig,
}

impl StratifiedSampler {
    pub fn new(config: SamplerConfig) -> Result<Self> {
        config.thresholds.validate()?;
        if !(0.0..=1.0).contains(&config.ignorant_proportion) {
            return Err(PipelineError::InvalidConfig(format!(
                "ignorant_proportion must be within [0, 1], got {}",
                config.ignorant_proportion
            )));
        }
        Ok(Self { config })
    }

    /// Draw the sample. Output is grouped by tier (low, mid, high) and
    /// sorted by user_id within each tier.
    pub fn sample(&self, counts: &BTreeMap<UserId, u32>) -> Result<Vec<SampledUser>> {
        let (n_low, n_mid, n_high) = divide_into_three(self.config.sample_users);
        let mut sampled = Vec::with_capacity(self.config.sample_users);

        for (tier, requested) in [(Tier::Low, n_low), (Tier::Mid, n_mid), (Tier::High, n_high)] {
            let pool = self.tier_pool(counts, tier);
            let drawn = self.draw(tier, &pool, requested)?;
            debug!(
                tier = tier.as_str(),
                eligible = pool.len(),
                sampled = drawn.len(),
                "Tier sampled"
            );
            sampled.extend(self.assign_ignorant(tier, drawn));
        }

        info!(
            users = sampled.len(),
            ignorant = sampled.iter().filter(|u| u.ignorant).count(),
            "Users sampled"
        );

        Ok(sampled)
    }

    /// Eligible (user_id, count) pairs for a tier, ascending by user_id.
    fn tier_pool(&self, counts: &BTreeMap<UserId, u32>, tier: Tier) -> Vec<(UserId, u32)> {
        counts
            .iter()
            .filter(|&(_, &count)| self.config.thresholds.classify(count) == Some(tier))
            .map(|(&id, &count)| (id, count))
            .collect()
    }

    fn draw(&self, tier: Tier, pool: &[(UserId, u32)], requested: usize) -> Result<Vec<(UserId, u32)>> {
        if requested > pool.len() {
            return Err(PipelineError::SampleExceedsPopulation {
                tier,
                requested,
                available: pool.len(),
            });
        }

        let stream_id = match tier {
            Tier::Low => stream::SAMPLE_LOW,
            Tier::Mid => stream::SAMPLE_MID,
            Tier::High => stream::SAMPLE_HIGH,
        };
        let mut rng = step_rng(self.config.seed, stream_id);

        let mut drawn: Vec<(UserId, u32)> = index::sample(&mut rng, pool.len(), requested)
            .into_iter()
            .map(|i| pool[i])
            .collect();
        drawn.sort_by_key(|&(id, _)| id);
        Ok(drawn)
    }

    /// Shuffle the tier's sample and mark the first round(p * size) users
    /// as ignorant. Returns fresh records, ascending by user_id.
    fn assign_ignorant(&self, tier: Tier, drawn: Vec<(UserId, u32)>) -> Vec<SampledUser> {
        let proportion = self.config.ignorant_proportion;
        let mut ignorant: HashSet<UserId> = HashSet::new();

        if proportion > 0.0 {
            let stream_id = match tier {
                Tier::Low => stream::IGNORANT_LOW,
                Tier::Mid => stream::IGNORANT_MID,
                Tier::High => stream::IGNORANT_HIGH,
            };
            let mut rng = step_rng(self.config.seed, stream_id);

            let mut shuffled: Vec<UserId> = drawn.iter().map(|&(id, _)| id).collect();
            shuffled.shuffle(&mut rng);

            let cutoff = ((shuffled.len() as f64) * proportion).round_ties_even() as usize;
            ignorant.extend(shuffled.into_iter().take(cutoff));
        }

        drawn
            .into_iter()
            .map(|(user_id, book_count)| SampledUser {
                user_id,
                tier,
                book_count,
                ignorant: ignorant.contains(&user_id),
            })
            .collect()
    }
}
