// Unit tests for tier classification and the stratified sampler.
//
// Tests isolated behavior: the three-way split, tier boundaries with custom
// thresholds, seeded reproducibility, and the ignorant overlay.

use std::collections::BTreeMap;

use bookworm::data::models::InteractionRow;
use bookworm::error::PipelineError;
use bookworm::sampling::{
    divide_into_three, read_counts, SamplerConfig, StratifiedSampler, Thresholds, Tier,
};

fn population() -> BTreeMap<u64, u32> {
    // 10 low readers, 10 mid, 10 high, 5 outliers
    let mut counts = BTreeMap::new();
    for id in 0..10 {
        counts.insert(100 + id, 1 + (id as u32 % 5));
        counts.insert(200 + id, 6 + id as u32);
        counts.insert(300 + id, 21 + id as u32 * 3);
        if id < 5 {
            counts.insert(400 + id, 51 + id as u32);
        }
    }
    counts
}

fn sampler(sample_users: usize, seed: Option<u64>, ignorant_proportion: f64) -> StratifiedSampler {
    StratifiedSampler::new(SamplerConfig {
        sample_users,
        thresholds: Thresholds::default(),
        seed,
        ignorant_proportion,
    })
    .unwrap()
}

// ============================================================
// divide_into_three
// ============================================================

#[test]
fn split_sums_to_n_and_stays_balanced() {
    for n in 0..300 {
        let (a, b, c) = divide_into_three(n);
        assert_eq!(a + b + c, n);
        assert!(a >= b && b >= c);
        assert!(a - c <= 1, "n = {n}");
    }
}

// ============================================================
// Thresholds
// ============================================================

#[test]
fn custom_thresholds_move_the_boundaries() {
    let t = Thresholds::new(1, 2, 3).unwrap();
    assert_eq!(t.classify(1), Some(Tier::Low));
    assert_eq!(t.classify(2), Some(Tier::Mid));
    assert_eq!(t.classify(3), Some(Tier::High));
    assert_eq!(t.classify(4), None);
}

#[test]
fn equal_thresholds_are_rejected() {
    assert_eq!(
        Thresholds::new(5, 20, 20).unwrap_err(),
        PipelineError::ThresholdsNotAscending(5, 20, 20)
    );
}

// ============================================================
// read_counts
// ============================================================

#[test]
fn read_counts_counts_only_finished_books() {
    let rows: Vec<InteractionRow> = (0..6)
        .map(|i| InteractionRow {
            user_id: 1,
            book_id: i,
            is_read: u8::from(i % 2 == 0),
            rating: None,
            is_reviewed: 0,
        })
        .collect();
    assert_eq!(read_counts(&rows).get(&1), Some(&3));
}

// ============================================================
// StratifiedSampler
// ============================================================

#[test]
fn sample_is_split_across_tiers_and_grouped() {
    let sampled = sampler(10, Some(5), 0.0).sample(&population()).unwrap();
    assert_eq!(sampled.len(), 10);

    let tiers: Vec<Tier> = sampled.iter().map(|u| u.tier).collect();
    assert_eq!(tiers.iter().filter(|&&t| t == Tier::Low).count(), 4);
    assert_eq!(tiers.iter().filter(|&&t| t == Tier::Mid).count(), 3);
    assert_eq!(tiers.iter().filter(|&&t| t == Tier::High).count(), 3);

    let mut grouped = tiers.clone();
    grouped.sort();
    assert_eq!(tiers, grouped);

    for user in &sampled {
        assert!(user.user_id < 400, "outlier {} sampled", user.user_id);
        assert_eq!(Thresholds::default().classify(user.book_count), Some(user.tier));
    }
}

#[test]
fn sampled_users_are_distinct() {
    let sampled = sampler(30, Some(1), 0.0).sample(&population()).unwrap();
    let mut ids: Vec<u64> = sampled.iter().map(|u| u.user_id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 30);
}

#[test]
fn same_seed_same_sample() {
    let a = sampler(9, Some(2024), 0.4).sample(&population()).unwrap();
    let b = sampler(9, Some(2024), 0.4).sample(&population()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn ignorant_share_is_rounded_per_tier() {
    // 4 users per tier, p = 0.5 -> 2 ignorant per tier
    let sampled = sampler(12, Some(3), 0.5).sample(&population()).unwrap();
    for tier in Tier::ALL {
        let ignorant = sampled
            .iter()
            .filter(|u| u.tier == tier && u.ignorant)
            .count();
        assert_eq!(ignorant, 2, "tier {tier}");
    }
}

#[test]
fn unseeded_sampler_still_honors_tier_sizes() {
    let sampled = sampler(6, None, 0.0).sample(&population()).unwrap();
    assert_eq!(sampled.len(), 6);
}

#[test]
fn empty_population_fails_on_the_first_tier() {
    let err = sampler(3, Some(1), 0.0).sample(&BTreeMap::new()).unwrap_err();
    assert_eq!(
        err,
        PipelineError::SampleExceedsPopulation {
            tier: Tier::Low,
            requested: 1,
            available: 0,
        }
    );
}

#[test]
fn zero_sample_is_empty() {
    let sampled = sampler(0, Some(1), 0.5).sample(&population()).unwrap();
    assert!(sampled.is_empty());
}
