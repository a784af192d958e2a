// Users table: one record per sampled user.
//
// Per user: review and read totals, mean normalized rating, the books they
// touched, and a genre vector that counts how many of their interactions
// touched each genre (indicators are binarized before summing, so a book
// tagged "fantasy" 40 times still counts once).
//
// Read probability comes from the user's persona: the midpoint of the
// tier's book range spread over the simulation's step count.

use std::collections::{BTreeMap, HashMap};

use indicatif::ProgressBar;
use tracing::info;

use crate::data::models::{BookId, ItemRecord, ModelInteraction, UserId, UserRecord};
use crate::error::{PipelineError, Result};
use crate::genres::GenreVector;
use crate::sampling::{Thresholds, Tier};
use crate::similarity::{score_books, top_n_similarities};

/// Per-step read probabilities for each persona.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadRates {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl ReadRates {
    /// Tier midpoints divided by `steps`, rounded to 4 decimal places.
    pub fn new(thresholds: &Thresholds, steps: u32) -> Result<Self> {
        if steps == 0 {
            return Err(PipelineError::InvalidConfig(
                "steps must be greater than zero".to_string(),
            ));
        }
        let rate = |tier: Tier| round4(thresholds.midpoint(tier) / steps as f64);
        Ok(Self {
            low: rate(Tier::Low)?,
            mid: rate(Tier::Mid)?,
            high: rate(Tier::High)?,
        })
    }

    pub fn for_tier(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Low => self.low,
            Tier::Mid => self.mid,
            Tier::High => self.high,
        }
    }
}

/// Round to 4 decimal places on the exact decimal value of `value`, so a
/// double stored just above a half (0.00625) rounds up.
fn round4(value: f64) -> Result<f64> {
    format!("{value:.4}")
        .parse()
        .map_err(|e| PipelineError::InvalidConfig(format!("read rate {value} is not finite: {e}")))
}

struct UserAccumulator {
    tier: Tier,
    ignorant: bool,
    reads: u32,
    reviews: u32,
    rating_sum: f64,
    rated: usize,
    books: Vec<BookId>,
    vector: GenreVector,
}

impl UserAccumulator {
    fn new(first: &ModelInteraction, dim: usize) -> Self {
        Self {
            tier: first.tier,
            ignorant: first.ignorant,
            reads: 0,
            reviews: 0,
            rating_sum: 0.0,
            rated: 0,
            books: Vec::new(),
            vector: GenreVector::zeros(dim),
        }
    }

    fn add(&mut self, interaction: &ModelInteraction) {
        self.reads += u32::from(interaction.is_read);
        self.reviews += u32::from(interaction.is_reviewed);
        if let Some(rating) = interaction.rating {
            self.rating_sum += rating;
            self.rated += 1;
        }
        self.books.push(interaction.book_id);
        self.vector.accumulate(&interaction.genres.binarized());
    }
}

/// Build the users table, sorted by user_id.
///
/// With `n_recs > 0` every user also gets their top `n_recs` items by
/// cosine similarity over the whole items table.
pub fn aggregate_users(
    interactions: &[ModelInteraction],
    items: &[ItemRecord],
    thresholds: &Thresholds,
    rates: &ReadRates,
    n_recs: usize,
    dim: usize,
    progress: &ProgressBar,
) -> Result<Vec<UserRecord>> {
    let mut groups: BTreeMap<UserId, UserAccumulator> = BTreeMap::new();
    for interaction in interactions {
        groups
            .entry(interaction.user_id)
            .or_insert_with(|| UserAccumulator::new(interaction, dim))
            .add(interaction);
    }

    let similarities = if n_recs > 0 {
        let reference: Vec<&GenreVector> = groups.values().map(|acc| &acc.vector).collect();
        let compare: Vec<(BookId, &GenreVector)> =
            items.iter().map(|item| (item.book_id, &item.vector)).collect();
        Some(top_n_similarities(&reference, &compare, n_recs)?)
    } else {
        None
    };

    let item_index: HashMap<BookId, &ItemRecord> =
        items.iter().map(|item| (item.book_id, item)).collect();

    progress.set_length(groups.len() as u64);

    let mut users = Vec::with_capacity(groups.len());
    for (row, (user_id, acc)) in groups.into_iter().enumerate() {
        let books = score_books(user_id, &acc.vector, &acc.books, &item_index)?;
        let read_proba = rates.for_tier(thresholds.persona(acc.reads));
        let rating = (acc.rated > 0).then(|| acc.rating_sum / acc.rated as f64);

        users.push(UserRecord {
            user_id,
            tier: acc.tier,
            is_reviewed: acc.reviews,
            is_read: acc.reads,
            rating,
            ignorant: acc.ignorant,
            vector: acc.vector,
            books,
            read_proba,
            similarities: similarities.as_ref().map(|all| all[row].clone()),
        });
        progress.inc(1);
    }

    info!(
        users = users.len(),
        recommendations = n_recs,
        "Users table ready"
    );

    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rates_default_thresholds() {
        let rates = ReadRates::new(&Thresholds::default(), 10).unwrap();
        assert_eq!(rates.low, 0.25);
        assert_eq!(rates.mid, 1.25);
        assert_eq!(rates.high, 3.5);
    }

    #[test]
    fn test_read_rates_round_to_four_places() {
        let rates = ReadRates::new(&Thresholds::default(), 365).unwrap();
        // 2.5 / 365 = 0.0068493...
        assert_eq!(rates.low, 0.0068);
        // 12.5 / 365 = 0.0342465...
        assert_eq!(rates.mid, 0.0342);
    }

    #[test]
    fn test_read_rates_round_the_exact_decimal() {
        // 2.5 / 400 is stored as 0.006250000000000000347
        let rates = ReadRates::new(&Thresholds::default(), 400).unwrap();
        assert_eq!(rates.low, 0.0063);
        let rates = ReadRates::new(&Thresholds::default(), 2000).unwrap();
        assert_eq!(rates.low, 0.0013);
        assert_eq!(rates.mid, 0.0063);
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(ReadRates::new(&Thresholds::default(), 0).is_err());
    }
}
