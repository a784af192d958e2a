// Items table: one record per book the sampled users interacted with.
//
// Per book: number of reads, number of reviews, mean normalized rating,
// and the mean of the per-interaction genre vectors. Priority is scored
// last, in ascending book_id order.

use std::collections::BTreeMap;

use tracing::info;

use crate::data::models::{BookId, ItemRecord, ModelInteraction};
use crate::genres::GenreVector;

use super::priority::PriorityScorer;

struct ItemAccumulator {
    reads: u32,
    reviews: u32,
    rating_sum: f64,
    rated: usize,
    vector_sum: GenreVector,
    interactions: usize,
}

impl ItemAccumulator {
    fn new(dim: usize) -> Self {
        Self {
            reads: 0,
            reviews: 0,
            rating_sum: 0.0,
            rated: 0,
            vector_sum: GenreVector::zeros(dim),
            interactions: 0,
        }
    }

    fn add(&mut self, interaction: &ModelInteraction) {
        self.reads += u32::from(interaction.is_read);
        self.reviews += u32::from(interaction.is_reviewed);
        if let Some(rating) = interaction.rating {
            self.rating_sum += rating;
            self.rated += 1;
        }
        self.vector_sum.accumulate(&interaction.genres);
        self.interactions += 1;
    }

    fn finish(self, book_id: BookId, priority: &mut PriorityScorer) -> ItemRecord {
        let mut vector = self.vector_sum;
        vector.scale_down(self.interactions);
        let rating = (self.rated > 0).then(|| self.rating_sum / self.rated as f64);
        let priority = priority.score(&vector);
        ItemRecord {
            book_id,
            is_read: self.reads,
            rating,
            is_reviewed: self.reviews,
            vector,
            priority,
        }
    }
}

/// Build the items table, sorted by book_id.
pub fn aggregate_items(
    interactions: &[ModelInteraction],
    dim: usize,
    priority: &mut PriorityScorer,
) -> Vec<ItemRecord> {
    let mut groups: BTreeMap<BookId, ItemAccumulator> = BTreeMap::new();
    for interaction in interactions {
        groups
            .entry(interaction.book_id)
            .or_insert_with(|| ItemAccumulator::new(dim))
            .add(interaction);
    }

    let items: Vec<ItemRecord> = groups
        .into_iter()
        .map(|(book_id, acc)| acc.finish(book_id, priority))
        .collect();

    info!(
        items = items.len(),
        prioritized = items.iter().filter(|i| i.priority > 0.0).count(),
        "Items table ready"
    );

    items
}
