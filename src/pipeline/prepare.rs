// Input preparation: genre catalog and model interactions.
//
// The catalog maps every book with a non-empty genre map to its canonical
// genre vector. Interactions on books outside the catalog never reach the
// sampler. After sampling, the join keeps only the sampled users' rows and
// attaches each row's genre vector and the user's persona.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::data::models::{BookId, InteractionRow, ItemGenres, ModelInteraction, UserId};
use crate::error::{PipelineError, Result};
use crate::genres::vectorizer::vectorize;
use crate::genres::{CategorySet, GenreVector};
use crate::sampling::SampledUser;

/// Canonical genre vectors for every book with genre data.
pub fn build_catalog(
    items: &[ItemGenres],
    categories: &CategorySet,
    strict: bool,
) -> Result<HashMap<BookId, GenreVector>> {
    let mut catalog: HashMap<BookId, GenreVector> = HashMap::with_capacity(items.len());
    let mut empty = 0usize;

    for item in items {
        if item.genres.is_empty() {
            empty += 1;
            continue;
        }
        if catalog.contains_key(&item.book_id) {
            warn!(book_id = item.book_id, "Duplicate genre row, keeping the first");
            continue;
        }

        let (vector, dropped) = vectorize(&item.genres, categories);
        if let Some(label) = dropped.into_iter().next() {
            if strict {
                return Err(PipelineError::UnknownCategory {
                    book_id: item.book_id,
                    label,
                });
            }
            debug!(book_id = item.book_id, label = %label, "Dropped unknown genre label");
        }
        catalog.insert(item.book_id, vector);
    }

    info!(
        books = catalog.len(),
        without_genres = empty,
        "Genre catalog built"
    );

    Ok(catalog)
}

/// Interaction rows whose book has genre data.
pub fn catalogued<'a>(
    interactions: &'a [InteractionRow],
    catalog: &HashMap<BookId, GenreVector>,
) -> Vec<&'a InteractionRow> {
    interactions
        .iter()
        .filter(|row| catalog.contains_key(&row.book_id))
        .collect()
}

/// Join the sampled users' interactions with genre vectors and personas.
/// Row order follows the input.
pub fn join(
    interactions: &[&InteractionRow],
    sampled: &[SampledUser],
    catalog: &HashMap<BookId, GenreVector>,
) -> Vec<ModelInteraction> {
    let personas: HashMap<UserId, &SampledUser> =
        sampled.iter().map(|user| (user.user_id, user)).collect();

    interactions
        .iter()
        .filter_map(|row| {
            let user = personas.get(&row.user_id)?;
            let genres = catalog.get(&row.book_id)?;
            Some(ModelInteraction {
                user_id: row.user_id,
                book_id: row.book_id,
                rating: row.normalized_rating(),
                is_read: row.read(),
                is_reviewed: row.reviewed(),
                tier: user.tier,
                ignorant: user.ignorant,
                genres: genres.clone(),
            })
        })
        .collect()
}
