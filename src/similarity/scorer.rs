// Book scorer: one score per book a user interacted with.
//
// A priority-flagged book scores its priority value outright. Every other
// book scores the cosine similarity between the user's genre vector and
// the book's.

use std::collections::{HashMap, HashSet};

use crate::data::models::{BookId, ItemRecord, ScoredBook, UserId};
use crate::error::{PipelineError, Result};
use crate::genres::GenreVector;

use super::matrix::cosine_similarity;

/// Score a user's books, keeping the order they were interacted with.
///
/// A book id missing from `items` is a data-integrity error. Repeated ids
/// keep their first position.
pub fn score_books(
    user_id: UserId,
    user_vector: &GenreVector,
    books: &[BookId],
    items: &HashMap<BookId, &ItemRecord>,
) -> Result<Vec<ScoredBook>> {
    let mut seen: HashSet<BookId> = HashSet::with_capacity(books.len());
    let mut scored = Vec::with_capacity(books.len());

    for &book_id in books {
        if !seen.insert(book_id) {
            continue;
        }
        let item = items
            .get(&book_id)
            .ok_or(PipelineError::MissingItem { user_id, book_id })?;

        let score = if item.priority > 0.0 {
            item.priority
        } else {
            cosine_similarity(user_vector, &item.vector)
        };

        scored.push(ScoredBook { book_id, score });
    }

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(book_id: BookId, vector: &[f64], priority: f64) -> ItemRecord {
        ItemRecord {
            book_id,
            is_read: 1,
            rating: None,
            is_reviewed: 0,
            vector: GenreVector::from_vec(vector.to_vec()),
            priority,
        }
    }

    #[test]
    fn test_priority_overrides_similarity() {
        let flagged = item(1, &[0.0, 1.0], 1.0);
        let plain = item(2, &[0.0, 1.0], 0.0);
        let items: HashMap<BookId, &ItemRecord> = [(1, &flagged), (2, &plain)].into();
        let user = GenreVector::from_vec(vec![1.0, 0.0]);

        let scored = score_books(7, &user, &[2, 1], &items).unwrap();
        assert_eq!(
            scored,
            vec![
                ScoredBook { book_id: 2, score: 0.0 },
                ScoredBook { book_id: 1, score: 1.0 },
            ]
        );
    }

    #[test]
    fn test_missing_item_is_error() {
        let items: HashMap<BookId, &ItemRecord> = HashMap::new();
        let user = GenreVector::from_vec(vec![1.0]);
        let err = score_books(7, &user, &[99], &items).unwrap_err();
        assert_eq!(err, PipelineError::MissingItem { user_id: 7, book_id: 99 });
    }

    #[test]
    fn test_repeated_books_keep_first_position() {
        let a = item(1, &[1.0], 0.0);
        let b = item(2, &[1.0], 0.0);
        let items: HashMap<BookId, &ItemRecord> = [(1, &a), (2, &b)].into();
        let user = GenreVector::from_vec(vec![1.0]);
        let ids: Vec<BookId> = score_books(7, &user, &[2, 1, 2], &items)
            .unwrap()
            .iter()
            .map(|s| s.book_id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
