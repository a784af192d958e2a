// Output: table export and terminal display.

pub mod tables;
pub mod terminal;

use crate::data::models::ItemRecord;
use crate::genres::CategorySet;

/// Count items by dominant genre, in category-set order.
///
/// Each item's vector is normalized before taking the argmax; items with an
/// all-zero vector have no dominant genre and are not counted.
pub fn dominant_genre_counts(items: &[ItemRecord], categories: &CategorySet) -> Vec<(String, usize)> {
    let mut counts = vec![0usize; categories.len()];
    for item in items {
        if let Some(axis) = item.vector.normalized(false).dominant_axis() {
            if let Some(slot) = counts.get_mut(axis) {
                *slot += 1;
            }
        }
    }
    categories
        .iter()
        .map(str::to_string)
        .zip(counts)
        .collect()
}
