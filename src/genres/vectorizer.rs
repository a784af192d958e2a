// Genre vectorizer: raw tag counts to canonical, fixed-order vectors.
//
// The raw feed maps free-form labels (sometimes comma-joined, like
// "fantasy, paranormal") to integer counts. Two steps turn that into a
// GenreVector:
//
//   1. canonicalize: split compound labels, normalize spelling, accumulate
//      counts per canonical label, and pad the result with every category
//      in the set.
//   2. flatten: read the canonical map in category-set order, dropping any
//      label outside the set.
//
// A negative count in the feed is a data-quality marker. Any canonical
// bucket it touches is pinned to 0 for the rest of the accumulation.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::categories::CategorySet;
use super::vector::GenreVector;

/// Normalize one atomic label: trim, then turn spaces and hyphens into
/// underscores.
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Canonicalize a raw label -> count map.
///
/// The result holds a non-negative count for every category in `categories`
/// plus any unrecognized labels seen in the input (those are dropped later
/// by `flatten`).
pub fn canonicalize(
    raw: &HashMap<String, i64>,
    categories: &CategorySet,
) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut poisoned: HashSet<String> = HashSet::new();

    // Sorted iteration keeps the result independent of HashMap order
    let mut entries: Vec<(&String, &i64)> = raw.iter().collect();
    entries.sort();

    for (compound, &value) in entries {
        for part in compound.split(',') {
            let label = normalize_label(part);
            if label.is_empty() {
                continue;
            }
            if value < 0 {
                poisoned.insert(label.clone());
                counts.insert(label, 0);
                continue;
            }
            let bucket = counts.entry(label.clone()).or_insert(0);
            if !poisoned.contains(&label) {
                *bucket = bucket.saturating_add(value as u64);
            }
        }
    }

    for category in categories.iter() {
        counts.entry(category.to_string()).or_insert(0);
    }

    counts
}

/// Flatten a canonical map into category-set order.
///
/// Returns the vector and the labels that were dropped because they are
/// not part of the category set.
pub fn flatten(
    canonical: &BTreeMap<String, u64>,
    categories: &CategorySet,
) -> (GenreVector, Vec<String>) {
    let values: Vec<f64> = categories
        .iter()
        .map(|c| canonical.get(c).copied().unwrap_or(0) as f64)
        .collect();

    let dropped: Vec<String> = canonical
        .keys()
        .filter(|label| !categories.contains(label))
        .cloned()
        .collect();

    (GenreVector::from_vec(values), dropped)
}

/// Canonicalize and flatten in one call.
pub fn vectorize(
    raw: &HashMap<String, i64>,
    categories: &CategorySet,
) -> (GenreVector, Vec<String>) {
    let canonical = canonicalize(raw, categories);
    flatten(&canonical, categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, i64)]) -> HashMap<String, i64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label(" young-adult "), "young_adult");
        assert_eq!(normalize_label("historical fiction"), "historical_fiction");
        assert_eq!(normalize_label("non-fiction"), "non_fiction");
    }

    #[test]
    fn test_compound_label_splits_into_buckets() {
        let categories = CategorySet::goodreads();
        let canonical = canonicalize(&raw(&[("fantasy, paranormal", 7)]), &categories);
        assert_eq!(canonical["fantasy"], 7);
        assert_eq!(canonical["paranormal"], 7);
        assert_eq!(canonical["romance"], 0);
    }

    #[test]
    fn test_counts_accumulate_across_compounds() {
        let categories = CategorySet::goodreads();
        let canonical = canonicalize(
            &raw(&[("mystery, thriller, crime", 4), ("fiction", 10), ("crime", 1)]),
            &categories,
        );
        assert_eq!(canonical["crime"], 5);
        assert_eq!(canonical["fiction"], 10);
    }

    #[test]
    fn test_negative_count_pins_bucket_to_zero() {
        let categories = CategorySet::goodreads();
        let canonical = canonicalize(
            &raw(&[("history, historical fiction, biography", -1), ("biography", 12)]),
            &categories,
        );
        assert_eq!(canonical["history"], 0);
        assert_eq!(canonical["historical_fiction"], 0);
        assert_eq!(canonical["biography"], 0);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let categories = CategorySet::goodreads();
        let (vector, dropped) = vectorize(&HashMap::new(), &categories);
        assert_eq!(vector.len(), 16);
        assert!(vector.is_zero());
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_unknown_labels_are_dropped_on_flatten() {
        let categories = CategorySet::goodreads();
        let (vector, dropped) = vectorize(&raw(&[("cookbooks", 3), ("poetry", 2)]), &categories);
        assert_eq!(vector.len(), 16);
        assert_eq!(vector.get(13), Some(2.0));
        assert_eq!(dropped, vec!["cookbooks".to_string()]);
    }
}
