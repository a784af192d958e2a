// Unit tests for genre canonicalization and genre vectors.
//
// Tests isolated pure functions: canonicalize edge cases (compound labels,
// negative markers, padding), flatten axis order, and GenreVector helpers.

use std::collections::HashMap;

use bookworm::genres::vectorizer::{canonicalize, flatten, normalize_label, vectorize};
use bookworm::genres::{CategorySet, GenreVector};

fn raw(pairs: &[(&str, i64)]) -> HashMap<String, i64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

// ============================================================
// canonicalize: negative counts
// ============================================================

#[test]
fn negative_count_zeroes_every_bucket_of_a_compound() {
    let categories = CategorySet::goodreads();
    let canonical = canonicalize(
        &raw(&[("mystery, thriller, crime", -1), ("fiction", 8)]),
        &categories,
    );
    assert_eq!(canonical["mystery"], 0);
    assert_eq!(canonical["thriller"], 0);
    assert_eq!(canonical["crime"], 0);
    assert_eq!(canonical["fiction"], 8);
}

#[test]
fn negative_count_wins_over_positive_contributions() {
    let categories = CategorySet::goodreads();
    // "crime" gets +30 from one compound and -1 from another
    let canonical = canonicalize(
        &raw(&[("crime", 30), ("mystery, thriller, crime", -1), ("thriller", 4)]),
        &categories,
    );
    assert_eq!(canonical["crime"], 0);
    assert_eq!(canonical["thriller"], 0);
}

#[test]
fn zero_count_contributes_nothing() {
    let categories = CategorySet::goodreads();
    let canonical = canonicalize(&raw(&[("poetry", 0), ("poetry, romance", 3)]), &categories);
    assert_eq!(canonical["poetry"], 3);
    assert_eq!(canonical["romance"], 3);
}

#[test]
fn huge_counts_saturate_instead_of_overflowing() {
    let categories = CategorySet::goodreads();
    let canonical = canonicalize(
        &raw(&[
            ("fiction", i64::MAX),
            ("fiction, poetry", i64::MAX),
            ("fiction, romance", i64::MAX),
        ]),
        &categories,
    );
    assert_eq!(canonical["fiction"], u64::MAX);
    assert_eq!(canonical["poetry"], i64::MAX as u64);
}

// ============================================================
// canonicalize: padding and spelling
// ============================================================

#[test]
fn every_category_is_present_after_canonicalize() {
    let categories = CategorySet::goodreads();
    let canonical = canonicalize(&raw(&[("fiction", 2)]), &categories);
    for category in categories.iter() {
        assert!(canonical.contains_key(category), "missing {category}");
    }
}

#[test]
fn spelling_variants_share_a_bucket() {
    let categories = CategorySet::goodreads();
    let canonical = canonicalize(
        &raw(&[("young-adult", 2), ("young adult", 3), (" young_adult ", 1)]),
        &categories,
    );
    assert_eq!(canonical["young_adult"], 6);
}

#[test]
fn normalize_label_only_touches_interior_separators() {
    assert_eq!(normalize_label("  comics  "), "comics");
    assert_eq!(normalize_label("history - biography"), "history___biography");
}

// ============================================================
// flatten: axis order
// ============================================================

#[test]
fn flatten_pins_category_order() {
    let categories = CategorySet::goodreads();
    let (vector, _) = vectorize(
        &raw(&[("young-adult", 1), ("children", 2), ("romance", 3)]),
        &categories,
    );
    assert_eq!(vector.len(), categories.len());
    assert_eq!(vector.get(0), Some(2.0));
    assert_eq!(vector.get(14), Some(3.0));
    assert_eq!(vector.get(15), Some(1.0));
}

#[test]
fn flatten_is_stable_across_calls() {
    let categories = CategorySet::goodreads();
    let input = raw(&[("fantasy, paranormal", 5), ("fiction", 9), ("comics, graphic", 1)]);
    let (a, _) = vectorize(&input, &categories);
    let (b, _) = vectorize(&input, &categories);
    assert_eq!(a, b);
}

#[test]
fn flatten_uses_a_custom_category_set() {
    let categories = CategorySet::new(vec!["b".to_string(), "a".to_string()]);
    let canonical = canonicalize(&raw(&[("a", 1), ("b", 2), ("c", 3)]), &categories);
    let (vector, dropped) = flatten(&canonical, &categories);
    assert_eq!(vector.as_slice(), &[2.0, 1.0]);
    assert_eq!(dropped, vec!["c".to_string()]);
}

// ============================================================
// GenreVector helpers
// ============================================================

#[test]
fn dominant_axis_prefers_first_tie() {
    let v = GenreVector::from_vec(vec![0.0, 3.0, 1.0, 3.0]);
    assert_eq!(v.dominant_axis(), Some(1));
}

#[test]
fn norm_of_three_four() {
    let v = GenreVector::from_vec(vec![3.0, 4.0]);
    assert!((v.norm() - 5.0).abs() < 1e-12);
}
