// CategorySet: the ordered genre vocabulary that defines vector axes.
//
// A category set is built once per run and handed to every component that
// builds or reads genre vectors. Axis i of every GenreVector is the i-th
// label here.

use serde::{Deserialize, Serialize};

/// The Goodreads genre vocabulary after comma-splitting and normalization.
pub const GOODREADS_CATEGORIES: [&str; 16] = [
    "children",
    "comics",
    "graphic",
    "fantasy",
    "paranormal",
    "fiction",
    "history",
    "historical_fiction",
    "biography",
    "mystery",
    "thriller",
    "crime",
    "non_fiction",
    "poetry",
    "romance",
    "young_adult",
];

/// Immutable, ordered set of canonical genre labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    labels: Vec<String>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::goodreads()
    }
}

impl CategorySet {
    /// The 16-genre Goodreads vocabulary.
    pub fn goodreads() -> Self {
        Self::new(GOODREADS_CATEGORIES.iter().map(|s| s.to_string()).collect())
    }

    /// Build a category set from labels in axis order. Duplicates keep
    /// their first position.
    pub fn new(labels: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self { labels: unique }
    }

    /// Number of axes in every vector built against this set.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Axis position of a label, if it belongs to the set.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
