// Data models: the rows that flow through the pipeline.
//
// Input rows mirror the two feeds the loader supplies (interactions and
// item genres). Output records are the items and users tables handed to
// the simulation. They're kept apart from the aggregation code so the
// loader, exporter and terminal output can use them without pulling in
// the pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::genres::GenreVector;
use crate::sampling::Tier;

pub type UserId = u64;
pub type BookId = u64;

/// One row of the interactions feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRow {
    pub user_id: UserId,
    pub book_id: BookId,
    /// 1 if the user finished the book
    pub is_read: u8,
    /// Star rating 0-5, absent when the feed leaves it blank
    pub rating: Option<u8>,
    /// 1 if the user wrote a review
    pub is_reviewed: u8,
}

impl InteractionRow {
    pub fn read(&self) -> bool {
        self.is_read != 0
    }

    pub fn reviewed(&self) -> bool {
        self.is_reviewed != 0
    }

    /// Rating scaled into [0, 1].
    pub fn normalized_rating(&self) -> Option<f64> {
        self.rating.map(|r| r as f64 / 5.0)
    }
}

/// One row of the item genres feed: raw genre label -> vote count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemGenres {
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub book_id: BookId,
    #[serde(default)]
    pub genres: HashMap<String, i64>,
}

/// Everything the pipeline reads, as supplied by a loader.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub interactions: Vec<InteractionRow>,
    pub items: Vec<ItemGenres>,
}

/// An interaction of a sampled user, joined with the book's genre vector
/// and the user's sampling outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInteraction {
    pub user_id: UserId,
    pub book_id: BookId,
    pub rating: Option<f64>,
    pub is_read: bool,
    pub is_reviewed: bool,
    pub tier: Tier,
    pub ignorant: bool,
    pub genres: GenreVector,
}

/// A book paired with a score (similarity or priority override).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBook {
    pub book_id: BookId,
    pub score: f64,
}

/// One row of the items table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub book_id: BookId,
    /// Number of sampled users who read the book
    pub is_read: u32,
    /// Mean normalized rating, None if nobody rated it
    pub rating: Option<f64>,
    /// Number of sampled users who reviewed the book
    pub is_reviewed: u32,
    /// Interaction-weighted mean genre vector
    pub vector: GenreVector,
    /// 0.0, or the override score when the book is priority-flagged
    pub priority: f64,
}

/// One row of the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub tier: Tier,
    pub is_reviewed: u32,
    pub is_read: u32,
    pub rating: Option<f64>,
    pub ignorant: bool,
    /// Count of interactions touching each genre
    pub vector: GenreVector,
    /// Interacted books in interaction order, with their scores
    #[serde(rename = "book_id")]
    pub books: Vec<ScoredBook>,
    /// Per-step probability of reading a book, from the user's persona
    pub read_proba: f64,
    /// Top-N most similar items, best first (None when not requested)
    pub similarities: Option<Vec<ScoredBook>>,
}

/// The two tables a pipeline run produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTables {
    /// Sorted by ascending book_id
    pub items: Vec<ItemRecord>,
    /// Sorted by ascending user_id
    pub users: Vec<UserRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(u64),
    Text(String),
}

/// The genre feed writes book ids as strings; accept either form.
fn id_from_str_or_int<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Int(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
