// Cosine similarity: batched user x item scoring and per-book scores.

pub mod matrix;
pub mod scorer;

pub use matrix::{cosine_similarity, top_n_similarities, SimilarityMatrix};
pub use scorer::score_books;
