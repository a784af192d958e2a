// Batched cosine similarity between two sets of genre vectors.
//
// Rows of both sets are L2-normalized, then one matrix product
// (reference x compare^T) yields every pairwise cosine at once. This is
// the pipeline's dominant cost, O(M * K * d), so it stays a single ndarray
// product rather than a per-pair loop.
//
// A zero vector has no direction. Its normalized row stays all-zero, so
// every similarity involving it comes out as exactly 0.0.

use ndarray::{Array2, ArrayView1, Axis};
use tracing::debug;

use crate::data::models::{BookId, ScoredBook};
use crate::error::{PipelineError, Result};
use crate::genres::GenreVector;

/// Full reference x compare cosine similarity matrix.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    /// Compute all pairwise similarities. Every vector must share the same
    /// dimension.
    pub fn compute(reference: &[&GenreVector], compare: &[&GenreVector]) -> Result<Self> {
        let dim = reference
            .first()
            .or_else(|| compare.first())
            .map(|v| v.len())
            .unwrap_or(0);

        let reference = normalized_rows(reference, dim)?;
        let compare = normalized_rows(compare, dim)?;

        let scores = reference.dot(&compare.t()).mapv(|s| s.clamp(-1.0, 1.0));

        debug!(
            rows = scores.nrows(),
            cols = scores.ncols(),
            dim,
            "Similarity matrix computed"
        );

        Ok(Self { scores })
    }

    /// (reference rows, compare columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.scores.nrows(), self.scores.ncols())
    }

    pub fn get(&self, reference: usize, compare: usize) -> Option<f64> {
        self.scores.get((reference, compare)).copied()
    }

    /// Top `n` compare columns for one reference row, best first.
    ///
    /// The sort is stable, so equal scores keep compare-set order.
    pub fn top_n(&self, reference: usize, n: usize) -> Vec<(usize, f64)> {
        if reference >= self.scores.nrows() || n == 0 {
            return Vec::new();
        }
        let mut ranked: Vec<(usize, f64)> = self
            .scores
            .row(reference)
            .iter()
            .copied()
            .enumerate()
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// Stack vectors into a matrix and scale every non-zero row to unit length.
fn normalized_rows(vectors: &[&GenreVector], dim: usize) -> Result<Array2<f64>> {
    let mut matrix = Array2::<f64>::zeros((vectors.len(), dim));

    for (i, vector) in vectors.iter().enumerate() {
        if vector.len() != dim {
            return Err(PipelineError::InvalidConfig(format!(
                "Genre vector dimension mismatch: expected {dim}, got {}",
                vector.len()
            )));
        }
        matrix
            .row_mut(i)
            .assign(&ArrayView1::from(vector.as_slice()));
    }

    for mut row in matrix.axis_iter_mut(Axis(0)) {
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    Ok(matrix)
}

/// Cosine similarity of a single pair, with the same zero-vector rule as
/// the batched matrix.
pub fn cosine_similarity(a: &GenreVector, b: &GenreVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot = ArrayView1::from(a.as_slice()).dot(&ArrayView1::from(b.as_slice()));
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// For each reference vector, the `n` most similar items, best first.
///
/// `items` is the compare set in its iteration order; that order breaks
/// ties.
pub fn top_n_similarities(
    reference: &[&GenreVector],
    items: &[(BookId, &GenreVector)],
    n: usize,
) -> Result<Vec<Vec<ScoredBook>>> {
    let compare: Vec<&GenreVector> = items.iter().map(|&(_, v)| v).collect();
    let matrix = SimilarityMatrix::compute(reference, &compare)?;

    Ok((0..reference.len())
        .map(|row| {
            matrix
                .top_n(row, n)
                .into_iter()
                .map(|(col, score)| ScoredBook {
                    book_id: items[col].0,
                    score,
                })
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(values: &[f64]) -> GenreVector {
        GenreVector::from_vec(values.to_vec())
    }

    #[test]
    fn test_matrix_matches_pairwise() {
        let a = v(&[1.0, 2.0, 0.0]);
        let b = v(&[0.0, 1.0, 1.0]);
        let c = v(&[3.0, 0.0, 4.0]);
        let matrix = SimilarityMatrix::compute(&[&a, &b], &[&b, &c]).unwrap();
        assert_eq!(matrix.shape(), (2, 2));
        for (i, r) in [&a, &b].iter().enumerate() {
            for (j, k) in [&b, &c].iter().enumerate() {
                let expected = cosine_similarity(r, k);
                assert!((matrix.get(i, j).unwrap() - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = v(&[0.0, 0.0]);
        let x = v(&[1.0, 1.0]);
        let matrix = SimilarityMatrix::compute(&[&zero, &x], &[&x, &zero]).unwrap();
        assert_eq!(matrix.get(0, 0), Some(0.0));
        assert_eq!(matrix.get(1, 1), Some(0.0));
        assert!(!matrix.get(1, 0).unwrap().is_nan());
        assert_eq!(cosine_similarity(&zero, &x), 0.0);
    }

    #[test]
    fn test_top_n_ties_keep_compare_order() {
        let user = v(&[1.0, 0.0]);
        let same_a = v(&[2.0, 0.0]);
        let same_b = v(&[5.0, 0.0]);
        let other = v(&[0.0, 1.0]);
        let ranked =
            top_n_similarities(&[&user], &[(30, &other), (10, &same_a), (20, &same_b)], 2).unwrap();
        let ids: Vec<BookId> = ranked[0].iter().map(|s| s.book_id).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let a = v(&[1.0, 0.0]);
        let b = v(&[1.0, 0.0, 0.0]);
        assert!(SimilarityMatrix::compute(&[&a], &[&b]).is_err());
    }

    #[test]
    fn test_top_n_zero_is_empty() {
        let a = v(&[1.0]);
        let ranked = top_n_similarities(&[&a], &[(1, &a)], 0).unwrap();
        assert!(ranked[0].is_empty());
    }
}
