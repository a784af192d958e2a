// GenreVector: one non-negative weight per category axis.

use serde::{Deserialize, Serialize};

/// Fixed-order genre weights. The length always equals the length of the
/// CategorySet the vector was built against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreVector(Vec<f64>);

impl GenreVector {
    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    pub fn get(&self, axis: usize) -> Option<f64> {
        self.0.get(axis).copied()
    }

    /// True when every axis is exactly zero (the vector has no direction).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// 1.0 on every axis with a positive value, 0.0 elsewhere.
    pub fn binarized(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|&v| if v > 0.0 { 1.0 } else { 0.0 })
                .collect(),
        )
    }

    /// Axis indices holding the maximum value (all of them on ties).
    pub fn max_axes(&self) -> Vec<usize> {
        let max = self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == max)
            .map(|(i, _)| i)
            .collect()
    }

    /// First axis holding the maximum value, or None for an empty or
    /// all-zero vector.
    pub fn dominant_axis(&self) -> Option<usize> {
        if self.is_zero() {
            return None;
        }
        self.max_axes().first().copied()
    }

    /// Scale so the axes sum to 1.0 (or 100.0 with `as_percentage`).
    /// A vector summing to zero is returned as all zeros.
    pub fn normalized(&self, as_percentage: bool) -> Self {
        let total: f64 = self.0.iter().sum();
        if total <= 0.0 {
            return Self::zeros(self.len());
        }
        let scale = if as_percentage { 100.0 } else { 1.0 };
        Self(self.0.iter().map(|v| v * scale / total).collect())
    }

    /// Add another vector axis by axis.
    pub(crate) fn accumulate(&mut self, other: &GenreVector) {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a += b;
        }
    }

    /// Divide every axis by `n` (no-op for n == 0).
    pub(crate) fn scale_down(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        for v in &mut self.0 {
            *v /= n as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binarized() {
        let v = GenreVector::from_vec(vec![3.0, 0.0, 0.5]);
        assert_eq!(v.binarized().as_slice(), &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_max_axes_reports_ties() {
        let v = GenreVector::from_vec(vec![2.0, 5.0, 5.0, 1.0]);
        assert_eq!(v.max_axes(), vec![1, 2]);
        assert_eq!(v.dominant_axis(), Some(1));
    }

    #[test]
    fn test_zero_vector_has_no_dominant_axis() {
        let v = GenreVector::zeros(4);
        assert!(v.is_zero());
        assert_eq!(v.dominant_axis(), None);
        // Every axis ties at the maximum
        assert_eq!(v.max_axes().len(), 4);
    }

    #[test]
    fn test_normalized_percentage() {
        let v = GenreVector::from_vec(vec![1.0, 3.0]);
        let pct = v.normalized(true);
        assert!((pct.as_slice()[0] - 25.0).abs() < 1e-9);
        assert!((pct.as_slice()[1] - 75.0).abs() < 1e-9);
        assert!(GenreVector::zeros(2).normalized(false).is_zero());
    }
}
