use serde::{Deserialize, Serialize};

/// Numeric encoding of one part, used for distance-based similarity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: Vec<f32>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Euclidean distance, accumulated in f64
    #[inline]
    pub fn l2_distance(&self, other: &FeatureVector) -> f64 {
        if self.dim() != other.dim() {
            return f64::INFINITY;
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| {
                let d = f64::from(*a) - f64::from(*b);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Sum of absolute coordinate differences
    #[inline]
    pub fn manhattan_distance(&self, other: &FeatureVector) -> f64 {
        if self.dim() != other.dim() {
            return f64::INFINITY;
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (f64::from(*a) - f64::from(*b)).abs())
            .sum()
    }

    /// Cosine similarity; zero vectors are similar to nothing
    #[inline]
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f64 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let mut dot = 0.0f64;
        let mut norm_a = 0.0f64;
        let mut norm_b = 0.0f64;
        for (a, b) in self.data.iter().zip(other.data.iter()) {
            let (a, b) = (f64::from(*a), f64::from(*b));
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_distance() {
        let v1 = FeatureVector::new(vec![0.0, 0.0]);
        let v2 = FeatureVector::new(vec![3.0, 4.0]);
        assert!((v1.l2_distance(&v2) - 5.0).abs() < 1e-9);
        assert_eq!(v1.l2_distance(&v1), 0.0);
    }

    #[test]
    fn test_manhattan_distance() {
        let v1 = FeatureVector::new(vec![1.0, -1.0]);
        let v2 = FeatureVector::new(vec![3.0, 2.0]);
        assert!((v1.manhattan_distance(&v2) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity() {
        let v1 = FeatureVector::new(vec![1.0, 0.0]);
        let v2 = FeatureVector::new(vec![0.0, 1.0]);
        assert!(v1.cosine_similarity(&v2).abs() < 1e-9);
        assert!((v1.cosine_similarity(&v1) - 1.0).abs() < 1e-9);
        assert_eq!(v1.cosine_similarity(&FeatureVector::zeros(2)), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let v1 = FeatureVector::zeros(2);
        let v2 = FeatureVector::zeros(3);
        assert!(v1.l2_distance(&v2).is_infinite());
    }
}
