//! Distance model
//!
//! Pairwise dissimilarity between feature vectors. Every entry of a
//! [`DistanceMatrix`] depends on exactly two vectors, so the matrix is
//! reproducible regardless of how rows are scheduled.

use partsort_core::{DistanceMatrix, Error, FeatureVector, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Cosine distances below this are rounding error on parallel vectors
const COSINE_EPSILON: f64 = 1e-12;

/// Distance metric over feature vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Straight-line distance
    #[default]
    Euclidean,
    /// Sum of absolute coordinate differences
    Manhattan,
    /// `1 - cosine similarity`, clamped at zero
    Cosine,
}

impl Metric {
    #[inline]
    pub fn distance(self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        match self {
            Metric::Euclidean => a.l2_distance(b),
            Metric::Manhattan => a.manhattan_distance(b),
            Metric::Cosine => {
                if a == b {
                    return 0.0;
                }
                let d = 1.0 - a.cosine_similarity(b);
                if d < COSINE_EPSILON {
                    0.0
                } else {
                    d
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Cosine => "cosine",
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "manhattan" | "l1" | "cityblock" => Ok(Metric::Manhattan),
            "cosine" => Ok(Metric::Cosine),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

/// Computes distance matrices with a chosen metric
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceModel {
    metric: Metric,
}

impl DistanceModel {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Pairwise distances between `vectors`; N=0 and N=1 give trivial matrices
    pub fn matrix(&self, vectors: &[FeatureVector]) -> Result<DistanceMatrix> {
        let n = vectors.len();
        let metric = self.metric;

        let condensed: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| metric.distance(&vectors[i], &vectors[j]))
                    .collect::<Vec<f64>>()
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        debug!(n, metric = metric.as_str(), "computed distance matrix");
        DistanceMatrix::from_condensed(n, &condensed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors() -> Vec<FeatureVector> {
        vec![
            FeatureVector::new(vec![0.0, 0.0]),
            FeatureVector::new(vec![3.0, 4.0]),
            FeatureVector::new(vec![0.0, 1.0]),
        ]
    }

    #[test]
    fn test_euclidean_matrix() {
        let m = DistanceModel::default().matrix(&vectors()).unwrap();
        assert_eq!(m.len(), 3);
        assert!((m.get(0, 1) - 5.0).abs() < 1e-9);
        assert!((m.get(2, 0) - 1.0).abs() < 1e-9);
        for i in 0..3 {
            assert_eq!(m.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_manhattan_matrix() {
        let m = DistanceModel::new(Metric::Manhattan).matrix(&vectors()).unwrap();
        assert!((m.get(0, 1) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_distance_non_negative() {
        let a = FeatureVector::new(vec![1.0, 1.0]);
        assert_eq!(Metric::Cosine.distance(&a, &a), 0.0);
        let b = FeatureVector::new(vec![-1.0, -1.0]);
        assert!((Metric::Cosine.distance(&a, &b) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_identical_and_parallel_are_zero() {
        let a = FeatureVector::new(vec![0.3, 0.7, 0.1, 0.9]);
        assert_eq!(Metric::Cosine.distance(&a, &a.clone()), 0.0);
        let doubled = FeatureVector::new(vec![0.6, 1.4, 0.2, 1.8]);
        assert_eq!(Metric::Cosine.distance(&a, &doubled), 0.0);
        let zero = FeatureVector::zeros(4);
        assert_eq!(Metric::Cosine.distance(&zero, &zero), 0.0);
        assert_eq!(Metric::Cosine.distance(&a, &zero), 1.0);

        let twins = vec![a.clone(), FeatureVector::new(vec![1.0, 0.0, 0.0, 0.0]), a];
        let m = DistanceModel::new(Metric::Cosine).matrix(&twins).unwrap();
        assert_eq!(m.get(0, 2), 0.0);
        assert!(m.get(0, 1) > 0.0);
    }

    #[test]
    fn test_trivial_inputs() {
        let model = DistanceModel::default();
        assert!(model.matrix(&[]).unwrap().is_empty());
        let single = model.matrix(&[FeatureVector::new(vec![1.0])]).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.get(0, 0), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let vs: Vec<FeatureVector> = (0..40)
            .map(|i| FeatureVector::new(vec![(i as f32 * 0.37).sin(), (i as f32 * 1.3).cos(), i as f32]))
            .collect();
        let model = DistanceModel::default();
        let m1 = model.matrix(&vs).unwrap();
        let m2 = model.matrix(&vs).unwrap();
        assert_eq!(m1, m2);
        assert_eq!(m1.get(3, 17), Metric::Euclidean.distance(&vs[3], &vs[17]));
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("Euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("l1".parse::<Metric>().unwrap(), Metric::Manhattan);
        assert!(matches!("hamming".parse::<Metric>(), Err(Error::UnknownMetric(_))));
    }
}
