//! Per-dimension feature scaling across a batch

use partsort_core::{Error, FeatureVector, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    /// Map each dimension onto [0, 1]
    #[default]
    MinMax,
    /// Zero mean, unit (population) standard deviation per dimension
    ZScore,
}

impl Scaling {
    pub fn as_str(self) -> &'static str {
        match self {
            Scaling::MinMax => "min_max",
            Scaling::ZScore => "z_score",
        }
    }

    /// Rescale every dimension in place. Constant dimensions become 0.
    pub fn apply(self, vectors: &mut [FeatureVector]) {
        let Some(dim) = vectors.first().map(FeatureVector::dim) else {
            return;
        };

        for d in 0..dim {
            let column: Vec<f64> = vectors
                .iter()
                .map(|v| v.as_slice().get(d).copied().map_or(0.0, f64::from))
                .collect();

            let (offset, scale) = match self {
                Scaling::MinMax => {
                    let min = column.iter().copied().fold(f64::INFINITY, f64::min);
                    let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    (min, max - min)
                }
                Scaling::ZScore => {
                    let n = column.len() as f64;
                    let mean = column.iter().sum::<f64>() / n;
                    let var = column.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
                    (mean, var.sqrt())
                }
            };

            for v in vectors.iter_mut() {
                if let Some(x) = v.as_mut_slice().get_mut(d) {
                    *x = if scale > f64::EPSILON {
                        ((f64::from(*x) - offset) / scale) as f32
                    } else {
                        0.0
                    };
                }
            }
        }
    }
}

impl FromStr for Scaling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "min_max" | "minmax" => Ok(Scaling::MinMax),
            "z_score" | "zscore" | "standard" => Ok(Scaling::ZScore),
            _ => Err(Error::UnknownScaling(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let mut vs = vec![
            FeatureVector::new(vec![0.0, 10.0, 5.0]),
            FeatureVector::new(vec![2.0, 20.0, 5.0]),
            FeatureVector::new(vec![4.0, 30.0, 5.0]),
        ];
        Scaling::MinMax.apply(&mut vs);
        assert_eq!(vs[0].as_slice(), &[0.0, 0.0, 0.0]);
        assert_eq!(vs[1].as_slice(), &[0.5, 0.5, 0.0]);
        assert_eq!(vs[2].as_slice(), &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_z_score() {
        let mut vs = vec![FeatureVector::new(vec![1.0]), FeatureVector::new(vec![3.0])];
        Scaling::ZScore.apply(&mut vs);
        assert!((vs[0].as_slice()[0] + 1.0).abs() < 1e-6);
        assert!((vs[1].as_slice()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_dimension_dominates() {
        let mut vs = vec![
            FeatureVector::new(vec![0.0, 0.0]),
            FeatureVector::new(vec![1000.0, 1.0]),
        ];
        Scaling::MinMax.apply(&mut vs);
        assert_eq!(vs[1].as_slice(), &[1.0, 1.0]);
    }

    #[test]
    fn test_empty_batch() {
        let mut vs: Vec<FeatureVector> = Vec::new();
        Scaling::ZScore.apply(&mut vs);
        assert!(vs.is_empty());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("min-max".parse::<Scaling>().unwrap(), Scaling::MinMax);
        assert_eq!("ZScore".parse::<Scaling>().unwrap(), Scaling::ZScore);
        assert!("log".parse::<Scaling>().is_err());
    }
}
