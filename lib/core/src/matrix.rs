use serde::Serialize;
use crate::{Error, Result};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Square, symmetric, zero-diagonal matrix of pairwise dissimilarities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

/// Map a raw distance onto the valid range: NaN is "infinitely far",
/// negatives clamp to zero
#[inline]
fn sanitize(d: f64) -> f64 {
    if d.is_nan() {
        f64::INFINITY
    } else {
        d.max(0.0)
    }
}

impl DistanceMatrix {
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Build from a pairwise function evaluated once per unordered pair (i < j)
    pub fn from_fn<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut m = Self::zeros(n);
        for i in 0..n {
            for j in (i + 1)..n {
                m.set_pair(i, j, f(i, j));
            }
        }
        m
    }

    /// Build from the condensed upper triangle, row by row:
    /// `(0,1), (0,2), .., (0,n-1), (1,2), ..`
    pub fn from_condensed(n: usize, condensed: &[f64]) -> Result<Self> {
        let expected = n * n.saturating_sub(1) / 2;
        if condensed.len() != expected {
            return Err(Error::InvalidDimension {
                expected,
                actual: condensed.len(),
            });
        }

        let mut m = Self::zeros(n);
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                m.set_pair(i, j, condensed[k]);
                k += 1;
            }
        }
        Ok(m)
    }

    /// Build from full rows, checking shape, diagonal and symmetry
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        for row in &rows {
            if row.len() != n {
                return Err(Error::InvalidDimension {
                    expected: n,
                    actual: row.len(),
                });
            }
        }

        let mut m = Self::zeros(n);
        for i in 0..n {
            if rows[i][i] != 0.0 {
                return Err(Error::invalid_parameter(
                    "distance_matrix",
                    format!("diagonal entry {} is {}", i, rows[i][i]),
                ));
            }
            for j in (i + 1)..n {
                let (a, b) = (rows[i][j], rows[j][i]);
                if a.is_nan() || b.is_nan() || a < 0.0 || b < 0.0 {
                    return Err(Error::invalid_parameter(
                        "distance_matrix",
                        format!("entry ({}, {}) is not a non-negative distance", i, j),
                    ));
                }
                if a != b && (a - b).abs() > SYMMETRY_TOLERANCE * a.abs().max(1.0) {
                    return Err(Error::invalid_parameter(
                        "distance_matrix",
                        format!("entries ({}, {}) and ({}, {}) differ", i, j, j, i),
                    ));
                }
                m.set_pair(i, j, if a == b { a } else { (a + b) / 2.0 });
            }
        }
        Ok(m)
    }

    #[inline]
    fn set_pair(&mut self, i: usize, j: usize, d: f64) {
        let d = sanitize(d);
        self.data[i * self.n + j] = d;
        self.data[j * self.n + i] = d;
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Mean distance from `i` to every other item (0 for a single item)
    pub fn mean_distance(&self, i: usize) -> f64 {
        if self.n <= 1 {
            return 0.0;
        }
        self.row(i).iter().sum::<f64>() / (self.n - 1) as f64
    }

    /// Largest finite off-diagonal entry, or 0 when there is none
    pub fn max_finite(&self) -> f64 {
        self.data
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max)
    }
}
