//! Spectral ordering
//!
//! Items are placed along the Fiedler vector of the graph Laplacian built
//! from the distance matrix. Similarity is `1 / (1 + d)` (zero on the
//! diagonal and for infinite distances), `L = D - W`.
//!
//! The Fiedler vector is only meaningful when it is unique. A graph with
//! more than one connected component (second eigenvalue zero) or a
//! repeated second eigenvalue (e.g. all distances equal) is reported as
//! degenerate and the caller falls back to hierarchical ordering.

use nalgebra::{DMatrix, SymmetricEigen};
use partsort_core::DistanceMatrix;
use tracing::warn;

/// QR iterations allowed per row before the solver gives up
const MAX_ITERATIONS_PER_ROW: usize = 100;
/// Relative tolerance for zero and repeated eigenvalues
const EIGEN_TOLERANCE: f64 = 1e-8;
/// Components below this magnitude do not decide the vector's sign
const SIGN_TOLERANCE: f64 = 1e-12;

/// Ordering plus the coordinate each original index received
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralOrder {
    pub order: Vec<usize>,
    /// Fiedler coordinate per original index
    pub fiedler: Vec<f64>,
}

impl SpectralOrder {
    /// Branch per original index: 0 for negative coordinates, 1 otherwise
    pub fn branches(&self) -> Vec<usize> {
        self.fiedler.iter().map(|&x| usize::from(x >= 0.0)).collect()
    }
}

/// Graph Laplacian of the similarity graph
pub fn laplacian(matrix: &DistanceMatrix) -> DMatrix<f64> {
    let n = matrix.len();
    let mut l = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = matrix.get(i, j);
            let w = if d.is_finite() { 1.0 / (1.0 + d) } else { 0.0 };
            l[(i, j)] = -w;
            l[(j, i)] = -w;
            l[(i, i)] += w;
            l[(j, j)] += w;
        }
    }
    l
}

/// Order items by their Fiedler coordinate. Returns `None` when the
/// Fiedler vector is not unique.
pub fn spectral_order(matrix: &DistanceMatrix) -> Option<SpectralOrder> {
    let n = matrix.len();
    match n {
        0 => {
            return Some(SpectralOrder {
                order: Vec::new(),
                fiedler: Vec::new(),
            })
        }
        1 => {
            return Some(SpectralOrder {
                order: vec![0],
                fiedler: vec![0.0],
            })
        }
        _ => {}
    }

    let Some(eigen) = SymmetricEigen::try_new(laplacian(matrix), f64::EPSILON, MAX_ITERATIONS_PER_ROW * n)
    else {
        warn!(n, "Laplacian eigen-decomposition did not converge");
        return None;
    };
    let values = &eigen.eigenvalues;

    let mut ranked: Vec<usize> = (0..n).collect();
    ranked.sort_by(|&a, &b| values[a].total_cmp(&values[b]).then(a.cmp(&b)));

    let scale = values.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    if scale == 0.0 {
        return None;
    }
    let tolerance = EIGEN_TOLERANCE * scale;

    let lambda2 = values[ranked[1]];
    if lambda2 <= tolerance {
        return None;
    }
    if n > 2 && values[ranked[2]] - lambda2 <= tolerance {
        return None;
    }

    let mut fiedler: Vec<f64> = eigen.eigenvectors.column(ranked[1]).iter().copied().collect();

    // fix the sign: first significant component is negative
    if let Some(first) = fiedler.iter().find(|x| x.abs() > SIGN_TOLERANCE) {
        if *first > 0.0 {
            fiedler.iter_mut().for_each(|x| *x = -*x);
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| fiedler[a].total_cmp(&fiedler[b]).then(a.cmp(&b)));

    Some(SpectralOrder { order, fiedler })
}
