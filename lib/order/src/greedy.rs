//! Greedy nearest-neighbour path
//!
//! Starts at the most central item (smallest mean distance to the others)
//! and repeatedly walks to the closest unvisited item. Ties go to the
//! lowest original index. O(N²).

use partsort_core::DistanceMatrix;

pub fn greedy_order(matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.len();
    if n <= 1 {
        return (0..n).collect();
    }

    let mut current = most_central(matrix);
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let row = matrix.row(current);
        let mut next: Option<usize> = None;
        for j in (0..n).filter(|&j| !visited[j]) {
            match next {
                Some(best) if row[j] >= row[best] => {}
                _ => next = Some(j),
            }
        }
        let Some(next) = next else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

fn most_central(matrix: &DistanceMatrix) -> usize {
    let mut best = 0;
    let mut best_mean = matrix.mean_distance(0);
    for i in 1..matrix.len() {
        let mean = matrix.mean_distance(i);
        if mean < best_mean {
            best = i;
            best_mean = mean;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(xs: &[f64]) -> DistanceMatrix {
        DistanceMatrix::from_fn(xs.len(), |i, j| (xs[i] - xs[j]).abs())
    }

    #[test]
    fn test_trivial_sizes() {
        assert!(greedy_order(&DistanceMatrix::zeros(0)).is_empty());
        assert_eq!(greedy_order(&DistanceMatrix::zeros(1)), vec![0]);
    }

    #[test]
    fn test_starts_at_center() {
        // 2.0 is the median point
        let order = greedy_order(&points(&[0.0, 5.0, 2.0, 3.0, 1.0]));
        assert_eq!(order[0], 2);
    }

    #[test]
    fn test_walks_to_nearest() {
        let order = greedy_order(&points(&[0.0, 5.0, 2.0, 3.0, 1.0]));
        // from 2: items 3 and 4 tie at distance 1, then from 3 items 1 and 4 tie at 2
        assert_eq!(order, vec![2, 3, 1, 4, 0]);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let m = DistanceMatrix::from_fn(4, |_, _| 1.0);
        assert_eq!(greedy_order(&m), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_infinite_distances_still_total() {
        let m = DistanceMatrix::from_fn(3, |i, j| if i + j == 1 { 1.0 } else { f64::INFINITY });
        let mut order = greedy_order(&m);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
