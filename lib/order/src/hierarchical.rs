//! Agglomerative clustering
//!
//! Builds a dendrogram from a [`DistanceMatrix`] with a selectable linkage
//! (average by default) and reads the label order off its leaves. Every
//! cluster in the dendrogram occupies a contiguous run of the leaf order,
//! so items merged early stay adjacent.
//!
//! Merge selection is deterministic: the closest pair wins, and among
//! equally close pairs the one with the lowest combined original index
//! (each cluster represented by its lowest member index).

use partsort_core::{DistanceMatrix, Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Rule for the distance between two clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Closest pair of members
    Single,
    /// Farthest pair of members
    Complete,
    /// Mean over all member pairs (UPGMA)
    #[default]
    Average,
}

impl Linkage {
    pub fn as_str(self) -> &'static str {
        match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
        }
    }

    /// Lance-Williams update for the distance from `a ∪ b` to `k`
    #[inline]
    fn combine(self, d_ak: f64, d_bk: f64, size_a: usize, size_b: usize) -> f64 {
        match self {
            Linkage::Single => d_ak.min(d_bk),
            Linkage::Complete => d_ak.max(d_bk),
            Linkage::Average => {
                if d_ak.is_infinite() || d_bk.is_infinite() {
                    return f64::INFINITY;
                }
                let (sa, sb) = (size_a as f64, size_b as f64);
                (sa * d_ak + sb * d_bk) / (sa + sb)
            }
        }
    }
}

impl FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "average" | "upgma" => Ok(Linkage::Average),
            _ => Err(Error::UnknownLinkage(s.to_string())),
        }
    }
}

/// One merge step. Node ids below `n` are leaves; merge `k` creates node `n + k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub height: f64,
    pub size: usize,
}

/// How to cut the dendrogram into flat groups
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cut {
    /// At most this many groups
    Count(usize),
    /// Merge everything joined at or below this height
    Height(f64),
}

#[derive(Debug, Clone)]
struct Cluster {
    node: usize,
    size: usize,
    min_index: usize,
}

#[derive(Debug, Clone)]
pub struct Dendrogram {
    n: usize,
    merges: Vec<Merge>,
    /// Lowest original index under each node
    min_leaf: Vec<usize>,
}

impl Dendrogram {
    /// Cluster the items of `matrix`
    pub fn build(matrix: &DistanceMatrix, linkage: Linkage) -> Self {
        let n = matrix.len();
        let mut dist: Vec<Vec<f64>> = (0..n).map(|i| matrix.row(i).to_vec()).collect();
        let mut clusters: Vec<Option<Cluster>> = (0..n)
            .map(|i| Some(Cluster { node: i, size: 1, min_index: i }))
            .collect();

        let mut merges = Vec::with_capacity(n.saturating_sub(1));
        let mut min_leaf: Vec<usize> = (0..n).collect();

        for step in 0..n.saturating_sub(1) {
            let Some((a, b)) = closest_pair(&dist, &clusters) else {
                break;
            };
            let (Some(ca), Some(cb)) = (clusters[a].take(), clusters[b].take()) else {
                break;
            };

            for k in 0..n {
                if k == a || k == b || clusters[k].is_none() {
                    continue;
                }
                let d = linkage.combine(dist[a][k], dist[b][k], ca.size, cb.size);
                dist[a][k] = d;
                dist[k][a] = d;
            }

            let node = n + step;
            let min_index = ca.min_index.min(cb.min_index);
            merges.push(Merge {
                left: ca.node,
                right: cb.node,
                height: dist[a][b],
                size: ca.size + cb.size,
            });
            min_leaf.push(min_index);
            clusters[a] = Some(Cluster {
                node,
                size: ca.size + cb.size,
                min_index,
            });
        }

        Self { n, merges, min_leaf }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    fn height(&self, node: usize) -> f64 {
        if node < self.n {
            0.0
        } else {
            self.merges[node - self.n].height
        }
    }

    /// Leaves in dendrogram order. At each merge the child joined at the
    /// lower height is visited first; equal heights visit the child holding
    /// the lower original index first.
    pub fn leaf_order(&self) -> Vec<usize> {
        if self.n == 0 {
            return Vec::new();
        }
        if self.merges.is_empty() {
            return (0..self.n).collect();
        }

        let mut order = Vec::with_capacity(self.n);
        let mut stack = vec![self.n + self.merges.len() - 1];
        while let Some(node) = stack.pop() {
            if node < self.n {
                order.push(node);
                continue;
            }
            let merge = &self.merges[node - self.n];
            let (first, second) = match self.visit_first(merge.left, merge.right) {
                Ordering::Greater => (merge.right, merge.left),
                _ => (merge.left, merge.right),
            };
            stack.push(second);
            stack.push(first);
        }
        order
    }

    fn visit_first(&self, a: usize, b: usize) -> Ordering {
        self.height(a)
            .total_cmp(&self.height(b))
            .then(self.min_leaf[a].cmp(&self.min_leaf[b]))
    }

    /// Flat group label per original index. Labels count up from 0 in
    /// order of first appearance along [`Dendrogram::leaf_order`].
    pub fn cut(&self, cut: Cut) -> Vec<usize> {
        let applied = match cut {
            Cut::Count(k) => {
                let k = k.clamp(1, self.n.max(1));
                self.merges.len().saturating_sub(k - 1)
            }
            Cut::Height(h) => self.merges.iter().take_while(|m| m.height <= h).count(),
        };

        // union-find over leaves, replaying the first `applied` merges
        let mut parent: Vec<usize> = (0..self.n).collect();
        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for merge in self.merges.iter().take(applied) {
            let left = find(&mut parent, self.min_leaf[merge.left]);
            let right = find(&mut parent, self.min_leaf[merge.right]);
            if left != right {
                parent[right] = left;
            }
        }

        let mut labels = vec![0; self.n];
        let mut root_label: Vec<Option<usize>> = vec![None; self.n];
        let mut next = 0;
        for leaf in self.leaf_order() {
            let root = find(&mut parent, leaf);
            let label = *root_label[root].get_or_insert_with(|| {
                next += 1;
                next - 1
            });
            labels[leaf] = label;
        }
        labels
    }
}

/// Closest active pair `(a, b)` with `a < b`, ties broken by combined
/// then smallest member index
fn closest_pair(dist: &[Vec<f64>], clusters: &[Option<Cluster>]) -> Option<(usize, usize)> {
    let mut best: Option<(f64, usize, usize, usize, usize)> = None;
    for (a, ca) in clusters.iter().enumerate() {
        let Some(ca) = ca else { continue };
        for (b, cb) in clusters.iter().enumerate().skip(a + 1) {
            let Some(cb) = cb else { continue };
            let d = dist[a][b];
            let combined = ca.min_index + cb.min_index;
            let lowest = ca.min_index.min(cb.min_index);
            let better = match best {
                None => true,
                Some((bd, bc, bl, _, _)) => d
                    .total_cmp(&bd)
                    .then(combined.cmp(&bc))
                    .then(lowest.cmp(&bl))
                    .is_lt(),
            };
            if better {
                best = Some((d, combined, lowest, a, b));
            }
        }
    }
    best.map(|(_, _, _, a, b)| (a, b))
}

/// Leaf order of the dendrogram built with `linkage`
pub fn hierarchical_order(matrix: &DistanceMatrix, linkage: Linkage) -> Vec<usize> {
    Dendrogram::build(matrix, linkage).leaf_order()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(xs: &[f64]) -> DistanceMatrix {
        DistanceMatrix::from_fn(xs.len(), |i, j| (xs[i] - xs[j]).abs())
    }

    #[test]
    fn test_trivial_sizes() {
        assert!(hierarchical_order(&DistanceMatrix::zeros(0), Linkage::Average).is_empty());
        assert_eq!(hierarchical_order(&DistanceMatrix::zeros(1), Linkage::Average), vec![0]);
    }

    #[test]
    fn test_two_clusters_stay_contiguous() {
        // two well separated groups, interleaved in the input
        let m = points(&[0.0, 10.0, 0.5, 10.4, 1.1, 9.7]);
        let order = hierarchical_order(&m, Linkage::Average);
        assert_eq!(order.len(), 6);
        let left: Vec<bool> = order.iter().map(|&i| [0, 2, 4].contains(&i)).collect();
        assert!(left == vec![true, true, true, false, false, false] || left == vec![false, false, false, true, true, true]);
    }

    #[test]
    fn test_zero_distance_items_adjacent() {
        let m = points(&[5.0, 1.0, 9.0, 1.0, 5.0, 3.0]);
        let order = hierarchical_order(&m, Linkage::Average);
        let pos = |x: usize| order.iter().position(|&i| i == x).unwrap();
        assert_eq!((pos(1) as isize - pos(3) as isize).abs(), 1);
        assert_eq!((pos(0) as isize - pos(4) as isize).abs(), 1);
    }

    #[test]
    fn test_merge_tie_break_lowest_combined_index() {
        // every pair at distance 1: (0, 1) merges first, then 2, then 3
        let m = DistanceMatrix::from_fn(4, |_, _| 1.0);
        let dendrogram = Dendrogram::build(&m, Linkage::Average);
        let merged: Vec<(usize, usize)> = dendrogram.merges().iter().map(|m| (m.left, m.right)).collect();
        assert_eq!(merged, vec![(0, 1), (4, 2), (5, 3)]);
        // single leaves sit at height 0, so they come before the subtree they joined
        assert_eq!(dendrogram.leaf_order(), vec![3, 2, 0, 1]);
    }

    #[test]
    fn test_lower_height_child_visited_first() {
        // {2, 3} join at 0.2, then 0 joins them, then 1 joins last.
        // At the root leaf 1 (height 0) precedes the {0, 2, 3} subtree;
        // inside it leaf 0 precedes the {2, 3} merge.
        let m = points(&[4.0, 20.0, 0.0, 0.2]);
        assert_eq!(hierarchical_order(&m, Linkage::Average), vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_linkage_heights() {
        let m = points(&[0.0, 1.0, 5.0]);
        let single = Dendrogram::build(&m, Linkage::Single);
        let complete = Dendrogram::build(&m, Linkage::Complete);
        let average = Dendrogram::build(&m, Linkage::Average);
        assert_eq!(single.merges()[1].height, 4.0);
        assert_eq!(complete.merges()[1].height, 5.0);
        assert_eq!(average.merges()[1].height, 4.5);
    }

    #[test]
    fn test_cut_by_count() {
        let m = points(&[0.0, 10.0, 0.5, 10.4, 1.1, 9.7]);
        let d = Dendrogram::build(&m, Linkage::Average);
        let labels = d.cut(Cut::Count(2));
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[2], labels[4]);
        assert_eq!(labels[1], labels[3]);
        assert_ne!(labels[0], labels[1]);
        assert!(labels.iter().all(|&l| l < 2));

        let all_apart = d.cut(Cut::Count(6));
        let mut sorted = all_apart.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);

        assert!(d.cut(Cut::Count(1)).iter().all(|&l| l == 0));
        assert!(d.cut(Cut::Count(0)).iter().all(|&l| l == 0));
    }

    #[test]
    fn test_cut_by_height() {
        let m = points(&[0.0, 10.0, 0.5, 10.4, 1.1, 9.7]);
        let d = Dendrogram::build(&m, Linkage::Average);
        let labels = d.cut(Cut::Height(2.0));
        assert_eq!(labels.iter().max(), Some(&1));
        let labels = d.cut(Cut::Height(0.0));
        assert_eq!(labels.iter().max(), Some(&5));
    }

    #[test]
    fn test_labels_follow_leaf_order() {
        let m = points(&[0.0, 10.0, 0.5, 10.4, 1.1, 9.7]);
        let d = Dendrogram::build(&m, Linkage::Average);
        let labels = d.cut(Cut::Count(2));
        let first_leaf = d.leaf_order()[0];
        assert_eq!(labels[first_leaf], 0);
    }

    #[test]
    fn test_linkage_from_str() {
        assert_eq!("AVERAGE".parse::<Linkage>().unwrap(), Linkage::Average);
        assert_eq!("single".parse::<Linkage>().unwrap(), Linkage::Single);
        assert!(matches!("ward".parse::<Linkage>(), Err(Error::UnknownLinkage(_))));
    }
}
