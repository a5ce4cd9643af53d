//! Dimension-aware ordering
//!
//! Lexicographic comparison of token sets: category, material rank, thread
//! size (family as tie-break), length, then identifier. Distances are not
//! consulted.

use partsort_tokens::{Category, Length, MaterialRank, ThreadSize, TokenSet};
use std::cmp::Ordering;

/// Sort key of one part, compared field by field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FuzzyKey<'a> {
    pub category: Category,
    pub material: MaterialRank,
    pub size: ThreadSize,
    pub length: Length,
    pub id: &'a str,
}

impl<'a> FuzzyKey<'a> {
    pub fn new(tokens: &TokenSet, id: &'a str) -> Self {
        Self {
            category: tokens.category,
            material: tokens.material,
            size: tokens.size,
            length: tokens.length,
            id,
        }
    }
}

/// Indices of `tokens` in dimension-aware order. `ids[i]` belongs to `tokens[i]`.
pub fn fuzzy_order<S: AsRef<str>>(ids: &[S], tokens: &[TokenSet]) -> Vec<usize> {
    let keys: Vec<FuzzyKey<'_>> = ids
        .iter()
        .zip(tokens.iter())
        .map(|(id, t)| FuzzyKey::new(t, id.as_ref()))
        .collect();

    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| match keys[a].cmp(&keys[b]) {
        Ordering::Equal => a.cmp(&b),
        other => other,
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use partsort_core::PartRecord;
    use partsort_tokens::TokenExtractor;

    fn order_of(records: &[PartRecord]) -> Vec<String> {
        let tokens = TokenExtractor::new().unwrap().extract_all(records);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        fuzzy_order(&ids, &tokens)
            .into_iter()
            .map(|i| records[i].id.clone())
            .collect()
    }

    #[test]
    fn test_metric_sizes_numeric_not_lexical() {
        let records = vec![
            PartRecord::new("b", "Socket Head Screw", "M10 x 20mm"),
            PartRecord::new("a", "Socket Head Screw", "M4 x 20mm"),
        ];
        assert_eq!(order_of(&records), vec!["a", "b"]);

        let nuts = vec![
            PartRecord::new("m10", "Hex Nut", "M10 x 1.5 mm Thread"),
            PartRecord::new("m4", "Hex Nut", "M4 x 0.7 mm Thread"),
        ];
        assert_eq!(order_of(&nuts), vec!["m4", "m10"]);
    }

    #[test]
    fn test_material_before_size() {
        let records = vec![
            PartRecord::new("p1", "Hex Nut", "M3, 18-8 Stainless Steel"),
            PartRecord::new("p2", "Hex Nut", "M8, 316 Stainless Steel"),
        ];
        assert_eq!(order_of(&records), vec!["p2", "p1"]);
    }

    #[test]
    fn test_category_order() {
        let records = vec![
            PartRecord::new("w", "Flat Washer", "M4 Screw Size"),
            PartRecord::new("n", "Hex Nut", "M4 x 0.7 mm Thread"),
            PartRecord::new("s", "Socket Head Screw", "M4 x 10mm"),
        ];
        assert_eq!(order_of(&records), vec!["s", "n", "w"]);
    }

    #[test]
    fn test_length_then_id() {
        let records = vec![
            PartRecord::new("c", "Socket Head Screw", "M4 x 16mm"),
            PartRecord::new("b", "Socket Head Screw", "M4 x 10mm"),
            PartRecord::new("a", "Socket Head Screw", "M4 x 16mm"),
            PartRecord::new("d", "Socket Head Screw", "M4"),
        ];
        assert_eq!(order_of(&records), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_unparsed_size_sorts_last() {
        let records = vec![
            PartRecord::new("x", "Socket Head Screw", "custom"),
            PartRecord::new("y", "Socket Head Screw", "#10-32"),
        ];
        assert_eq!(order_of(&records), vec!["y", "x"]);
    }

    #[test]
    fn test_empty() {
        let ids: Vec<String> = Vec::new();
        assert!(fuzzy_order(&ids, &[]).is_empty());
    }
}
