//! Hashed text signal
//!
//! A cheap, deterministic stand-in for a text embedding: character
//! trigrams and whole words are hashed into a fixed number of buckets and
//! the result is scaled to unit length.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Default number of buckets for the description signal
pub const DEFAULT_TEXT_DIM: usize = 32;

/// Weight of a whole word relative to one trigram
const WORD_WEIGHT: f32 = 2.0;

/// Hash `text` into a unit-length vector of `dim` buckets.
///
/// Empty text yields the zero vector.
pub fn hash_text_to_vector(text: &str, dim: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dim];
    if dim == 0 {
        return vector;
    }

    let normalized = text.to_lowercase();
    if normalized.trim().is_empty() {
        return vector;
    }

    for trigram in generate_trigrams(&normalized) {
        vector[bucket(&trigram, dim)] += 1.0;
    }
    for word in normalized.split_whitespace() {
        vector[bucket(word, dim)] += WORD_WEIGHT;
    }

    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for v in &mut vector {
            *v /= magnitude;
        }
    }

    vector
}

#[inline]
fn bucket(token: &str, dim: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    token.hash(&mut hasher);
    (hasher.finish() % dim as u64) as usize
}

/// Character trigrams of a padded string
fn generate_trigrams(s: &str) -> BTreeSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    chars.windows(3).map(|w| w.iter().collect::<String>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_text_to_vector() {
        let v1 = hash_text_to_vector("Socket Head Screw", 32);
        let v2 = hash_text_to_vector("socket head screw", 32);
        let v3 = hash_text_to_vector("Flat Washer", 32);

        assert_eq!(v1.len(), 32);
        assert_eq!(v1, v2);
        assert_ne!(v1, v3);

        let magnitude: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_text_is_zero() {
        assert!(hash_text_to_vector("", 8).iter().all(|v| *v == 0.0));
        assert!(hash_text_to_vector("   ", 8).iter().all(|v| *v == 0.0));
        assert!(hash_text_to_vector("nut", 0).is_empty());
    }

    #[test]
    fn test_trigram_generation() {
        let trigrams = generate_trigrams("nut");
        assert!(trigrams.contains("nut"));
        assert!(trigrams.contains(" nu"));
        assert!(trigrams.contains("ut "));
    }
}
