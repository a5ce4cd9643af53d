//! Feature embedder
//!
//! Converts part records and their token sets into [`FeatureVector`]s.
//! A vector is the concatenation of fixed blocks, in this order:
//!
//! | block       | dims              | encoding                                   |
//! |-------------|-------------------|--------------------------------------------|
//! | category    | `Category::ALL`   | one-hot                                    |
//! | size        | 2                 | inches (0 if unparsed), parsed flag        |
//! | material    | 1                 | rank / unspecified rank                    |
//! | length      | 1                 | inches (0 if absent)                       |
//! | text        | `text_dim`        | hashed short description                   |
//! | image       | `fingerprint_dim` | fingerprint, zero-filled when absent       |
//!
//! Batch embedding scales every dimension across the batch and then
//! multiplies each block by the square root of its weight.

use crate::scaling::Scaling;
use crate::text::{hash_text_to_vector, DEFAULT_TEXT_DIM};
use partsort_core::{Error, FeatureVector, PartRecord, Result};
use partsort_tokens::{Category, MaterialRank, TokenSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default length of the image fingerprint block
pub const DEFAULT_FINGERPRINT_DIM: usize = 32;

const SIZE_DIM: usize = 2;
const MATERIAL_DIM: usize = 1;
const LENGTH_DIM: usize = 1;

/// Relative weight of each feature block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockWeights {
    pub category: f32,
    pub size: f32,
    pub material: f32,
    pub length: f32,
    pub text: f32,
    pub image: f32,
}

impl Default for BlockWeights {
    fn default() -> Self {
        Self {
            category: 1.0,
            size: 1.0,
            material: 0.5,
            length: 0.5,
            text: 1.0,
            image: 1.0,
        }
    }
}

impl BlockWeights {
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("weights.category", self.category),
            ("weights.size", self.size),
            ("weights.material", self.material),
            ("weights.length", self.length),
            ("weights.text", self.text),
            ("weights.image", self.image),
        ];
        for (name, w) in named {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::invalid_parameter(name, format!("weight {} must be finite and >= 0", w)));
            }
        }
        if named.iter().all(|(_, w)| *w == 0.0) {
            return Err(Error::invalid_parameter("weights", "at least one block weight must be positive"));
        }
        Ok(())
    }
}

/// Builds feature vectors from records and token sets
#[derive(Debug, Clone)]
pub struct FeatureEmbedder {
    weights: BlockWeights,
    scaling: Scaling,
    text_dim: usize,
    fingerprint_dim: usize,
}

impl Default for FeatureEmbedder {
    fn default() -> Self {
        Self {
            weights: BlockWeights::default(),
            scaling: Scaling::default(),
            text_dim: DEFAULT_TEXT_DIM,
            fingerprint_dim: DEFAULT_FINGERPRINT_DIM,
        }
    }
}

impl FeatureEmbedder {
    pub fn new(weights: BlockWeights, scaling: Scaling) -> Self {
        Self {
            weights,
            scaling,
            ..Self::default()
        }
    }

    /// Total vector dimension
    pub fn vector_dim(&self) -> usize {
        Category::ALL.len() + SIZE_DIM + MATERIAL_DIM + LENGTH_DIM + self.text_dim + self.fingerprint_dim
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    /// Unscaled, unweighted encoding of one record
    pub fn raw_features(&self, record: &PartRecord, tokens: &TokenSet) -> FeatureVector {
        let mut components: Vec<f32> = Vec::with_capacity(self.vector_dim());

        let mut one_hot = [0.0f32; Category::ALL.len()];
        one_hot[tokens.category.index()] = 1.0;
        components.extend_from_slice(&one_hot);

        match tokens.size.inches() {
            Some(inches) => components.extend_from_slice(&[inches as f32, 1.0]),
            None => components.extend_from_slice(&[0.0, 0.0]),
        }

        components.push(f32::from(tokens.material.value()) / f32::from(MaterialRank::UNSPECIFIED.value()));
        components.push(tokens.length.inches().unwrap_or(0.0) as f32);

        components.extend(hash_text_to_vector(&record.short_description, self.text_dim));

        let mut image = vec![0.0f32; self.fingerprint_dim];
        if let Some(fingerprint) = &record.image_fingerprint {
            for (slot, value) in image.iter_mut().zip(fingerprint.iter()) {
                *slot = if value.is_finite() { *value } else { 0.0 };
            }
        }
        components.extend(image);

        FeatureVector::new(components)
    }

    /// Encode, scale and weight a whole batch
    pub fn embed_batch(&self, records: &[PartRecord], tokens: &[TokenSet]) -> Result<Vec<FeatureVector>> {
        if records.len() != tokens.len() {
            return Err(Error::InvalidDimension {
                expected: records.len(),
                actual: tokens.len(),
            });
        }

        let mut vectors: Vec<FeatureVector> = records
            .iter()
            .zip(tokens.iter())
            .map(|(r, t)| self.raw_features(r, t))
            .collect();

        self.scaling.apply(&mut vectors);

        let blocks = self.block_weights();
        for v in &mut vectors {
            let mut start = 0;
            let data = v.as_mut_slice();
            for (len, weight) in &blocks {
                let factor = weight.sqrt();
                for x in &mut data[start..start + len] {
                    *x *= factor;
                }
                start += len;
            }
        }

        debug!(
            n = vectors.len(),
            dim = self.vector_dim(),
            scaling = self.scaling.as_str(),
            "embedded batch"
        );
        Ok(vectors)
    }

    fn block_weights(&self) -> [(usize, f32); 6] {
        [
            (Category::ALL.len(), self.weights.category),
            (SIZE_DIM, self.weights.size),
            (MATERIAL_DIM, self.weights.material),
            (LENGTH_DIM, self.weights.length),
            (self.text_dim, self.weights.text),
            (self.fingerprint_dim, self.weights.image),
        ]
    }
}

/// Builder for creating FeatureEmbedder with custom options
#[derive(Debug, Clone, Default)]
pub struct EmbedderBuilder {
    embedder: FeatureEmbedder,
}

impl EmbedderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weights(mut self, weights: BlockWeights) -> Self {
        self.embedder.weights = weights;
        self
    }

    pub fn scaling(mut self, scaling: Scaling) -> Self {
        self.embedder.scaling = scaling;
        self
    }

    pub fn text_dim(mut self, dim: usize) -> Self {
        self.embedder.text_dim = dim;
        self
    }

    pub fn fingerprint_dim(mut self, dim: usize) -> Self {
        self.embedder.fingerprint_dim = dim;
        self
    }

    pub fn build(self) -> FeatureEmbedder {
        self.embedder
    }
}
