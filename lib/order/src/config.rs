//! Request configuration
//!
//! Every field has a default, so a partial JSON document is a valid
//! configuration. [`OrderingConfig::validate`] is the only place values
//! are checked; the engine calls it before doing any work.

use crate::alphabetical::SortField;
use crate::hierarchical::{Cut, Linkage};
use crate::strategy::Strategy;
use partsort_core::{Error, Result};
use partsort_similarity::{BlockWeights, Metric, Scaling, DEFAULT_FINGERPRINT_DIM};
use partsort_tokens::Vocabulary;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest batch the clustering and spectral strategies run on by default
pub const DEFAULT_MAX_MATRIX_SIZE: usize = 500;
/// Upper bound of the default group count
const DEFAULT_MAX_GROUPS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    pub strategy: Strategy,
    pub linkage: Linkage,
    pub sort_field: SortField,
    pub metric: Metric,
    pub scaling: Scaling,
    pub weights: BlockWeights,
    pub fingerprint_dim: usize,
    /// Batches larger than this skip hierarchical and spectral ordering
    pub max_matrix_size: usize,
    /// Strategy applied above `max_matrix_size`
    pub oversize_fallback: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_threshold: Option<f64>,
    /// Replaces the built-in keyword tables when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vocabulary>,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            linkage: Linkage::default(),
            sort_field: SortField::default(),
            metric: Metric::default(),
            scaling: Scaling::default(),
            weights: BlockWeights::default(),
            fingerprint_dim: DEFAULT_FINGERPRINT_DIM,
            max_matrix_size: DEFAULT_MAX_MATRIX_SIZE,
            oversize_fallback: Strategy::Greedy,
            group_count: None,
            group_threshold: None,
            vocabulary: None,
        }
    }
}

impl OrderingConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn with_sort_field(mut self, field: SortField) -> Self {
        self.sort_field = field;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_max_matrix_size(mut self, max: usize) -> Self {
        self.max_matrix_size = max;
        self
    }

    pub fn with_group_count(mut self, k: usize) -> Self {
        self.group_count = Some(k);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_matrix_size == 0 {
            return Err(Error::invalid_parameter("max_matrix_size", "must be at least 1"));
        }
        if !matches!(self.oversize_fallback, Strategy::Greedy | Strategy::Alphabetical) {
            return Err(Error::invalid_parameter(
                "oversize_fallback",
                format!("{} is not a valid fallback (use greedy or alphabetical)", self.oversize_fallback),
            ));
        }
        if self.group_count == Some(0) {
            return Err(Error::invalid_parameter("group_count", "must be at least 1"));
        }
        if let Some(t) = self.group_threshold {
            if !t.is_finite() || t < 0.0 {
                return Err(Error::invalid_parameter("group_threshold", format!("{} is not a finite non-negative distance", t)));
            }
        }
        if self.group_count.is_some() && self.group_threshold.is_some() {
            return Err(Error::invalid_parameter(
                "group_count",
                "group_count and group_threshold are mutually exclusive",
            ));
        }
        self.weights.validate()?;
        if let Some(vocabulary) = &self.vocabulary {
            vocabulary.clone().validate_and_normalize()?;
        }
        Ok(())
    }

    /// How to cut the dendrogram of an `n`-item batch
    pub fn group_cut(&self, n: usize) -> Cut {
        match (self.group_count, self.group_threshold) {
            (_, Some(t)) => Cut::Height(t),
            (Some(k), None) => Cut::Count(k),
            (None, None) => Cut::Count((n / 3).clamp(1, DEFAULT_MAX_GROUPS)),
        }
    }
}
