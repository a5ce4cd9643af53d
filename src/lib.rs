//! # partsort
//!
//! Orders catalog parts for label printing so that parts which look alike,
//! or share a category, material and size, end up next to each other.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! partsort --input parts.json --strategy hierarchical --format json
//! partsort --strategy fuzzy < parts.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use partsort::prelude::*;
//!
//! let records = vec![
//!     PartRecord::new("91290A115", "Socket Head Screw", "M3 x 8mm, 18-8 Stainless Steel"),
//!     PartRecord::new("94895A031", "Hex Nut", "M3 x 0.5 mm Thread, 18-8 Stainless Steel"),
//!     PartRecord::new("91290A116", "Socket Head Screw", "M3 x 10mm, 18-8 Stainless Steel"),
//! ];
//!
//! let engine = OrderingEngine::new(OrderingConfig::new(Strategy::Hierarchical)).unwrap();
//! let outcome = engine.order(&records).unwrap();
//!
//! assert_eq!(outcome.permutation.len(), 3);
//! assert!(outcome.permutation.is_permutation_of(&["91290A115", "94895A031", "91290A116"]));
//! ```
//!
//! ## Crate Structure
//!
//! - `partsort-core` - records, feature vectors, distance matrices, permutations, errors
//! - `partsort-tokens` - category, thread size, material and length extraction
//! - `partsort-similarity` - feature embedding, scaling and the distance model
//! - `partsort-order` - ordering strategies and the [`OrderingEngine`] facade

pub mod input;

// Re-export core types
pub use partsort_core::{DistanceMatrix, Error, FeatureVector, PartRecord, Permutation, Result};

pub use partsort_tokens::{Category, MaterialRank, TokenExtractor, TokenSet, Vocabulary};

pub use partsort_similarity::{BlockWeights, DistanceModel, FeatureEmbedder, Metric, Scaling};

pub use partsort_order::{
    order_parts, Fallback, Linkage, OrderingConfig, OrderingEngine, OrderingOutcome, SortField, Strategy,
    DEFAULT_MAX_MATRIX_SIZE,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        order_parts, Error, Linkage, Metric, OrderingConfig, OrderingEngine, OrderingOutcome, PartRecord,
        Permutation, Result, Scaling, SortField, Strategy,
    };
}
