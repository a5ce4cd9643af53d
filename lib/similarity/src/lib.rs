//! # partsort Similarity
//!
//! Feature vectors and the distance model for similarity-based ordering.
//!
//! ## Features
//!
//! - **Feature Embedder**: Block-structured vectors from token sets, a hashed
//!   description signal and the upstream image fingerprint
//! - **Scaling**: Min-max or z-score per dimension so no single dimension dominates
//! - **Distance Model**: Euclidean (default), Manhattan or cosine distance matrices
//!
//! ## Example
//!
//! ```rust
//! use partsort_core::PartRecord;
//! use partsort_similarity::{DistanceModel, FeatureEmbedder, Metric};
//! use partsort_tokens::TokenExtractor;
//!
//! let records = vec![
//!     PartRecord::new("91290A115", "Socket Head Screw", "M3 x 0.5 mm Thread, 8 mm Long"),
//!     PartRecord::new("91290A116", "Socket Head Screw", "M3 x 0.5 mm Thread, 10 mm Long"),
//!     PartRecord::new("94895A031", "Hex Nut", "M10 x 1.5 mm Thread"),
//! ];
//! let tokens = TokenExtractor::new().unwrap().extract_all(&records);
//! let vectors = FeatureEmbedder::default().embed_batch(&records, &tokens).unwrap();
//! let matrix = DistanceModel::new(Metric::Euclidean).matrix(&vectors).unwrap();
//!
//! assert!(matrix.get(0, 1) < matrix.get(0, 2));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Records +  │────>│  Embedder   │────>│   Scaling   │────>│  Distance   │
//! │  TokenSets  │     │ (raw blocks)│     │ (per dim)   │     │   Matrix    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod distance;
pub mod embedder;
pub mod scaling;
pub mod text;

pub use distance::{DistanceModel, Metric};
pub use embedder::{BlockWeights, EmbedderBuilder, FeatureEmbedder, DEFAULT_FINGERPRINT_DIM};
pub use scaling::Scaling;
pub use text::{hash_text_to_vector, DEFAULT_TEXT_DIM};
