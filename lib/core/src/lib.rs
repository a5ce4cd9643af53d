//! # partsort Core
//!
//! Core data model for the partsort ordering engine.
//!
//! This crate provides the types every ordering strategy consumes or produces:
//!
//! - [`PartRecord`] - An immutable catalog part as delivered by retrieval
//! - [`FeatureVector`] - Dense numeric encoding of a part
//! - [`DistanceMatrix`] - Square, symmetric, zero-diagonal dissimilarities
//! - [`Permutation`] - The ordered identifier sequence handed to rendering
//!
//! ## Example
//!
//! ```rust
//! use partsort_core::{DistanceMatrix, Permutation};
//!
//! let ids = ["91290A115", "91290A116", "94895A031"];
//! let matrix = DistanceMatrix::from_condensed(3, &[0.5, 2.0, 1.5]).unwrap();
//! assert_eq!(matrix.get(2, 0), 2.0);
//!
//! let permutation = Permutation::from_order(&ids, &[2, 0, 1]).unwrap();
//! assert_eq!(permutation.ids()[0], "94895A031");
//! ```

pub mod error;
pub mod matrix;
pub mod permutation;
pub mod record;
pub mod vector;

pub use error::{Error, Result};
pub use matrix::DistanceMatrix;
pub use permutation::Permutation;
pub use record::{ensure_unique_ids, PartRecord};
pub use vector::FeatureVector;
