//! # partsort Order
//!
//! Turns a batch of catalog parts into a label order.
//!
//! ## Strategies
//!
//! - **Hierarchical**: average-linkage dendrogram, output in leaf order so the
//!   most similar parts sit next to each other
//! - **Spectral**: position along the Fiedler vector of the similarity graph,
//!   falling back to hierarchical when that vector is not unique
//! - **Greedy**: nearest-neighbour walk from the most central part
//! - **Fuzzy**: category, material grade, thread size, length, identifier
//! - **Alphabetical**: case-insensitive sort on one record field
//!
//! Every strategy is total and deterministic; ties resolve by input order
//! or identifier.
//!
//! ## Example
//!
//! ```rust
//! use partsort_core::PartRecord;
//! use partsort_order::{order_parts, OrderingConfig, Strategy};
//!
//! let records = vec![
//!     PartRecord::new("b", "Socket Head Screw", "M10 x 20mm"),
//!     PartRecord::new("c", "Flat Washer", "M4 Screw Size"),
//!     PartRecord::new("a", "Socket Head Screw", "M4 x 20mm"),
//! ];
//!
//! let outcome = order_parts(&records, &OrderingConfig::new(Strategy::Fuzzy)).unwrap();
//! assert_eq!(outcome.ids(), &["a", "b", "c"]);
//! ```

pub mod alphabetical;
pub mod config;
pub mod engine;
pub mod fuzzy;
pub mod greedy;
pub mod hierarchical;
pub mod spectral;
pub mod strategy;

pub use alphabetical::{alphabetical_order, SortField};
pub use config::{OrderingConfig, DEFAULT_MAX_MATRIX_SIZE};
pub use engine::{order_parts, Fallback, OrderingEngine, OrderingOutcome};
pub use fuzzy::{fuzzy_order, FuzzyKey};
pub use greedy::greedy_order;
pub use hierarchical::{hierarchical_order, Cut, Dendrogram, Linkage, Merge};
pub use spectral::{laplacian, spectral_order, SpectralOrder};
pub use strategy::Strategy;
