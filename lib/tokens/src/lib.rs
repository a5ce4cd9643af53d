//! # partsort Tokens
//!
//! Structured token extraction for catalog parts.
//!
//! A part's free-text descriptions are decomposed into a [`TokenSet`]:
//!
//! - **category** - inferred from a keyword table (screw, bolt, nut, washer, ..)
//! - **size** - metric (`M4`), numbered gauge (`#10`) or inch (`1/4-20`, `0.25"`),
//!   normalized to inches with the notation kept as a tie-break
//! - **material** - ordinal grade rank (316 stainless first)
//! - **length** - normalized to inches
//!
//! Extraction never fails. Text that cannot be parsed maps to sentinels that
//! keep every record totally ordered.
//!
//! ## Example
//!
//! ```rust
//! use partsort_core::PartRecord;
//! use partsort_tokens::{Category, TokenExtractor};
//!
//! let extractor = TokenExtractor::new().unwrap();
//! let record = PartRecord::new("91251A540", "Socket Head Screw", "1/4-20 x 1in, 18-8 Stainless Steel");
//! let tokens = extractor.extract(&record);
//!
//! assert_eq!(tokens.category, Category::Screw);
//! assert_eq!(tokens.size.inches(), Some(0.25));
//! assert_eq!(tokens.length.inches(), Some(1.0));
//! ```

pub mod measure;
pub mod token;
pub mod vocabulary;

pub use measure::{Length, MeasureParser, SizeFamily, ThreadSize};
pub use token::{TokenExtractor, TokenSet};
pub use vocabulary::{Category, CategoryRule, MaterialRank, MaterialRule, Vocabulary};
