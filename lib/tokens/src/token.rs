//! Token extraction
//!
//! Decomposes a [`PartRecord`] into the structured [`TokenSet`] used by
//! dimension-aware ordering and by the feature embedder.

use crate::measure::{Length, MeasureParser, ThreadSize};
use crate::vocabulary::{Category, MaterialRank, Vocabulary};
use partsort_core::{PartRecord, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Structured decomposition of a part's textual specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenSet {
    pub category: Category,
    pub size: ThreadSize,
    pub material: MaterialRank,
    pub length: Length,
}

impl TokenSet {
    /// Token set of a part nothing could be parsed from
    pub const UNKNOWN: TokenSet = TokenSet {
        category: Category::Other,
        size: ThreadSize::UNPARSED,
        material: MaterialRank::UNSPECIFIED,
        length: Length::ABSENT,
    };
}

/// Turns part records into token sets
#[derive(Debug, Clone)]
pub struct TokenExtractor {
    vocabulary: Vocabulary,
    measures: MeasureParser,
}

impl TokenExtractor {
    /// Extractor with the built-in vocabulary
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(Vocabulary::default())
    }

    pub fn with_vocabulary(mut vocabulary: Vocabulary) -> Result<Self> {
        vocabulary.validate_and_normalize()?;
        Ok(Self {
            vocabulary,
            measures: MeasureParser::new()?,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Extract tokens from a record. Never fails: unrecognized text falls
    /// back to the sentinels in [`TokenSet::UNKNOWN`].
    pub fn extract(&self, record: &PartRecord) -> TokenSet {
        let short = record.short_description.as_str();
        let dimensional = record.dimensional_description.as_str();

        // The short description names the part family, so it is consulted first
        let category = self
            .vocabulary
            .categorize(short)
            .or_else(|| self.vocabulary.categorize(dimensional))
            .unwrap_or(Category::Other);

        let material = self
            .vocabulary
            .material_rank(&format!("{} {}", short, dimensional));

        let (mut size, mut length) = self.measures.parse(dimensional);
        if !size.is_parsed() || !length.is_present() {
            let (short_size, short_length) = self.measures.parse(short);
            if !size.is_parsed() {
                size = short_size;
            }
            if !length.is_present() {
                length = short_length;
            }
        }

        let tokens = TokenSet {
            category,
            size,
            material,
            length,
        };
        trace!(id = %record.id, ?tokens, "extracted tokens");
        tokens
    }

    pub fn extract_all(&self, records: &[PartRecord]) -> Vec<TokenSet> {
        records.iter().map(|r| self.extract(r)).collect()
    }
}
