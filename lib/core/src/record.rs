use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// A catalog part as delivered by the retrieval layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartRecord {
    /// Catalog identifier, unique within a batch
    pub id: String,
    #[serde(default, alias = "shortDescription")]
    pub short_description: String,
    /// Free-text specification, e.g. `1/4-20 x 1in, 18-8 Stainless Steel`
    #[serde(default, alias = "dimensionalDescription")]
    pub dimensional_description: String,
    /// Fixed-length summary of the product image, computed upstream
    #[serde(default, alias = "imageFingerprint", skip_serializing_if = "Option::is_none")]
    pub image_fingerprint: Option<Vec<f32>>,
}

impl PartRecord {
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        short_description: impl Into<String>,
        dimensional_description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            short_description: short_description.into(),
            dimensional_description: dimensional_description.into(),
            image_fingerprint: None,
        }
    }

    /// Record carrying only an identifier
    #[inline]
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        Self::new(id, "", "")
    }

    #[inline]
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Vec<f32>) -> Self {
        self.image_fingerprint = Some(fingerprint);
        self
    }

    /// Short and dimensional descriptions joined the way labels print them
    pub fn description(&self) -> String {
        match (self.short_description.is_empty(), self.dimensional_description.is_empty()) {
            (false, false) => format!("{} - {}", self.short_description, self.dimensional_description),
            (false, true) => self.short_description.clone(),
            (true, false) => self.dimensional_description.clone(),
            (true, true) => String::new(),
        }
    }
}

/// Reject batches in which an identifier appears twice
pub fn ensure_unique_ids(records: &[PartRecord]) -> Result<()> {
    let mut seen = AHashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(Error::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}
