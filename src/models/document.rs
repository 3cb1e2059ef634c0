use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique document identifier, assigned by the caller
pub type DocumentId = u64;

/// An already-tokenized document
///
/// The index never sees document bodies, only (term, position) pairs. Positions
/// are token offsets within the original text and need not be contiguous
/// (tokenization may have dropped stopwords in between).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub terms: Vec<(String, u32)>,
}

impl Document {
    pub fn new(id: DocumentId, terms: Vec<(String, u32)>) -> Self {
        Self { id, terms }
    }

    /// Fold the (term, position) list into per-term occurrence data
    ///
    /// Duplicate positions for the same term collapse, so feeding a document
    /// in twice yields the same per-term view as feeding it once.
    pub fn term_occurrences(&self) -> BTreeMap<&str, Vec<u32>> {
        let mut occurrences: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
        for (term, position) in &self.terms {
            occurrences.entry(term.as_str()).or_default().push(*position);
        }
        for positions in occurrences.values_mut() {
            positions.sort_unstable();
            positions.dedup();
        }
        occurrences
    }

    /// Distinct terms in this document
    pub fn unique_terms(&self) -> Vec<&str> {
        self.term_occurrences().into_keys().collect()
    }
}
