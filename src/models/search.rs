use serde::{Deserialize, Serialize};

use super::document::DocumentId;

/// Ranked query result
///
/// Results are ordered by `matched_terms` descending, then `score` descending,
/// then `doc_id` ascending as the final deterministic tie-break.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocumentId,
    /// Distinct query terms this document matched
    pub matched_terms: usize,
    pub score: f32,
}

impl SearchHit {
    pub fn new(doc_id: DocumentId, matched_terms: usize, score: f32) -> Self {
        Self {
            doc_id,
            matched_terms,
            score,
        }
    }
}
