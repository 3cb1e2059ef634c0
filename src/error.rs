use thiserror::Error;

use crate::models::DocumentId;

/// Main error type for FracTree operations
#[derive(Error, Debug)]
pub enum FracTreeError {
    #[error("degenerate key range [{low}, {high}): no key strictly inside")]
    DegenerateRange { low: u64, high: u64 },

    #[error("posting not found: document {doc_id}, term {term:?}")]
    PostingNotFound { doc_id: DocumentId, term: String },

    #[error("partial delete for document {doc_id}: {} term(s) not found", missing_terms.len())]
    PartialDelete {
        doc_id: DocumentId,
        missing_terms: Vec<String>,
    },

    #[error("query cancelled")]
    Cancelled,
}

/// Result type alias for FracTree operations
pub type Result<T> = std::result::Result<T, FracTreeError>;

impl FracTreeError {
    /// Terms a best-effort delete failed to find, if this is a partial-delete error
    pub fn missing_terms(&self) -> Option<&[String]> {
        match self {
            FracTreeError::PartialDelete { missing_terms, .. } => Some(missing_terms),
            _ => None,
        }
    }

    /// Check whether this error left the index fully unchanged
    ///
    /// Partial deletes still removed the postings they found, so a caller
    /// re-issuing the operation must use `missing_terms`, not the full list.
    pub fn is_clean_failure(&self) -> bool {
        !matches!(self, FracTreeError::PartialDelete { .. })
    }
}
