//! Per-term posting storage within a leaf
//!
//! Each term owns a list of postings kept sorted by document id, so upsert,
//! lookup, and delete are binary searches within the leaf.

use serde::{Deserialize, Serialize};

use crate::models::DocumentId;

/// Per-document occurrence record for one term
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocumentId,
    pub frequency: u32,
    /// Token positions of the term in the document, ascending
    pub positions: Vec<u32>,
}

impl Posting {
    pub fn new(doc_id: DocumentId, positions: Vec<u32>) -> Self {
        Self {
            doc_id,
            frequency: positions.len() as u32,
            positions,
        }
    }
}

/// Posting list for a single term, sorted by document id
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the posting for a document
    ///
    /// Re-inserting the same document updates frequency and positions in
    /// place; a document never holds two postings for one term. Returns true
    /// when the posting was new.
    pub fn upsert(&mut self, posting: Posting) -> bool {
        match self
            .postings
            .binary_search_by_key(&posting.doc_id, |p| p.doc_id)
        {
            Ok(i) => {
                self.postings[i] = posting;
                false
            }
            Err(i) => {
                self.postings.insert(i, posting);
                true
            }
        }
    }

    /// Remove the posting for a document, if present
    pub fn remove(&mut self, doc_id: DocumentId) -> Option<Posting> {
        match self.postings.binary_search_by_key(&doc_id, |p| p.doc_id) {
            Ok(i) => Some(self.postings.remove(i)),
            Err(_) => None,
        }
    }

    pub fn get(&self, doc_id: DocumentId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| &self.postings[i])
    }

    /// Number of documents carrying this term in this leaf
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Posting> {
        self.postings.iter()
    }
}
