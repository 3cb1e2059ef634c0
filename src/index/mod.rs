//! The FracTree index
//!
//! Owns the root node behind a single-writer, multiple-reader lock. Mutations
//! (insert, delete, and the splits they trigger) hold the write lock for one
//! whole document, so a concurrent reader observes each document either fully
//! present or fully absent. Nothing inside a locked region touches the network
//! or disk; hold times are bounded by tree depth times term count.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::IndexConfig;
use crate::error::{FracTreeError, Result};
use crate::models::{Document, DocumentId, SearchHit};
use crate::query;
use crate::tree::{term_key, ChaoticPartitioner, KeyRange, Node, Posting};

/// Cooperative cancellation handle for queries
///
/// Checked once per query term; a cancelled query returns
/// `FracTreeError::Cancelled` and never partial results.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Structural snapshot of the tree, for diagnostics and tests
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub leaves: usize,
    pub internal_nodes: usize,
    pub depth: usize,
    pub terms: usize,
    pub postings: usize,
    pub overflowed_leaves: usize,
    pub version: u64,
}

/// Keyword search index over a chaotically partitioned term tree
///
/// Construct once at startup and share by reference; the index carries its own
/// lock discipline and has no process-wide state.
pub struct FracTree {
    root: RwLock<Node>,
    partitioner: ChaoticPartitioner,
    config: IndexConfig,
    /// Bumped once per structural mutation, at document granularity
    version: AtomicU64,
}

impl FracTree {
    pub fn new(config: IndexConfig) -> Self {
        let partitioner = ChaoticPartitioner::new(&config);
        Self {
            root: RwLock::new(Node::new_leaf(KeyRange::FULL)),
            partitioner,
            config,
            version: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Current index version; advances once per document-level mutation
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Index one document
    ///
    /// All of the document's terms are applied under one write-lock
    /// acquisition and the version advances once at the end, so readers see
    /// the document whole or not at all. Re-inserting a document updates its
    /// postings in place.
    pub fn insert_document(&self, document: &Document) -> Result<()> {
        let occurrences = document.term_occurrences();

        let mut root = self.root.write();
        for (term, positions) in occurrences {
            root.insert(
                term_key(term),
                term,
                Posting::new(document.id, positions),
                &self.partitioner,
                self.config.max_postings_per_leaf,
            );
        }
        self.version.fetch_add(1, Ordering::AcqRel);
        debug!(doc_id = document.id, terms = document.terms.len(), "document indexed");
        Ok(())
    }

    /// Bulk-index documents, one lock acquisition per document
    pub fn insert_documents(&self, documents: &[Document]) -> Result<()> {
        for document in documents {
            self.insert_document(document)?;
        }
        Ok(())
    }

    /// Remove a document's postings for the supplied terms
    ///
    /// The index keeps no document bodies, so the caller supplies the term
    /// list. Best-effort and non-atomic across terms: every posting that is
    /// found gets removed, and any that are missing come back in
    /// `PartialDelete::missing_terms` for the caller to re-issue or ignore.
    pub fn delete_document(&self, doc_id: DocumentId, terms: &[String]) -> Result<()> {
        let mut unique: Vec<&str> = terms.iter().map(String::as_str).collect();
        unique.sort_unstable();
        unique.dedup();

        let mut missing_terms = Vec::new();
        let mut removed_any = false;

        let mut root = self.root.write();
        for term in unique {
            match root.delete(term_key(term), term, doc_id, &self.config) {
                Ok(()) => removed_any = true,
                Err(FracTreeError::PostingNotFound { .. }) => {
                    missing_terms.push(term.to_string());
                }
                Err(other) => return Err(other),
            }
        }
        if removed_any {
            self.version.fetch_add(1, Ordering::AcqRel);
        }
        drop(root);

        if missing_terms.is_empty() {
            debug!(doc_id, "document deleted");
            Ok(())
        } else {
            Err(FracTreeError::PartialDelete {
                doc_id,
                missing_terms,
            })
        }
    }

    /// Resolve a keyword query into a ranked document list
    ///
    /// Runs under the shared read lock, concurrently with other queries but
    /// never with a mutation. No matches is an empty vector, not an error.
    pub fn query(&self, terms: &[String]) -> Vec<SearchHit> {
        // An un-cancellable token; resolve can only fail on cancellation.
        match self.query_with_cancel(terms, &CancelToken::new()) {
            Ok(hits) => hits,
            Err(_) => unreachable!("query without cancellation cannot fail"),
        }
    }

    /// Like `query`, checking `cancel` between term lookups
    pub fn query_with_cancel(
        &self,
        terms: &[String],
        cancel: &CancelToken,
    ) -> Result<Vec<SearchHit>> {
        let root = self.root.read();
        query::resolve(&root, terms, cancel)
    }

    /// Run `f` against the root under the read lock
    ///
    /// Escape hatch for invariant checkers and diagnostics; `f` must not block.
    pub fn with_root<R>(&self, f: impl FnOnce(&Node) -> R) -> R {
        let root = self.root.read();
        f(&root)
    }

    /// Collect structural statistics for the whole tree
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            version: self.version(),
            ..IndexStats::default()
        };
        self.with_root(|root| collect_stats(root, 1, &mut stats));
        stats
    }
}

fn collect_stats(node: &Node, depth: usize, stats: &mut IndexStats) {
    stats.depth = stats.depth.max(depth);
    match node.children() {
        None => {
            stats.leaves += 1;
            stats.terms += node.postings().len();
            stats.postings += node.posting_count();
            if node.is_overflowed() {
                stats.overflowed_leaves += 1;
            }
        }
        Some((left, right)) => {
            stats.internal_nodes += 1;
            collect_stats(left, depth + 1, stats);
            collect_stats(right, depth + 1, stats);
        }
    }
}
