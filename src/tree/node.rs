//! FracTree nodes
//!
//! A node is either a leaf holding postings or an internal node owning exactly
//! two children whose ranges partition its own. Splitting an overfull leaf is
//! the only mutation that changes tree shape; internal nodes only revert to
//! leaves through the optional merge-on-underflow path.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::IndexConfig;
use crate::error::{FracTreeError, Result};
use crate::models::DocumentId;

use super::key::{term_key, KeyRange, TermKey};
use super::partitioner::ChaoticPartitioner;
use super::postings::{Posting, PostingList};

/// One node of the FracTree
#[derive(Clone, Debug)]
pub struct Node {
    key_range: KeyRange,
    /// Term to posting-list mapping, non-empty only on leaves
    postings: BTreeMap<String, PostingList>,
    /// Empty for a leaf, exactly two children for an internal node
    children: Option<Box<[Node; 2]>>,
    /// Mutations observed since the last split, seeds the chaotic map
    mutation_count: u64,
    /// Set when a degenerate range forced this leaf past capacity
    overflowed: bool,
}

impl Node {
    pub fn new_leaf(key_range: KeyRange) -> Self {
        Self {
            key_range,
            postings: BTreeMap::new(),
            children: None,
            mutation_count: 0,
            overflowed: false,
        }
    }

    pub fn key_range(&self) -> KeyRange {
        self.key_range
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        self.children.as_deref().map(|c| (&c[0], &c[1]))
    }

    pub fn postings(&self) -> &BTreeMap<String, PostingList> {
        &self.postings
    }

    /// Total postings held by this node (zero for internal nodes)
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(PostingList::len).sum()
    }

    pub fn mutation_count(&self) -> u64 {
        self.mutation_count
    }

    /// Whether a degenerate-range split failure left this leaf over capacity
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Descend to the leaf whose range contains `key`
    ///
    /// Pure traversal, O(depth); shared by insert and query.
    pub fn find_leaf(&self, key: TermKey) -> &Node {
        debug_assert!(self.key_range.contains(key));
        match self.children.as_deref() {
            None => self,
            Some(children) => {
                if children[1].key_range.contains(key) {
                    children[1].find_leaf(key)
                } else {
                    children[0].find_leaf(key)
                }
            }
        }
    }

    /// Insert a posting for `term` into the leaf owning `key`
    ///
    /// Splits the receiving leaf if the insert pushes it past capacity. Never
    /// fails: a split refused for a degenerate range degrades to soft
    /// overflow, since insertion availability outranks strict balance.
    pub fn insert(
        &mut self,
        key: TermKey,
        term: &str,
        posting: Posting,
        partitioner: &ChaoticPartitioner,
        max_postings: usize,
    ) {
        if let Some(children) = self.children.as_deref_mut() {
            let child = if children[1].key_range.contains(key) {
                &mut children[1]
            } else {
                &mut children[0]
            };
            child.insert(key, term, posting, partitioner, max_postings);
            return;
        }

        debug_assert!(self.key_range.contains(key));
        self.mutation_count += 1;
        self.postings.entry(term.to_string()).or_default().upsert(posting);
        if self.posting_count() > max_postings {
            self.split_to_capacity(partitioner, max_postings);
        }
    }

    /// Remove the posting for (`doc_id`, `term`) from the leaf owning `key`
    pub fn delete(
        &mut self,
        key: TermKey,
        term: &str,
        doc_id: DocumentId,
        config: &IndexConfig,
    ) -> Result<()> {
        if let Some(children) = self.children.as_deref_mut() {
            let child = if children[1].key_range.contains(key) {
                &mut children[1]
            } else {
                &mut children[0]
            };
            child.delete(key, term, doc_id, config)?;
            if config.merge_on_underflow {
                self.try_merge_children(config);
            }
            return Ok(());
        }

        let not_found = || FracTreeError::PostingNotFound {
            doc_id,
            term: term.to_string(),
        };
        let list = self.postings.get_mut(term).ok_or_else(not_found)?;
        list.remove(doc_id).ok_or_else(not_found)?;
        if list.is_empty() {
            self.postings.remove(term);
        }
        self.mutation_count += 1;
        if self.overflowed && self.posting_count() <= config.max_postings_per_leaf {
            self.overflowed = false;
        }
        Ok(())
    }

    /// Split this leaf until it is back under capacity
    ///
    /// Redistribution can leave one child still overfull when keys cluster,
    /// so splitting continues into the children. A degenerate range stops the
    /// descent and marks the leaf as overflowed.
    fn split_to_capacity(&mut self, partitioner: &ChaoticPartitioner, max_postings: usize) {
        if self.children.is_some() || self.posting_count() <= max_postings {
            return;
        }

        let split = match partitioner.split_point(self.key_range, self.mutation_count) {
            Ok(split) => split,
            Err(_) => {
                self.overflowed = true;
                debug!(
                    low = self.key_range.low,
                    high = self.key_range.high,
                    postings = self.posting_count(),
                    "degenerate range, leaf overflows softly"
                );
                return;
            }
        };

        let (left_range, right_range) = self.key_range.split_at(split);
        let mut left = Node::new_leaf(left_range);
        let mut right = Node::new_leaf(right_range);

        // All postings for one term share one key, so whole lists relocate.
        for (term, list) in std::mem::take(&mut self.postings) {
            let target = if term_key(&term) < split {
                &mut left
            } else {
                &mut right
            };
            target.postings.insert(term, list);
        }

        debug!(
            split = split.0,
            left = left.posting_count(),
            right = right.posting_count(),
            "leaf split"
        );

        left.split_to_capacity(partitioner, max_postings);
        right.split_to_capacity(partitioner, max_postings);

        self.mutation_count = 0;
        self.overflowed = false;
        self.children = Some(Box::new([left, right]));
    }

    /// Collapse two sparse sibling leaves back into this node
    fn try_merge_children(&mut self, config: &IndexConfig) {
        let combined = match self.children.as_deref() {
            Some(children) if children[0].is_leaf() && children[1].is_leaf() => {
                children[0].posting_count() + children[1].posting_count()
            }
            _ => return,
        };
        if combined > config.merge_threshold {
            return;
        }

        let Some(children) = self.children.take() else {
            return;
        };
        let [left, right] = *children;
        self.postings = left.postings;
        self.postings.extend(right.postings);
        self.mutation_count = 0;
        self.overflowed = false;
        debug!(
            low = self.key_range.low,
            high = self.key_range.high,
            postings = combined,
            "merged underfull sibling leaves"
        );
    }
}
