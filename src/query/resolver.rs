//! Ranked retrieval
//!
//! Each query term resolves to exactly one leaf; scores are aggregated per
//! document with inverse-leaf-size dampening, so matches on rarer terms count
//! for more without the tree having to keep global document-frequency
//! statistics.

use std::collections::{BTreeSet, HashMap};

use crate::error::{FracTreeError, Result};
use crate::index::CancelToken;
use crate::models::{DocumentId, SearchHit};
use crate::tree::{term_key, Node};

struct Aggregate {
    matched_terms: usize,
    score: f32,
}

/// Resolve `terms` against the tree rooted at `root`
///
/// Duplicate query terms count once. Returns an empty vector when nothing
/// matches; cancellation is checked once per term and yields `Cancelled` with
/// no partial results.
pub fn resolve(root: &Node, terms: &[String], cancel: &CancelToken) -> Result<Vec<SearchHit>> {
    let unique: BTreeSet<&str> = terms.iter().map(String::as_str).collect();
    let mut aggregates: HashMap<DocumentId, Aggregate> = HashMap::new();

    for term in unique {
        if cancel.is_cancelled() {
            return Err(FracTreeError::Cancelled);
        }

        let leaf = root.find_leaf(term_key(term));
        let Some(list) = leaf.postings().get(term) else {
            continue;
        };

        let dampening = 1.0 + (1.0 + list.len() as f32).ln();
        for posting in list.iter() {
            let entry = aggregates.entry(posting.doc_id).or_insert(Aggregate {
                matched_terms: 0,
                score: 0.0,
            });
            entry.matched_terms += 1;
            entry.score += posting.frequency as f32 / dampening;
        }
    }

    let mut hits: Vec<SearchHit> = aggregates
        .into_iter()
        .map(|(doc_id, agg)| SearchHit::new(doc_id, agg.matched_terms, agg.score))
        .collect();

    // Distinct matched terms dominate; score breaks ties; doc_id makes the
    // order fully deterministic.
    hits.sort_by(|a, b| {
        b.matched_terms
            .cmp(&a.matched_terms)
            .then(b.score.total_cmp(&a.score))
            .then(a.doc_id.cmp(&b.doc_id))
    });

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::tree::{ChaoticPartitioner, KeyRange, Posting};

    fn leaf_with(terms: &[(&str, u64, Vec<u32>)]) -> Node {
        let cfg = IndexConfig::default();
        let partitioner = ChaoticPartitioner::new(&cfg);
        let mut root = Node::new_leaf(KeyRange::FULL);
        for (term, doc_id, positions) in terms {
            root.insert(
                term_key(term),
                term,
                Posting::new(*doc_id, positions.clone()),
                &partitioner,
                cfg.max_postings_per_leaf,
            );
        }
        root
    }

    fn query(root: &Node, terms: &[&str]) -> Vec<SearchHit> {
        let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        resolve(root, &terms, &CancelToken::new()).unwrap()
    }

    #[test]
    fn test_empty_and_unmatched_query() {
        let root = leaf_with(&[("alpha", 1, vec![0])]);
        assert!(query(&root, &[]).is_empty());
        assert!(query(&root, &["missing"]).is_empty());
    }

    #[test]
    fn test_more_matched_terms_rank_first() {
        let root = leaf_with(&[
            ("alpha", 1, vec![0, 5]),
            ("alpha", 2, vec![0]),
            ("beta", 2, vec![1]),
            ("beta", 3, vec![0, 1, 2]),
        ]);

        let hits = query(&root, &["alpha", "beta"]);
        assert_eq!(hits.len(), 3);
        // Doc 2 matches both terms, so it outranks both single-term docs
        // regardless of their higher frequencies.
        assert_eq!(hits[0].doc_id, 2);
        assert_eq!(hits[0].matched_terms, 2);
        // Docs 1 and 3 share identical dampening (both lists hold two
        // postings), so raw frequency decides: doc 3 (tf 3) over doc 1 (tf 2).
        assert_eq!(hits[1].doc_id, 3);
        assert_eq!(hits[2].doc_id, 1);
    }

    #[test]
    fn test_doc_id_is_final_tie_break() {
        let root = leaf_with(&[("alpha", 9, vec![0]), ("alpha", 4, vec![1])]);
        let hits = query(&root, &["alpha"]);
        assert_eq!(hits[0].doc_id, 4);
        assert_eq!(hits[1].doc_id, 9);
    }

    #[test]
    fn test_duplicate_query_terms_count_once() {
        let root = leaf_with(&[("alpha", 1, vec![0])]);
        let hits = query(&root, &["alpha", "alpha"]);
        assert_eq!(hits[0].matched_terms, 1);
    }

    #[test]
    fn test_cancelled_query_yields_no_results() {
        let root = leaf_with(&[("alpha", 1, vec![0])]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = resolve(&root, &["alpha".to_string()], &cancel).unwrap_err();
        assert!(matches!(err, FracTreeError::Cancelled));
    }
}
