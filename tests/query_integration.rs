//! End-to-end query behavior through the public index API

use fractree::{
    CancelToken, Document, FracTree, FracTreeError, IndexConfig, Tokenizer, TokenizerConfig,
};

fn terms(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn doc(id: u64, words: &[&str]) -> Document {
    Document::new(
        id,
        words
            .iter()
            .enumerate()
            .map(|(pos, w)| (w.to_string(), pos as u32))
            .collect(),
    )
}

#[test]
fn test_ranking_scenario() {
    let index = FracTree::new(IndexConfig::default());

    // D1: alpha twice, D2: alpha and beta once each, D3: beta three times.
    index.insert_document(&doc(1, &["alpha", "alpha"])).unwrap();
    index.insert_document(&doc(2, &["alpha", "beta"])).unwrap();
    index
        .insert_document(&doc(3, &["beta", "beta", "beta"]))
        .unwrap();

    let hits = index.query(&terms(&["alpha", "beta"]));
    assert_eq!(hits.len(), 3);

    // D2 matches both terms and ranks first outright.
    assert_eq!(hits[0].doc_id, 2);
    assert_eq!(hits[0].matched_terms, 2);

    // Both posting lists hold two entries, so dampening is equal and raw
    // frequency decides: D3 (tf 3) above D1 (tf 2).
    assert_eq!(hits[1].doc_id, 3);
    assert_eq!(hits[2].doc_id, 1);
    assert!(hits[1].score > hits[2].score);
}

#[test]
fn test_empty_query_returns_empty() {
    let index = FracTree::new(IndexConfig::default());
    index.insert_document(&doc(1, &["alpha"])).unwrap();

    assert!(index.query(&[]).is_empty());
    assert!(index.query(&terms(&["nothing", "here"])).is_empty());
}

#[test]
fn test_idempotent_insert() {
    let index = FracTree::new(IndexConfig::default());
    index.insert_document(&doc(1, &["alpha", "alpha"])).unwrap();
    index.insert_document(&doc(1, &["alpha", "alpha"])).unwrap();

    let stats = index.stats();
    assert_eq!(stats.postings, 1);

    let hits = index.query(&terms(&["alpha"]));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, 1);
}

#[test]
fn test_reinsert_updates_frequency_in_place() {
    let index = FracTree::new(IndexConfig::default());
    index.insert_document(&doc(1, &["alpha"])).unwrap();
    let before = index.query(&terms(&["alpha"]))[0].score;

    index
        .insert_document(&doc(1, &["alpha", "alpha", "alpha"]))
        .unwrap();
    let after = index.query(&terms(&["alpha"]))[0].score;

    assert_eq!(index.stats().postings, 1);
    assert!(after > before);
}

#[test]
fn test_insert_delete_round_trip() {
    let config = IndexConfig {
        max_postings_per_leaf: 2,
        ..IndexConfig::default()
    };
    let index = FracTree::new(config);

    index.insert_document(&doc(1, &["alpha", "beta"])).unwrap();
    index.insert_document(&doc(2, &["gamma", "delta"])).unwrap();
    let before = index.stats();

    let extra = doc(3, &["epsilon", "zeta", "eta"]);
    index.insert_document(&extra).unwrap();
    index
        .delete_document(3, &terms(&["epsilon", "zeta", "eta"]))
        .unwrap();

    let after = index.stats();
    // Posting counts return to their pre-insert values; leaves created by
    // splits persist, so tree shape may differ.
    assert_eq!(after.postings, before.postings);
    assert_eq!(after.terms, before.terms);
    assert!(index.query(&terms(&["epsilon"])).is_empty());
    assert_eq!(index.query(&terms(&["alpha"])).len(), 1);
}

#[test]
fn test_bulk_insert() {
    let index = FracTree::new(IndexConfig::default());
    let docs: Vec<Document> = (1..=10).map(|id| doc(id, &["shared", "alpha"])).collect();
    index.insert_documents(&docs).unwrap();

    assert_eq!(index.version(), 10);
    assert_eq!(index.query(&terms(&["shared"])).len(), 10);
}

#[test]
fn test_cancelled_query_is_distinct_from_no_results() {
    let index = FracTree::new(IndexConfig::default());
    index.insert_document(&doc(1, &["alpha"])).unwrap();

    let cancel = CancelToken::new();
    cancel.cancel();
    let err = index
        .query_with_cancel(&terms(&["alpha"]), &cancel)
        .unwrap_err();
    assert!(matches!(err, FracTreeError::Cancelled));

    let live = CancelToken::new();
    let hits = index.query_with_cancel(&terms(&["alpha"]), &live).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_tokenized_pipeline_end_to_end() {
    let tokenizer = Tokenizer::new(&TokenizerConfig::default());
    let index = FracTree::new(IndexConfig::default());

    index
        .insert_document(&tokenizer.document(1, "Rust is a systems programming language"))
        .unwrap();
    index
        .insert_document(&tokenizer.document(2, "Python is used for scripting and data analysis"))
        .unwrap();

    // Query text goes through the same normalization as indexed text.
    let query = tokenizer.unique_terms("programming in Rust");
    let hits = index.query(&query);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, 1);
    assert_eq!(hits[0].matched_terms, 2);
}
