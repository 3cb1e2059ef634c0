use serde::{Deserialize, Serialize};

/// Index settings configuration
///
/// The logistic-map parameters are fixed at index construction and must not
/// change over the index lifetime, or splits stop being reproducible.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Maximum postings a leaf may hold before it splits
    pub max_postings_per_leaf: usize,
    /// Logistic-map parameter `r`, kept in the chaotic regime
    pub logistic_r: f64,
    /// Iterations of the logistic recurrence per split decision
    pub logistic_iterations: u32,
    /// Collapse sibling leaves back into their parent when both are sparse
    pub merge_on_underflow: bool,
    /// Combined posting count below which sibling leaves merge
    pub merge_threshold: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_postings_per_leaf: 128,
            logistic_r: 3.9997,
            logistic_iterations: 24,
            merge_on_underflow: false,
            merge_threshold: 32,
        }
    }
}

/// Tokenizer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub lowercase: bool,
    pub remove_stopwords: bool,
    pub stem: bool,
    pub min_token_length: usize,
    pub max_token_length: usize,
    pub language: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_stopwords: true,
            stem: true,
            min_token_length: 2,
            max_token_length: 50,
            language: "english".to_string(),
        }
    }
}
