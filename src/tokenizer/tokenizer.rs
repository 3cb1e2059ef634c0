use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use stop_words::{get, LANGUAGE};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::TokenizerConfig;
use crate::models::{Document, DocumentId};

/// Text tokenizer with stemming and stopword removal
pub struct Tokenizer {
    config: TokenizerConfig,
    stemmer: Option<Stemmer>,
    stopwords: HashSet<String>,
}

impl Tokenizer {
    /// Create a new tokenizer from configuration
    pub fn new(config: &TokenizerConfig) -> Self {
        let stemmer = if config.stem {
            Some(Stemmer::create(Algorithm::English))
        } else {
            None
        };

        let stopwords = if config.remove_stopwords {
            get(LANGUAGE::English)
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect()
        } else {
            HashSet::new()
        };

        Self {
            config: config.clone(),
            stemmer,
            stopwords,
        }
    }

    /// Tokenize text into (term, position) pairs
    ///
    /// Positions are 0-indexed and count all tokens including those filtered
    /// out (stopwords and out-of-length tokens still increment position), so
    /// positional gaps in the output reflect the original text.
    pub fn tokenize_with_positions(&self, text: &str) -> Vec<(String, u32)> {
        let mut terms = Vec::new();

        for (position, word) in text.unicode_words().enumerate() {
            let token = if self.config.lowercase {
                word.to_lowercase()
            } else {
                word.to_string()
            };

            if token.len() < self.config.min_token_length
                || token.len() > self.config.max_token_length
                || self.stopwords.contains(&token)
            {
                continue;
            }

            let term = match &self.stemmer {
                Some(stemmer) => stemmer.stem(&token).to_string(),
                None => token,
            };
            terms.push((term, position as u32));
        }

        terms
    }

    /// Tokenize text into a vector of terms
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenize_with_positions(text)
            .into_iter()
            .map(|(term, _)| term)
            .collect()
    }

    /// Get unique terms from text, normalized the way indexed terms are
    ///
    /// Query strings must pass through this so they match what was indexed.
    pub fn unique_terms(&self, text: &str) -> Vec<String> {
        let mut terms = self.tokenize(text);
        terms.sort_unstable();
        terms.dedup();
        terms
    }

    /// Tokenize raw text into an indexable document
    pub fn document(&self, id: DocumentId, text: &str) -> Document {
        Document::new(id, self.tokenize_with_positions(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_tokenizer() -> Tokenizer {
        Tokenizer::new(&TokenizerConfig {
            lowercase: true,
            remove_stopwords: false,
            stem: false,
            min_token_length: 1,
            max_token_length: 50,
            language: "english".to_string(),
        })
    }

    #[test]
    fn test_positions_track_token_offsets() {
        let tokenizer = plain_tokenizer();
        let terms = tokenizer.tokenize_with_positions("Alpha beta alpha");
        assert_eq!(
            terms,
            vec![
                ("alpha".to_string(), 0),
                ("beta".to_string(), 1),
                ("alpha".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_filtered_tokens_still_advance_position() {
        let mut config = TokenizerConfig::default();
        config.stem = false;
        let tokenizer = Tokenizer::new(&config);

        // "the" and "a" are stopwords; surviving terms keep original offsets.
        let terms = tokenizer.tokenize_with_positions("the quick fox chased a hound");
        assert_eq!(
            terms,
            vec![
                ("quick".to_string(), 1),
                ("fox".to_string(), 2),
                ("chased".to_string(), 3),
                ("hound".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_stemming_normalizes_terms() {
        let mut config = TokenizerConfig::default();
        config.remove_stopwords = false;
        let tokenizer = Tokenizer::new(&config);

        let running = tokenizer.tokenize("running");
        let runs = tokenizer.tokenize("runs");
        assert_eq!(running, runs);
    }

    #[test]
    fn test_unique_terms_deduplicates() {
        let tokenizer = plain_tokenizer();
        assert_eq!(
            tokenizer.unique_terms("beta alpha beta"),
            vec!["alpha".to_string(), "beta".to_string()]
        );
    }

    #[test]
    fn test_document_builder() {
        let tokenizer = plain_tokenizer();
        let doc = tokenizer.document(7, "alpha beta");
        assert_eq!(doc.id, 7);
        assert_eq!(doc.terms.len(), 2);
    }
}
