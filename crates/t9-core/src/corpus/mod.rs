//! N-gram corpus model.
//!
//! Built once from raw training bytes and immutable afterwards. Supplies the
//! conditional probability of a symbol given the up-to-(N-1) symbols before it.

mod trie;

use tracing::{debug, debug_span};

use crate::keypad::Symbol;
use trie::NgramTrie;

/// Text up to (not including) the first zero byte.
pub fn until_nul(text: &[u8]) -> &[u8] {
    match text.iter().position(|&b| b == 0) {
        Some(end) => &text[..end],
        None => text,
    }
}

#[derive(Debug, Clone)]
pub struct CorpusModel {
    trie: NgramTrie,
    ngram_length: usize,
}

impl CorpusModel {
    /// Count every window of `ngram_length` symbols in `text` and derive
    /// probabilities. A zero byte ends the text.
    ///
    /// `ngram_length` must be positive; `Model::new` checks this before
    /// building.
    pub fn build(text: &[u8], ngram_length: usize) -> Self {
        let _span = debug_span!("corpus_build", ngram_length).entered();
        let text = until_nul(text);
        let mut trie = NgramTrie::new();
        let mut windows = 0usize;
        if ngram_length > 0 {
            for window in text.windows(ngram_length) {
                trie.insert(window);
                windows += 1;
            }
        }
        trie.finalize();
        debug!(
            text_len = text.len(),
            windows,
            nodes = trie.len(),
            "corpus model built"
        );
        Self { trie, ngram_length }
    }

    /// Probability of the last symbol of `word` given the symbols before it.
    ///
    /// Returns 0 for the empty word and for any n-gram never seen in training;
    /// there is no smoothing.
    pub fn conditional_probability(&self, word: &[Symbol]) -> f64 {
        if word.len() > self.ngram_length {
            return 0.0;
        }
        self.trie.probability(word)
    }

    /// Number of windows the model was trained on.
    pub fn total_count(&self) -> u64 {
        self.trie.count(&[])
    }

    /// Next-symbol distribution after `context`.
    pub fn successors(&self, context: &[Symbol]) -> Vec<(Symbol, f64)> {
        self.trie.children(context)
    }

    pub fn ngram_length(&self) -> usize {
        self.ngram_length
    }

    /// Trie node count, root included.
    pub fn node_count(&self) -> usize {
        self.trie.len()
    }
}
