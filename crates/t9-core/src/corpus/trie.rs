use crate::keypad::Symbol;

const ROOT: usize = 0;

/// A trie node. Children are owned through the arena; `parent` is a plain
/// index back into it.
#[derive(Debug, Clone)]
struct TrieNode {
    symbol: Symbol,
    count: u64,
    probability: f64,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl TrieNode {
    fn new(symbol: Symbol, parent: Option<usize>) -> Self {
        Self {
            symbol,
            count: 0,
            probability: 0.0,
            parent,
            children: Vec::new(),
        }
    }
}

/// Frequency trie over fixed-length n-grams.
///
/// Nodes live in a single `Vec`; a child is always pushed after its parent,
/// so `parent < child` holds for every index pair. `finalize` relies on that
/// to compute probabilities in one forward pass.
#[derive(Debug, Clone)]
pub(crate) struct NgramTrie {
    nodes: Vec<TrieNode>,
}

impl NgramTrie {
    pub fn new() -> Self {
        // The root stands for the empty prefix; its symbol is never read.
        Self {
            nodes: vec![TrieNode::new(b' ', None)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    fn child(&self, node: usize, symbol: Symbol) -> Option<usize> {
        self.nodes[node]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].symbol == symbol)
    }

    fn child_or_insert(&mut self, node: usize, symbol: Symbol) -> usize {
        if let Some(c) = self.child(node, symbol) {
            return c;
        }
        let idx = self.nodes.len();
        self.nodes.push(TrieNode::new(symbol, Some(node)));
        self.nodes[node].children.push(idx);
        idx
    }

    /// Insert one n-gram, counting a visit at every depth along the way.
    pub fn insert(&mut self, ngram: &[Symbol]) {
        let mut node = ROOT;
        for &symbol in ngram {
            node = self.child_or_insert(node, symbol);
            self.nodes[node].count += 1;
        }
    }

    /// Derive conditional probabilities from the counts.
    ///
    /// The root's count becomes the sum of its children's counts and its own
    /// probability stays 0. Every other node gets `count / parent.count`.
    pub fn finalize(&mut self) {
        let root_count = self.nodes[ROOT]
            .children
            .iter()
            .map(|&c| self.nodes[c].count)
            .sum();
        self.nodes[ROOT].count = root_count;
        self.nodes[ROOT].probability = 0.0;

        for idx in 1..self.nodes.len() {
            let Some(parent) = self.nodes[idx].parent else {
                continue;
            };
            let parent_count = self.nodes[parent].count;
            self.nodes[idx].probability = if parent_count == 0 {
                0.0
            } else {
                self.nodes[idx].count as f64 / parent_count as f64
            };
        }
    }

    /// Probability stored at the node reached by `word`, or 0 when the walk
    /// falls off the trie.
    pub fn probability(&self, word: &[Symbol]) -> f64 {
        if word.is_empty() {
            return 0.0;
        }
        let mut node = ROOT;
        for &symbol in word {
            match self.child(node, symbol) {
                Some(c) => node = c,
                None => return 0.0,
            }
        }
        self.nodes[node].probability
    }

    /// Observed count of the node reached by `prefix` (the root for an empty prefix).
    pub fn count(&self, prefix: &[Symbol]) -> u64 {
        let mut node = ROOT;
        for &symbol in prefix {
            match self.child(node, symbol) {
                Some(c) => node = c,
                None => return 0,
            }
        }
        self.nodes[node].count
    }

    /// Children of the node reached by `prefix`, as `(symbol, probability)`.
    pub fn children(&self, prefix: &[Symbol]) -> Vec<(Symbol, f64)> {
        let mut node = ROOT;
        for &symbol in prefix {
            match self.child(node, symbol) {
                Some(c) => node = c,
                None => return Vec::new(),
            }
        }
        self.nodes[node]
            .children
            .iter()
            .map(|&c| (self.nodes[c].symbol, self.nodes[c].probability))
            .collect()
    }
}
