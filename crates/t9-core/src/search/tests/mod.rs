mod basic;

use crate::corpus::CorpusModel;
use crate::keypad::{parse_keys, Symbol};

use super::{prune, search_best_paths, Candidate, CandidateTree, DefaultCostFunction};

/// Drive the three search stages over `keys` the way the model does, pruning
/// once the depth reaches `ngram_length`.
pub(super) fn run_keys(
    corpus: &CorpusModel,
    keys: &[u8],
    k: usize,
) -> (CandidateTree, Vec<Candidate>) {
    let cost_fn = DefaultCostFunction::new(corpus, 1.0);
    let n = corpus.ngram_length();
    let mut tree = CandidateTree::new();
    let mut kept = Vec::new();
    for key in parse_keys(keys).unwrap() {
        let depth = tree.insert_level(key, &cost_fn, n);
        kept = search_best_paths(&tree, k);
        if depth >= n {
            prune(&mut tree, &kept);
        }
    }
    (tree, kept)
}

pub(super) fn texts(tree: &CandidateTree, kept: &[Candidate]) -> Vec<Vec<Symbol>> {
    kept.iter().map(|c| tree.flatten(c.nodes())).collect()
}
