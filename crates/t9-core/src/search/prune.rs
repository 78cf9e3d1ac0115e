use std::collections::HashSet;

use tracing::{debug, debug_span};

use super::paths::Candidate;
use super::tree::{CandidateTree, NodeId};

/// Remove every frontier branch that does not end a kept candidate.
///
/// Frontier nodes are read from the level index at the current depth. A tree
/// path is fixed by its last node, so matching frontier nodes against the
/// kept candidates' last nodes is the same as matching whole paths. Shared
/// prefixes survive because `remove_branch` stops at the first ancestor that
/// still has children.
///
/// Returns the number of nodes removed.
pub fn prune(tree: &mut CandidateTree, kept: &[Candidate]) -> usize {
    let depth = tree.depth();
    let _span = debug_span!("prune", depth, kept = kept.len()).entered();

    let keep: HashSet<NodeId> = kept.iter().filter_map(Candidate::last).collect();
    let frontier: Vec<NodeId> = tree.level(depth).to_vec();

    let mut removed = 0;
    for leaf in frontier {
        if !keep.contains(&leaf) {
            removed += tree.remove_branch(leaf);
        }
    }

    debug!(removed, remaining = tree.node_count());
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusModel;
    use crate::keypad::Key;
    use crate::search::cost::DefaultCostFunction;
    use crate::search::paths::search_best_paths;

    #[test]
    fn test_prune_keeps_only_kept_paths() {
        let corpus = CorpusModel::build(b"banana bandana", 2);
        let cost_fn = DefaultCostFunction::new(&corpus, 1.0);
        let mut tree = CandidateTree::new();
        tree.insert_level(Key::Two, &cost_fn, 2);
        tree.insert_level(Key::Six, &cost_fn, 2);

        let kept = search_best_paths(&tree, 3);
        let removed = prune(&mut tree, &kept);
        assert!(removed > 0);
        tree.assert_consistent();

        assert_eq!(tree.level(2).len(), kept.len());
        for c in &kept {
            for &id in c.nodes() {
                assert!(tree.contains(id));
            }
        }
        // Every surviving depth-1 node is a prefix of some kept path.
        for &id in tree.level(1) {
            assert!(kept.iter().any(|c| c.nodes()[0] == id));
        }
    }

    #[test]
    fn test_prune_with_nothing_kept_empties_tree() {
        let corpus = CorpusModel::build(b"banana", 2);
        let cost_fn = DefaultCostFunction::new(&corpus, 1.0);
        let mut tree = CandidateTree::new();
        tree.insert_level(Key::Two, &cost_fn, 2);
        let removed = prune(&mut tree, &[]);
        assert_eq!(removed, crate::keypad::alphabet().len());
        assert_eq!(tree.node_count(), 1);
        tree.assert_consistent();
    }

    #[test]
    fn test_prune_is_idempotent() {
        let corpus = CorpusModel::build(b"banana", 2);
        let cost_fn = DefaultCostFunction::new(&corpus, 1.0);
        let mut tree = CandidateTree::new();
        tree.insert_level(Key::Two, &cost_fn, 2);
        tree.insert_level(Key::Six, &cost_fn, 2);
        let kept = search_best_paths(&tree, 2);
        prune(&mut tree, &kept);
        let count = tree.node_count();
        assert_eq!(prune(&mut tree, &kept), 0);
        assert_eq!(tree.node_count(), count);
    }
}
