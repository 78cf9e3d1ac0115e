use super::*;
use crate::search::Cost;

#[test]
fn test_banana_ranks_an_above_bo() {
    let corpus = CorpusModel::build(b"banana", 2);
    let (tree, kept) = run_keys(&corpus, b"26", 5);
    let texts = texts(&tree, &kept);

    let an = texts.iter().position(|t| t == b"an").unwrap();
    assert_eq!(an, 0);
    assert!((kept[0].cost().value() - (-(0.4f64).ln())).abs() < 1e-12);
    if let Some(bo) = texts.iter().position(|t| t == b"bo") {
        assert!(an < bo);
    }
}

#[test]
fn test_kept_sorted_and_bounded() {
    let corpus = CorpusModel::build(b"the cat sat on the mat", 2);
    let (_, kept) = run_keys(&corpus, b"843", 4);
    assert_eq!(kept.len(), 4);
    for pair in kept.windows(2) {
        assert!(pair[0].cost() <= pair[1].cost());
    }
}

#[test]
fn test_finds_training_word() {
    let corpus = CorpusModel::build(b"the cat sat on the mat", 3);
    let (tree, kept) = run_keys(&corpus, b"843", 3);
    let texts = texts(&tree, &kept);
    assert_eq!(texts[0], b"the".to_vec());
    assert!(kept[0].cost().is_finite());
}

#[test]
fn test_infinite_candidates_still_returned() {
    // Nothing in the corpus can be typed with key 9.
    let corpus = CorpusModel::build(b"banana", 2);
    let (tree, kept) = run_keys(&corpus, b"9", 3);
    assert_eq!(kept.len(), 3);
    assert!(kept.iter().all(|c| c.cost() == Cost::INFINITY));
    // Ties keep alphabet order.
    let texts = texts(&tree, &kept);
    assert_eq!(texts, vec![b"0".to_vec(), b".".to_vec(), b",".to_vec()]);
}

#[test]
fn test_pruned_tree_only_holds_kept_frontier() {
    let corpus = CorpusModel::build(b"banana bandana", 2);
    let (tree, kept) = run_keys(&corpus, b"2262", 3);
    tree.assert_consistent();
    assert_eq!(tree.depth(), 4);
    assert_eq!(tree.level(4).len(), kept.len());
    for c in &kept {
        assert_eq!(c.len(), 4);
        assert!(tree.level(4).contains(&c.last().unwrap()));
    }
}

#[test]
fn test_search_without_insert_is_idempotent() {
    let corpus = CorpusModel::build(b"banana bandana", 2);
    let (tree, kept) = run_keys(&corpus, b"226", 4);
    let again = search_best_paths(&tree, 4);
    assert_eq!(kept, again);
    let costs: Vec<Cost> = kept.iter().map(Candidate::cost).collect();
    let again_costs: Vec<Cost> = again.iter().map(Candidate::cost).collect();
    assert_eq!(costs, again_costs);
}

#[test]
fn test_unigram_model_prunes_from_first_key() {
    let corpus = CorpusModel::build(b"abba", 1);
    let (tree, kept) = run_keys(&corpus, b"22", 2);
    // P(a) = P(b) = 0.5 everywhere.
    assert!(kept.iter().all(|c| c.cost().is_finite()));
    assert_eq!(texts(&tree, &kept), vec![b"aa".to_vec(), b"ab".to_vec()]);
    // "b" at depth 1 lost all its children.
    assert_eq!(tree.level(1).len(), 1);
    assert_eq!(tree.level(2).len(), 2);
}
