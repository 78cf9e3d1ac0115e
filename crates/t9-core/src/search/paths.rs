use tracing::{debug, debug_span};

use super::cost::Cost;
use super::tree::{CandidateTree, NodeId};

/// A complete path from depth 1 to a frontier node, with the cumulative
/// cost of its last node.
///
/// Equality compares node sequences only.
#[derive(Debug, Clone)]
pub struct Candidate {
    nodes: Vec<NodeId>,
    cost: Cost,
}

impl Candidate {
    pub fn new(nodes: Vec<NodeId>, cost: Cost) -> Self {
        Self { nodes, cost }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The frontier node this candidate ends at.
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for Candidate {}

/// Collect the `k` cheapest root-to-frontier paths, best first.
///
/// Depth-first over the tree with an explicit stack. Once `k` candidates are
/// held, any subtree whose root already costs at least as much as the worst
/// of them is skipped; costs never decrease with depth. Equal costs keep
/// discovery order.
pub fn search_best_paths(tree: &CandidateTree, k: usize) -> Vec<Candidate> {
    let _span = debug_span!("search_best_paths", k, depth = tree.depth()).entered();
    let mut kept: Vec<Candidate> = Vec::with_capacity(k + 1);
    if k == 0 {
        return kept;
    }

    let root = tree.root();
    let mut path: Vec<NodeId> = Vec::with_capacity(tree.depth());
    // (node, index of the next child to visit)
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    let mut bounded = 0usize;

    while let Some(frame) = stack.last_mut() {
        let (id, next) = *frame;
        let children = tree.children(id);
        let Some(&child) = children.get(next) else {
            stack.pop();
            if id != root {
                path.pop();
            }
            continue;
        };
        frame.1 += 1;

        let cost = tree.cost(child);
        if kept.len() >= k && cost >= kept[k - 1].cost {
            bounded += 1;
            continue;
        }

        path.push(child);
        if tree.children(child).is_empty() {
            insert_top_k(&mut kept, k, Candidate::new(path.clone(), cost));
            path.pop();
        } else {
            stack.push((child, 0));
        }
    }

    debug!(
        kept = kept.len(),
        bounded,
        best_cost = kept.first().map(|c| c.cost.value())
    );
    kept
}

/// Insert into a list sorted ascending by cost, keeping at most `k` entries.
/// Ties go after existing entries.
fn insert_top_k(list: &mut Vec<Candidate>, k: usize, candidate: Candidate) {
    let pos = list.partition_point(|c| c.cost <= candidate.cost);
    if pos >= k {
        return;
    }
    list.insert(pos, candidate);
    if list.len() > k {
        list.pop();
    }
}
