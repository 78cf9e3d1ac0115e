use tracing::{debug, debug_span};

use crate::keypad::{alphabet, Key, Symbol};

use super::cost::{Cost, CostFunction};

/// Stable handle of a candidate-tree node. Slots are recycled after removal,
/// so a handle is only meaningful while its node is alive.
pub type NodeId = usize;

/// Whether a node has been given its level of children yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unexpanded,
    Expanded,
}

#[derive(Debug, Clone)]
pub struct CandidateNode {
    pub symbol: Symbol,
    /// Cumulative cost from the root.
    pub cost: Cost,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub state: NodeState,
    children: Vec<NodeId>,
    /// Position of this node inside `levels[depth]`.
    level_pos: usize,
}

/// Tree of in-progress completions plus its per-depth level index.
///
/// Nodes live in an arena of slots addressed by `NodeId`. `levels[d]` lists
/// every live node at depth `d`. The two structures are only changed together,
/// through `insert_level` and `remove_leaf`.
#[derive(Debug, Clone)]
pub struct CandidateTree {
    slots: Vec<Option<CandidateNode>>,
    free: Vec<NodeId>,
    levels: Vec<Vec<NodeId>>,
    live: usize,
}

const ROOT: NodeId = 0;

impl Default for CandidateTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateTree {
    /// A tree holding only the synthetic root (nothing typed, cost 0).
    pub fn new() -> Self {
        let root = CandidateNode {
            symbol: 0,
            cost: Cost::ZERO,
            parent: None,
            depth: 0,
            state: NodeState::Unexpanded,
            children: Vec::new(),
            level_pos: 0,
        };
        Self {
            slots: vec![Some(root)],
            free: Vec::new(),
            levels: vec![vec![ROOT]],
            live: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Number of keystrokes the tree has grown by.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.live
    }

    pub fn node(&self, id: NodeId) -> Option<&CandidateNode> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn cost(&self, id: NodeId) -> Cost {
        self.node(id).map(|n| n.cost).unwrap_or(Cost::INFINITY)
    }

    /// Live nodes at `depth`, in no particular order.
    pub fn level(&self, depth: usize) -> &[NodeId] {
        self.levels.get(depth).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Grow the tree by one level for `key`.
    ///
    /// Every node at the current deepest level is expanded with one child per
    /// alphabet symbol; the key only influences the children's costs. Returns
    /// the new depth.
    pub fn insert_level(
        &mut self,
        key: Key,
        cost_fn: &dyn CostFunction,
        ngram_length: usize,
    ) -> usize {
        let depth = self.levels.len();
        let _span = debug_span!("insert_level", depth, key = %char::from(key.as_byte())).entered();

        let frontier = self.levels[depth - 1].clone();
        let symbols = alphabet();
        let mut level = Vec::with_capacity(frontier.len() * symbols.len());
        let mut word = Vec::with_capacity(ngram_length);

        for parent in frontier {
            self.context_into(parent, ngram_length.saturating_sub(1), &mut word);
            word.push(0);
            let last = word.len() - 1;
            let parent_cost = self.cost(parent);

            let mut children = Vec::with_capacity(symbols.len());
            for &symbol in symbols {
                word[last] = symbol;
                let cost = parent_cost + cost_fn.transition_cost(key, &word);
                let id = self.alloc(CandidateNode {
                    symbol,
                    cost,
                    parent: Some(parent),
                    depth,
                    state: NodeState::Unexpanded,
                    children: Vec::new(),
                    level_pos: level.len(),
                });
                level.push(id);
                children.push(id);
            }

            if let Some(node) = self.slots[parent].as_mut() {
                debug_assert_eq!(node.state, NodeState::Unexpanded);
                node.state = NodeState::Expanded;
                node.children = children;
            }
        }

        debug!(added = level.len(), nodes = self.live);
        self.levels.push(level);
        depth
    }

    /// Detach and free a leaf. Returns its parent, or `None` when `id` is the
    /// root, still has children, or is not alive.
    pub fn remove_leaf(&mut self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        if id == ROOT || !node.children.is_empty() {
            return None;
        }
        let (parent, depth, pos) = (node.parent?, node.depth, node.level_pos);

        if let Some(p) = self.slots[parent].as_mut() {
            if let Some(i) = p.children.iter().position(|&c| c == id) {
                p.children.remove(i);
            }
        }

        let bucket = &mut self.levels[depth];
        bucket.swap_remove(pos);
        if let Some(&moved) = bucket.get(pos) {
            if let Some(m) = self.slots[moved].as_mut() {
                m.level_pos = pos;
            }
        }

        self.slots[id] = None;
        self.free.push(id);
        self.live -= 1;
        Some(parent)
    }

    /// Remove `leaf` and then each ancestor that became a leaf because of it,
    /// stopping at the first ancestor that still has children. Returns the
    /// number of nodes removed.
    pub fn remove_branch(&mut self, leaf: NodeId) -> usize {
        let mut removed = 0;
        let mut current = leaf;
        while let Some(parent) = self.remove_leaf(current) {
            removed += 1;
            current = parent;
        }
        removed
    }

    /// Nodes from depth 1 down to `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ROOT {
                break;
            }
            let Some(node) = self.node(cur) else {
                break;
            };
            path.push(cur);
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Symbols along a node path.
    pub fn flatten(&self, path: &[NodeId]) -> Vec<Symbol> {
        path.iter()
            .filter_map(|&id| self.node(id).map(|n| n.symbol))
            .collect()
    }

    /// Fill `buf` with the last `limit` symbols on the path ending at `id`.
    fn context_into(&self, id: NodeId, limit: usize, buf: &mut Vec<Symbol>) {
        buf.clear();
        let mut current = id;
        while buf.len() < limit && current != ROOT {
            let Some(node) = self.node(current) else {
                break;
            };
            buf.push(node.symbol);
            match node.parent {
                Some(p) => current = p,
                None => break,
            }
        }
        buf.reverse();
    }

    fn alloc(&mut self, node: CandidateNode) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Cross-check the level index against the tree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen = 0;
        for (depth, bucket) in self.levels.iter().enumerate() {
            for (pos, &id) in bucket.iter().enumerate() {
                let node = self.node(id).expect("indexed node must be alive");
                assert_eq!(node.depth, depth, "node {id} indexed at wrong depth");
                assert_eq!(node.level_pos, pos, "node {id} has stale level position");
                if let Some(parent) = node.parent {
                    assert!(self.children(parent).contains(&id));
                    assert_eq!(self.node(parent).unwrap().depth + 1, depth);
                }
                seen += 1;
            }
        }
        assert_eq!(seen, self.live);
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(alive, self.live);
    }
}
