//! Incremental best-first search over keypad input.
//!
//! The candidate tree grows one uniform level per keystroke. After each level
//! the path tracker rebuilds the K cheapest root-to-frontier paths with
//! branch-and-bound, and the pruner drops every frontier branch outside that
//! set so the next expansion only touches surviving nodes.

pub mod cost;
mod paths;
mod prune;
mod tree;

#[cfg(test)]
mod tests;

pub use cost::{Cost, CostFunction, DefaultCostFunction};
pub use paths::{search_best_paths, Candidate};
pub use prune::prune;
pub use tree::{CandidateNode, CandidateTree, NodeId, NodeState};
