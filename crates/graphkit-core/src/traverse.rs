//! Single-source depth-first and breadth-first traversal.
//!
//! Both walks are iterative and allocate a fresh [`TraversalState`] per
//! call, so repeated traversals of the same graph never observe each
//! other's visited marks. Nodes unreachable from the start are not visited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::{debug, instrument};

use crate::graph::{Graph, Node, NodeKey};

// ---------------------------------------------------------------------------
// TraversalState
// ---------------------------------------------------------------------------

/// Per-search scratch state: visited marks, tentative distances, and
/// discovery parents.
///
/// A new state reads as "nothing visited, every distance +infinity, no
/// parents", which is the reset every traversal and search starts from.
#[derive(Debug, Clone)]
pub struct TraversalState<K> {
    visited: BTreeSet<K>,
    distance: BTreeMap<K, f64>,
    parent: BTreeMap<K, K>,
}

impl<K: NodeKey> Default for TraversalState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> TraversalState<K> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visited: BTreeSet::new(),
            distance: BTreeMap::new(),
            parent: BTreeMap::new(),
        }
    }

    /// Mark `id` visited. Returns `false` if it already was.
    pub fn mark_visited(&mut self, id: K) -> bool {
        self.visited.insert(id)
    }

    #[must_use]
    pub fn is_visited(&self, id: &K) -> bool {
        self.visited.contains(id)
    }

    /// Tentative distance of `id`, `+inf` when never set.
    #[must_use]
    pub fn distance(&self, id: &K) -> f64 {
        self.distance.get(id).copied().unwrap_or(f64::INFINITY)
    }

    pub fn set_distance(&mut self, id: K, distance: f64) {
        self.distance.insert(id, distance);
    }

    #[must_use]
    pub fn parent(&self, id: &K) -> Option<&K> {
        self.parent.get(id)
    }

    pub fn set_parent(&mut self, id: K, parent: K) {
        self.parent.insert(id, parent);
    }

    /// Walk parents back from `target` and return the path root-first.
    #[must_use]
    pub fn path_to(&self, target: &K) -> Vec<K> {
        let mut path = vec![target.clone()];
        let mut cursor = target;
        while let Some(parent) = self.parent.get(cursor) {
            // Parent links form a tree rooted at the search start; a repeat
            // would mean a corrupted state.
            if path.len() > self.parent.len() {
                break;
            }
            path.push(parent.clone());
            cursor = parent;
        }
        path.reverse();
        path
    }
}

// ---------------------------------------------------------------------------
// DFS / BFS
// ---------------------------------------------------------------------------

impl<K: NodeKey, D> Graph<K, D> {
    /// Depth-first traversal from `start`, returning ids in visit order.
    #[must_use]
    pub fn dfs(&self, start: &K) -> Vec<K> {
        self.dfs_with(start, |_| {})
    }

    /// Depth-first traversal calling `visit` on each node as it is reached.
    ///
    /// Neighbors are pushed in reverse so they pop in key order, matching a
    /// recursive left-to-right DFS. Returns an empty list when `start` is
    /// not in the graph.
    #[instrument(skip(self, visit), fields(start = ?start))]
    pub fn dfs_with<F>(&self, start: &K, mut visit: F) -> Vec<K>
    where
        F: FnMut(&Node<K, D>),
    {
        if !self.contains_node(start) {
            return Vec::new();
        }

        let mut state = TraversalState::new();
        let mut stack = vec![start.clone()];
        let mut order = Vec::new();

        while let Some(current) = stack.pop() {
            if !state.mark_visited(current.clone()) {
                continue;
            }
            if let Some(node) = self.node(&current) {
                visit(node);
            }
            for neighbor in self.iter_neighbors(&current).rev() {
                if !state.is_visited(neighbor) {
                    stack.push(neighbor.clone());
                }
            }
            order.push(current);
        }

        debug!(visited = order.len(), "dfs complete");
        order
    }

    /// Breadth-first traversal from `start`, returning ids in level order.
    #[must_use]
    pub fn bfs(&self, start: &K) -> Vec<K> {
        self.bfs_with(start, |_| {})
    }

    /// Breadth-first traversal calling `visit` on each node as it is
    /// dequeued. Returns an empty list when `start` is not in the graph.
    #[instrument(skip(self, visit), fields(start = ?start))]
    pub fn bfs_with<F>(&self, start: &K, mut visit: F) -> Vec<K>
    where
        F: FnMut(&Node<K, D>),
    {
        if !self.contains_node(start) {
            return Vec::new();
        }

        let mut state = TraversalState::new();
        state.mark_visited(start.clone());
        let mut queue = VecDeque::from([start.clone()]);
        let mut order = Vec::new();

        while let Some(current) = queue.pop_front() {
            if let Some(node) = self.node(&current) {
                visit(node);
            }
            for neighbor in self.iter_neighbors(&current) {
                if state.mark_visited(neighbor.clone()) {
                    queue.push_back(neighbor.clone());
                }
            }
            order.push(current);
        }

        debug!(visited = order.len(), "bfs complete");
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Graph<&'static str> {
        // A -> B -> D
        // A -> C -> E
        let mut graph = Graph::directed();
        graph.add_edge("A", "B");
        graph.add_edge("A", "C");
        graph.add_edge("B", "D");
        graph.add_edge("C", "E");
        graph
    }

    #[test]
    fn dfs_visits_left_to_right_depth_first() {
        assert_eq!(tree().dfs(&"A"), vec!["A", "B", "D", "C", "E"]);
    }

    #[test]
    fn bfs_visits_level_order() {
        assert_eq!(tree().bfs(&"A"), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn traversal_skips_unreachable_nodes() {
        let mut graph = tree();
        graph.add_node("island");
        assert!(!graph.dfs(&"A").contains(&"island"));
        assert!(!graph.bfs(&"A").contains(&"island"));
        assert_eq!(graph.dfs(&"island"), vec!["island"]);
    }

    #[test]
    fn absent_start_yields_empty() {
        let graph = tree();
        assert!(graph.dfs(&"missing").is_empty());
        assert!(graph.bfs(&"missing").is_empty());
    }

    #[test]
    fn repeated_traversals_are_independent() {
        let graph = tree();
        let first = graph.dfs(&"A");
        let second = graph.dfs(&"A");
        assert_eq!(first, second);
        assert_eq!(graph.bfs(&"B"), vec!["B", "D"]);
        assert_eq!(graph.bfs(&"A").len(), 5);
    }

    #[test]
    fn dfs_handles_cycles() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");
        graph.add_edge("C", "A");
        assert_eq!(graph.dfs(&"B"), vec!["B", "C", "A"]);
    }

    #[test]
    fn visitor_sees_payloads() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_node_with("A", json!(1));
        graph.add_node_with("B", json!(2));
        graph.add_edge("A", "B");

        let mut seen = Vec::new();
        graph.bfs_with(&"A", |node| seen.push(node.data.clone()));
        assert_eq!(seen, vec![Some(json!(1)), Some(json!(2))]);
    }

    #[test]
    fn undirected_traversal_follows_both_directions() {
        let mut graph: Graph<&str> = Graph::undirected();
        graph.add_edge("B", "A");
        graph.add_edge("C", "B");
        assert_eq!(graph.dfs(&"A"), vec!["A", "B", "C"]);
    }

    #[test]
    fn state_path_walks_parents() {
        let mut state = TraversalState::new();
        state.set_parent("C", "B");
        state.set_parent("B", "A");
        assert_eq!(state.path_to(&"C"), vec!["A", "B", "C"]);
        assert_eq!(state.path_to(&"A"), vec!["A"]);
        assert!(state.distance(&"A").is_infinite());
    }
}
