//! Topological ordering, cycle detection, and critical path analysis.
//!
//! # Algorithms
//!
//! - **Topological sort**: Kahn's algorithm over adjacency in-degrees. The
//!   zero-in-degree queue is seeded in key order, so the result is
//!   deterministic. A cycle leaves nodes with non-zero in-degree, which shows
//!   up as a short result and is reported as `None`.
//! - **Cycle check**: directed graphs reuse Kahn; undirected graphs run a
//!   parent-tracking DFS from every unvisited node. Meeting an already
//!   visited neighbor that is not the node we came from closes a cycle.
//! - **Incremental check**: [`Graph::would_create_cycle`] searches from the
//!   target of a prospective edge back to its source.
//! - **Critical path**: the longest (heaviest) path through a DAG, computed
//!   by relaxing edges in topological order.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::{DEFAULT_WEIGHT, Graph, NodeKey, Orientation};
use crate::traverse::TraversalState;

/// The longest weighted chain through a DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPath<K> {
    /// Node ids on the chain, sources first. Empty for an empty graph.
    pub path: Vec<K>,
    /// Sum of edge costs along `path`.
    pub length: f64,
}

impl<K: NodeKey, D> Graph<K, D> {
    /// Kahn's topological order.
    ///
    /// Returns `Ok(None)` when the graph contains a cycle (including a
    /// self-loop).
    ///
    /// # Errors
    ///
    /// [`GraphError::RequiresDirected`] on an undirected graph.
    #[instrument(skip(self), fields(nodes = self.node_count()))]
    pub fn topological_sort(&self) -> Result<Option<Vec<K>>> {
        self.require_directed("topological_sort")?;
        let order = self.kahn_order();
        debug!(acyclic = order.is_some(), "topological sort complete");
        Ok(order)
    }

    pub(crate) fn kahn_order(&self) -> Option<Vec<K>> {
        let mut in_degree: BTreeMap<&K, usize> = self.node_ids().map(|id| (id, 0)).collect();
        for id in self.node_ids() {
            for target in self.iter_neighbors(id) {
                *in_degree.entry(target).or_insert(0) += 1;
            }
        }

        let mut queue: VecDeque<&K> = in_degree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .collect();
        let mut order = Vec::with_capacity(self.node_count());

        while let Some(current) = queue.pop_front() {
            order.push(current.clone());
            for neighbor in self.iter_neighbors(current) {
                if let Some(degree) = in_degree.get_mut(neighbor) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        (order.len() == self.node_count()).then_some(order)
    }

    /// Whether the graph contains any cycle.
    ///
    /// Directed graphs: true exactly when [`Graph::topological_sort`] would
    /// return `None`. Undirected graphs: true when some connected component
    /// has more edges than a spanning tree; a self-loop counts, parallel
    /// edges do not (adjacency dedupes them).
    #[must_use]
    #[instrument(skip(self), fields(nodes = self.node_count()))]
    pub fn has_cycle(&self) -> bool {
        let cyclic = match self.orientation() {
            Orientation::Directed => self.kahn_order().is_none(),
            Orientation::Undirected => self.has_undirected_cycle(),
        };
        debug!(cyclic, "cycle check complete");
        cyclic
    }

    fn has_undirected_cycle(&self) -> bool {
        let mut visited: BTreeSet<&K> = BTreeSet::new();

        for root in self.node_ids() {
            if !visited.insert(root) {
                continue;
            }
            let mut stack: Vec<(&K, Option<&K>)> = vec![(root, None)];

            while let Some((node, came_from)) = stack.pop() {
                for neighbor in self.iter_neighbors(node) {
                    if came_from == Some(neighbor) {
                        continue;
                    }
                    if !visited.insert(neighbor) {
                        return true;
                    }
                    stack.push((neighbor, Some(node)));
                }
            }
        }

        false
    }

    /// The cycle that adding `from -> to` would close, if any.
    ///
    /// The path reads `from -> to -> ... -> from`. A self-loop yields
    /// `[from, from]`. Returns `None` when the edge already exists (no new
    /// cycle is created) or when `from` is unreachable from `to`.
    #[must_use]
    #[instrument(skip(self), fields(from = ?from, to = ?to))]
    pub fn would_create_cycle(&self, from: &K, to: &K) -> Option<Vec<K>> {
        if from == to {
            return Some(vec![from.clone(), from.clone()]);
        }
        if self.has_edge(from, to) || !self.contains_node(to) {
            return None;
        }

        let mut state = TraversalState::new();
        state.mark_visited(to.clone());
        let mut queue = VecDeque::from([to]);

        while let Some(current) = queue.pop_front() {
            if current == from {
                let back = state.path_to(from);
                let mut cycle = Vec::with_capacity(back.len() + 1);
                cycle.push(from.clone());
                cycle.extend(back);
                debug!(len = cycle.len() - 1, "edge would close a cycle");
                return Some(cycle);
            }
            for neighbor in self.iter_neighbors(current) {
                if state.mark_visited(neighbor.clone()) {
                    state.set_parent(neighbor.clone(), current.clone());
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }

    /// Longest weighted path through the graph.
    ///
    /// Edge costs follow the same rules as [`Graph::dijkstra`]: unit cost on
    /// unweighted graphs, cheapest parallel record otherwise. Ties between
    /// equally long chains resolve to the one ending earliest in
    /// topological order.
    ///
    /// # Errors
    ///
    /// - [`GraphError::RequiresDirected`] on an undirected graph.
    /// - [`GraphError::CycleDetected`] when the graph is not a DAG.
    /// - [`GraphError::InvalidWeight`] for negative or non-finite weights.
    #[instrument(skip(self), fields(nodes = self.node_count()))]
    pub fn critical_path(&self) -> Result<CriticalPath<K>> {
        self.require_directed("critical_path")?;
        let order = self.kahn_order().ok_or(GraphError::CycleDetected {
            operation: "critical_path",
        })?;
        let costs = self.edge_costs()?;

        // longest[id] = (length of heaviest chain ending at id, predecessor)
        let mut longest: BTreeMap<&K, (f64, Option<&K>)> =
            order.iter().map(|id| (id, (0.0, None))).collect();

        for node in &order {
            let reached = longest.get(node).map_or(0.0, |&(length, _)| length);
            for neighbor in self.iter_neighbors(node) {
                let cost = costs
                    .get(node)
                    .and_then(|targets| targets.get(neighbor))
                    .copied()
                    .unwrap_or(DEFAULT_WEIGHT);
                if let Some(entry) = longest
                    .get_mut(neighbor)
                    .filter(|entry| reached + cost > entry.0)
                {
                    *entry = (reached + cost, Some(node));
                }
            }
        }

        let mut end: Option<(&K, f64)> = None;
        for node in &order {
            let length = longest.get(node).map_or(0.0, |&(length, _)| length);
            if end.is_none_or(|(_, best)| length > best) {
                end = Some((node, length));
            }
        }

        let Some((tail, length)) = end else {
            return Ok(CriticalPath {
                path: Vec::new(),
                length: 0.0,
            });
        };

        let mut path = vec![tail.clone()];
        let mut cursor = tail;
        while let Some(&(_, Some(previous))) = longest.get(cursor) {
            path.push(previous.clone());
            cursor = previous;
        }
        path.reverse();

        debug!(len = path.len(), length, "critical path found");
        Ok(CriticalPath { path, length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphOptions;

    fn diamond() -> Graph<&'static str> {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B");
        graph.add_edge("A", "C");
        graph.add_edge("B", "D");
        graph.add_edge("C", "D");
        graph
    }

    #[test]
    fn diamond_sorts_sources_first() {
        let order = diamond()
            .topological_sort()
            .expect("directed")
            .expect("acyclic");
        assert_eq!(order, vec!["A", "B", "C", "D"]);
        assert!(!diamond().has_cycle());
    }

    #[test]
    fn back_edge_makes_sort_fail() {
        let mut graph = diamond();
        graph.add_edge("D", "A");
        assert_eq!(graph.topological_sort().expect("directed"), None);
        assert!(graph.has_cycle());
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("A", "A");
        assert!(graph.has_cycle());
        assert_eq!(graph.topological_sort().expect("directed"), None);
    }

    #[test]
    fn topological_sort_requires_directed() {
        let graph: Graph<&str> = Graph::undirected();
        let err = graph.topological_sort().expect_err("undirected");
        assert!(matches!(
            err,
            GraphError::RequiresDirected {
                operation: "topological_sort"
            }
        ));
    }

    #[test]
    fn empty_graph_sorts_to_empty() {
        let graph: Graph<&str> = Graph::directed();
        assert_eq!(graph.topological_sort().expect("directed"), Some(vec![]));
        assert!(!graph.has_cycle());
    }

    #[test]
    fn undirected_triangle_then_break() {
        let mut graph: Graph<&str> = Graph::undirected();
        graph.add_edge("X", "Y");
        graph.add_edge("Y", "Z");
        graph.add_edge("Z", "X");
        assert!(graph.has_cycle());

        graph.remove_edge(&"Z", &"X");
        assert!(!graph.has_cycle());
    }

    #[test]
    fn undirected_parallel_edges_are_not_a_cycle() {
        let mut graph: Graph<&str> = Graph::undirected();
        graph.add_edge("X", "Y");
        graph.add_edge("Y", "X");
        assert!(!graph.has_cycle());
    }

    #[test]
    fn undirected_cycle_in_second_component() {
        let mut graph: Graph<&str> = Graph::undirected();
        graph.add_edge("A", "B");
        graph.add_edge("P", "Q");
        graph.add_edge("Q", "R");
        graph.add_edge("R", "P");
        assert!(graph.has_cycle());
    }

    #[test]
    fn undirected_self_loop_is_a_cycle() {
        let mut graph: Graph<&str> = Graph::undirected();
        graph.add_edge("A", "A");
        assert!(graph.has_cycle());
    }

    #[test]
    fn would_create_cycle_reports_path() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");

        let cycle = graph.would_create_cycle(&"C", &"A").expect("closes a cycle");
        assert_eq!(cycle, vec!["C", "A", "B", "C"]);
        assert_eq!(graph.would_create_cycle(&"A", &"C"), None);
        assert_eq!(graph.would_create_cycle(&"A", &"B"), None);
        assert_eq!(graph.would_create_cycle(&"B", &"B"), Some(vec!["B", "B"]));
        assert_eq!(graph.would_create_cycle(&"C", &"new"), None);
    }

    #[test]
    fn critical_path_follows_heaviest_chain() {
        let mut graph: Graph<&str> = Graph::new(GraphOptions::directed().weighted());
        graph.add_weighted_edge("start", "design", 3.0);
        graph.add_weighted_edge("start", "docs", 1.0);
        graph.add_weighted_edge("design", "build", 5.0);
        graph.add_weighted_edge("docs", "build", 1.0);
        graph.add_weighted_edge("build", "ship", 2.0);

        let critical = graph.critical_path().expect("dag");
        assert_eq!(critical.path, vec!["start", "design", "build", "ship"]);
        assert!((critical.length - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn critical_path_unweighted_counts_edges() {
        let critical = diamond().critical_path().expect("dag");
        assert_eq!(critical.path, vec!["A", "B", "D"]);
        assert!((critical.length - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn critical_path_rejects_cycles_and_undirected() {
        let mut cyclic = diamond();
        cyclic.add_edge("D", "A");
        assert!(matches!(
            cyclic.critical_path(),
            Err(GraphError::CycleDetected { .. })
        ));

        let undirected: Graph<&str> = Graph::undirected();
        assert!(matches!(
            undirected.critical_path(),
            Err(GraphError::RequiresDirected { .. })
        ));
    }

    #[test]
    fn critical_path_of_empty_graph_is_empty() {
        let graph: Graph<&str> = Graph::directed();
        let critical = graph.critical_path().expect("dag");
        assert!(critical.path.is_empty());
        assert!(critical.length.abs() < f64::EPSILON);
    }
}
