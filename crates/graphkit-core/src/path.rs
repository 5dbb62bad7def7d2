//! Weighted shortest path (Dijkstra).
//!
//! # Edge costs
//!
//! | Graph       | Cost of `u -> v` |
//! |-------------|------------------|
//! | unweighted  | `1` for every edge, so the search degenerates to hop count. |
//! | weighted    | the cheapest weight among parallel records `u -> v`. |
//!
//! Undirected records cost the same in both directions. Weighted graphs
//! with a negative, NaN or infinite weight are rejected up front with
//! [`GraphError::InvalidWeight`]; Dijkstra's greedy settlement is only
//! correct for non-negative costs.
//!
//! # Frontier
//!
//! Tentative distances live in a binary min-heap. Stale entries (a node
//! pushed again after its distance improved) are skipped on pop, which keeps
//! the search `O((V + E) log V)`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::{DEFAULT_WEIGHT, Graph, NodeKey, Orientation};
use crate::traverse::TraversalState;

/// Cost of traversing `from -> to`, keyed `from` then `to`.
pub(crate) type CostTable<'a, K> = BTreeMap<&'a K, BTreeMap<&'a K, f64>>;

/// A minimum-weight route between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath<K> {
    /// Node ids from start to end, inclusive.
    pub path: Vec<K>,
    /// Sum of edge costs along `path`.
    pub distance: f64,
}

impl<K> ShortestPath<K> {
    /// Number of edges traversed.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Heap entry
// ---------------------------------------------------------------------------

/// Min-heap entry: smallest distance first, ties broken by key order.
#[derive(Debug)]
struct Frontier<'a, K> {
    distance: f64,
    node: &'a K,
}

impl<K: Ord> Ord for Frontier<'_, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl<K: Ord> PartialOrd for Frontier<'_, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> PartialEq for Frontier<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for Frontier<'_, K> {}

// ---------------------------------------------------------------------------
// Dijkstra
// ---------------------------------------------------------------------------

impl<K: NodeKey, D> Graph<K, D> {
    /// Minimum-weight path from `start` to `end`.
    ///
    /// Returns `Ok(None)` when either endpoint is absent or `end` is
    /// unreachable. `start == end` yields a single-node path of distance 0.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidWeight`] if the graph is weighted and any edge
    /// carries a negative or non-finite weight.
    #[instrument(skip(self), fields(start = ?start, end = ?end))]
    pub fn dijkstra(&self, start: &K, end: &K) -> Result<Option<ShortestPath<K>>> {
        let costs = self.edge_costs()?;

        if !self.contains_node(start) || !self.contains_node(end) {
            return Ok(None);
        }

        let mut state = TraversalState::new();
        let mut frontier = BinaryHeap::new();
        state.set_distance(start.clone(), 0.0);
        frontier.push(Frontier {
            distance: 0.0,
            node: start,
        });

        while let Some(Frontier { distance, node }) = frontier.pop() {
            if !state.mark_visited(node.clone()) {
                continue;
            }
            if node == end {
                break;
            }

            for neighbor in self.iter_neighbors(node) {
                if state.is_visited(neighbor) {
                    continue;
                }
                let cost = costs
                    .get(node)
                    .and_then(|targets| targets.get(neighbor))
                    .copied()
                    .unwrap_or(DEFAULT_WEIGHT);
                let candidate = distance + cost;
                if candidate < state.distance(neighbor) {
                    state.set_distance(neighbor.clone(), candidate);
                    state.set_parent(neighbor.clone(), node.clone());
                    frontier.push(Frontier {
                        distance: candidate,
                        node: neighbor,
                    });
                }
            }
        }

        let distance = state.distance(end);
        if distance.is_infinite() {
            debug!("end unreachable");
            return Ok(None);
        }

        let path = state.path_to(end);
        debug!(hops = path.len().saturating_sub(1), distance, "shortest path found");
        Ok(Some(ShortestPath { path, distance }))
    }

    /// Per-pair traversal cost derived from the edge list.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidWeight`] for a negative or non-finite weight on
    /// a weighted graph.
    pub(crate) fn edge_costs(&self) -> Result<CostTable<'_, K>> {
        let weighted = self.is_weighted();
        let undirected = self.orientation() == Orientation::Undirected;
        let mut costs: CostTable<'_, K> = BTreeMap::new();

        for edge in self.iter_edges() {
            let cost = if weighted {
                if !edge.weight.is_finite() || edge.weight < 0.0 {
                    return Err(GraphError::InvalidWeight {
                        from: format!("{:?}", edge.from),
                        to: format!("{:?}", edge.to),
                        weight: edge.weight,
                    });
                }
                edge.weight
            } else {
                DEFAULT_WEIGHT
            };

            insert_cheapest(&mut costs, &edge.from, &edge.to, cost);
            if undirected {
                insert_cheapest(&mut costs, &edge.to, &edge.from, cost);
            }
        }

        Ok(costs)
    }
}

fn insert_cheapest<'a, K: Ord>(costs: &mut CostTable<'a, K>, from: &'a K, to: &'a K, cost: f64) {
    costs
        .entry(from)
        .or_default()
        .entry(to)
        .and_modify(|current| *current = current.min(cost))
        .or_insert(cost);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphOptions;

    fn weighted_directed() -> Graph<&'static str> {
        Graph::new(GraphOptions::directed().weighted())
    }

    #[test]
    fn picks_cheaper_two_hop_route() {
        let mut graph = weighted_directed();
        graph.add_weighted_edge("A", "B", 4.0);
        graph.add_weighted_edge("A", "C", 1.0);
        graph.add_weighted_edge("C", "B", 1.0);

        let found = graph.dijkstra(&"A", &"B").expect("valid").expect("reachable");
        assert_eq!(found.path, vec!["A", "C", "B"]);
        assert!((found.distance - 2.0).abs() < f64::EPSILON);
        assert_eq!(found.hops(), 2);
    }

    #[test]
    fn unweighted_graph_counts_hops() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_weighted_edge("A", "B", 4.0);
        graph.add_weighted_edge("A", "C", 1.0);
        graph.add_weighted_edge("C", "B", 1.0);

        let found = graph.dijkstra(&"A", &"B").expect("valid").expect("reachable");
        assert_eq!(found.path, vec!["A", "B"]);
        assert!((found.distance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unreachable_and_absent_yield_none() {
        let mut graph = weighted_directed();
        graph.add_edge("A", "B");
        graph.add_node("C");

        assert!(graph.dijkstra(&"A", &"C").expect("valid").is_none());
        assert!(graph.dijkstra(&"B", &"A").expect("valid").is_none());
        assert!(graph.dijkstra(&"A", &"missing").expect("valid").is_none());
    }

    #[test]
    fn start_equals_end() {
        let mut graph = weighted_directed();
        graph.add_node("A");
        let found = graph.dijkstra(&"A", &"A").expect("valid").expect("trivial");
        assert_eq!(found.path, vec!["A"]);
        assert!(found.distance.abs() < f64::EPSILON);
    }

    #[test]
    fn parallel_edges_use_cheapest_record() {
        let mut graph = weighted_directed();
        graph.add_weighted_edge("A", "B", 5.0);
        graph.add_weighted_edge("A", "B", 2.0);

        let found = graph.dijkstra(&"A", &"B").expect("valid").expect("reachable");
        assert!((found.distance - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn undirected_edges_cost_the_same_both_ways() {
        let mut graph: Graph<&str> = Graph::new(GraphOptions::undirected().weighted());
        graph.add_weighted_edge("A", "B", 3.0);
        graph.add_weighted_edge("C", "B", 2.0);

        let found = graph.dijkstra(&"C", &"A").expect("valid").expect("reachable");
        assert_eq!(found.path, vec!["C", "B", "A"]);
        assert!((found.distance - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut graph = weighted_directed();
        graph.add_weighted_edge("A", "B", -1.0);

        let err = graph.dijkstra(&"A", &"B").expect_err("negative weight");
        assert!(matches!(err, GraphError::InvalidWeight { weight, .. } if weight < 0.0));
    }

    #[test]
    fn nan_weight_is_rejected() {
        let mut graph = weighted_directed();
        graph.add_weighted_edge("A", "B", f64::NAN);
        assert!(graph.dijkstra(&"A", &"B").is_err());
    }

    #[test]
    fn negative_weight_ignored_when_unweighted() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_weighted_edge("A", "B", -1.0);
        let found = graph.dijkstra(&"A", &"B").expect("valid").expect("reachable");
        assert!((found.distance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_weight_edges_are_allowed() {
        let mut graph = weighted_directed();
        graph.add_weighted_edge("A", "B", 0.0);
        graph.add_weighted_edge("B", "C", 0.0);
        let found = graph.dijkstra(&"A", &"C").expect("valid").expect("reachable");
        assert_eq!(found.path, vec!["A", "B", "C"]);
        assert!(found.distance.abs() < f64::EPSILON);
    }
}
