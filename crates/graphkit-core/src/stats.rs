//! Summary statistics for a graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: edge count is the number of edge
//!   records, so parallel edges are counted separately.
//! - **density**: `edge_count / max_edges`, where `max_edges` is
//!   `n * (n - 1)` for directed graphs and `n * (n - 1) / 2` for undirected
//!   ones. Zero for graphs with fewer than two nodes. Parallel edges can
//!   push density above 1.0.
//! - **has_cycles**: see [`Graph::has_cycle`].
//! - **component_count**: weakly connected components.
//! - **isolated_node_count**: nodes with no edge records at all.
//! - **max_in_degree** / **max_out_degree**: maxima of
//!   [`Graph::in_degree`] and [`Graph::out_degree`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeKey};

/// Summary statistics computed by [`Graph::stats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edge records.
    pub edge_count: usize,
    pub directed: bool,
    pub weighted: bool,
    /// Ratio of edge records to the maximum possible simple edges.
    pub density: f64,
    /// Whether any cycle exists (directed or undirected sense).
    pub has_cycles: bool,
    /// Number of weakly connected components.
    pub component_count: usize,
    /// Nodes that no edge record touches.
    pub isolated_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn from_graph<K: NodeKey, D>(graph: &Graph<K, D>) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let touched: BTreeSet<&K> = graph
            .iter_edges()
            .flat_map(|edge| [&edge.from, &edge.to])
            .collect();
        let isolated_node_count = graph.node_ids().filter(|id| !touched.contains(id)).count();

        let max_in_degree = graph
            .node_ids()
            .map(|id| graph.in_degree(id))
            .max()
            .unwrap_or(0);
        let max_out_degree = graph
            .node_ids()
            .map(|id| graph.out_degree(id))
            .max()
            .unwrap_or(0);

        Self {
            node_count,
            edge_count,
            directed: graph.is_directed(),
            weighted: graph.is_weighted(),
            density: compute_density(node_count, edge_count, graph.is_directed()),
            has_cycles: graph.has_cycle(),
            component_count: graph.connected_components().len(),
            isolated_node_count,
            max_in_degree,
            max_out_degree,
        }
    }

    /// `true` when the graph has no edge records.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

impl<K: NodeKey, D> Graph<K, D> {
    /// Summary statistics; see [`GraphStats`].
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats::from_graph(self)
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize, directed: bool) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let ordered_pairs = (node_count * (node_count - 1)) as f64;
    let max_edges = if directed {
        ordered_pairs
    } else {
        ordered_pairs / 2.0
    };
    edge_count as f64 / max_edges
}
