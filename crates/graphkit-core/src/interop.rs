//! Conversion into [`petgraph`] graphs.
//!
//! Each node becomes one petgraph node (in key order, weight = the key) and
//! each edge record becomes one petgraph edge (weight = the record's
//! weight), so parallel edges survive the conversion. The returned index
//! map translates keys to petgraph `NodeIndex` values.

use std::collections::BTreeMap;

use petgraph::EdgeType;
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

use crate::graph::{Graph, NodeKey};

/// A petgraph graph plus the key → index mapping used to build it.
#[derive(Debug, Clone)]
pub struct PetgraphExport<K, Ty: EdgeType> {
    pub graph: petgraph::Graph<K, f64, Ty>,
    pub node_map: BTreeMap<K, NodeIndex>,
}

impl<K: Ord, Ty: EdgeType> PetgraphExport<K, Ty> {
    /// Look up the `NodeIndex` for a key.
    #[must_use]
    pub fn node_index(&self, id: &K) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }
}

impl<K: NodeKey, D> Graph<K, D> {
    /// Export as a petgraph `DiGraph`, whatever this graph's orientation.
    #[must_use]
    pub fn to_petgraph_directed(&self) -> PetgraphExport<K, petgraph::Directed> {
        self.export_with(DiGraph::with_capacity(self.node_count(), self.edge_count()))
    }

    /// Export as a petgraph `UnGraph`, whatever this graph's orientation.
    #[must_use]
    pub fn to_petgraph_undirected(&self) -> PetgraphExport<K, petgraph::Undirected> {
        self.export_with(UnGraph::with_capacity(self.node_count(), self.edge_count()))
    }

    fn export_with<Ty: EdgeType>(
        &self,
        mut graph: petgraph::Graph<K, f64, Ty>,
    ) -> PetgraphExport<K, Ty> {
        let mut node_map = BTreeMap::new();
        for id in self.node_ids() {
            let idx = graph.add_node(id.clone());
            node_map.insert(id.clone(), idx);
        }
        for edge in self.iter_edges() {
            if let (Some(&from), Some(&to)) = (node_map.get(&edge.from), node_map.get(&edge.to)) {
                graph.add_edge(from, to, edge.weight);
            }
        }
        PetgraphExport { graph, node_map }
    }
}
