//! JSON document form of a graph.
//!
//! # Shape
//!
//! ```json
//! {
//!   "nodes": [{ "id": "A", "data": {"label": "start"} }, { "id": "B" }],
//!   "edges": [{ "from": "A", "to": "B", "weight": 1.0, "type": "default" }],
//!   "directed": true,
//!   "weighted": false
//! }
//! ```
//!
//! On input every field except the node/edge identifiers is optional:
//! `weight` defaults to 1, `type` to `"default"`, and missing orientation
//! flags fall back to the caller's [`GraphOptions`] (directed, unweighted
//! unless told otherwise). Non-finite weights are written as `"inf"`,
//! `"-inf"` or `"NaN"`, and an explicit `"data": null` is a payload.
//!
//! Rebuilding a graph replays the edge list through [`Graph::add_edge_with`],
//! so adjacency sets and parallel-edge records come back exactly as they
//! were built.
//!
//! # Content hash
//!
//! [`Graph::content_hash`] digests the node ids, the edge records (sorted,
//! and orientation-normalized for undirected graphs) and the two flags with
//! BLAKE3. Equal hashes mean equal structure, whatever order edges were
//! inserted in; callers compare it against a stored value to decide whether
//! cached analysis results are still valid.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::{Edge, EdgeSpec, Graph, GraphOptions, Node, NodeKey, Orientation};

/// Serializable snapshot of a [`Graph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument<K = String, D = serde_json::Value> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Node<K, D>>,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<K>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted: Option<bool>,
}

impl<K, D> GraphDocument<K, D> {
    /// Options described by the document, with missing flags taken from
    /// `fallback`.
    #[must_use]
    pub fn options_or(&self, fallback: GraphOptions) -> GraphOptions {
        GraphOptions {
            directed: self.directed.unwrap_or(fallback.directed),
            weighted: self.weighted.unwrap_or(fallback.weighted),
        }
    }
}

impl<K: NodeKey, D> Graph<K, D> {
    /// Rebuild a graph from `document`, defaulting missing flags to a
    /// directed, unweighted graph.
    #[must_use]
    pub fn from_document(document: GraphDocument<K, D>) -> Self {
        Self::from_document_or(document, GraphOptions::default())
    }

    /// Rebuild a graph from `document`, taking missing flags from
    /// `fallback`.
    #[must_use]
    #[instrument(skip_all, fields(nodes = document.nodes.len(), edges = document.edges.len()))]
    pub fn from_document_or(document: GraphDocument<K, D>, fallback: GraphOptions) -> Self {
        let mut graph = Self::new(document.options_or(fallback));

        for node in document.nodes {
            match node.data {
                Some(data) => graph.add_node_with(node.id, data),
                None => graph.add_node(node.id),
            };
        }
        for edge in document.edges {
            graph.add_edge_with(
                edge.from,
                edge.to,
                EdgeSpec {
                    weight: edge.weight,
                    kind: edge.kind,
                },
            );
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph rebuilt from document"
        );
        graph
    }
}

impl<K: NodeKey, D: Clone> Graph<K, D> {
    /// Snapshot of the whole graph in document form.
    #[must_use]
    pub fn to_document(&self) -> GraphDocument<K, D> {
        GraphDocument {
            nodes: self.nodes(),
            edges: self.edges(),
            directed: Some(self.is_directed()),
            weighted: Some(self.is_weighted()),
        }
    }
}

impl<K, D> Graph<K, D>
where
    K: NodeKey + Serialize,
    D: Clone + Serialize,
{
    /// Compact JSON encoding of [`Graph::to_document`].
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::Document`] if a key or payload fails to
    /// serialize.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    /// Pretty-printed JSON encoding of [`Graph::to_document`].
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::Document`] if a key or payload fails to
    /// serialize.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }
}

impl<K: NodeKey + Serialize, D> Graph<K, D> {
    /// BLAKE3 digest of the graph's structure, formatted `blake3:<hex>`.
    ///
    /// Payloads are not part of the digest.
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::Document`] if a key fails to serialize.
    pub fn content_hash(&self) -> Result<String> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[u8::from(self.is_directed()), u8::from(self.is_weighted())]);

        for id in self.node_ids() {
            hasher.update(&serde_json::to_vec(id)?);
            hasher.update(b"\x00");
        }
        hasher.update(b"\x01");

        let undirected = self.orientation() == Orientation::Undirected;
        let mut records = Vec::with_capacity(self.edge_count());
        for edge in self.iter_edges() {
            let mut from = serde_json::to_vec(&edge.from)?;
            let mut to = serde_json::to_vec(&edge.to)?;
            if undirected && to < from {
                std::mem::swap(&mut from, &mut to);
            }
            records.push((from, to, edge.weight.to_bits(), edge.kind.as_str()));
        }
        records.sort_unstable();

        for (from, to, weight, kind) in records {
            hasher.update(&from);
            hasher.update(b"\x00");
            hasher.update(&to);
            hasher.update(b"\x00");
            hasher.update(&weight.to_le_bytes());
            hasher.update(kind.as_bytes());
            hasher.update(b"\x00");
        }

        Ok(format!("blake3:{}", hasher.finalize()))
    }
}

impl<K, D> Graph<K, D>
where
    K: NodeKey + DeserializeOwned,
    D: DeserializeOwned,
{
    /// Parse a JSON document and rebuild the graph.
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::Document`] for malformed JSON or a document of
    /// the wrong shape.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: GraphDocument<K, D> = serde_json::from_str(json)?;
        Ok(Self::from_document(document))
    }

    /// Byte-slice form of [`Graph::from_json_str`].
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::Document`] for malformed JSON or a document of
    /// the wrong shape.
    pub fn from_json_slice(json: &[u8]) -> Result<Self> {
        let document: GraphDocument<K, D> = serde_json::from_slice(json)?;
        Ok(Self::from_document(document))
    }
}
