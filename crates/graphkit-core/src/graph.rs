//! The graph container: nodes, edge records, and adjacency sets.
//!
//! # Storage
//!
//! Edges are kept twice:
//!
//! - a flat edge list, the authoritative record. Parallel edges are kept as
//!   separate records and can be filtered by their type tag.
//! - an adjacency map `id -> {neighbor ids}` used for neighbor lookups. Set
//!   semantics dedupe parallel edges for traversal purposes.
//!
//! For undirected graphs `add_edge(a, b)` inserts both `a -> b` and `b -> a`
//! into the adjacency map but appends a single edge record.
//!
//! # Ordering
//!
//! Nodes and neighbor sets are BTree-backed, so every iteration (and every
//! algorithm built on top) visits keys in their `Ord` order.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

use crate::error::{GraphError, Result};

/// Weight assigned to edges added without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Type tag assigned to edges added without an explicit tag.
pub const DEFAULT_EDGE_TYPE: &str = "default";

/// Anything usable as a node identifier.
///
/// Blanket-implemented for every `Clone + Ord + Debug` type, so `&str`,
/// `String`, integers and tuples all work out of the box.
pub trait NodeKey: Clone + Ord + fmt::Debug {}

impl<T: Clone + Ord + fmt::Debug> NodeKey for T {}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How adjacency is interpreted. Fixed for the lifetime of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Directed,
    Undirected,
}

/// Construction-time options for a [`Graph`].
///
/// `weighted` is advisory: weights are always stored, but path searches
/// only honour them when the graph is weighted (otherwise every edge
/// costs [`DEFAULT_WEIGHT`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOptions {
    #[serde(default = "default_true")]
    pub directed: bool,
    #[serde(default)]
    pub weighted: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: true,
            weighted: false,
        }
    }
}

impl GraphOptions {
    /// Directed, unweighted.
    #[must_use]
    pub const fn directed() -> Self {
        Self {
            directed: true,
            weighted: false,
        }
    }

    /// Undirected, unweighted.
    #[must_use]
    pub const fn undirected() -> Self {
        Self {
            directed: false,
            weighted: false,
        }
    }

    /// Same orientation, with edge weights honoured by path searches.
    #[must_use]
    pub const fn weighted(self) -> Self {
        Self {
            directed: self.directed,
            weighted: true,
        }
    }

    #[must_use]
    pub const fn orientation(self) -> Orientation {
        if self.directed {
            Orientation::Directed
        } else {
            Orientation::Undirected
        }
    }
}

const fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Node / Edge
// ---------------------------------------------------------------------------

/// A vertex: an identifier plus an optional payload.
///
/// A missing `data` field reads back as `None`. An explicit `"data": null`
/// is handed to `D`, so a payload that serializes to `null` (such as
/// `Value::Null`) survives a round trip as `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>, D: Deserialize<'de>"))]
pub struct Node<K, D> {
    pub id: K,
    #[serde(
        default = "no_payload",
        deserialize_with = "present_payload",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<D>,
}

const fn no_payload<D>() -> Option<D> {
    None
}

fn present_payload<'de, De, D>(deserializer: De) -> std::result::Result<Option<D>, De::Error>
where
    De: Deserializer<'de>,
    D: Deserialize<'de>,
{
    D::deserialize(deserializer).map(Some)
}

/// One edge record from the flat edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<K> {
    pub from: K,
    pub to: K,
    #[serde(default = "default_weight", with = "weight_repr")]
    pub weight: f64,
    #[serde(rename = "type", default = "default_edge_type")]
    pub kind: String,
}

impl<K: NodeKey> Edge<K> {
    /// Whether this record connects `from` and `to` under `orientation`.
    ///
    /// Undirected records match either way round.
    #[must_use]
    pub fn connects(&self, from: &K, to: &K, orientation: Orientation) -> bool {
        let forward = self.from == *from && self.to == *to;
        match orientation {
            Orientation::Directed => forward,
            Orientation::Undirected => forward || (self.from == *to && self.to == *from),
        }
    }

    /// Whether either endpoint is `id`.
    #[must_use]
    pub fn touches(&self, id: &K) -> bool {
        self.from == *id || self.to == *id
    }

    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

const fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

fn default_edge_type() -> String {
    DEFAULT_EDGE_TYPE.to_string()
}

/// JSON has no infinity or NaN, so non-finite weights travel as the strings
/// `"inf"`, `"-inf"` and `"NaN"`. Finite weights stay plain numbers.
mod weight_repr {
    use serde::de::{self, Deserializer};
    use serde::{Deserialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(weight: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if weight.is_finite() {
            serializer.serialize_f64(*weight)
        } else if weight.is_nan() {
            serializer.serialize_str("NaN")
        } else if weight.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(weight) => Ok(weight),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"NaN\"",
                )),
            },
        }
    }
}

/// Weight and type tag for [`Graph::add_edge_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub weight: f64,
    pub kind: String,
}

impl Default for EdgeSpec {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            kind: default_edge_type(),
        }
    }
}

impl EdgeSpec {
    #[must_use]
    pub fn weighted(weight: f64) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A generic directed or undirected graph.
///
/// `K` is the node identifier, `D` the optional node payload. The graph
/// owns all of its nodes and edges; snapshots handed out by [`Graph::nodes`]
/// and [`Graph::edges`] are copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<K = String, D = serde_json::Value> {
    options: GraphOptions,
    nodes: BTreeMap<K, Node<K, D>>,
    adjacency: BTreeMap<K, BTreeSet<K>>,
    edges: Vec<Edge<K>>,
}

impl<K: NodeKey, D> Default for Graph<K, D> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<K: NodeKey, D> Graph<K, D> {
    #[must_use]
    pub const fn new(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Directed, unweighted graph.
    #[must_use]
    pub const fn directed() -> Self {
        Self::new(GraphOptions::directed())
    }

    /// Undirected, unweighted graph.
    #[must_use]
    pub const fn undirected() -> Self {
        Self::new(GraphOptions::undirected())
    }

    #[must_use]
    pub const fn options(&self) -> GraphOptions {
        self.options
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.options.orientation()
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.options.directed
    }

    #[must_use]
    pub const fn is_weighted(&self) -> bool {
        self.options.weighted
    }

    // -- mutators -----------------------------------------------------------

    /// Insert a bare node. Returns `false` (and changes nothing) if `id`
    /// already exists.
    pub fn add_node(&mut self, id: K) -> bool {
        self.insert_node(id, None)
    }

    /// Insert a node carrying `data`. An existing node keeps its payload.
    pub fn add_node_with(&mut self, id: K, data: D) -> bool {
        self.insert_node(id, Some(data))
    }

    fn insert_node(&mut self, id: K, data: Option<D>) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        trace!(node = ?id, "add node");
        self.adjacency.entry(id.clone()).or_default();
        self.nodes.insert(id.clone(), Node { id, data });
        true
    }

    /// Add `from -> to` with the default weight and type.
    pub fn add_edge(&mut self, from: K, to: K) {
        self.add_edge_with(from, to, EdgeSpec::default());
    }

    /// Add `from -> to` with an explicit weight and the default type.
    pub fn add_weighted_edge(&mut self, from: K, to: K, weight: f64) {
        self.add_edge_with(from, to, EdgeSpec::weighted(weight));
    }

    /// Add `from -> to` described by `spec`.
    ///
    /// Missing endpoints are created as bare nodes. Repeating an edge
    /// appends another record but leaves a single adjacency entry.
    pub fn add_edge_with(&mut self, from: K, to: K, spec: EdgeSpec) {
        self.add_node(from.clone());
        self.add_node(to.clone());

        trace!(from = ?from, to = ?to, weight = spec.weight, kind = %spec.kind, "add edge");

        self.adjacency
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        if self.orientation() == Orientation::Undirected {
            self.adjacency
                .entry(to.clone())
                .or_default()
                .insert(from.clone());
        }

        self.edges.push(Edge {
            from,
            to,
            weight: spec.weight,
            kind: spec.kind,
        });
    }

    /// Remove `id` with every edge record and adjacency entry that mentions
    /// it. Returns `false` if the node did not exist.
    pub fn remove_node(&mut self, id: &K) -> bool {
        if self.nodes.remove(id).is_none() {
            return false;
        }
        self.edges.retain(|edge| !edge.touches(id));
        self.adjacency.remove(id);
        for neighbors in self.adjacency.values_mut() {
            neighbors.remove(id);
        }
        trace!(node = ?id, "removed node");
        true
    }

    /// Remove the `from -> to` connection: the adjacency entry and every
    /// matching edge record (either orientation for undirected graphs).
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_edge(&mut self, from: &K, to: &K) -> bool {
        let orientation = self.orientation();

        let mut removed = self
            .adjacency
            .get_mut(from)
            .is_some_and(|neighbors| neighbors.remove(to));
        if orientation == Orientation::Undirected {
            removed |= self
                .adjacency
                .get_mut(to)
                .is_some_and(|neighbors| neighbors.remove(from));
        }

        let before = self.edges.len();
        self.edges
            .retain(|edge| !edge.connects(from, to, orientation));
        removed |= self.edges.len() != before;

        if removed {
            trace!(from = ?from, to = ?to, "removed edge");
        }
        removed
    }

    // -- queries ------------------------------------------------------------

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edge records (parallel edges counted separately).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains_node(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn node(&self, id: &K) -> Option<&Node<K, D>> {
        self.nodes.get(id)
    }

    /// Nodes in key order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node<K, D>> {
        self.nodes.values()
    }

    /// Node identifiers in key order.
    pub fn node_ids(&self) -> impl DoubleEndedIterator<Item = &K> {
        self.nodes.keys()
    }

    /// Edge records in insertion order.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge<K>> {
        self.edges.iter()
    }

    /// Owned snapshot of every edge record.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<K>> {
        self.edges.clone()
    }

    /// Edge records whose type tag equals `kind`.
    #[must_use]
    pub fn edges_of_type(&self, kind: &str) -> Vec<Edge<K>> {
        self.edges
            .iter()
            .filter(|edge| edge.kind == kind)
            .cloned()
            .collect()
    }

    /// Neighbor ids of `id`; empty when `id` is absent or isolated.
    #[must_use]
    pub fn neighbors(&self, id: &K) -> Vec<K> {
        self.iter_neighbors(id).cloned().collect()
    }

    /// Borrowing form of [`Graph::neighbors`], in key order.
    pub fn iter_neighbors(&self, id: &K) -> impl DoubleEndedIterator<Item = &K> {
        self.adjacency.get(id).into_iter().flatten()
    }

    /// Adjacency-set membership: is `to` a neighbor of `from`?
    #[must_use]
    pub fn has_edge(&self, from: &K, to: &K) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|neighbors| neighbors.contains(to))
    }

    /// Number of edge records pointing at `id`.
    #[must_use]
    pub fn in_degree(&self, id: &K) -> usize {
        self.edges.iter().filter(|edge| edge.to == *id).count()
    }

    /// Size of the adjacency set of `id`. For undirected graphs this is the
    /// node's degree.
    #[must_use]
    pub fn out_degree(&self, id: &K) -> usize {
        self.adjacency.get(id).map_or(0, BTreeSet::len)
    }

    /// Fail with [`GraphError::RequiresDirected`] unless the graph is directed.
    pub(crate) const fn require_directed(&self, operation: &'static str) -> Result<()> {
        match self.orientation() {
            Orientation::Directed => Ok(()),
            Orientation::Undirected => Err(GraphError::RequiresDirected { operation }),
        }
    }

    /// Reverse adjacency: `id -> {ids with an adjacency entry pointing at id}`.
    pub(crate) fn predecessors(&self) -> BTreeMap<&K, Vec<&K>> {
        let mut reversed: BTreeMap<&K, Vec<&K>> = BTreeMap::new();
        for (from, targets) in &self.adjacency {
            for to in targets {
                reversed.entry(to).or_default().push(from);
            }
        }
        reversed
    }
}

impl<K: NodeKey, D: Clone> Graph<K, D> {
    /// Owned snapshot of every node, in key order.
    #[must_use]
    pub fn nodes(&self) -> Vec<Node<K, D>> {
        self.nodes.values().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
