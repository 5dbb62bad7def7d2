#![forbid(unsafe_code)]
//! graphkit-core library.
//!
//! A generic, in-memory directed/undirected graph with traversal,
//! shortest-path, topological ordering, cycle and SCC analysis, and a JSON
//! document form.
//!
//! # Conventions
//!
//! - **Errors**: fallible operations return [`Result`] with [`GraphError`].
//!   Absent nodes are never errors; they yield empty results or `None`.
//! - **Logging**: `tracing` spans on algorithm entry points, `debug!` for
//!   results and `trace!` for individual mutations.
//! - **Determinism**: nodes and neighbors iterate in key order.
//!
//! # Example
//!
//! ```rust
//! use graphkit_core::{Graph, GraphOptions};
//!
//! let mut graph: Graph<&str> = Graph::new(GraphOptions::directed().weighted());
//! graph.add_weighted_edge("A", "B", 4.0);
//! graph.add_weighted_edge("A", "C", 1.0);
//! graph.add_weighted_edge("C", "B", 1.0);
//!
//! let route = graph.dijkstra(&"A", &"B").unwrap().unwrap();
//! assert_eq!(route.path, vec!["A", "C", "B"]);
//! assert_eq!(graph.topological_sort().unwrap(), Some(vec!["A", "C", "B"]));
//! ```

pub mod components;
pub mod document;
pub mod error;
pub mod graph;
pub mod interop;
pub mod order;
pub mod path;
pub mod stats;
pub mod traverse;

pub use document::GraphDocument;
pub use error::{ErrorCode, GraphError, Result};
pub use graph::{
    DEFAULT_EDGE_TYPE, DEFAULT_WEIGHT, Edge, EdgeSpec, Graph, GraphOptions, Node, NodeKey,
    Orientation,
};
pub use interop::PetgraphExport;
pub use order::CriticalPath;
pub use path::ShortestPath;
pub use stats::GraphStats;
pub use traverse::TraversalState;
