//! Reading graph documents from files or stdin.

use anyhow::{Context, Result};
use graphkit_core::{Graph, GraphDocument, GraphError, GraphOptions};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::output::{OutputMode, fail};

/// A graph as loaded by the CLI: string ids, arbitrary JSON payloads.
pub type DocGraph = Graph<String, serde_json::Value>;

/// Read raw document text from `path`, where `-` means stdin.
fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read graph document from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph document {}", path.display()))
}

/// Parse document text, taking flags the document omits from `fallback`.
///
/// # Errors
///
/// Returns [`GraphError::Document`] when the text is not a valid document.
pub fn parse_document(text: &str, fallback: GraphOptions) -> graphkit_core::Result<DocGraph> {
    let document: GraphDocument = serde_json::from_str(text).map_err(GraphError::from)?;
    Ok(Graph::from_document_or(document, fallback))
}

/// Load and parse the graph at `path`.
///
/// Malformed documents are reported through the output layer so JSON mode
/// gets a structured error with its code.
///
/// # Errors
///
/// Returns an error if the source cannot be read or parsed.
pub fn load_graph(path: &Path, fallback: GraphOptions, output: OutputMode) -> Result<DocGraph> {
    let text = read_source(path)?;
    let graph = parse_document(&text, fallback).map_err(|err| fail(output, &err))?;
    debug!(
        source = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph loaded"
    );
    Ok(graph)
}
