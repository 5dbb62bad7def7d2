//! Subcommand implementations for `gk`.

pub mod completions;
pub mod critical_path;
pub mod cycles;
pub mod hash;
pub mod path;
pub mod scc;
pub mod stats;
pub mod topo;
pub mod walk;

use std::path::PathBuf;

use clap::Args;
use graphkit_core::GraphOptions;

use crate::load::{DocGraph, load_graph};
use crate::output::OutputMode;

/// Resolved settings every graph subcommand runs with.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub output: OutputMode,
    /// Flags applied when a document omits `directed`/`weighted`.
    pub defaults: GraphOptions,
}

impl RunContext {
    /// Load the graph named by `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn load(&self, source: &GraphSource) -> anyhow::Result<DocGraph> {
        load_graph(&source.file, self.defaults, self.output)
    }
}

/// The graph document argument shared by every analysis subcommand.
#[derive(Args, Debug, Clone)]
pub struct GraphSource {
    /// Path to a JSON graph document, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
