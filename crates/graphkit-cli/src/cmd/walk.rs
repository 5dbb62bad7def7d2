//! `gk walk`: depth-first or breadth-first visit order from a start node.

use std::io::Write;

use clap::{Args, ValueEnum};
use serde::Serialize;

use super::{GraphSource, RunContext};
use crate::output::{pretty_section, render_mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkOrder {
    Dfs,
    Bfs,
}

/// Arguments for `gk walk`.
#[derive(Args, Debug)]
pub struct WalkArgs {
    #[command(flatten)]
    pub source: GraphSource,

    /// Node to start from.
    pub start: String,

    /// Traversal order.
    #[arg(long, value_enum, default_value = "dfs")]
    pub order: WalkOrder,
}

#[derive(Debug, Serialize)]
struct WalkOutput {
    start: String,
    order: WalkOrder,
    visited: Vec<String>,
}

/// Execute `gk walk`. An unknown start node visits nothing.
pub fn run_walk(args: &WalkArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = ctx.load(&args.source)?;
    let visited = match args.order {
        WalkOrder::Dfs => graph.dfs(&args.start),
        WalkOrder::Bfs => graph.bfs(&args.start),
    };

    let payload = WalkOutput {
        start: args.start.clone(),
        order: args.order,
        visited,
    };
    render_mode(ctx.output, &payload, render_walk_text, render_walk_pretty)
}

fn render_walk_text(payload: &WalkOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for id in &payload.visited {
        writeln!(w, "{id}")?;
    }
    Ok(())
}

fn render_walk_pretty(payload: &WalkOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let label = match payload.order {
        WalkOrder::Dfs => "Depth-first",
        WalkOrder::Bfs => "Breadth-first",
    };
    pretty_section(w, &format!("{label} walk from {}", payload.start))?;
    if payload.visited.is_empty() {
        return writeln!(w, "Node {} is not in the graph.", payload.start);
    }
    writeln!(w, "{}", payload.visited.join(" -> "))
}
