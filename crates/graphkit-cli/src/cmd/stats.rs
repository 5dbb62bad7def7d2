//! `gk stats`: summary statistics for a graph document.

use std::io::Write;

use clap::Args;
use graphkit_core::GraphStats;

use super::{GraphSource, RunContext};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `gk stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: GraphSource,
}

/// Execute `gk stats`.
pub fn run_stats(args: &StatsArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = ctx.load(&args.source)?;
    let stats = graph.stats();
    render_mode(ctx.output, &stats, render_stats_text, render_stats_pretty)
}

fn render_stats_text(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "nodes {}", stats.node_count)?;
    writeln!(w, "edges {}", stats.edge_count)?;
    writeln!(w, "directed {}", stats.directed)?;
    writeln!(w, "weighted {}", stats.weighted)?;
    writeln!(w, "density {:.4}", stats.density)?;
    writeln!(w, "has_cycles {}", stats.has_cycles)?;
    writeln!(w, "components {}", stats.component_count)?;
    writeln!(w, "isolated {}", stats.isolated_node_count)?;
    writeln!(w, "max_in_degree {}", stats.max_in_degree)?;
    writeln!(w, "max_out_degree {}", stats.max_out_degree)
}

fn render_stats_pretty(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    let kind = match (stats.directed, stats.weighted) {
        (true, true) => "directed, weighted",
        (true, false) => "directed",
        (false, true) => "undirected, weighted",
        (false, false) => "undirected",
    };
    pretty_section(w, &format!("Graph ({kind})"))?;
    pretty_kv(w, "Nodes", stats.node_count.to_string())?;
    pretty_kv(w, "Edges", stats.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", stats.density))?;
    pretty_kv(w, "Cycles", if stats.has_cycles { "yes" } else { "no" })?;
    pretty_kv(w, "Components", stats.component_count.to_string())?;
    pretty_kv(w, "Isolated", stats.isolated_node_count.to_string())?;
    pretty_kv(
        w,
        "Max degree",
        format!("in {} / out {}", stats.max_in_degree, stats.max_out_degree),
    )
}
