//! `gk critical-path`: longest weighted path through a DAG.

use std::io::Write;

use clap::Args;
use graphkit_core::CriticalPath;

use super::{GraphSource, RunContext};
use crate::output::{fail, pretty_kv, pretty_section, render_mode};

/// Arguments for `gk critical-path`.
#[derive(Args, Debug)]
pub struct CriticalPathArgs {
    #[command(flatten)]
    pub source: GraphSource,
}

/// Execute `gk critical-path`.
pub fn run_critical_path(args: &CriticalPathArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = ctx.load(&args.source)?;
    let critical = graph.critical_path().map_err(|err| fail(ctx.output, &err))?;
    render_mode(ctx.output, &critical, render_text, render_pretty)
}

fn render_text(critical: &CriticalPath<String>, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{} {}", critical.length, critical.path.join(" "))
}

fn render_pretty(critical: &CriticalPath<String>, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Critical path")?;
    if critical.path.is_empty() {
        return writeln!(w, "The graph is empty.");
    }
    pretty_kv(w, "Length", critical.length.to_string())?;
    pretty_kv(w, "Steps", critical.path.len().to_string())?;
    pretty_kv(w, "Route", critical.path.join(" -> "))
}
