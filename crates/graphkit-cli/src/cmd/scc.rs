//! `gk scc`: strongly connected components.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use super::{GraphSource, RunContext};
use crate::output::{fail, pretty_section, render_mode};

/// Arguments for `gk scc`.
#[derive(Args, Debug)]
pub struct SccArgs {
    #[command(flatten)]
    pub source: GraphSource,
}

#[derive(Debug, Serialize)]
struct SccOutput {
    components: Vec<Vec<String>>,
}

/// Execute `gk scc`.
pub fn run_scc(args: &SccArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = ctx.load(&args.source)?;
    let mut components = graph
        .strongly_connected_components()
        .map_err(|err| fail(ctx.output, &err))?;
    // Largest first, then by first member, so output is stable.
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    render_mode(
        ctx.output,
        &SccOutput { components },
        render_scc_text,
        render_scc_pretty,
    )
}

fn render_scc_text(payload: &SccOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for component in &payload.components {
        writeln!(w, "{}", component.join(" "))?;
    }
    Ok(())
}

fn render_scc_pretty(payload: &SccOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("Strongly connected components ({})", payload.components.len()),
    )?;
    for component in &payload.components {
        writeln!(w, "[{}] {}", component.len(), component.join(", "))?;
    }
    Ok(())
}
