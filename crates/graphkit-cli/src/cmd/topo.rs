//! `gk topo`: topological order of a directed graph.

use std::io::Write;

use clap::Args;
use graphkit_core::GraphError;
use serde::Serialize;

use super::{GraphSource, RunContext};
use crate::output::{fail, pretty_section, render_mode};

/// Arguments for `gk topo`.
#[derive(Args, Debug)]
pub struct TopoArgs {
    #[command(flatten)]
    pub source: GraphSource,
}

#[derive(Debug, Serialize)]
struct TopoOutput {
    order: Vec<String>,
}

/// Execute `gk topo`.
///
/// A cyclic graph has no order and exits non-zero with `G1002`.
pub fn run_topo(args: &TopoArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = ctx.load(&args.source)?;
    let order = match graph.topological_sort() {
        Ok(Some(order)) => order,
        Ok(None) => {
            return Err(fail(
                ctx.output,
                &GraphError::CycleDetected {
                    operation: "topological_sort",
                },
            ));
        }
        Err(err) => return Err(fail(ctx.output, &err)),
    };

    render_mode(
        ctx.output,
        &TopoOutput { order },
        render_topo_text,
        render_topo_pretty,
    )
}

fn render_topo_text(payload: &TopoOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for id in &payload.order {
        writeln!(w, "{id}")?;
    }
    Ok(())
}

fn render_topo_pretty(payload: &TopoOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Topological order ({} nodes)", payload.order.len()))?;
    for (idx, id) in payload.order.iter().enumerate() {
        writeln!(w, "{:>4}. {id}", idx + 1)?;
    }
    Ok(())
}
