//! `gk hash`: content digest of a graph document.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use super::{GraphSource, RunContext};
use crate::output::{fail, pretty_kv, render_mode};

/// Arguments for `gk hash`.
#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub source: GraphSource,
}

#[derive(Debug, Serialize)]
struct HashOutput {
    hash: String,
    nodes: usize,
    edges: usize,
}

/// Execute `gk hash`.
pub fn run_hash(args: &HashArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = ctx.load(&args.source)?;
    let hash = graph.content_hash().map_err(|err| fail(ctx.output, &err))?;
    let payload = HashOutput {
        hash,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    };
    render_mode(
        ctx.output,
        &payload,
        |payload, w| writeln!(w, "{}", payload.hash),
        render_hash_pretty,
    )
}

fn render_hash_pretty(payload: &HashOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_kv(w, "Hash", &payload.hash)?;
    pretty_kv(
        w,
        "Covers",
        format!("{} nodes, {} edges", payload.nodes, payload.edges),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_shows_hash_and_size() {
        let payload = HashOutput {
            hash: "blake3:abc".into(),
            nodes: 3,
            edges: 2,
        };
        let mut out = Vec::new();
        render_hash_pretty(&payload, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("blake3:abc"));
        assert!(rendered.contains("3 nodes, 2 edges"));
    }
}
