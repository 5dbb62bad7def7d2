//! `gk cycles`: report cycles in a graph document.
//!
//! Directed graphs list each cyclic strongly connected component. Undirected
//! graphs only report whether a cycle exists.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use super::{GraphSource, RunContext};
use crate::output::{fail, pretty_section, render_mode};

/// Arguments for `gk cycles`.
#[derive(Args, Debug)]
pub struct CyclesArgs {
    #[command(flatten)]
    pub source: GraphSource,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    directed: bool,
    has_cycle: bool,
    /// Cyclic components; always empty for undirected graphs.
    cycles: Vec<Vec<String>>,
}

/// Execute `gk cycles`.
pub fn run_cycles(args: &CyclesArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = ctx.load(&args.source)?;

    let payload = if graph.is_directed() {
        let cycles = graph.find_cycles().map_err(|err| fail(ctx.output, &err))?;
        CyclesOutput {
            directed: true,
            has_cycle: !cycles.is_empty(),
            cycles,
        }
    } else {
        CyclesOutput {
            directed: false,
            has_cycle: graph.has_cycle(),
            cycles: Vec::new(),
        }
    };

    render_mode(ctx.output, &payload, render_cycles_text, render_cycles_pretty)
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if !payload.directed {
        return writeln!(w, "{}", payload.has_cycle);
    }
    for cycle in &payload.cycles {
        writeln!(w, "{}", cycle.join(" "))?;
    }
    Ok(())
}

fn render_cycles_pretty(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if !payload.has_cycle {
        return writeln!(w, "No cycles found.");
    }
    if !payload.directed {
        return writeln!(w, "The undirected graph contains a cycle.");
    }

    pretty_section(w, &format!("Cycles ({})", payload.cycles.len()))?;
    for (idx, cycle) in payload.cycles.iter().enumerate() {
        writeln!(w, "\nCycle {}:", idx + 1)?;
        for id in cycle {
            writeln!(w, "  - {id}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_args_parse_stdin_marker() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CyclesArgs,
        }

        let parsed = Wrapper::parse_from(["test", "-"]);
        assert_eq!(parsed.args.source.file.to_str(), Some("-"));
    }

    #[test]
    fn pretty_no_cycles() {
        let payload = CyclesOutput {
            directed: true,
            has_cycle: false,
            cycles: Vec::new(),
        };
        let mut out = Vec::new();
        render_cycles_pretty(&payload, &mut out).expect("render");
        assert!(String::from_utf8(out).expect("utf8").contains("No cycles found."));
    }

    #[test]
    fn pretty_lists_groups() {
        let payload = CyclesOutput {
            directed: true,
            has_cycle: true,
            cycles: vec![vec!["a".into(), "b".into()]],
        };
        let mut out = Vec::new();
        render_cycles_pretty(&payload, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Cycle 1"));
        assert!(rendered.contains("  - a\n"));
        assert!(rendered.contains("  - b\n"));
    }

    #[test]
    fn text_for_undirected_is_a_bare_flag() {
        let payload = CyclesOutput {
            directed: false,
            has_cycle: true,
            cycles: Vec::new(),
        };
        let mut out = Vec::new();
        render_cycles_text(&payload, &mut out).expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "true\n");
    }
}
