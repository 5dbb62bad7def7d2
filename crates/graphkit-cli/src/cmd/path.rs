//! `gk path`: cheapest route between two nodes.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use super::{GraphSource, RunContext};
use crate::output::{fail, pretty_kv, pretty_section, render_mode};

/// Arguments for `gk path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    #[command(flatten)]
    pub source: GraphSource,

    /// Start node id.
    pub from: String,

    /// Target node id.
    pub to: String,
}

#[derive(Debug, Serialize)]
struct PathOutput {
    from: String,
    to: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
    path: Vec<String>,
}

/// Execute `gk path`.
///
/// An unreachable target is not an error: `found` is false and the path is
/// empty.
pub fn run_path(args: &PathArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = ctx.load(&args.source)?;
    let route = graph
        .dijkstra(&args.from, &args.to)
        .map_err(|err| fail(ctx.output, &err))?;

    let found = route.is_some();
    let (distance, path) = route.map_or((None, Vec::new()), |route| {
        (Some(route.distance), route.path)
    });
    let payload = PathOutput {
        from: args.from.clone(),
        to: args.to.clone(),
        found,
        distance,
        path,
    };

    render_mode(ctx.output, &payload, render_path_text, render_path_pretty)
}

fn render_path_text(payload: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let Some(distance) = payload.distance else {
        return writeln!(w, "unreachable");
    };
    writeln!(w, "{distance} {}", payload.path.join(" "))
}

fn render_path_pretty(payload: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Path {} -> {}", payload.from, payload.to))?;
    let Some(distance) = payload.distance else {
        return writeln!(w, "No path: {} is unreachable from {}.", payload.to, payload.from);
    };
    pretty_kv(w, "Distance", distance.to_string())?;
    pretty_kv(w, "Hops", payload.path.len().saturating_sub(1).to_string())?;
    pretty_kv(w, "Route", payload.path.join(" -> "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found() -> PathOutput {
        PathOutput {
            from: "A".into(),
            to: "B".into(),
            found: true,
            distance: Some(2.0),
            path: vec!["A".into(), "C".into(), "B".into()],
        }
    }

    #[test]
    fn path_args_parse_positionals() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: PathArgs,
        }

        let parsed = Wrapper::parse_from(["test", "g.json", "A", "B"]);
        assert_eq!(parsed.args.from, "A");
        assert_eq!(parsed.args.to, "B");
    }

    #[test]
    fn text_prints_distance_then_route() {
        let mut out = Vec::new();
        render_path_text(&found(), &mut out).expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "2 A C B\n");
    }

    #[test]
    fn pretty_reports_unreachable() {
        let payload = PathOutput {
            from: "A".into(),
            to: "Z".into(),
            found: false,
            distance: None,
            path: Vec::new(),
        };
        let mut out = Vec::new();
        render_path_pretty(&payload, &mut out).expect("render");
        assert!(
            String::from_utf8(out)
                .expect("utf8")
                .contains("Z is unreachable from A")
        );
    }

    #[test]
    fn json_omits_distance_when_unreachable() {
        let payload = PathOutput {
            from: "A".into(),
            to: "Z".into(),
            found: false,
            distance: None,
            path: Vec::new(),
        };
        let value = serde_json::to_value(&payload).expect("json");
        assert_eq!(value["found"], false);
        assert!(value.get("distance").is_none());
    }
}
