#![forbid(unsafe_code)]

mod cmd;
mod config;
mod load;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::RunContext;
use output::OutputMode;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "gk: analyse JSON graph documents",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Inspect",
        about = "Summary statistics",
        after_help = "EXAMPLES:\n    gk stats graph.json\n    cat graph.json | gk stats - --format json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Content digest of the graph",
        long_about = "Print a blake3 digest of the graph's flags, node ids, and edges. \
                      Node payloads and edge order in the file do not affect it."
    )]
    Hash(cmd::hash::HashArgs),

    #[command(
        next_help_heading = "Traverse",
        about = "Depth-first or breadth-first visit order",
        after_help = "EXAMPLES:\n    gk walk graph.json A\n    gk walk graph.json A --order bfs"
    )]
    Walk(cmd::walk::WalkArgs),

    #[command(
        next_help_heading = "Traverse",
        about = "Cheapest path between two nodes",
        long_about = "Find the cheapest path with Dijkstra's algorithm. Weighted graphs \
                      use edge weights; unweighted graphs count hops."
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Order",
        about = "Topological order (directed graphs)",
        long_about = "Print a topological order. Exits non-zero when the graph has a cycle."
    )]
    Topo(cmd::topo::TopoArgs),

    #[command(
        next_help_heading = "Order",
        about = "Longest weighted path through a DAG"
    )]
    CriticalPath(cmd::critical_path::CriticalPathArgs),

    #[command(next_help_heading = "Structure", about = "Report cycles")]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Strongly connected components (directed graphs)"
    )]
    Scc(cmd::scc::SccArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    gk completions bash > ~/.local/share/bash-completion/completions/gk"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("GRAPHKIT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "gk=debug,graphkit_core=debug,info"
        } else {
            "gk=info,graphkit_core=info,warn"
        })
    });

    let format = env::var("GRAPHKIT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(ref args) = cli.command {
        return cmd::completions::run_completions(args.shell, &mut Cli::command());
    }

    let user = config::load_user_config()?;
    let ctx = RunContext {
        output: output::resolve_output_mode(cli.format, cli.json, user.output.as_deref()),
        defaults: user.graph.options(),
    };
    debug!(output = ?ctx.output, defaults = ?ctx.defaults, "resolved run context");

    match cli.command {
        Commands::Stats(ref args) => cmd::stats::run_stats(args, &ctx),
        Commands::Hash(ref args) => cmd::hash::run_hash(args, &ctx),
        Commands::Walk(ref args) => cmd::walk::run_walk(args, &ctx),
        Commands::Path(ref args) => cmd::path::run_path(args, &ctx),
        Commands::Topo(ref args) => cmd::topo::run_topo(args, &ctx),
        Commands::CriticalPath(ref args) => cmd::critical_path::run_critical_path(args, &ctx),
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, &ctx),
        Commands::Scc(ref args) => cmd::scc::run_scc(args, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_format_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["gk", "stats", "g.json", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn hidden_json_flag_parses() {
        let cli = Cli::parse_from(["gk", "--json", "topo", "g.json"]);
        assert!(cli.json);
        assert!(cli.format.is_none());
    }

    #[test]
    fn critical_path_uses_kebab_case() {
        let cli = Cli::parse_from(["gk", "critical-path", "g.json"]);
        assert!(matches!(cli.command, Commands::CriticalPath(_)));
    }

    #[test]
    fn path_requires_both_endpoints() {
        assert!(Cli::try_parse_from(["gk", "path", "g.json", "A"]).is_err());
    }

    #[test]
    fn verbose_short_flag() {
        let cli = Cli::parse_from(["gk", "-v", "scc", "g.json"]);
        assert!(cli.verbose);
    }
}
