//! `ssp`: all-pairs shortest paths from an edge list, or a randomized
//! comparison of the three schemes.
//!
//! ```text
//! ssp simple graph.txt        # or `ssp is graph.txt`
//! ssp fibonacci < graph.txt   # or `ssp if`
//! ssp binomial                # or `ssp ib`, edges typed on stdin
//! ssp random --seed 7         # or `ssp r`
//! ```

use clap::{Args, Parser, Subcommand};
use dijkstra_heaps::benchmark::{run_benchmark, BenchmarkConfig, BenchmarkRow};
use dijkstra_heaps::graph::Graph;
use dijkstra_heaps::input;
use dijkstra_heaps::pathfinding::Scheme;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "ssp", version, about, propagate_version = true)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); `RUST_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time every scheme on random strongly connected graphs
    #[command(visible_alias = "r")]
    Random(RandomArgs),
    /// Distance matrix using the O(V²) array scan
    #[command(visible_alias = "is")]
    Simple(InputArgs),
    /// Distance matrix using a Fibonacci heap
    #[command(visible_alias = "if")]
    Fibonacci(InputArgs),
    /// Distance matrix using a binomial heap
    #[command(visible_alias = "ib")]
    Binomial(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Edge list file; edges are read from stdin when omitted
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RandomArgs {
    /// Seed for reproducible graphs
    #[arg(long)]
    seed: Option<u64>,
    /// Vertex counts to sweep, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = BenchmarkConfig::default().vertex_counts)]
    vertices: Vec<usize>,
    /// Edge densities in percent, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = BenchmarkConfig::default().density_percents)]
    densities: Vec<u32>,
    /// Largest edge weight
    #[arg(
        long,
        default_value_t = BenchmarkConfig::default().max_weight,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_weight: u64,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Library(#[from] dijkstra_heaps::Error),

    #[error(transparent)]
    Input(#[from] input::InputError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Random(args) => random(args),
        Commands::Simple(args) => solve(Scheme::Simple, args),
        Commands::Fibonacci(args) => solve(Scheme::Fibonacci, args),
        Commands::Binomial(args) => solve(Scheme::Binomial, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("exiting on error: {e:?}");
            eprintln!("ssp: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn solve(scheme: Scheme, args: InputArgs) -> Result<(), CliError> {
    let edges = match &args.file {
        Some(path) => input::load_edges(path)?,
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!(
                    "Enter edges as `start end weight`, one per line; finish with a line holding `{}`:",
                    input::SENTINEL
                );
            }
            input::parse_edges(stdin.lock())?
        }
    };

    let graph = Graph::from_edges(&edges);
    log::info!(
        "{} vertices, {} edges, scheme: {scheme}",
        graph.vertex_count(),
        graph.edge_count()
    );

    let matrix = scheme.run(&graph)?;
    let mut stdout = io::stdout().lock();
    let written = write!(stdout, "{matrix}").and_then(|()| stdout.flush());
    ignore_broken_pipe(written)?;
    Ok(())
}

/// A reader that closed the pipe early, such as `head`, is not an error
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn random(args: RandomArgs) -> Result<(), CliError> {
    let config = BenchmarkConfig {
        vertex_counts: args.vertices,
        density_percents: args.densities,
        max_weight: args.max_weight,
        seed: args.seed,
    };
    log::info!("benchmark config: {config:?}");

    println!("vertices\tdensity%\tsimple(ms)\tF-heap(ms)\tB-heap(ms)");
    run_benchmark(&config, print_row)?;
    Ok(())
}

fn print_row(row: &BenchmarkRow) {
    println!(
        "{}\t{}\t{:.3}\t{:.3}\t{:.3}",
        row.vertices,
        row.density_percent,
        millis(row.simple),
        millis(row.fibonacci),
        millis(row.binomial)
    );
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
