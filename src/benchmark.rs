//! Randomized comparison of the three schemes
//!
//! For every vertex count and density in a [`BenchmarkConfig`], a random
//! strongly connected graph is generated and the full distance matrix is
//! computed with each [`Scheme`], timing each run. Graphs are regenerated
//! until strongly connected so that every scheme settles every vertex from
//! every source.

use crate::graph::{Edge, Graph};
use crate::pathfinding::Scheme;
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Parameters of a benchmark sweep
///
/// The default sweeps 100 to 500 vertices in steps of 100 and densities of
/// 10% to 100% in steps of 10%, with weights drawn from `1..=1000`.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    pub vertex_counts: Vec<usize>,
    /// Fraction of the `n * (n - 1)` possible edges, in percent
    pub density_percents: Vec<u32>,
    pub max_weight: u64,
    /// Fixed seed for reproducible graphs; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            vertex_counts: (100..=500).step_by(100).collect(),
            density_percents: (10..=100).step_by(10).collect(),
            max_weight: 1000,
            seed: None,
        }
    }
}

/// Timings for one graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRow {
    pub vertices: usize,
    pub density_percent: u32,
    pub edges: usize,
    pub simple: Duration,
    pub fibonacci: Duration,
    pub binomial: Duration,
}

/// Attempts `random_connected_graph` makes before giving up
pub const MAX_CONNECT_ATTEMPTS: usize = 1000;

/// Generates a random directed graph with `n` vertices
///
/// Draws `n * (n - 1) * density_percent / 100` distinct edges without
/// self-loops, each weighted uniformly in `1..=max_weight`.
///
/// # Errors
/// `Error::ZeroMaxWeight` if `max_weight` is 0.
pub fn random_graph<R: Rng>(
    rng: &mut R,
    n: usize,
    density_percent: u32,
    max_weight: u64,
) -> Result<Graph<u64>> {
    if max_weight == 0 {
        return Err(Error::ZeroMaxWeight);
    }

    let possible = n * n.saturating_sub(1);
    let wanted = (possible * density_percent.min(100) as usize) / 100;

    let pairs = index::sample(rng, possible, wanted);
    let edges: Vec<Edge<u64>> = pairs
        .into_iter()
        .map(|i| {
            // Pair index i enumerates (start, end) with end != start
            let start = i / (n - 1);
            let offset = i % (n - 1);
            let end = if offset >= start { offset + 1 } else { offset };
            Edge::new(start, end, rng.gen_range(1..=max_weight))
        })
        .collect();

    Ok(Graph::build(n, &edges))
}

/// Generates random graphs until one is strongly connected
///
/// # Errors
/// - `Error::DensityTooLow` if the density yields fewer than `n` edges, which
///   can never connect `n > 1` vertices
/// - `Error::NotConnected` if none of `MAX_CONNECT_ATTEMPTS` graphs is
///   strongly connected
/// - `Error::ZeroMaxWeight` if `max_weight` is 0
pub fn random_connected_graph<R: Rng>(
    rng: &mut R,
    n: usize,
    density_percent: u32,
    max_weight: u64,
) -> Result<Graph<u64>> {
    let edges = n * n.saturating_sub(1) * density_percent.min(100) as usize / 100;
    if n > 1 && edges < n {
        return Err(Error::DensityTooLow {
            vertices: n,
            density_percent,
        });
    }

    for attempt in 1..=MAX_CONNECT_ATTEMPTS {
        let graph = random_graph(rng, n, density_percent, max_weight)?;
        if graph.is_strongly_connected() {
            log::debug!("connected graph with {n} vertices after {attempt} attempt(s)");
            return Ok(graph);
        }
    }

    Err(Error::NotConnected {
        vertices: n,
        density_percent,
        attempts: MAX_CONNECT_ATTEMPTS,
    })
}

/// Runs the sweep, handing each row to `on_row` as soon as it is measured
///
/// # Errors
/// `Error::SchemeMismatch` if the schemes disagree on any graph, or any
/// error of [`random_connected_graph`].
pub fn run_benchmark(
    config: &BenchmarkConfig,
    mut on_row: impl FnMut(&BenchmarkRow),
) -> Result<Vec<BenchmarkRow>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut rows = Vec::new();
    for &vertices in &config.vertex_counts {
        for &density_percent in &config.density_percents {
            let graph = random_connected_graph(&mut rng, vertices, density_percent, config.max_weight)?;

            let (simple, expected) = timed(Scheme::Simple, &graph)?;
            let (fibonacci, by_fibonacci) = timed(Scheme::Fibonacci, &graph)?;
            let (binomial, by_binomial) = timed(Scheme::Binomial, &graph)?;

            if by_fibonacci != expected || by_binomial != expected {
                return Err(Error::SchemeMismatch {
                    vertices,
                    density_percent,
                });
            }

            let row = BenchmarkRow {
                vertices,
                density_percent,
                edges: graph.edge_count(),
                simple,
                fibonacci,
                binomial,
            };
            on_row(&row);
            rows.push(row);
        }
    }

    Ok(rows)
}

fn timed(
    scheme: Scheme,
    graph: &Graph<u64>,
) -> Result<(Duration, crate::pathfinding::DistanceMatrix<u64>)> {
    let start = Instant::now();
    let matrix = scheme.run(graph)?;
    let elapsed = start.elapsed();
    log::trace!("{scheme}: {elapsed:?}");
    Ok((elapsed, matrix))
}
