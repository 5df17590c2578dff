//! Dijkstra's shortest paths using the heaps of this crate
//!
//! This module runs Dijkstra's algorithm once per source vertex to produce a
//! full distance matrix. The strategy that ranks unsettled vertices is
//! pluggable:
//!
//! - [`dijkstra`] works with any [`DecreaseKeyHeap`]. Only vertex indices are
//!   stored in the heap; a table indexed by vertex keeps each vertex's live
//!   handle, so every relaxation reaches its heap node in O(1).
//! - [`simple_scan`] is the O(V²) baseline that scans every vertex for the
//!   smallest tentative distance.
//!
//! All strategies produce identical distances. [`Scheme`] selects one at
//! runtime and [`all_pairs`] / [`Scheme::run`] fan the per-source runs out
//! over a `rayon` thread pool; each run owns its heap and its row.
//!
//! # Example
//!
//! ```rust
//! use dijkstra_heaps::binomial::BinomialHeap;
//! use dijkstra_heaps::graph::{Edge, Graph};
//! use dijkstra_heaps::pathfinding::dijkstra;
//!
//! let graph = Graph::from_edges(&[Edge::new(0, 1, 2u32), Edge::new(1, 2, 3)]);
//! let distances = dijkstra::<_, BinomialHeap<_, _>>(&graph, 0).unwrap();
//! assert_eq!(distances, vec![Some(0), Some(2), Some(5)]);
//! ```

use crate::binomial::BinomialHeap;
use crate::fibonacci::FibonacciHeap;
use crate::graph::Graph;
use crate::traits::DecreaseKeyHeap;
use crate::{Error, Result};
use rayon::prelude::*;
use ordered_float::OrderedFloat;
use std::fmt;

/// Trait for types that can be used as edge weights and distances.
///
/// This requires the type to be orderable, copyable, and support checked
/// addition. `Default` must be the zero distance. Weights are assumed
/// non-negative; floating point weights can be used through
/// `ordered_float::OrderedFloat`.
pub trait Cost: Ord + Copy + Default + Send + Sync {
    /// Sum of two costs, `None` if it is not representable
    fn checked_add(self, other: Self) -> Option<Self>;
}

macro_rules! integer_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                fn checked_add(self, other: Self) -> Option<Self> {
                    <$t>::checked_add(self, other)
                }
            }
        )*
    };
}

integer_cost!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! float_cost {
    ($($t:ty),*) => {
        $(
            /// An infinite sum counts as an overflow
            impl Cost for OrderedFloat<$t> {
                fn checked_add(self, other: Self) -> Option<Self> {
                    let sum = self.0 + other.0;
                    sum.is_finite().then_some(OrderedFloat(sum))
                }
            }
        )*
    };
}

float_cost!(f32, f64);

/// Single-source distances from `source`, ranking vertices with heap `H`
///
/// Returns one entry per vertex; `None` marks an unreachable vertex.
///
/// # Errors
/// - `Error::VertexOutOfRange` if `source` is not a vertex of `graph`
/// - `Error::DistanceOverflow` if the distance of a reachable vertex plus the
///   weight of one of its edges does not fit in `W`
pub fn dijkstra<W, H>(graph: &Graph<W>, source: usize) -> Result<Vec<Option<W>>>
where
    W: Cost,
    H: DecreaseKeyHeap<usize, W>,
{
    let n = check_source(graph, source)?;

    let mut distances: Vec<Option<W>> = vec![None; n];
    // Live handle while a vertex sits in the heap
    let mut handles: Vec<Option<H::Handle>> = vec![None; n];
    let mut settled = vec![false; n];

    let mut heap = H::new();
    distances[source] = Some(W::default());
    handles[source] = Some(heap.push_with_handle(W::default(), source));

    while let Some((dist_u, u)) = heap.pop() {
        handles[u] = None;
        settled[u] = true;

        for &(v, weight) in graph.neighbors(u) {
            // Checked before the settled test so every scheme fails alike
            let candidate = relax(source, u, v, dist_u, weight)?;
            if settled[v] {
                continue;
            }
            if distances[v].is_some_and(|current| current <= candidate) {
                continue;
            }
            distances[v] = Some(candidate);

            match handles[v] {
                Some(handle) => heap.decrease_key(&handle, candidate)?,
                None => handles[v] = Some(heap.push_with_handle(candidate, v)),
            }
        }
    }

    Ok(distances)
}

/// Single-source distances using the O(V²) array scan
///
/// Each round settles the unsettled vertex with the smallest known
/// distance (lowest index on ties) and relaxes its edges. The scan stops
/// once no unsettled vertex is reachable.
///
/// # Errors
/// The same as [`dijkstra`].
pub fn simple_scan<W: Cost>(graph: &Graph<W>, source: usize) -> Result<Vec<Option<W>>> {
    let n = check_source(graph, source)?;

    let mut distances: Vec<Option<W>> = vec![None; n];
    let mut settled = vec![false; n];
    distances[source] = Some(W::default());

    loop {
        let next = (0..n)
            .filter(|&v| !settled[v])
            .filter_map(|v| distances[v].map(|d| (d, v)))
            .min();
        let Some((dist_u, u)) = next else {
            break;
        };
        settled[u] = true;

        for &(v, weight) in graph.neighbors(u) {
            let candidate = relax(source, u, v, dist_u, weight)?;
            if distances[v].map_or(true, |current| candidate < current) {
                distances[v] = Some(candidate);
            }
        }
    }

    Ok(distances)
}

fn relax<W: Cost>(origin: usize, from: usize, to: usize, dist: W, weight: W) -> Result<W> {
    dist.checked_add(weight)
        .ok_or(Error::DistanceOverflow { origin, from, to })
}

fn check_source<W>(graph: &Graph<W>, source: usize) -> Result<usize> {
    let vertex_count = graph.vertex_count();
    if source >= vertex_count {
        return Err(Error::VertexOutOfRange {
            vertex: source,
            vertex_count,
        });
    }
    Ok(vertex_count)
}

/// Distance matrix from every source using heap `H`, one source per task
pub fn all_pairs<W, H>(graph: &Graph<W>) -> Result<DistanceMatrix<W>>
where
    W: Cost,
    H: DecreaseKeyHeap<usize, W>,
{
    collect_rows(graph, dijkstra::<W, H>)
}

/// Distance matrix from every source using the O(V²) scan
pub fn all_pairs_simple<W: Cost>(graph: &Graph<W>) -> Result<DistanceMatrix<W>> {
    collect_rows(graph, simple_scan::<W>)
}

fn collect_rows<W, F>(graph: &Graph<W>, single_source: F) -> Result<DistanceMatrix<W>>
where
    W: Cost,
    F: Fn(&Graph<W>, usize) -> Result<Vec<Option<W>>> + Sync,
{
    let n = graph.vertex_count();
    let rows = (0..n)
        .into_par_iter()
        .map(|source| single_source(graph, source))
        .collect::<Result<Vec<_>>>()?;

    Ok(DistanceMatrix {
        vertex_count: n,
        distances: rows.into_iter().flatten().collect(),
    })
}

/// Strategy used to rank unsettled vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// O(V²) array scan
    Simple,
    /// Fibonacci heap
    Fibonacci,
    /// Binomial heap
    Binomial,
}

impl Scheme {
    /// Every scheme, baseline first
    pub const ALL: [Scheme; 3] = [Scheme::Simple, Scheme::Fibonacci, Scheme::Binomial];

    /// Computes the distance matrix of `graph` with this scheme
    pub fn run<W: Cost>(self, graph: &Graph<W>) -> Result<DistanceMatrix<W>> {
        log::debug!(
            "{self} scheme on {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        match self {
            Scheme::Simple => all_pairs_simple(graph),
            Scheme::Fibonacci => all_pairs::<W, FibonacciHeap<usize, W>>(graph),
            Scheme::Binomial => all_pairs::<W, BinomialHeap<usize, W>>(graph),
        }
    }

    /// Human-readable name used in logs and tables
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Simple => "Simple",
            Scheme::Fibonacci => "Fibonacci heap",
            Scheme::Binomial => "Binomial heap",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `n × n` shortest distances; row = source, column = destination
///
/// `None` means the destination is unreachable from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix<W> {
    vertex_count: usize,
    distances: Vec<Option<W>>,
}

impl<W: Copy> DistanceMatrix<W> {
    /// Number of vertices, the side length of the matrix
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Distance from `source` to `target`
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn get(&self, source: usize, target: usize) -> Option<W> {
        self.row(source)[target]
    }

    /// All distances from `source`
    pub fn row(&self, source: usize) -> &[Option<W>] {
        let start = source * self.vertex_count;
        &self.distances[start..start + self.vertex_count]
    }

    /// Rows in source order
    pub fn rows(&self) -> impl Iterator<Item = &[Option<W>]> + '_ {
        // chunks(0) panics, an empty matrix has no rows anyway
        self.distances.chunks(self.vertex_count.max(1))
    }

    /// True if every pair of vertices is connected
    pub fn all_reachable(&self) -> bool {
        self.distances.iter().all(Option::is_some)
    }
}

/// Renders the matrix as a tab separated table, `?` for unreachable pairs
///
/// ```text
/// node    0   1
/// 0       0   5
/// 1       ?   0
/// ```
impl<W: fmt::Display + Copy> fmt::Display for DistanceMatrix<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node\t")?;
        for target in 0..self.vertex_count {
            write!(f, "{target}\t")?;
        }
        writeln!(f)?;

        for (source, row) in self.rows().enumerate() {
            write!(f, "{source}\t")?;
            for distance in row {
                match distance {
                    Some(d) => write!(f, "{d}\t")?,
                    None => write!(f, "?\t")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
