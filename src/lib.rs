//! All-pairs shortest paths over mergeable heaps
//!
//! This crate runs Dijkstra's algorithm from every vertex of a weighted
//! directed graph, with three interchangeable strategies for picking the next
//! vertex to settle:
//!
//! - **Simple scan**: O(V²) array scan, the reference baseline
//! - **Fibonacci Heap**: O(1) amortized insert and decrease_key; O(log n) amortized delete-min
//! - **Binomial Heap**: O(log n) insert, delete-min and decrease_key
//!
//! The heaps are general purpose and usable on their own through the
//! [`Heap`] and [`DecreaseKeyHeap`] traits.
//!
//! # Example
//!
//! ```rust
//! use dijkstra_heaps::graph::{Edge, Graph};
//! use dijkstra_heaps::pathfinding::Scheme;
//!
//! let graph = Graph::from_edges(&[
//!     Edge::new(0, 1, 1u64),
//!     Edge::new(0, 2, 4),
//!     Edge::new(1, 2, 2),
//!     Edge::new(1, 3, 6),
//!     Edge::new(2, 3, 3),
//! ]);
//!
//! let matrix = Scheme::Fibonacci.run(&graph).unwrap();
//! assert_eq!(matrix.row(0), &[Some(0), Some(1), Some(3), Some(6)]);
//! assert_eq!(matrix.get(3, 0), None);
//! ```

pub mod benchmark;
pub mod binomial;
pub mod fibonacci;
pub mod graph;
pub mod input;
pub mod pathfinding;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Heap, HeapError};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("vertex {vertex} out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    #[error("heap operation failed: {0}")]
    Heap(#[from] HeapError),

    #[error(transparent)]
    Input(#[from] input::InputError),

    #[error("{density_percent}% density is too sparse to connect {vertices} vertices")]
    DensityTooLow {
        vertices: usize,
        density_percent: u32,
    },

    #[error("no strongly connected graph with {vertices} vertices at {density_percent}% density after {attempts} attempts")]
    NotConnected {
        vertices: usize,
        density_percent: u32,
        attempts: usize,
    },

    #[error("maximum edge weight must be at least 1")]
    ZeroMaxWeight,

    #[error("distance from vertex {origin} overflows on edge {from} -> {to}")]
    DistanceOverflow { origin: usize, from: usize, to: usize },

    #[error("schemes disagree on a random graph with {vertices} vertices at {density_percent}% density")]
    SchemeMismatch {
        vertices: usize,
        density_percent: u32,
    },
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
