//! Immutable weighted directed graph over dense vertex indices

use std::collections::VecDeque;

/// A directed edge `start -> end` with a non-negative weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<W> {
    pub start: usize,
    pub end: usize,
    pub weight: W,
}

impl<W> Edge<W> {
    pub fn new(start: usize, end: usize, weight: W) -> Self {
        Edge { start, end, weight }
    }
}

/// A directed graph stored as adjacency lists
///
/// Vertices are `0..vertex_count()`. Each vertex keeps its outgoing
/// `(neighbor, weight)` pairs in the order the edges were given. The graph
/// cannot be changed once built, so one instance can be shared read-only by
/// every per-source computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<W> {
    adjacency: Vec<Vec<(usize, W)>>,
}

impl<W: Copy> Graph<W> {
    /// Builds a graph whose vertex count is the largest index mentioned plus one
    ///
    /// An empty edge list gives an empty graph.
    pub fn from_edges(edges: &[Edge<W>]) -> Self {
        let vertex_count = edges
            .iter()
            .map(|e| e.start.max(e.end) + 1)
            .max()
            .unwrap_or(0);
        Self::build(vertex_count, edges)
    }

    /// Builds a graph with exactly `vertex_count` vertices, some possibly isolated
    ///
    /// Returns `Error::VertexOutOfRange` if an edge mentions a vertex
    /// `>= vertex_count`.
    pub fn with_vertex_count(vertex_count: usize, edges: &[Edge<W>]) -> crate::Result<Self> {
        if let Some(vertex) = edges
            .iter()
            .map(|e| e.start.max(e.end))
            .find(|&v| v >= vertex_count)
        {
            return Err(crate::Error::VertexOutOfRange {
                vertex,
                vertex_count,
            });
        }
        Ok(Self::build(vertex_count, edges))
    }

    /// Callers guarantee every endpoint is below `vertex_count`
    pub(crate) fn build(vertex_count: usize, edges: &[Edge<W>]) -> Self {
        let mut adjacency = vec![Vec::new(); vertex_count];
        for edge in edges {
            adjacency[edge.start].push((edge.end, edge.weight));
        }
        Graph { adjacency }
    }
}

impl<W> Graph<W> {
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Outgoing `(neighbor, weight)` pairs of `vertex`
    ///
    /// # Panics
    /// If `vertex` is out of range.
    pub fn neighbors(&self, vertex: usize) -> &[(usize, W)] {
        &self.adjacency[vertex]
    }

    /// True if every vertex can reach every other vertex
    ///
    /// Breadth-first search from vertex 0 over the edges and over the
    /// reversed edges; both must reach the whole graph.
    pub fn is_strongly_connected(&self) -> bool {
        let n = self.vertex_count();
        if n <= 1 {
            return true;
        }

        let mut reversed = vec![Vec::new(); n];
        for (u, edges) in self.adjacency.iter().enumerate() {
            for &(v, _) in edges {
                reversed[v].push(u);
            }
        }

        let forward = reaches_all(n, |u| self.adjacency[u].iter().map(|&(v, _)| v));
        forward && reaches_all(n, |u| reversed[u].iter().copied())
    }
}

fn reaches_all<I>(n: usize, successors: impl Fn(usize) -> I) -> bool
where
    I: Iterator<Item = usize>,
{
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([0]);
    seen[0] = true;
    let mut count = 1;

    while let Some(u) = queue.pop_front() {
        for v in successors(u) {
            if !seen[v] {
                seen[v] = true;
                count += 1;
                queue.push_back(v);
            }
        }
    }

    count == n
}
