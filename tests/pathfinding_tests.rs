//! Tests for the shortest-path engine
//!
//! Tests cover:
//! - Worked scenarios where decrease_key changes the answer
//! - Edge cases (unreachable vertices, cycles, parallel edges, self-loops)
//! - Agreement of all three schemes with a Floyd-Warshall reference on random graphs
//! - Non-integer weights through `OrderedFloat`

use dijkstra_heaps::benchmark::random_graph;
use dijkstra_heaps::binomial::BinomialHeap;
use dijkstra_heaps::fibonacci::FibonacciHeap;
use dijkstra_heaps::graph::{Edge, Graph};
use dijkstra_heaps::input::parse_edges;
use dijkstra_heaps::pathfinding::{all_pairs, dijkstra, simple_scan, Scheme};
use ordered_float::OrderedFloat;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// O(V³) reference distances
fn floyd_warshall(graph: &Graph<u64>) -> Vec<Vec<Option<u64>>> {
    let n = graph.vertex_count();
    let mut dist = vec![vec![None; n]; n];
    for u in 0..n {
        dist[u][u] = Some(0);
        for &(v, w) in graph.neighbors(u) {
            if dist[u][v].map_or(true, |d| w < d) {
                dist[u][v] = Some(w);
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(a), Some(b)) = (dist[i][k], dist[k][j]) {
                    if dist[i][j].map_or(true, |d| a + b < d) {
                        dist[i][j] = Some(a + b);
                    }
                }
            }
        }
    }
    dist
}

fn assert_all_schemes(graph: &Graph<u64>, source: usize, expected: &[Option<u64>]) {
    for scheme in Scheme::ALL {
        let matrix = scheme.run(graph).unwrap();
        assert_eq!(matrix.row(source), expected, "{scheme} disagrees");
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_decrease_key_optimal_path() {
    let text = "0 1 1\n0 2 4\n1 2 2\n1 3 6\n2 3 3\n*\n";
    let graph = Graph::from_edges(&parse_edges(text.as_bytes()).unwrap());
    assert_eq!(graph.vertex_count(), 4);
    assert_all_schemes(&graph, 0, &[Some(0), Some(1), Some(3), Some(6)]);

    let matrix = Scheme::Binomial.run(&graph).unwrap();
    assert_eq!(matrix.row(3), &[None, None, None, Some(0)]);
    assert!(!matrix.all_reachable());
}

#[test]
fn test_two_vertices_one_direction() {
    let graph = Graph::from_edges(&[Edge::new(0, 1, 5u64)]);
    for scheme in Scheme::ALL {
        let matrix = scheme.run(&graph).unwrap();
        assert_eq!(matrix.get(0, 1), Some(5));
        assert_eq!(matrix.get(1, 0), None);
        assert_eq!(matrix.get(1, 1), Some(0));
        assert_eq!(matrix.to_string(), "node\t0\t1\t\n0\t0\t5\t\n1\t?\t0\t\n");
    }
}

#[test]
fn test_two_vertices_no_edges() {
    let graph = Graph::<u64>::with_vertex_count(2, &[]).unwrap();
    for scheme in Scheme::ALL {
        let matrix = scheme.run(&graph).unwrap();
        assert_eq!(matrix.get(0, 0), Some(0));
        assert_eq!(matrix.get(0, 1), None);
        assert_eq!(matrix.to_string(), "node\t0\t1\t\n0\t0\t?\t\n1\t?\t0\t\n");
    }
}

#[test]
fn test_parallel_edges_take_cheapest() {
    let graph = Graph::from_edges(&[
        Edge::new(0, 1, 9u64),
        Edge::new(0, 1, 2),
        Edge::new(0, 1, 5),
    ]);
    assert_all_schemes(&graph, 0, &[Some(0), Some(2)]);
}

#[test]
fn test_graph_with_cycles() {
    let graph = Graph::from_edges(&[
        Edge::new(0, 1, 3u64),
        Edge::new(1, 2, 3),
        Edge::new(2, 0, 3),
        Edge::new(2, 3, 1),
        Edge::new(3, 1, 1),
    ]);
    assert_all_schemes(&graph, 0, &[Some(0), Some(3), Some(6), Some(7)]);
    assert_all_schemes(&graph, 3, &[Some(7), Some(1), Some(4), Some(0)]);
    assert!(Scheme::Fibonacci.run(&graph).unwrap().all_reachable());
}

#[test]
fn test_isolated_middle_vertex() {
    // Vertex 1 is never mentioned as a source or target of a reachable edge
    let graph = Graph::from_edges(&[Edge::new(0, 2, 4u64), Edge::new(1, 1, 1)]);
    assert_all_schemes(&graph, 0, &[Some(0), None, Some(4)]);
    assert_all_schemes(&graph, 1, &[None, Some(0), None]);
}

#[test]
fn test_many_decrease_keys_on_one_vertex() {
    // Every spoke is discovered expensively from 0, then improved once per hub
    let mut edges = Vec::new();
    let hubs = 1..=20usize;
    for hub in hubs.clone() {
        edges.push(Edge::new(0, hub, hub as u64));
        edges.push(Edge::new(hub, 21, 1000 - 40 * hub as u64));
    }
    let graph = Graph::from_edges(&edges);
    let expected = dijkstra::<_, FibonacciHeap<_, _>>(&graph, 0).unwrap();
    assert_eq!(expected[21], Some(20 + 1000 - 800));
    assert_eq!(dijkstra::<_, BinomialHeap<_, _>>(&graph, 0).unwrap(), expected);
    assert_eq!(simple_scan(&graph, 0).unwrap(), expected);
}

#[test]
fn test_long_path() {
    let edges: Vec<_> = (0..2000).map(|i| Edge::new(i, i + 1, 1u64)).collect();
    let graph = Graph::from_edges(&edges);
    let distances = dijkstra::<_, BinomialHeap<_, _>>(&graph, 0).unwrap();
    assert_eq!(distances[2000], Some(2000));
    let back = dijkstra::<_, FibonacciHeap<_, _>>(&graph, 2000).unwrap();
    assert_eq!(back.iter().flatten().count(), 1);
}

#[test]
fn test_grid_graph() {
    // 15x15 grid, right and down edges of weight 1, left and up of weight 3
    let side = 15;
    let id = |x: usize, y: usize| y * side + x;
    let mut edges = Vec::new();
    for y in 0..side {
        for x in 0..side {
            if x + 1 < side {
                edges.push(Edge::new(id(x, y), id(x + 1, y), 1u64));
                edges.push(Edge::new(id(x + 1, y), id(x, y), 3));
            }
            if y + 1 < side {
                edges.push(Edge::new(id(x, y), id(x, y + 1), 1));
                edges.push(Edge::new(id(x, y + 1), id(x, y), 3));
            }
        }
    }
    let graph = Graph::from_edges(&edges);
    let matrix = all_pairs::<_, FibonacciHeap<_, _>>(&graph).unwrap();
    assert_eq!(matrix.get(0, id(14, 14)), Some(28));
    assert_eq!(matrix.get(id(14, 14), 0), Some(84));
    assert_eq!(matrix, all_pairs::<_, BinomialHeap<_, _>>(&graph).unwrap());
    assert_eq!(matrix, Scheme::Simple.run(&graph).unwrap());
}

#[test]
fn test_float_weights() {
    let graph = Graph::from_edges(&[
        Edge::new(0, 1, OrderedFloat(0.5f64)),
        Edge::new(0, 2, OrderedFloat(2.0)),
        Edge::new(1, 2, OrderedFloat(0.25)),
    ]);
    for scheme in Scheme::ALL {
        let matrix = scheme.run(&graph).unwrap();
        assert_eq!(
            matrix.row(0),
            &[Some(OrderedFloat(0.0)), Some(OrderedFloat(0.5)), Some(OrderedFloat(0.75))]
        );
    }
}

#[test]
fn test_empty_graph() {
    let graph: Graph<u64> = Graph::from_edges(&[]);
    for scheme in Scheme::ALL {
        let matrix = scheme.run(&graph).unwrap();
        assert_eq!(matrix.vertex_count(), 0);
        assert!(matrix.all_reachable());
    }
}

#[test]
fn test_seeded_random_graph_matches_reference() {
    let mut rng = StdRng::seed_from_u64(2024);
    let graph = random_graph(&mut rng, 60, 15, 1000).unwrap();
    let reference = floyd_warshall(&graph);
    for scheme in Scheme::ALL {
        let matrix = scheme.run(&graph).unwrap();
        for (source, row) in matrix.rows().enumerate() {
            assert_eq!(row, reference[source].as_slice(), "{scheme} from {source}");
        }
    }
}

// ============================================================================
// Property-based tests
// ============================================================================

fn graph_strategy() -> impl Strategy<Value = Graph<u64>> {
    (1usize..25).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0u64..100), 0..(n * 4))
            .prop_map(move |raw| {
                let edges: Vec<_> = raw.into_iter().map(|(s, e, w)| Edge::new(s, e, w)).collect();
                Graph::with_vertex_count(n, &edges).unwrap()
            })
    })
}

proptest! {
    #[test]
    fn test_schemes_agree_with_reference(graph in graph_strategy()) {
        let reference = floyd_warshall(&graph);
        for scheme in Scheme::ALL {
            let matrix = scheme.run(&graph).unwrap();
            for (source, row) in matrix.rows().enumerate() {
                prop_assert_eq!(row, reference[source].as_slice());
            }
        }
    }

    #[test]
    fn test_source_distance_is_zero(graph in graph_strategy()) {
        let matrix = Scheme::Fibonacci.run(&graph).unwrap();
        for v in 0..graph.vertex_count() {
            prop_assert_eq!(matrix.get(v, v), Some(0));
        }
    }

    #[test]
    fn test_triangle_inequality_on_edges(graph in graph_strategy()) {
        let matrix = Scheme::Binomial.run(&graph).unwrap();
        for source in 0..graph.vertex_count() {
            for u in 0..graph.vertex_count() {
                let Some(du) = matrix.get(source, u) else { continue };
                for &(v, w) in graph.neighbors(u) {
                    let dv = matrix.get(source, v);
                    prop_assert!(dv.is_some_and(|dv| dv <= du + w));
                }
            }
        }
    }
}
