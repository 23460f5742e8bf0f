use ndarray::prelude::*;

use crate::{Error, Result};

/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// Single-pair and all-pairs [shortest paths](https://en.wikipedia.org/wiki/Shortest_path_problem)
pub mod shortest_path;
/// Depth-first and breadth-first traversal
pub mod traversal;
/// Solve the [Traveling Salesman Problem (TSP)](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
pub mod tsp;

/// Dense weighted graph over the vertices `0..N`.
///
/// Each cell holds the weight of the edge from row to column, or [None] if there is no edge.
/// Zero only means "no edge" at the boundary with the adjacency matrix format,
/// see [Graph::from_adjacency] and [Graph::to_adjacency].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    weights: Array2<Option<u32>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            weights: Array2::from_elem((0, 0), None),
        }
    }
}

impl Graph {
    /// # Panics
    ///
    /// If `weights` is not square.
    pub fn new(weights: Array2<Option<u32>>) -> Self {
        assert_eq!(weights.nrows(), weights.ncols(), "matrix must be square");
        Self { weights }
    }

    /// Build a graph from an adjacency matrix where `0` denotes the absence of an edge.
    ///
    /// # Panics
    ///
    /// If `adjacency` is not square.
    pub fn from_adjacency(adjacency: ArrayView2<u32>) -> Self {
        Self::new(adjacency.mapv(|weight| (weight != 0).then_some(weight)))
    }

    /// The adjacency matrix of this graph, with `0` wherever there is no edge.
    pub fn to_adjacency(&self) -> Array2<u32> {
        self.weights.mapv(|weight| weight.unwrap_or(0))
    }

    pub fn num_vertices(&self) -> usize {
        self.weights.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.num_vertices() == 0
    }

    pub fn weights(&self) -> ArrayView2<'_, Option<u32>> {
        self.weights.view()
    }

    pub fn weight(&self, from: usize, to: usize) -> Option<u32> {
        self.weights[[from, to]]
    }

    /// Vertices reachable over one outgoing edge of `vertex`, in ascending order.
    ///
    /// A self loop does not make a vertex its own neighbor.
    pub fn neighbors(&self, vertex: usize) -> impl DoubleEndedIterator<Item = (usize, u32)> + '_ {
        self.weights
            .row(vertex)
            .into_iter()
            .enumerate()
            .filter(move |(to, _)| *to != vertex)
            .filter_map(|(to, weight)| weight.map(|weight| (to, weight)))
    }

    /// Every vertex has a positive weight edge to every other vertex.
    ///
    /// On failure, returns the first missing edge in row-major order.
    pub fn ensure_complete(&self) -> Result<()> {
        for ((from, to), weight) in self.weights.indexed_iter() {
            if from != to && !matches!(weight, Some(w) if *w > 0) {
                return Err(Error::IncompleteGraph { from, to });
            }
        }
        Ok(())
    }

    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(Error::GraphEmpty)
        } else {
            Ok(())
        }
    }

    pub fn ensure_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.num_vertices() {
            Ok(())
        } else {
            Err(Error::VertexNotFound {
                vertex: i64::try_from(vertex).unwrap_or(i64::MAX),
                vertex_count: self.num_vertices(),
            })
        }
    }

    /// Resolve a vertex given from outside the engine, where it may well be negative.
    pub fn resolve_vertex(&self, vertex: i64) -> Result<usize> {
        usize::try_from(vertex)
            .ok()
            .filter(|vertex| *vertex < self.num_vertices())
            .ok_or(Error::VertexNotFound {
                vertex,
                vertex_count: self.num_vertices(),
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng};

    /// Ring of 5 vertices where the edge from `i` to `i + 1 mod 5` weighs `i + 1`.
    pub(crate) fn ring() -> Graph {
        let mut adjacency = Array2::zeros((5, 5));
        for i in 0..5 {
            let j = (i + 1) % 5;
            adjacency[[i, j]] = i as u32 + 1;
            adjacency[[j, i]] = i as u32 + 1;
        }
        Graph::from_adjacency(adjacency.view())
    }

    /// Symmetric graph where each pair is connected with probability `density`.
    pub(crate) fn random_symmetric(rng: &mut StdRng, n: usize, density: f64) -> Graph {
        let mut adjacency = Array2::zeros((n, n));
        for i in 0..n {
            for j in i + 1..n {
                if rng.gen_bool(density) {
                    let weight = rng.gen_range(1..=20);
                    adjacency[[i, j]] = weight;
                    adjacency[[j, i]] = weight;
                }
            }
        }
        Graph::from_adjacency(adjacency.view())
    }

    #[test]
    fn zero_is_no_edge_at_the_boundary() {
        let adjacency = array![[0, 3, 0], [3, 0, 7], [0, 7, 0]];
        let graph = Graph::from_adjacency(adjacency.view());
        assert_eq!(graph.weight(0, 1), Some(3));
        assert_eq!(graph.weight(0, 2), None);
        assert_eq!(graph.weight(1, 1), None);
        assert_eq!(graph.to_adjacency(), adjacency);
    }

    #[test]
    fn neighbors_are_ascending_and_skip_self_loops() {
        let graph = Graph::from_adjacency(array![[4, 0, 2, 1], [0, 0, 0, 0], [2, 0, 0, 0], [1, 0, 0, 0]].view());
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![(2, 2), (3, 1)]);
        assert_eq!(graph.neighbors(0).rev().map(|(v, _)| v).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(graph.neighbors(1).count(), 0);
    }

    #[test]
    fn vertices_outside_the_graph_are_not_found() {
        let graph = ring();
        assert_eq!(graph.resolve_vertex(4).unwrap(), 4);
        for vertex in [-1, 5, i64::MIN] {
            assert!(matches!(
                graph.resolve_vertex(vertex),
                Err(Error::VertexNotFound { vertex: v, vertex_count: 5 }) if v == vertex
            ));
        }
        assert!(matches!(
            graph.ensure_vertex(5),
            Err(Error::VertexNotFound { vertex: 5, .. })
        ));
        assert!(matches!(
            graph.ensure_vertex(usize::MAX),
            Err(Error::VertexNotFound { vertex: i64::MAX, .. })
        ));
    }

    #[test]
    fn default_graph_is_empty() {
        let graph = Graph::default();
        assert!(graph.is_empty());
        assert!(matches!(graph.ensure_not_empty(), Err(Error::GraphEmpty)));
    }

    #[test]
    fn ring_is_not_complete() {
        assert!(matches!(
            ring().ensure_complete(),
            Err(Error::IncompleteGraph { from: 0, to: 2 })
        ));
        let complete = Graph::new(Array2::from_shape_fn((3, 3), |(i, j)| (i != j).then_some(1)));
        assert!(complete.ensure_complete().is_ok());
    }
}
