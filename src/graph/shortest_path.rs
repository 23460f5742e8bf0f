use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use ndarray::prelude::*;
use tracing::debug;

use super::Graph;
use crate::Result;

/// Stands in for infinity in the all-pairs distance matrix.
///
/// Half of the maximum so that adding two of them cannot overflow.
const UNREACHABLE: u64 = u64::MAX / 2;

/// Tentative distance to a vertex, ordered by distance alone.
#[derive(Debug)]
struct VertexDistance {
    vertex: usize,
    distance: u64,
}

impl PartialEq for VertexDistance {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for VertexDistance {}

impl PartialOrd for VertexDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VertexDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.cmp(&other.distance)
    }
}

/// Length of the shortest path from `from` to `to` with [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
/// or [None] if `to` cannot be reached.
pub fn shortest_path(graph: &Graph, from: usize, to: usize) -> Result<Option<u64>> {
    graph.ensure_not_empty()?;
    graph.ensure_vertex(from)?;
    graph.ensure_vertex(to)?;

    let mut distances = vec![u64::MAX; graph.num_vertices()];
    let mut finalized = vec![false; graph.num_vertices()];
    distances[from] = 0;

    let mut queue = BinaryHeap::new();
    queue.push(Reverse(VertexDistance {
        vertex: from,
        distance: 0,
    }));

    while let Some(Reverse(VertexDistance { vertex, .. })) = queue.pop() {
        // Stale entry, a shorter one was already popped
        if finalized[vertex] {
            continue;
        }
        finalized[vertex] = true;

        for (neighbor, weight) in graph.neighbors(vertex) {
            if finalized[neighbor] {
                continue;
            }
            let distance = distances[vertex] + u64::from(weight);
            if distance < distances[neighbor] {
                distances[neighbor] = distance;
                queue.push(Reverse(VertexDistance {
                    vertex: neighbor,
                    distance,
                }));
            }
        }
    }

    let distance = (distances[to] != u64::MAX).then_some(distances[to]);
    debug!("Shortest path from {} to {}: {:?}", from, to, distance);
    Ok(distance)
}

/// Lengths of the shortest paths between all pairs of vertices with the [Floyd-Warshall algorithm](https://en.wikipedia.org/wiki/Floyd%E2%80%93Warshall_algorithm).
///
/// Cell `[i, j]` is [None] when `j` cannot be reached from `i`.
pub fn all_pairs_shortest_paths(graph: &Graph) -> Result<Array2<Option<u64>>> {
    graph.ensure_not_empty()?;

    let n = graph.num_vertices();
    let mut distances = Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j {
            0
        } else {
            graph.weight(i, j).map_or(UNREACHABLE, u64::from)
        }
    });

    for k in 0..n {
        for i in 0..n {
            let through_k = distances[[i, k]];
            for j in 0..n {
                let candidate = through_k + distances[[k, j]];
                if candidate < distances[[i, j]] {
                    distances[[i, j]] = candidate;
                }
            }
        }
    }
    debug!("Relaxed all pairs over {} vertices", n);

    Ok(distances.mapv(|distance| (distance < UNREACHABLE).then_some(distance)))
}
