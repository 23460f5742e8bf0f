use ndarray::prelude::*;
use tracing::debug;

use super::Graph;
use crate::{Error, Result};

/// Compute the MST with Prim's algorithm in O(V^2) time, which suits a dense adjacency matrix better than a heap.
///
/// The tree is returned as an undirected graph holding exactly its `V - 1` edges.
/// Fails with [Error::Disconnected] if some vertex cannot be reached from vertex 0.
///
/// <https://en.wikipedia.org/wiki/Prim%27s_algorithm#Description>
pub fn minimum_spanning_tree(graph: &Graph) -> Result<Graph> {
    graph.ensure_not_empty()?;
    let n = graph.num_vertices();

    let mut in_mst = vec![false; n];
    // Lightest known edge connecting each vertex to the tree, None is infinity
    let mut min_weight: Vec<Option<u32>> = vec![None; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    min_weight[0] = Some(0);

    for _ in 0..n.saturating_sub(1) {
        // Linear scan, so ties go to the lowest index
        let mut next: Option<(usize, u32)> = None;
        for vertex in (0..n).filter(|vertex| !in_mst[*vertex]) {
            if let Some(weight) = min_weight[vertex] {
                if next.map_or(true, |(_, best)| weight < best) {
                    next = Some((vertex, weight));
                }
            }
        }
        let Some((vertex, _)) = next else {
            let vertex = (0..n).find(|vertex| !in_mst[*vertex]).unwrap_or_default();
            return Err(Error::Disconnected { vertex });
        };
        in_mst[vertex] = true;

        for (neighbor, weight) in graph.neighbors(vertex) {
            if !in_mst[neighbor] && min_weight[neighbor].map_or(true, |best| weight < best) {
                min_weight[neighbor] = Some(weight);
                parent[neighbor] = Some(vertex);
            }
        }
    }

    let mut tree = Array2::from_elem((n, n), None);
    for vertex in 1..n {
        let (Some(parent), Some(weight)) = (parent[vertex], min_weight[vertex]) else {
            return Err(Error::Disconnected { vertex });
        };
        tree[[vertex, parent]] = Some(weight);
        tree[[parent, vertex]] = Some(weight);
    }
    debug!(
        "Spanning tree over {} vertices weighs {}",
        n,
        min_weight.iter().flatten().map(|w| u64::from(*w)).sum::<u64>()
    );

    Ok(Graph::new(tree))
}
