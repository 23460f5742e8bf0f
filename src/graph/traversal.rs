use std::collections::VecDeque;

use tracing::debug;

use super::Graph;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    DepthFirst,
    BreadthFirst,
}

/// Vertices reachable from `start`, in the order the given traversal discovers them.
pub fn traverse(graph: &Graph, start: usize, traversal: Traversal) -> Result<Vec<usize>> {
    match traversal {
        Traversal::DepthFirst => depth_first(graph, start),
        Traversal::BreadthFirst => breadth_first(graph, start),
    }
}

/// Non-recursive depth-first search.
///
/// Neighbors are pushed in descending order so the lowest unvisited one is popped first,
/// giving the same order as a recursive search that walks neighbors in ascending order.
/// A vertex may sit on the stack several times; it is only visited on the first pop.
pub fn depth_first(graph: &Graph, start: usize) -> Result<Vec<usize>> {
    graph.ensure_not_empty()?;
    graph.ensure_vertex(start)?;

    let mut visited = vec![false; graph.num_vertices()];
    let mut order = Vec::with_capacity(graph.num_vertices());
    let mut stack = vec![start];
    while let Some(head) = stack.pop() {
        if visited[head] {
            continue;
        }
        visited[head] = true;
        order.push(head);
        stack.extend(
            graph
                .neighbors(head)
                .rev()
                .map(|(neighbor, _)| neighbor)
                .filter(|neighbor| !visited[*neighbor]),
        );
    }
    debug!("Depth-first search from {} reached {} vertices", start, order.len());
    Ok(order)
}

/// Breadth-first search.
///
/// Vertices are marked when enqueued, so each is enqueued at most once.
pub fn breadth_first(graph: &Graph, start: usize) -> Result<Vec<usize>> {
    graph.ensure_not_empty()?;
    graph.ensure_vertex(start)?;

    let mut visited = vec![false; graph.num_vertices()];
    let mut order = Vec::with_capacity(graph.num_vertices());
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    while let Some(head) = queue.pop_front() {
        order.push(head);
        for (neighbor, _) in graph.neighbors(head) {
            if !visited[neighbor] {
                visited[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }
    debug!("Breadth-first search from {} reached {} vertices", start, order.len());
    Ok(order)
}
