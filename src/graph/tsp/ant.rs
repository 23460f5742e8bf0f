use super::{PheromoneMatrix, RandomSource};
use crate::{graph::Graph, Error, Result};

/// A single ant walking one closed tour through the graph.
#[derive(Debug, Clone)]
pub(crate) struct Ant {
    visited: Vec<bool>,
    tour: Vec<usize>,
    length: u64,
}

impl Ant {
    /// Walk a full tour from a uniformly random start, closing it back on the start.
    ///
    /// The graph must be complete, see [Graph::ensure_complete].
    /// A missing edge met along the way is an [Error::IncompleteGraph].
    pub fn construct<R: RandomSource + ?Sized>(
        graph: &Graph,
        pheromones: &PheromoneMatrix,
        alpha: f64,
        beta: f64,
        rng: &mut R,
    ) -> Result<Self> {
        graph.ensure_not_empty()?;
        let n = graph.num_vertices();
        let mut ant = Self {
            visited: vec![false; n],
            tour: Vec::with_capacity(n + 1),
            length: 0,
        };

        let start = rng.next_index(n);
        ant.visit(graph, start);
        while ant.tour.len() < n {
            let next = ant.select_next(graph, pheromones, alpha, beta, rng)?;
            ant.visit(graph, next);
        }
        ant.visit(graph, start);
        Ok(ant)
    }

    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Sum of the edge weights along the tour.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn into_tour(self) -> Vec<usize> {
        self.tour
    }

    fn visit(&mut self, graph: &Graph, vertex: usize) {
        if let Some(&last) = self.tour.last() {
            self.length += edge_length(graph, last, vertex);
        }
        self.visited[vertex] = true;
        self.tour.push(vertex);
    }

    /// Roulette wheel selection over the unvisited vertices, walked in index order.
    ///
    /// Falls back on the lowest unvisited vertex when rounding keeps the cumulative probability below the draw.
    fn select_next<R: RandomSource + ?Sized>(
        &self,
        graph: &Graph,
        pheromones: &PheromoneMatrix,
        alpha: f64,
        beta: f64,
        rng: &mut R,
    ) -> Result<usize> {
        let current = *self.tour.last().ok_or(Error::NoUnvisitedVertex { from: 0 })?;
        let attractiveness = self
            .unvisited()
            .map(|vertex| {
                let weight = graph
                    .weight(current, vertex)
                    .filter(|weight| *weight > 0)
                    .ok_or(Error::IncompleteGraph {
                        from: current,
                        to: vertex,
                    })?;
                let trail = pheromones.get(current, vertex).powf(alpha);
                let heuristic = (1.0 / weight as f64).powf(beta);
                Ok((vertex, trail * heuristic))
            })
            .collect::<Result<Vec<_>>>()?;
        let total = attractiveness.iter().map(|(_, a)| a).sum::<f64>();

        let draw = rng.next_unit();
        let mut cumulative = 0.0;
        for (vertex, a) in &attractiveness {
            cumulative += a / total;
            if draw <= cumulative {
                return Ok(*vertex);
            }
        }

        self.unvisited()
            .next()
            .ok_or(Error::NoUnvisitedVertex { from: current })
    }

    fn unvisited(&self) -> impl Iterator<Item = usize> + '_ {
        self.visited
            .iter()
            .enumerate()
            .filter(|(_, visited)| !**visited)
            .map(|(vertex, _)| vertex)
    }
}

/// Weight of the edge, where a missing one only ever shows up as the self loop closing a single vertex tour.
fn edge_length(graph: &Graph, from: usize, to: usize) -> u64 {
    graph.weight(from, to).map_or(0, u64::from)
}
