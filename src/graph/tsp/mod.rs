//! [Ant Colony Optimization](https://en.wikipedia.org/wiki/Ant_colony_optimization_algorithms) for closed loop tours.
//!
//! Every ant of every iteration deposits pheromone, not just the best one.
//! The best tour seen so far is only kept as the answer and is never fed back into the trails,
//! so the colony is free to wander away from it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::Graph;
use crate::{Error, Result};

mod ant;
mod pheromone;

pub(crate) use ant::Ant;
pub use pheromone::PheromoneMatrix;

/// Source of the random draws made by ants.
///
/// Every [Rng] is one, so seeding e.g. [rand::rngs::StdRng] makes a run reproducible.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`.
    fn next_index(&mut self, bound: usize) -> usize;
    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }

    fn next_unit(&mut self) -> f64 {
        self.gen()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntColonyConfig {
    /// Ants released per iteration
    pub ants: usize,
    pub iterations: usize,
    /// Fraction of every trail lost per iteration, in `[0, 1)`
    pub evaporation_rate: f64,
    /// Influence of pheromone
    pub alpha: f64,
    /// Influence of edge weight
    pub beta: f64,
}

impl Default for AntColonyConfig {
    fn default() -> Self {
        Self {
            ants: 10,
            iterations: 100,
            evaporation_rate: 0.5,
            alpha: 1.0,
            beta: 2.0,
        }
    }
}

impl AntColonyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ants == 0 {
            return Err(Error::InvalidConfig("at least one ant is needed".into()));
        }
        if self.iterations == 0 {
            return Err(Error::InvalidConfig(
                "at least one iteration is needed".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(Error::InvalidConfig(format!(
                "evaporation rate {} is outside [0, 1)",
                self.evaporation_rate
            )));
        }
        if !self.alpha.is_finite() || !self.beta.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "alpha {} and beta {} must be finite",
                self.alpha, self.beta
            )));
        }
        Ok(())
    }
}

/// Closed tour through every vertex, starting and ending on the same one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    pub vertices: Vec<usize>,
    /// Sum of the edge weights along the tour
    pub distance: u64,
}

/// Coordinates the ants and pheromone trails of a single run.
pub struct AntColony<'a, R: ?Sized> {
    graph: &'a Graph,
    config: AntColonyConfig,
    rng: &'a mut R,
    pheromones: PheromoneMatrix,
    best: Option<Ant>,
}

impl<'a, R: RandomSource + ?Sized> AntColony<'a, R> {
    pub fn new(graph: &'a Graph, config: AntColonyConfig, rng: &'a mut R) -> Result<Self> {
        graph.ensure_not_empty()?;
        graph.ensure_complete()?;
        config.validate()?;
        Ok(Self {
            graph,
            config,
            rng,
            pheromones: PheromoneMatrix::new(graph.num_vertices()),
            best: None,
        })
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    /// Run one iteration: construct tours, then evaporate and deposit.
    ///
    /// Returns the length of the iteration's best tour.
    pub fn step(&mut self) -> Result<u64> {
        // Trails are read-only until every ant is done
        let mut ants = Vec::with_capacity(self.config.ants);
        for _ in 0..self.config.ants {
            ants.push(Ant::construct(
                self.graph,
                &self.pheromones,
                self.config.alpha,
                self.config.beta,
                &mut *self.rng,
            )?);
        }

        self.pheromones.evaporate(self.config.evaporation_rate);
        for ant in &ants {
            if ant.length() > 0 {
                self.pheromones.deposit(ant.tour(), 1.0 / ant.length() as f64);
            }
        }

        // First ant wins ties
        let iteration_best = ants
            .into_iter()
            .reduce(|best, ant| if ant.length() < best.length() { ant } else { best })
            .ok_or_else(|| Error::InvalidConfig("at least one ant is needed".into()))?;
        let length = iteration_best.length();
        if self
            .best
            .as_ref()
            .map_or(true, |best| iteration_best.length() < best.length())
        {
            self.best = Some(iteration_best);
        }
        Ok(length)
    }

    /// Run every configured iteration and return the best tour seen.
    pub fn run(mut self) -> Result<Tour> {
        for iteration in 0..self.config.iterations {
            let iteration_best = self.step()?;
            debug!(
                "Iteration {}/{} (iteration best: {}, best: {:?})",
                iteration + 1,
                self.config.iterations,
                iteration_best,
                self.best.as_ref().map(Ant::length),
            );
        }

        let best = self
            .best
            .ok_or_else(|| Error::InvalidConfig("at least one iteration is needed".into()))?;
        let tour = Tour {
            distance: best.length(),
            vertices: best.into_tour(),
        };
        info!(
            "Best tour over {} vertices has distance {}",
            self.graph.num_vertices(),
            tour.distance
        );
        Ok(tour)
    }
}

/// Approximate the shortest closed tour through every vertex.
///
/// The graph must be complete: every pair of distinct vertices needs a positive weight edge.
pub fn solve_tsp<R: RandomSource + ?Sized>(
    graph: &Graph,
    config: AntColonyConfig,
    rng: &mut R,
) -> Result<Tour> {
    AntColony::new(graph, config, rng)?.run()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::graph::tests::ring;
    use ndarray::prelude::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    /// Replays a fixed start vertex and a cycle of unit draws.
    pub(crate) struct Scripted {
        start: usize,
        units: Vec<f64>,
        next: usize,
    }

    impl Scripted {
        pub(crate) fn new(start: usize, units: &[f64]) -> Self {
            Self {
                start,
                units: units.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_index(&mut self, bound: usize) -> usize {
            self.start.min(bound - 1)
        }

        fn next_unit(&mut self) -> f64 {
            let unit = self.units[self.next % self.units.len()];
            self.next += 1;
            unit
        }
    }

    fn complete(rng: &mut StdRng, n: usize) -> Graph {
        let mut adjacency = Array2::zeros((n, n));
        for i in 0..n {
            for j in i + 1..n {
                let weight = rng.gen_range(1..=50);
                adjacency[[i, j]] = weight;
                adjacency[[j, i]] = weight;
            }
        }
        Graph::from_adjacency(adjacency.view())
    }

    fn literal_distance(graph: &Graph, tour: &[usize]) -> u64 {
        tour.windows(2)
            .map(|edge| graph.weight(edge[0], edge[1]).map_or(0, u64::from))
            .sum()
    }

    #[test]
    fn tour_is_a_hamiltonian_cycle_with_literal_distance() {
        let mut rng = StdRng::seed_from_u64(17);
        for n in 1..9 {
            let graph = complete(&mut rng, n);
            let tour = solve_tsp(&graph, AntColonyConfig::default(), &mut rng).unwrap();
            assert_eq!(tour.vertices.len(), n + 1);
            assert_eq!(tour.vertices.first(), tour.vertices.last());
            let mut vertices = tour.vertices[..n].to_vec();
            vertices.sort_unstable();
            assert_eq!(vertices, (0..n).collect::<Vec<_>>());
            assert_eq!(tour.distance, literal_distance(&graph, &tour.vertices));
        }
    }

    #[test]
    fn finds_a_cheap_hidden_cycle() {
        // The ring 0-1-...-7-0 weighs 1 per edge, every chord weighs 100
        let n = 8;
        let graph = Graph::from_adjacency(
            Array2::from_shape_fn((n, n), |(i, j)| {
                if i == j {
                    0
                } else if (i + 1) % n == j || (j + 1) % n == i {
                    1
                } else {
                    100
                }
            })
            .view(),
        );
        let tour = solve_tsp(&graph, AntColonyConfig::default(), &mut StdRng::seed_from_u64(23)).unwrap();
        assert_eq!(tour.distance, n as u64);
    }

    #[test]
    fn same_seed_same_tour() {
        let graph = complete(&mut StdRng::seed_from_u64(29), 12);
        let config = AntColonyConfig {
            iterations: 20,
            ..Default::default()
        };
        let first = solve_tsp(&graph, config, &mut StdRng::seed_from_u64(1)).unwrap();
        let second = solve_tsp(&graph, config, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn best_tour_never_gets_worse() {
        let graph = complete(&mut StdRng::seed_from_u64(31), 10);
        let mut rng = StdRng::seed_from_u64(2);
        let mut colony = AntColony::new(&graph, AntColonyConfig::default(), &mut rng).unwrap();
        let mut iteration_bests = vec![];
        for _ in 0..30 {
            iteration_bests.push(colony.step().unwrap());
        }
        let best = colony.run().unwrap();
        // run() adds its own iterations on top, which can only improve on the minimum so far
        assert!(best.distance <= *iteration_bests.iter().min().unwrap());
    }

    #[test]
    fn trails_stay_symmetric() {
        let graph = complete(&mut StdRng::seed_from_u64(37), 7);
        let mut rng = StdRng::seed_from_u64(3);
        let mut colony = AntColony::new(&graph, AntColonyConfig::default(), &mut rng).unwrap();
        for _ in 0..5 {
            colony.step().unwrap();
        }
        let trails = colony.pheromones().trails();
        assert_eq!(trails, trails.t());
        assert!(trails.iter().all(|trail| *trail > 0.0));
    }

    #[test]
    fn one_iteration_evaporates_then_deposits() {
        // Triangle: every tour is the same cycle of length 6
        let graph = Graph::from_adjacency(array![[0, 1, 2], [1, 0, 3], [2, 3, 0]].view());
        let mut rng = Scripted::new(0, &[0.0]);
        let config = AntColonyConfig {
            ants: 2,
            iterations: 1,
            ..Default::default()
        };
        let mut colony = AntColony::new(&graph, config, &mut rng).unwrap();
        assert_eq!(colony.step().unwrap(), 6);
        // 1.0 * (1 - 0.5) + 2 ants * 1/6 on every edge of the cycle
        let edge = 0.5 + 1.0 / 6.0 + 1.0 / 6.0;
        assert_eq!(
            colony.pheromones().trails(),
            array![[0.5, edge, edge], [edge, 0.5, edge], [edge, edge, 0.5]]
        );
    }

    #[test]
    fn single_vertex_graph_has_trivial_tour() {
        let graph = Graph::from_adjacency(array![[0]].view());
        let tour = solve_tsp(&graph, AntColonyConfig::default(), &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(
            tour,
            Tour {
                vertices: vec![0, 0],
                distance: 0
            }
        );
    }

    #[test]
    fn incomplete_graph_is_rejected() {
        assert!(matches!(
            solve_tsp(&ring(), AntColonyConfig::default(), &mut StdRng::seed_from_u64(0)),
            Err(Error::IncompleteGraph { from: 0, to: 2 })
        ));
    }

    #[test]
    fn empty_graph_is_rejected() {
        assert!(matches!(
            solve_tsp(
                &Graph::default(),
                AntColonyConfig::default(),
                &mut StdRng::seed_from_u64(0)
            ),
            Err(Error::GraphEmpty)
        ));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let graph = complete(&mut StdRng::seed_from_u64(41), 4);
        for config in [
            AntColonyConfig { ants: 0, ..Default::default() },
            AntColonyConfig { iterations: 0, ..Default::default() },
            AntColonyConfig { evaporation_rate: 1.0, ..Default::default() },
            AntColonyConfig { evaporation_rate: -0.1, ..Default::default() },
            AntColonyConfig { beta: f64::NAN, ..Default::default() },
        ] {
            assert!(matches!(
                solve_tsp(&graph, config, &mut StdRng::seed_from_u64(0)),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn partial_config_takes_defaults() {
        let config: AntColonyConfig = serde_json::from_str(r#"{"ants": 4, "beta": 5.0}"#).unwrap();
        assert_eq!(
            config,
            AntColonyConfig {
                ants: 4,
                beta: 5.0,
                ..Default::default()
            }
        );
    }
}
