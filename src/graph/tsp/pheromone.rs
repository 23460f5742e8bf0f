use ndarray::prelude::*;

/// Trail strength between every pair of vertices.
///
/// Only ever updated in both directions at once, so it stays symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    trails: Array2<f64>,
}

impl PheromoneMatrix {
    pub const INITIAL: f64 = 1.0;

    pub fn new(num_vertices: usize) -> Self {
        Self {
            trails: Array2::from_elem((num_vertices, num_vertices), Self::INITIAL),
        }
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.trails[[from, to]]
    }

    pub fn trails(&self) -> ArrayView2<'_, f64> {
        self.trails.view()
    }

    /// Decay every trail by `rate`, which is in `[0, 1)`.
    pub fn evaporate(&mut self, rate: f64) {
        self.trails.mapv_inplace(|trail| trail * (1.0 - rate));
    }

    /// Reinforce every edge of a closed tour by `amount`, in both directions.
    pub fn deposit(&mut self, tour: &[usize], amount: f64) {
        for edge in tour.windows(2) {
            let (from, to) = (edge[0], edge[1]);
            self.trails[[from, to]] += amount;
            // Self loops only happen on single vertex tours
            if from != to {
                self.trails[[to, from]] += amount;
            }
        }
    }
}
