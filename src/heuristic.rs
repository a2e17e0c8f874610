//! Nearest-neighbor tour construction.
//!
//! Seeds the tour with the first stop in input order, then repeatedly
//! appends the closest unplaced stop. Ties go to the candidate that came
//! first in input order. O(n²) distance lookups over a precomputed matrix.
//!
//! This is the fallback path when no external optimizer answers, so it must
//! not fail for any input.

use tracing::debug;

use crate::haversine::HaversineMatrix;
use crate::model::{Coordinate, Stop};

#[derive(Debug, Clone, Default)]
pub struct HeuristicRouter {
    matrix: HaversineMatrix,
}

impl HeuristicRouter {
    pub fn new(matrix: HaversineMatrix) -> Self {
        Self { matrix }
    }

    /// Visiting order for `stops`, always a permutation of the input.
    pub fn route(&self, stops: &[Stop]) -> Vec<Stop> {
        self.route_indices(stops)
            .into_iter()
            .map(|index| stops[index].clone())
            .collect()
    }

    /// Same as [`route`](Self::route) but returns input indices.
    pub fn route_indices(&self, stops: &[Stop]) -> Vec<usize> {
        if stops.len() <= 1 {
            return (0..stops.len()).collect();
        }

        let locations: Vec<Coordinate> = stops.iter().map(|stop| stop.coordinates).collect();
        let matrix = self.matrix.matrix_for(&locations);

        let mut remaining: Vec<usize> = (1..stops.len()).collect();
        let mut order = Vec::with_capacity(stops.len());
        order.push(0);

        while !remaining.is_empty() {
            let current = order[order.len() - 1];
            let mut best_slot = 0;
            let mut best_distance = f64::INFINITY;

            for (slot, &candidate) in remaining.iter().enumerate() {
                let distance = matrix[current][candidate];
                // Strict comparison keeps the first-found candidate on ties.
                if distance < best_distance {
                    best_distance = distance;
                    best_slot = slot;
                }
            }

            order.push(remaining.remove(best_slot));
        }

        debug!(stops = stops.len(), "nearest-neighbor tour built");
        order
    }
}
