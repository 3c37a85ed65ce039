//! Multi-start tour optimization for a single vehicle.
//!
//! # Algorithm
//!
//! For each of `try_limit` restarts a fresh randomized nearest-neighbor tour
//! is built and improved by repeated [`edge_exchange`] steps. A restart ends
//! once `threshold` consecutive steps fail to improve. Whenever an
//! improvement breaks a run of failures the threshold shrinks by one, so
//! later restarts are cut shorter as the search matures. The shortest tour
//! over all restarts wins.
//!
//! Each restart owns its tabu list: a step that fails leaves its pivot tabu,
//! so the following step examines a different edge.

use log::debug;
use rand::Rng;

use crate::constructive::nearest_neighbor_tour;
use crate::distance::DistanceMatrix;
use crate::solver::SolverConfig;
use crate::EPSILON;

use super::{edge_exchange, TabuList};

/// Multi-start tabu/2-opt optimizer for one vehicle's tour.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::models::Customer;
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::local_search::TourOptimizer;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 1.0, 1),
///     Customer::new(2, 2.0, 0.0, 1),
///     Customer::new(3, 1.0, -1.0, 1),
///     Customer::new(4, 0.0, -2.0, 1),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// let optimizer = TourOptimizer::new(50, 20, 3, 10);
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let (order, cost) = optimizer.optimize(&[4, 1, 3, 2], 0, &dm, &mut rng);
/// assert_eq!(order.len(), 4);
/// assert!((dm.closed_tour_length(&order, 0) - cost).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct TourOptimizer {
    try_limit: usize,
    threshold: usize,
    k: usize,
    tabu_size: usize,
}

impl TourOptimizer {
    /// Creates an optimizer.
    ///
    /// Zero values are raised to the smallest meaningful setting (one
    /// restart, threshold 1, depth 2, one tabu slot).
    pub fn new(try_limit: usize, threshold: usize, k: usize, tabu_size: usize) -> Self {
        Self {
            try_limit: try_limit.max(1),
            threshold: threshold.max(1),
            k: k.max(2),
            tabu_size: tabu_size.max(1),
        }
    }

    /// Creates an optimizer from the solver parameters.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(
            config.try_limit,
            config.threshold,
            config.k_opt,
            config.tabu_size,
        )
    }

    /// Finds a short closed tour through `route` and the depot.
    ///
    /// Returns the customer order (depot implicit at both ends) and its
    /// exact closed-tour length. Routes with fewer than three customers
    /// are returned in their given order, which is already optimal.
    pub fn optimize<R: Rng>(
        &self,
        route: &[usize],
        depot: usize,
        distances: &DistanceMatrix,
        rng: &mut R,
    ) -> (Vec<usize>, f64) {
        if route.len() < 3 {
            return (route.to_vec(), distances.closed_tour_length(route, depot));
        }

        let mut threshold = self.threshold;
        let mut best: Option<(Vec<usize>, f64)> = None;

        for _ in 0..self.try_limit {
            let mut tour = Vec::with_capacity(route.len() + 1);
            tour.push(depot);
            tour.extend(nearest_neighbor_tour(route, depot, distances, rng));

            // Keep at least one pivot available.
            let mut tabu = TabuList::new(self.tabu_size.min(tour.len() - 1));
            let mut pressure = 0;
            while pressure < threshold {
                let delta = edge_exchange(&mut tour, self.k, &mut tabu, distances);
                if delta < -EPSILON {
                    if pressure > 0 {
                        threshold = threshold.saturating_sub(1).max(1);
                    }
                    pressure = 0;
                } else {
                    pressure += 1;
                }
            }

            let order = open_at_depot(tour, depot);
            let cost = distances.closed_tour_length(&order, depot);
            if best.as_ref().is_none_or(|(_, c)| cost < c - EPSILON) {
                best = Some((order, cost));
            }
        }

        let (order, cost) = best.unwrap_or_else(|| {
            let cost = distances.closed_tour_length(route, depot);
            (route.to_vec(), cost)
        });
        debug!(
            "tour of {} customers: cost {:.3} (final threshold {})",
            order.len(),
            cost,
            threshold
        );
        (order, cost)
    }
}

/// Rotates a closed tour so the depot comes first, then drops it.
fn open_at_depot(mut tour: Vec<usize>, depot: usize) -> Vec<usize> {
    if let Some(pos) = tour.iter().position(|&c| c == depot) {
        tour.rotate_left(pos);
        tour.remove(0);
    }
    tour
}
