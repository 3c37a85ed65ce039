//! Randomized nearest-neighbor tour construction.
//!
//! Builds one vehicle's tour greedily: starting from a random member of the
//! tour (the depot included), always move to the nearest unvisited node,
//! then close the cycle. The cycle is finally rotated so the depot sits at
//! the boundary and is dropped from the returned order.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers in the tour.

use rand::Rng;

use crate::distance::DistanceMatrix;

/// Constructs a closed tour through `route` and the depot.
///
/// Returns the customer order with the depot implicit at both ends. The
/// random start only changes which cycle is built, not where it begins.
///
/// # Arguments
///
/// * `route` — Customer IDs to visit (excluding depot)
/// * `depot` — Depot location ID
/// * `distances` — Distance matrix
/// * `rng` — Random source for the start node
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::models::Customer;
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::constructive::nearest_neighbor_tour;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 10),
///     Customer::new(2, 2.0, 0.0, 10),
///     Customer::new(3, 3.0, 0.0, 10),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let mut tour = nearest_neighbor_tour(&[3, 1, 2], 0, &dm, &mut rng);
/// assert_eq!(tour.len(), 3);
/// tour.sort_unstable();
/// assert_eq!(tour, vec![1, 2, 3]);
/// ```
pub fn nearest_neighbor_tour<R: Rng>(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
    rng: &mut R,
) -> Vec<usize> {
    if route.is_empty() {
        return Vec::new();
    }

    let mut unvisited: Vec<usize> = Vec::with_capacity(route.len() + 1);
    unvisited.push(depot);
    unvisited.extend_from_slice(route);

    let mut cycle = Vec::with_capacity(unvisited.len());
    let mut current = unvisited.remove(rng.random_range(0..unvisited.len()));
    cycle.push(current);

    while let Some(next) = distances.nearest_neighbor(current, &unvisited) {
        if let Some(pos) = unvisited.iter().position(|&c| c == next) {
            unvisited.remove(pos);
        }
        cycle.push(next);
        current = next;
    }

    if let Some(depot_pos) = cycle.iter().position(|&c| c == depot) {
        cycle.rotate_left(depot_pos);
    }
    cycle.remove(0);
    cycle
}
