//! Tabu-guided edge exchange (chained 2-opt) on a closed tour.
//!
//! # Algorithm
//!
//! The pivot is the longest tour edge whose tail node is not tabu. The pivot
//! tail is marked tabu and every non-adjacent edge (c, d) is scanned for the
//! reconnection with the most negative
//!
//! ```text
//! delta = d(a, c) + d(b, d) - d(a, b) - d(c, d)
//! ```
//!
//! where (a, b) is the pivot edge. The best one is applied as a segment
//! reversal, and the new edge (b, d) becomes the next pivot. Up to `k - 1`
//! swaps are chained this way; the chain stops early when no reconnection
//! improves or the next pivot tail is already tabu.
//!
//! # Complexity
//!
//! O(k × n) per call.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use log::trace;

use crate::distance::DistanceMatrix;
use crate::EPSILON;

use super::TabuList;

/// Applies one edge-exchange step to `tour` in place.
///
/// `tour` is a closed cycle of location ids (the depot included, at any
/// position). Returns the length change, which is never positive; on a
/// zero return the tour is the same cycle, possibly rotated.
///
/// # Arguments
///
/// * `tour` — Cyclic order of all locations in the tour
/// * `k` — Edge-exchange depth (at most `k - 1` chained swaps)
/// * `tabu` — Recently used pivot tails, updated by this call
/// * `distances` — Distance matrix
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Customer;
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::local_search::{edge_exchange, TabuList};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 1),
///     Customer::new(2, 1.0, 1.0, 1),
///     Customer::new(3, 0.0, 1.0, 1),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
///
/// // 0 → 2 → 1 → 3 crosses itself
/// let mut tour = vec![0, 2, 1, 3];
/// let mut tabu = TabuList::new(3);
/// let delta = edge_exchange(&mut tour, 3, &mut tabu, &dm);
/// assert!(delta < 0.0);
/// assert!((dm.closed_tour_length(&tour[1..], tour[0]) - 4.0).abs() < 1e-10);
/// ```
pub fn edge_exchange(
    tour: &mut Vec<usize>,
    k: usize,
    tabu: &mut TabuList<usize>,
    distances: &DistanceMatrix,
) -> f64 {
    let m = tour.len();
    if m < 4 {
        return 0.0;
    }

    let Some(mut pivot) = longest_free_edge(tour, tabu, distances) else {
        return 0.0;
    };

    let mut cumulative = 0.0;
    let mut best_delta = 0.0;
    let mut best_tour: Option<Vec<usize>> = None;

    for _ in 1..k {
        if tabu.contains(&pivot) {
            break;
        }
        tabu.push(pivot);

        // Put the pivot edge at (0, 1) so that every other edge (j, j + 1)
        // with 2 <= j <= m - 2 is non-adjacent and the reversal never wraps.
        if let Some(pos) = tour.iter().position(|&c| c == pivot) {
            tour.rotate_left(pos);
        }
        let (a, b) = (tour[0], tour[1]);
        let removed = distances.get(a, b);

        let mut improvement = 0.0;
        let mut candidate = None;
        for j in 2..m - 1 {
            let (c, d) = (tour[j], tour[j + 1]);
            let delta = distances.get(a, c) + distances.get(b, d) - removed - distances.get(c, d);
            if delta < improvement - EPSILON {
                improvement = delta;
                candidate = Some(j);
            }
        }

        let Some(j) = candidate else {
            break;
        };
        tour[1..=j].reverse();
        cumulative += improvement;
        trace!("edge exchange: pivot {a}->{b}, reconnect at {j}, delta {improvement:.6}");
        pivot = b;

        if cumulative < best_delta - EPSILON {
            best_delta = cumulative;
            best_tour = Some(tour.clone());
        }
    }

    if let Some(best) = best_tour {
        *tour = best;
    }
    best_delta
}

/// Tail node of the longest edge whose tail is not tabu (first on ties).
fn longest_free_edge(
    tour: &[usize],
    tabu: &TabuList<usize>,
    distances: &DistanceMatrix,
) -> Option<usize> {
    let m = tour.len();
    let mut best: Option<(usize, f64)> = None;
    for i in 0..m {
        let tail = tour[i];
        if tabu.contains(&tail) {
            continue;
        }
        let len = distances.get(tail, tour[(i + 1) % m]);
        if best.is_none_or(|(_, l)| len > l) {
            best = Some((tail, len));
        }
    }
    best.map(|(tail, _)| tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn unit_square() -> DistanceMatrix {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 1),
            Customer::new(2, 1.0, 1.0, 1),
            Customer::new(3, 0.0, 1.0, 1),
        ];
        DistanceMatrix::from_customers(&customers)
    }

    fn cycle_length(tour: &[usize], dm: &DistanceMatrix) -> f64 {
        (0..tour.len())
            .map(|i| dm.get(tour[i], tour[(i + 1) % tour.len()]))
            .sum()
    }

    #[test]
    fn test_uncrosses_square() {
        let dm = unit_square();
        let mut tour = vec![0, 2, 1, 3];
        let before = cycle_length(&tour, &dm);
        let mut tabu = TabuList::new(3);
        let delta = edge_exchange(&mut tour, 3, &mut tabu, &dm);
        assert!((delta - (2.0 - 2.0 * 2f64.sqrt())).abs() < 1e-10);
        assert!((cycle_length(&tour, &dm) - (before + delta)).abs() < 1e-10);
        assert!((cycle_length(&tour, &dm) - 4.0).abs() < 1e-10);
        // first pivot tail was the depot, second was node 2
        assert!(tabu.contains(&0));
        assert!(tabu.contains(&2));
    }

    #[test]
    fn test_optimal_tour_unchanged() {
        let dm = unit_square();
        let mut tour = vec![0, 1, 2, 3];
        let mut tabu = TabuList::new(3);
        let delta = edge_exchange(&mut tour, 3, &mut tabu, &dm);
        assert_eq!(delta, 0.0);
        assert!((cycle_length(&tour, &dm) - 4.0).abs() < 1e-10);
        let mut sorted = tour.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_no_improvement_keeps_cycle() {
        let dm = unit_square();
        let mut tour = vec![0, 1, 2, 3];
        let mut tabu = TabuList::new(3);
        tabu.push(0);
        tabu.push(1);
        // pivot tail 2 is rotated to the front before the scan finds nothing
        assert_eq!(edge_exchange(&mut tour, 3, &mut tabu, &dm), 0.0);
        assert_eq!(tour, vec![2, 3, 0, 1]);
        assert!(tabu.contains(&2));
    }

    #[test]
    fn test_all_tabu_is_noop() {
        let dm = unit_square();
        let mut tour = vec![0, 2, 1, 3];
        let mut tabu = TabuList::new(4);
        for node in 0..4 {
            tabu.push(node);
        }
        assert_eq!(edge_exchange(&mut tour, 3, &mut tabu, &dm), 0.0);
        assert_eq!(tour, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_short_tour_is_noop() {
        let dm = unit_square();
        let mut tour = vec![0, 2, 1];
        let mut tabu = TabuList::new(3);
        assert_eq!(edge_exchange(&mut tour, 3, &mut tabu, &dm), 0.0);
        assert_eq!(tour, vec![0, 2, 1]);
        assert!(tabu.is_empty());
    }

    #[test]
    fn test_k_two_allows_single_swap() {
        let dm = unit_square();
        let mut tour = vec![0, 2, 1, 3];
        let mut tabu = TabuList::new(3);
        let delta = edge_exchange(&mut tour, 2, &mut tabu, &dm);
        assert!(delta < 0.0);
        assert_eq!(tabu.len(), 1);
    }

    #[test]
    fn test_longest_free_edge_skips_tabu() {
        let dm = unit_square();
        let tour = [0, 2, 1, 3];
        let mut tabu = TabuList::new(3);
        // edges 0->2 and 1->3 are both diagonal; ties go to the first
        assert_eq!(longest_free_edge(&tour, &tabu, &dm), Some(0));
        tabu.push(0);
        assert_eq!(longest_free_edge(&tour, &tabu, &dm), Some(1));
    }
}
