//! Vehicle route type.

use serde::Serialize;

/// An ordered sequence of customers served by a single vehicle.
///
/// A route starts and ends at the depot, which is not stored in the
/// sequence. Distance and load are filled in by the evaluator when the
/// route is frozen into a [`Solution`](super::Solution).
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Route;
///
/// let route = Route::new(0, vec![3, 1, 2]);
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.vehicle_id(), 0);
/// assert_eq!(route.customer_ids(), &[3, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    vehicle_id: usize,
    customers: Vec<usize>,
    total_distance: f64,
    total_load: i64,
}

impl Route {
    /// Creates a route for the given vehicle visiting `customers` in order.
    pub fn new(vehicle_id: usize, customers: Vec<usize>) -> Self {
        Self {
            vehicle_id,
            customers,
            total_distance: 0.0,
            total_load: 0,
        }
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the customer IDs in visit order.
    pub fn customer_ids(&self) -> &[usize] {
        &self.customers
    }

    /// Returns the number of customer visits (excluding depot).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if this route has no customer visits.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Closed-tour distance of this route (set by evaluator).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total demand served by this route (set by evaluator).
    pub fn total_load(&self) -> i64 {
        self.total_load
    }

    pub(crate) fn set_metrics(&mut self, distance: f64, load: i64) {
        self.total_distance = distance;
        self.total_load = load;
    }
}
