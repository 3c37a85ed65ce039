//! Solution and status types.

use serde::Serialize;

use super::Route;

/// Whether a solution satisfies every vehicle's capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SolutionStatus {
    /// Every route's demand fits the vehicle capacity.
    Feasible,
    /// At least one route still exceeds capacity.
    InfeasibleResidual {
        /// Largest remaining `load - capacity` over all routes.
        max_violation: i64,
        /// `true` if the instance itself cannot be made feasible (a customer
        /// larger than a vehicle, or total demand above fleet capacity).
        structural: bool,
    },
}

/// A complete solution: one route per vehicle (possibly empty), its exact
/// total cost, and its capacity status.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Route, Solution, SolutionStatus};
///
/// let sol = Solution::new(vec![Route::new(0, vec![]), Route::new(1, vec![])], SolutionStatus::Feasible);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 0);
/// assert!(sol.is_feasible());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: f64,
    status: SolutionStatus,
}

impl Solution {
    /// Creates a solution; the total cost is the sum of route distances.
    pub fn new(routes: Vec<Route>, status: SolutionStatus) -> Self {
        let total_cost = routes.iter().map(|r| r.total_distance()).sum();
        Self {
            routes,
            total_cost,
            status,
        }
    }

    /// Returns the routes, indexed by vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total closed-tour distance over all routes.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Capacity status.
    pub fn status(&self) -> &SolutionStatus {
        &self.status
    }

    /// Returns `true` if every route respects capacity.
    pub fn is_feasible(&self) -> bool {
        self.status == SolutionStatus::Feasible
    }

    /// Total number of customers served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }
}
