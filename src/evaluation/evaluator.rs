//! Route evaluator that computes exact cost, load, and capacity violation.

use crate::error::RoutingError;
use crate::models::{Instance, Route, Solution, SolutionStatus};

/// Evaluates customer sequences against an instance.
///
/// Everything here is recomputed from the node order; incremental deltas
/// kept by the search are never reported as the objective.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Customer, Instance};
/// use u_cvrp::evaluation::RouteEvaluator;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10),
///     Customer::new(2, 6.0, 8.0, 20),
/// ];
/// let instance = Instance::new(customers, 1, 25).unwrap();
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let route = evaluator.build_route(0, vec![1, 2]);
/// assert!((route.total_distance() - 20.0).abs() < 1e-10);
/// assert_eq!(evaluator.violation(route.customer_ids()), 5);
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Exact closed-tour length of a customer sequence.
    pub fn route_cost(&self, customer_ids: &[usize]) -> f64 {
        self.instance.distances().closed_tour_length(customer_ids, 0)
    }

    /// `load - capacity`; zero or negative means the route fits.
    pub fn violation(&self, customer_ids: &[usize]) -> i64 {
        self.instance.load(customer_ids) - i64::from(self.instance.capacity())
    }

    /// Violation of every route, recomputed from membership.
    pub fn violations(&self, routes: &[Vec<usize>]) -> Vec<i64> {
        routes.iter().map(|r| self.violation(r)).collect()
    }

    /// Builds a route with its distance and load filled in.
    pub fn build_route(&self, vehicle_id: usize, customer_ids: Vec<usize>) -> Route {
        let distance = self.route_cost(&customer_ids);
        let load = self.instance.load(&customer_ids);
        let mut route = Route::new(vehicle_id, customer_ids);
        route.set_metrics(distance, load);
        route
    }

    /// Verifies that every customer appears in exactly one route, exactly
    /// once, and that no route contains the depot or an unknown id.
    pub fn check_partition<S: AsRef<[usize]>>(&self, routes: &[S]) -> Result<(), RoutingError> {
        let n = self.instance.customers().len();
        let mut seen = vec![0usize; n];
        for route in routes {
            for &cid in route.as_ref() {
                if cid == 0 || cid >= n {
                    return Err(RoutingError::UnknownCustomer(cid));
                }
                seen[cid] += 1;
            }
        }
        match seen.iter().enumerate().skip(1).find(|(_, count)| **count != 1) {
            Some((customer_id, occurrences)) => Err(RoutingError::PartitionViolated {
                customer_id,
                occurrences: *occurrences,
            }),
            None => Ok(()),
        }
    }

    /// Freezes per-vehicle customer sequences into a [`Solution`].
    ///
    /// Status comes from violations recomputed here; `structural` marks a
    /// residual violation as unavoidable for this instance.
    pub fn assemble(&self, routes: Vec<Vec<usize>>, structural: bool) -> Solution {
        let max_violation = self.violations(&routes).into_iter().max().unwrap_or(0);
        let status = if max_violation > 0 {
            SolutionStatus::InfeasibleResidual {
                max_violation,
                structural,
            }
        } else {
            SolutionStatus::Feasible
        };
        let routes = routes
            .into_iter()
            .enumerate()
            .map(|(vehicle_id, ids)| self.build_route(vehicle_id, ids))
            .collect();
        Solution::new(routes, status)
    }
}
