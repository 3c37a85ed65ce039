//! Per-run search context and mutable search state.

use rand::Rng;

use crate::evaluation::RouteEvaluator;
use crate::models::Instance;

use super::SolverConfig;

/// Read-only inputs of a run plus its single random source.
///
/// Every phase (clustering, tour optimization, repair) draws randomness
/// from `rng`, so a seeded generator makes the whole run reproducible.
pub struct SearchContext<'a, R: Rng> {
    /// Problem instance.
    pub instance: &'a Instance,
    /// Solver parameters.
    pub config: &'a SolverConfig,
    /// Shared random source.
    pub rng: R,
}

impl<'a, R: Rng> SearchContext<'a, R> {
    /// Creates a context for one run.
    pub fn new(instance: &'a Instance, config: &'a SolverConfig, rng: R) -> Self {
        Self {
            instance,
            config,
            rng,
        }
    }
}

/// Routes under construction and their capacity violations.
///
/// `violations[v]` always equals `load(routes[v]) - capacity`; both are
/// updated together by [`SearchState::set_route`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    routes: Vec<Vec<usize>>,
    violations: Vec<i64>,
}

impl SearchState {
    /// Wraps per-vehicle customer sequences, computing their violations.
    pub fn new(instance: &Instance, routes: Vec<Vec<usize>>) -> Self {
        let violations = RouteEvaluator::new(instance).violations(&routes);
        Self { routes, violations }
    }

    /// Customer sequences, indexed by vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Capacity violation of each route.
    pub fn violations(&self) -> &[i64] {
        &self.violations
    }

    /// Replaces one route and recomputes its violation from scratch.
    pub fn set_route(&mut self, instance: &Instance, index: usize, route: Vec<usize>) {
        self.violations[index] = instance.load(&route) - i64::from(instance.capacity());
        self.routes[index] = route;
    }

    /// Index and amount of the largest positive violation, first on ties.
    pub fn worst_violation(&self) -> Option<(usize, i64)> {
        self.worst_violation_where(|_| true)
    }

    /// Like [`SearchState::worst_violation`], restricted to the routes for
    /// which `eligible` returns `true`.
    pub fn worst_violation_where<F>(&self, mut eligible: F) -> Option<(usize, i64)>
    where
        F: FnMut(usize) -> bool,
    {
        let mut worst: Option<(usize, i64)> = None;
        for (index, &v) in self.violations.iter().enumerate() {
            if v > 0 && eligible(index) && worst.is_none_or(|(_, w)| v > w) {
                worst = Some((index, v));
            }
        }
        worst
    }

    /// Consumes the state, returning the routes.
    pub fn into_routes(self) -> Vec<Vec<usize>> {
        self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn instance() -> Instance {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 6),
            Customer::new(2, 2.0, 0.0, 6),
            Customer::new(3, 3.0, 0.0, 6),
        ];
        Instance::new(customers, 3, 5).expect("valid")
    }

    #[test]
    fn test_state_violations() {
        let inst = instance();
        let state = SearchState::new(&inst, vec![vec![1, 2], vec![3], vec![]]);
        assert_eq!(state.violations(), &[7, 1, -5]);
        assert_eq!(state.worst_violation(), Some((0, 7)));
    }

    #[test]
    fn test_set_route_recomputes_violation() {
        let inst = instance();
        let mut state = SearchState::new(&inst, vec![vec![1, 2], vec![3], vec![]]);
        state.set_route(&inst, 0, vec![1]);
        state.set_route(&inst, 2, vec![2]);
        assert_eq!(state.violations(), &[1, 1, 1]);
        // ties go to the first route
        assert_eq!(state.worst_violation(), Some((0, 1)));
        assert_eq!(state.into_routes(), vec![vec![1], vec![3], vec![2]]);
    }

    #[test]
    fn test_worst_violation_none_when_feasible() {
        let customers = vec![Customer::depot(0.0, 0.0), Customer::new(1, 1.0, 0.0, 5)];
        let inst = Instance::new(customers, 2, 5).expect("valid");
        let state = SearchState::new(&inst, vec![vec![1], vec![]]);
        assert_eq!(state.worst_violation(), None);
    }

    #[test]
    fn test_worst_violation_where_skips_routes() {
        let inst = instance();
        let state = SearchState::new(&inst, vec![vec![1, 2], vec![3], vec![]]);
        assert_eq!(state.worst_violation_where(|i| i != 0), Some((1, 1)));
        assert_eq!(state.worst_violation_where(|i| i == 2), None);
    }

    #[test]
    fn test_violations_do_not_overflow_i32() {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 2_000_000_000),
            Customer::new(2, 2.0, 0.0, 2_000_000_000),
        ];
        let inst = Instance::new(customers, 2, i32::MAX).expect("valid");
        let state = SearchState::new(&inst, vec![vec![1, 2], vec![]]);
        assert_eq!(state.violations()[0], 4_000_000_000 - i64::from(i32::MAX));
        assert_eq!(state.worst_violation().map(|(i, _)| i), Some(0));
    }
}
