//! Penalty-guided capacity repair.
//!
//! # Algorithm
//!
//! While some route is over capacity, take the worst one and score every
//! relocate and exchange of its customers against every other route:
//!
//! ```text
//! score = violation_improvement / average_demand
//!       - u * distance_delta / max_pair_distance
//! ```
//!
//! The best positive-scoring move is applied and both touched routes are
//! re-optimized. When nothing scores positively the penalty weight `u`
//! decays, trading longer routes for feasibility.
//!
//! A route none of whose moves reduces violation (say, one holding a
//! customer larger than a vehicle) is set aside until the next applied move,
//! and the next worst route is tried instead. The loop is bounded by an
//! iteration cap, and stops early once every overloaded route is set aside,
//! since decay only scales the distance term.

use log::{debug, info, trace, warn};
use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::local_search::TourOptimizer;
use crate::models::Instance;
use crate::solver::{SearchContext, SearchState, SolverConfig};
use crate::EPSILON;

use super::moves::{
    insertion_delta, removal_delta, replacement_delta, violation_improvement, RepairMove,
};

/// Why a repair run ended with capacity still violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidualCause {
    /// The iteration cap was reached.
    IterationCap,
    /// No relocate or exchange reduces the violation of any overloaded route.
    NoImprovingMove,
}

/// Result of a repair run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepairOutcome {
    /// All routes fit their vehicle.
    Feasible {
        /// Loop iterations used (applied moves plus decays).
        iterations: usize,
    },
    /// Some route is still over capacity.
    Residual {
        /// Largest remaining violation.
        max_violation: i64,
        /// Loop iterations used.
        iterations: usize,
        /// Why the loop stopped.
        cause: ResidualCause,
    },
}

impl RepairOutcome {
    /// Returns `true` if every route fits.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible { .. })
    }
}

/// Best candidate of one scan, plus whether any candidate reduced violation.
#[derive(Debug)]
struct Scan {
    best: Option<(RepairMove, f64)>,
    violation_can_improve: bool,
}

/// Normalization constants and the current penalty weight.
struct Scoring<'a> {
    distances: &'a DistanceMatrix,
    average_demand: f64,
    max_pair_distance: f64,
    penalty_weight: f64,
}

impl Scoring<'_> {
    fn score(&self, violation_gain: i64, distance_delta: f64) -> f64 {
        violation_gain as f64 / self.average_demand
            - self.penalty_weight * distance_delta / self.max_pair_distance
    }
}

/// Repairs capacity violations with relocate/exchange moves.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::models::{Customer, Instance};
/// use u_cvrp::repair::FeasibilityRepairer;
/// use u_cvrp::solver::{SearchContext, SearchState, SolverConfig};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 5),
///     Customer::new(2, 2.0, 0.0, 5),
///     Customer::new(3, -1.0, 0.0, 5),
/// ];
/// let instance = Instance::new(customers, 2, 10).unwrap();
/// let config = SolverConfig::default().with_try_limit(10);
/// let mut ctx = SearchContext::new(&instance, &config, StdRng::seed_from_u64(1));
///
/// // Route 0 carries 15 units for a capacity of 10
/// let mut state = SearchState::new(&instance, vec![vec![1, 2, 3], vec![]]);
/// let outcome = FeasibilityRepairer::from_config(&config).repair(&mut ctx, &mut state);
/// assert!(outcome.is_feasible());
/// assert!(state.violations().iter().all(|&v| v <= 0));
/// ```
#[derive(Debug, Clone)]
pub struct FeasibilityRepairer {
    penalty_weight: f64,
    penalty_decay: f64,
    max_iterations: usize,
    optimizer: TourOptimizer,
}

impl FeasibilityRepairer {
    /// Creates a repairer; touched routes are re-optimized with `optimizer`.
    pub fn new(
        penalty_weight: f64,
        penalty_decay: f64,
        max_iterations: usize,
        optimizer: TourOptimizer,
    ) -> Self {
        Self {
            penalty_weight,
            penalty_decay,
            max_iterations,
            optimizer,
        }
    }

    /// Creates a repairer from the solver parameters.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(
            config.penalty_weight,
            config.penalty_decay,
            config.repair_max_iterations,
            TourOptimizer::from_config(config),
        )
    }

    /// Runs the repair loop on `state` until it is feasible or the loop
    /// gives up.
    pub fn repair<R: Rng>(
        &self,
        ctx: &mut SearchContext<'_, R>,
        state: &mut SearchState,
    ) -> RepairOutcome {
        let instance = ctx.instance;
        let mut scoring = Scoring {
            distances: instance.distances(),
            average_demand: positive_or_one(instance.average_demand()),
            max_pair_distance: positive_or_one(instance.distances().max_pair_distance()),
            penalty_weight: self.penalty_weight,
        };
        let mut iterations = 0;
        let mut stuck = vec![false; state.routes().len()];

        loop {
            let Some((_, worst)) = state.worst_violation() else {
                info!("repair: feasible after {iterations} iterations");
                return RepairOutcome::Feasible { iterations };
            };
            if iterations >= self.max_iterations {
                warn!("repair: iteration cap {iterations} hit with violation {worst}");
                return RepairOutcome::Residual {
                    max_violation: worst,
                    iterations,
                    cause: ResidualCause::IterationCap,
                };
            }
            let Some((source, violation)) = state.worst_violation_where(|i| !stuck[i]) else {
                warn!("repair: no move reduces any remaining violation (worst {worst})");
                return RepairOutcome::Residual {
                    max_violation: worst,
                    iterations,
                    cause: ResidualCause::NoImprovingMove,
                };
            };
            iterations += 1;

            let scan = scan_moves(instance, state, source, &scoring);
            match scan.best {
                Some((mv, score)) => {
                    debug!(
                        "repair iteration {iterations}: {mv:?} (score {score:.4}, u {:.4})",
                        scoring.penalty_weight
                    );
                    self.commit(ctx, state, mv);
                    stuck.fill(false);
                }
                None if !scan.violation_can_improve => {
                    debug!(
                        "repair iteration {iterations}: route {source} (violation {violation}) set aside"
                    );
                    stuck[source] = true;
                }
                None => {
                    scoring.penalty_weight *= self.penalty_decay;
                    trace!(
                        "repair iteration {iterations}: penalty weight decayed to {:.6}",
                        scoring.penalty_weight
                    );
                }
            }
        }
    }

    /// Applies `mv` to both routes at once, then re-optimizes them.
    fn commit<R: Rng>(
        &self,
        ctx: &mut SearchContext<'_, R>,
        state: &mut SearchState,
        mv: RepairMove,
    ) {
        let instance = ctx.instance;
        let (from_route, to_route) = mv.routes();
        let (from, to) = mv.apply(state.routes());
        state.set_route(instance, from_route, from);
        state.set_route(instance, to_route, to);

        for index in [from_route, to_route] {
            let (order, _) = self.optimizer.optimize(
                &state.routes()[index],
                0,
                instance.distances(),
                &mut ctx.rng,
            );
            state.set_route(instance, index, order);
        }
    }
}

fn positive_or_one(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Scores every relocate and exchange of `source`'s customers.
fn scan_moves(
    instance: &Instance,
    state: &SearchState,
    source: usize,
    scoring: &Scoring<'_>,
) -> Scan {
    let routes = state.routes();
    let violations = state.violations();
    let distances = scoring.distances;
    let from = &routes[source];
    let v_from = violations[source];

    let mut best: Option<(RepairMove, f64)> = None;
    let mut violation_can_improve = false;
    let mut consider = |mv: RepairMove, gain: i64, distance_delta: f64| {
        if gain > 0 {
            violation_can_improve = true;
        }
        let score = scoring.score(gain, distance_delta);
        if score > EPSILON && best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    };

    for (from_pos, &a) in from.iter().enumerate() {
        let demand_a = i64::from(instance.demand(a));
        let removal = removal_delta(from, from_pos, 0, distances);

        for (to_route, to) in routes.iter().enumerate() {
            if to_route == source {
                continue;
            }
            let v_to = violations[to_route];

            let gain = violation_improvement(v_from, v_to, v_from - demand_a, v_to + demand_a);
            for to_pos in 0..=to.len() {
                let delta = removal + insertion_delta(to, to_pos, a, 0, distances);
                let mv = RepairMove::Relocate {
                    from_route: source,
                    from_pos,
                    to_route,
                    to_pos,
                };
                consider(mv, gain, delta);
            }

            for (to_pos, &b) in to.iter().enumerate() {
                let demand_b = i64::from(instance.demand(b));
                let gain = violation_improvement(
                    v_from,
                    v_to,
                    v_from - demand_a + demand_b,
                    v_to - demand_b + demand_a,
                );
                let delta = replacement_delta(from, from_pos, b, 0, distances)
                    + replacement_delta(to, to_pos, a, 0, distances);
                let mv = RepairMove::Exchange {
                    from_route: source,
                    from_pos,
                    to_route,
                    to_pos,
                };
                consider(mv, gain, delta);
            }
        }
    }

    Scan {
        best,
        violation_can_improve,
    }
}
