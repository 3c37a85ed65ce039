//! End-to-end CVRP solving.
//!
//! [`solve`] runs the full pipeline on an [`Instance`]:
//!
//! 1. Validate the [`SolverConfig`] and check the instance for structural
//!    infeasibility.
//! 2. Partition customers into one bucket per vehicle with depot-biased
//!    k-means.
//! 3. Optimize every vehicle's tour.
//! 4. Repair capacity violations with relocate/exchange moves. Routes
//!    that cannot be repaired (a customer larger than a vehicle, say) are
//!    left over capacity while the rest are still fixed.
//! 5. Assemble the [`Solution`] with costs recomputed from the final
//!    orders.
//!
//! # Examples
//!
//! ```
//! use u_cvrp::models::{Customer, Instance};
//! use u_cvrp::solver::{solve, SolverConfig};
//!
//! let customers = vec![
//!     Customer::depot(0.0, 0.0),
//!     Customer::new(1, 1.0, 1.0, 4),
//!     Customer::new(2, -1.0, 1.0, 4),
//!     Customer::new(3, -1.0, -1.0, 4),
//!     Customer::new(4, 1.0, -1.0, 4),
//! ];
//! let instance = Instance::new(customers, 2, 10).unwrap();
//! let config = SolverConfig::default().with_seed(7).with_try_limit(50);
//!
//! let solution = solve(&instance, &config).unwrap();
//! assert!(solution.is_feasible());
//! assert_eq!(solution.num_served(), 4);
//! ```

mod config;
mod context;

pub use config::SolverConfig;
pub use context::{SearchContext, SearchState};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clustering::depot_biased_kmeans;
use crate::evaluation::RouteEvaluator;
use crate::local_search::TourOptimizer;
use crate::models::{Instance, Solution};
use crate::repair::{FeasibilityRepairer, RepairOutcome};
use crate::RoutingError;

/// Solves `instance` with a generator seeded from `config.seed`.
pub fn solve(instance: &Instance, config: &SolverConfig) -> Result<Solution, RoutingError> {
    solve_with_rng(instance, config, StdRng::seed_from_u64(config.seed))
}

/// Solves `instance` drawing all randomness from `rng`.
///
/// Structural infeasibility is not an error: repair still runs, and the
/// returned solution carries
/// [`SolutionStatus::InfeasibleResidual`](crate::models::SolutionStatus)
/// with `structural` set.
pub fn solve_with_rng<R: Rng>(
    instance: &Instance,
    config: &SolverConfig,
    rng: R,
) -> Result<Solution, RoutingError> {
    config.validate()?;
    let mut ctx = SearchContext::new(instance, config, rng);

    let structural = instance.structural_infeasibility();
    if let Some(cause) = &structural {
        warn!("instance is structurally infeasible: {cause:?}");
    }

    let clustering = depot_biased_kmeans(
        instance.customers(),
        instance.vehicle_count(),
        ctx.config.kmeans_tolerance,
        ctx.config.kmeans_max_iterations,
        &mut ctx.rng,
    );
    if !clustering.converged() {
        warn!(
            "k-means hit its cap of {} iterations",
            ctx.config.kmeans_max_iterations
        );
    }
    info!(
        "clustered {} customers into {} buckets in {} iterations",
        instance.num_customers(),
        instance.vehicle_count(),
        clustering.iterations()
    );

    let optimizer = TourOptimizer::from_config(ctx.config);
    let routes: Vec<Vec<usize>> = clustering
        .into_buckets()
        .iter()
        .map(|bucket| {
            optimizer
                .optimize(bucket, 0, instance.distances(), &mut ctx.rng)
                .0
        })
        .collect();
    let mut state = SearchState::new(instance, routes);

    let outcome = FeasibilityRepairer::from_config(ctx.config).repair(&mut ctx, &mut state);
    if let RepairOutcome::Residual {
        max_violation,
        cause,
        ..
    } = outcome
    {
        warn!("repair left violation {max_violation} ({cause:?})");
    }

    let evaluator = RouteEvaluator::new(instance);
    evaluator.check_partition(state.routes())?;
    let solution = evaluator.assemble(state.into_routes(), structural.is_some());
    info!(
        "solution: cost {:.3}, {} routes, status {:?}",
        solution.total_cost(),
        solution.num_routes(),
        solution.status()
    );
    Ok(solution)
}
