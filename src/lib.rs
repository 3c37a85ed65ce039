//! # u-cvrp
//!
//! Capacitated vehicle routing by clustering, per-vehicle local search, and
//! penalty-guided capacity repair.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Instance, Route, Solution)
//! - [`distance`] — Euclidean distance matrix
//! - [`evaluation`] — Route cost, capacity violation, and partition checks
//! - [`clustering`] — Depot-biased k-means assignment of customers to vehicles
//! - [`constructive`] — Randomized nearest-neighbor tour construction
//! - [`local_search`] — Tabu-guided edge exchange and multi-start tour optimization
//! - [`repair`] — Relocate/exchange repair of capacity violations
//! - [`solver`] — Configuration, search context, and the end-to-end pipeline
//!
//! ## Example
//!
//! ```
//! use u_cvrp::models::{Customer, Instance};
//! use u_cvrp::solver::{solve, SolverConfig};
//!
//! let customers = vec![
//!     Customer::depot(0.0, 0.0),
//!     Customer::new(1, 2.0, 0.0, 3),
//!     Customer::new(2, 0.0, 2.0, 3),
//!     Customer::new(3, -2.0, 0.0, 3),
//! ];
//! let instance = Instance::new(customers, 1, 10).unwrap();
//! let solution = solve(&instance, &SolverConfig::default().with_try_limit(20)).unwrap();
//! assert!(solution.is_feasible());
//! assert_eq!(solution.routes()[0].len(), 3);
//! ```

pub mod clustering;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod repair;
pub mod solver;

pub use error::RoutingError;

/// Tolerance for strict floating-point improvement checks.
pub(crate) const EPSILON: f64 = 1e-9;
