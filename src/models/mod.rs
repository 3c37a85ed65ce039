//! Domain model types for capacitated vehicle routing.
//!
//! Provides customers with demands, the immutable problem instance
//! (homogeneous fleet plus distance matrix), routes as ordered sequences of
//! customer ids, and the final solution with its capacity status.

mod customer;
mod instance;
mod route;
mod solution;

pub(crate) use customer::euclidean;
pub use customer::Customer;
pub use instance::{Instance, StructuralInfeasibility};
pub use route::Route;
pub use solution::{Solution, SolutionStatus};
