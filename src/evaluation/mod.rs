//! Exact route cost, capacity violation, and partition checks.

mod evaluator;

pub use evaluator::RouteEvaluator;
