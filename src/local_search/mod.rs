//! Intra-route tour improvement.
//!
//! - [`TabuList`] — Bounded FIFO of recently used pivot nodes
//! - [`edge_exchange`] — Tabu-guided chained 2-opt step
//! - [`TourOptimizer`] — Multi-start greedy + edge-exchange search for one vehicle

mod k_opt;
mod tabu;
mod tour_optimizer;

pub use k_opt::edge_exchange;
pub use tabu::TabuList;
pub use tour_optimizer::TourOptimizer;
