//! Constructive heuristics for building initial tours.
//!
//! - [`nearest_neighbor_tour`] — Randomized-start nearest-neighbor cycle, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor_tour;
