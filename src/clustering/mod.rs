//! Customer-to-vehicle partitioning.
//!
//! - [`depot_biased_kmeans`] — k-means with the depot as a pseudo-member of
//!   every cluster

mod kmeans;

pub use kmeans::{depot_biased_kmeans, Clustering};
