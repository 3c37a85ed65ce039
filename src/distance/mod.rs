//! Distance matrices.
//!
//! Provides a dense Euclidean distance matrix over all locations.

mod matrix;

pub use matrix::DistanceMatrix;
