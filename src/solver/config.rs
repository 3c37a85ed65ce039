//! Solver parameters.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Tunable parameters for the cluster-route-repair pipeline.
///
/// Every field has a default; partial configurations deserialize with the
/// missing fields filled in.
///
/// # Examples
///
/// ```
/// use u_cvrp::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_seed(7)
///     .with_try_limit(200)
///     .with_penalty_weight(2.5);
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.try_limit, 200);
/// assert_eq!(config.threshold, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Seed for the single random source of a run.
    pub seed: u64,
    /// Greedy restarts per tour optimization.
    pub try_limit: usize,
    /// Initial number of consecutive non-improving edge-exchange steps
    /// tolerated before a restart ends.
    pub threshold: usize,
    /// Edge-exchange depth; each step chains at most `k_opt - 1` swaps.
    pub k_opt: usize,
    /// Capacity of the tabu list used while improving one tour.
    pub tabu_size: usize,
    /// Initial weight of the distance penalty in repair scoring.
    pub penalty_weight: f64,
    /// Factor applied to the penalty weight when no repair move scores
    /// positively.
    pub penalty_decay: f64,
    /// Total centroid displacement below which k-means stops.
    pub kmeans_tolerance: f64,
    /// Maximum k-means iterations.
    pub kmeans_max_iterations: usize,
    /// Maximum repair loop iterations (applied moves plus penalty decays).
    pub repair_max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            try_limit: 1000,
            threshold: 20,
            k_opt: 3,
            tabu_size: 10,
            penalty_weight: 5.0,
            penalty_decay: 0.9,
            kmeans_tolerance: 0.01,
            kmeans_max_iterations: 1000,
            repair_max_iterations: 10_000,
        }
    }
}

impl SolverConfig {
    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of greedy restarts per tour optimization.
    pub fn with_try_limit(mut self, try_limit: usize) -> Self {
        self.try_limit = try_limit;
        self
    }

    /// Sets the initial non-improvement threshold.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the edge-exchange depth.
    pub fn with_k_opt(mut self, k: usize) -> Self {
        self.k_opt = k;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_size(mut self, size: usize) -> Self {
        self.tabu_size = size;
        self
    }

    /// Sets the initial repair penalty weight.
    pub fn with_penalty_weight(mut self, weight: f64) -> Self {
        self.penalty_weight = weight;
        self
    }

    /// Sets the penalty decay factor.
    pub fn with_penalty_decay(mut self, decay: f64) -> Self {
        self.penalty_decay = decay;
        self
    }

    /// Sets the k-means iteration cap.
    pub fn with_kmeans_max_iterations(mut self, max: usize) -> Self {
        self.kmeans_max_iterations = max;
        self
    }

    /// Sets the repair loop iteration cap.
    pub fn with_repair_max_iterations(mut self, max: usize) -> Self {
        self.repair_max_iterations = max;
        self
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<(), RoutingError> {
        fn invalid(parameter: &'static str, reason: &'static str) -> Result<(), RoutingError> {
            Err(RoutingError::InvalidConfig { parameter, reason })
        }

        if self.try_limit == 0 {
            return invalid("try_limit", "must be at least 1");
        }
        if self.threshold == 0 {
            return invalid("threshold", "must be at least 1");
        }
        if self.k_opt < 2 {
            return invalid("k_opt", "must be at least 2");
        }
        if self.tabu_size == 0 {
            return invalid("tabu_size", "must be at least 1");
        }
        if !(self.penalty_weight.is_finite() && self.penalty_weight > 0.0) {
            return invalid("penalty_weight", "must be positive and finite");
        }
        if !(self.penalty_decay > 0.0 && self.penalty_decay < 1.0) {
            return invalid("penalty_decay", "must lie strictly between 0 and 1");
        }
        if !(self.kmeans_tolerance.is_finite() && self.kmeans_tolerance > 0.0) {
            return invalid("kmeans_tolerance", "must be positive and finite");
        }
        if self.kmeans_max_iterations == 0 {
            return invalid("kmeans_max_iterations", "must be at least 1");
        }
        if self.repair_max_iterations == 0 {
            return invalid("repair_max_iterations", "must be at least 1");
        }
        Ok(())
    }
}
