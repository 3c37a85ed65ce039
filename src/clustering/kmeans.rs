//! Depot-biased k-means clustering.
//!
//! # Algorithm
//!
//! Seeds `k` centroids at uniformly sampled customer positions (with
//! replacement, so two centroids may start on the same point). Each
//! iteration assigns every customer to its nearest centroid, then moves
//! each centroid to the mean of its customers *and the depot*. Counting the
//! depot as a permanent pseudo-member pulls every cluster towards it, so
//! clusters come out as wedges around the depot rather than detached blobs.
//!
//! Iteration stops once the summed centroid displacement falls below the
//! tolerance, or when the iteration cap is hit.
//!
//! # Complexity
//!
//! O(n × k) per iteration.

use log::{debug, trace};
use rand::Rng;

use crate::models::{euclidean, Customer};

/// Result of a clustering run.
#[derive(Debug, Clone)]
pub struct Clustering {
    buckets: Vec<Vec<usize>>,
    centroids: Vec<(f64, f64)>,
    displacements: Vec<f64>,
    converged: bool,
}

impl Clustering {
    /// Customer ids per cluster; there are exactly `k` buckets, some may be
    /// empty.
    pub fn buckets(&self) -> &[Vec<usize>] {
        &self.buckets
    }

    /// Final centroid positions (empty if no iteration ran).
    pub fn centroids(&self) -> &[(f64, f64)] {
        &self.centroids
    }

    /// Summed centroid displacement of each iteration.
    pub fn displacements(&self) -> &[f64] {
        &self.displacements
    }

    /// Number of iterations performed.
    pub fn iterations(&self) -> usize {
        self.displacements.len()
    }

    /// `true` if the tolerance was reached before the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Consumes the result, returning the buckets.
    pub fn into_buckets(self) -> Vec<Vec<usize>> {
        self.buckets
    }
}

/// Partitions the customers (index 0 = depot, excluded) into `k` buckets.
///
/// # Arguments
///
/// * `customers` — All locations (index 0 = depot)
/// * `k` — Number of clusters (vehicles)
/// * `tolerance` — Summed displacement below which iteration stops
/// * `max_iterations` — Iteration cap
/// * `rng` — Random source for centroid seeding
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::models::Customer;
/// use u_cvrp::clustering::depot_biased_kmeans;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 10.0, 0.0, 1),
///     Customer::new(2, 11.0, 0.0, 1),
/// ];
/// let mut rng = StdRng::seed_from_u64(42);
/// let clustering = depot_biased_kmeans(&customers, 1, 0.01, 1000, &mut rng);
/// assert_eq!(clustering.buckets(), &[vec![1, 2]]);
/// assert!(clustering.converged());
/// // mean of depot (0,0) and the two customers
/// assert!((clustering.centroids()[0].0 - 7.0).abs() < 1e-10);
/// ```
pub fn depot_biased_kmeans<R: Rng>(
    customers: &[Customer],
    k: usize,
    tolerance: f64,
    max_iterations: usize,
    rng: &mut R,
) -> Clustering {
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); k];
    if customers.len() <= 1 || k == 0 {
        return Clustering {
            buckets,
            centroids: Vec::new(),
            displacements: Vec::new(),
            converged: true,
        };
    }

    let depot = customers[0].position();
    let mut centroids: Vec<(f64, f64)> = (0..k)
        .map(|_| customers[rng.random_range(1..customers.len())].position())
        .collect();
    let mut displacements = Vec::new();
    let mut converged = false;

    while displacements.len() < max_iterations {
        for bucket in &mut buckets {
            bucket.clear();
        }
        for c in &customers[1..] {
            buckets[nearest_centroid(c.position(), &centroids)].push(c.id());
        }

        let mut displacement = 0.0;
        for (centroid, bucket) in centroids.iter_mut().zip(&buckets) {
            let (sx, sy) = bucket.iter().fold(depot, |(x, y), &id| {
                (x + customers[id].x(), y + customers[id].y())
            });
            let members = (bucket.len() + 1) as f64;
            let updated = (sx / members, sy / members);
            displacement += euclidean(*centroid, updated);
            *centroid = updated;
        }
        displacements.push(displacement);
        trace!(
            "k-means iteration {}: displacement {:.6}",
            displacements.len(),
            displacement
        );

        if displacement < tolerance {
            converged = true;
            break;
        }
    }

    debug!(
        "k-means: {} clusters after {} iterations (converged: {})",
        k,
        displacements.len(),
        converged
    );

    Clustering {
        buckets,
        centroids,
        displacements,
        converged,
    }
}

/// Index of the closest centroid; the lowest index wins ties.
fn nearest_centroid(point: (f64, f64), centroids: &[(f64, f64)]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &c) in centroids.iter().enumerate() {
        let d = euclidean(point, c);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}
