//! Dense distance matrix.

use crate::models::Customer;

/// A dense n×n distance matrix stored in row-major order.
///
/// Besides the pairwise distances it keeps the largest pairwise distance,
/// which the repair phase uses to normalize distance penalties.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Customer;
/// use u_cvrp::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10),
///     Customer::new(2, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((dm.max_pair_distance() - 10.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
    max_pair_distance: f64,
}

impl DistanceMatrix {
    /// Computes a Euclidean distance matrix from customer coordinates.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let n = customers.len();
        let mut dm = Self {
            data: vec![0.0; n * n],
            size: n,
            max_pair_distance: 0.0,
        };
        for i in 0..n {
            for j in (i + 1)..n {
                let d = customers[i].distance_to(&customers[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
                dm.max_pair_distance = dm.max_pair_distance.max(d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size` or any
    /// entry is negative or non-finite.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size || data.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return None;
        }
        let max_pair_distance = data.iter().copied().fold(0.0, f64::max);
        Some(Self {
            data,
            size,
            max_pair_distance,
        })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest distance between any two locations.
    pub fn max_pair_distance(&self) -> f64 {
        self.max_pair_distance
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }

    /// Length of the closed tour `depot → route[0] → … → route[n-1] → depot`.
    ///
    /// An empty route has length zero.
    pub fn closed_tour_length(&self, route: &[usize], depot: usize) -> f64 {
        let (first, last) = match (route.first(), route.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return 0.0,
        };
        let inner: f64 = route.windows(2).map(|w| self.get(w[0], w[1])).sum();
        self.get(depot, first) + inner + self.get(last, depot)
    }
}
