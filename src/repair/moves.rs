//! Inter-route repair moves and their scoring.

use crate::distance::DistanceMatrix;

/// A candidate move of the capacity repair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepairMove {
    /// Move the customer at `from_pos` of `from_route` into `to_route`,
    /// before position `to_pos`.
    Relocate {
        /// Source route index.
        from_route: usize,
        /// Position in the source route.
        from_pos: usize,
        /// Target route index.
        to_route: usize,
        /// Insertion position in the target route (may equal its length).
        to_pos: usize,
    },
    /// Swap the customer at `from_pos` of `from_route` with the one at
    /// `to_pos` of `to_route`; each takes the other's position.
    Exchange {
        /// Source route index.
        from_route: usize,
        /// Position in the source route.
        from_pos: usize,
        /// Target route index.
        to_route: usize,
        /// Position in the target route.
        to_pos: usize,
    },
}

impl RepairMove {
    /// Indices of the two routes whose membership the move changes.
    pub fn routes(&self) -> (usize, usize) {
        match *self {
            Self::Relocate {
                from_route,
                to_route,
                ..
            }
            | Self::Exchange {
                from_route,
                to_route,
                ..
            } => (from_route, to_route),
        }
    }

    /// Returns the new `(from, to)` sequences after applying the move.
    ///
    /// Both routes are rebuilt together so the caller can commit them as
    /// one step.
    pub fn apply(&self, routes: &[Vec<usize>]) -> (Vec<usize>, Vec<usize>) {
        match *self {
            Self::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
            } => {
                let mut from = routes[from_route].clone();
                let mut to = routes[to_route].clone();
                let customer = from.remove(from_pos);
                to.insert(to_pos, customer);
                (from, to)
            }
            Self::Exchange {
                from_route,
                from_pos,
                to_route,
                to_pos,
            } => {
                let mut from = routes[from_route].clone();
                let mut to = routes[to_route].clone();
                std::mem::swap(&mut from[from_pos], &mut to[to_pos]);
                (from, to)
            }
        }
    }
}

/// Predecessor and successor of `pos` in a depot-bounded route.
fn neighbors(route: &[usize], pos: usize, depot: usize) -> (usize, usize) {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos + 1 >= route.len() {
        depot
    } else {
        route[pos + 1]
    };
    (prev, next)
}

/// Distance change from removing the customer at `pos`.
pub(crate) fn removal_delta(
    route: &[usize],
    pos: usize,
    depot: usize,
    distances: &DistanceMatrix,
) -> f64 {
    let (prev, next) = neighbors(route, pos, depot);
    let cid = route[pos];
    // Old: prev → cid → next
    // New: prev → next
    distances.get(prev, next) - distances.get(prev, cid) - distances.get(cid, next)
}

/// Distance change from inserting `customer_id` before `pos`.
pub(crate) fn insertion_delta(
    route: &[usize],
    pos: usize,
    customer_id: usize,
    depot: usize,
    distances: &DistanceMatrix,
) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() {
        depot
    } else {
        route[pos]
    };
    // Old: prev → next
    // New: prev → customer_id → next
    distances.get(prev, customer_id) + distances.get(customer_id, next) - distances.get(prev, next)
}

/// Distance change from replacing the customer at `pos` by `customer_id`.
pub(crate) fn replacement_delta(
    route: &[usize],
    pos: usize,
    customer_id: usize,
    depot: usize,
    distances: &DistanceMatrix,
) -> f64 {
    let (prev, next) = neighbors(route, pos, depot);
    let old = route[pos];
    distances.get(prev, customer_id) + distances.get(customer_id, next)
        - distances.get(prev, old)
        - distances.get(old, next)
}

/// Reduction of total positive violation when two routes go from
/// `(from, to)` to `(from_after, to_after)`.
pub(crate) fn violation_improvement(from: i64, to: i64, from_after: i64, to_after: i64) -> i64 {
    from.max(0) + to.max(0) - from_after.max(0) - to_after.max(0)
}
