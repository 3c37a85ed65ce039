//! Capacitated routing instance.

use crate::distance::DistanceMatrix;
use crate::error::RoutingError;

use super::Customer;

/// Reason an instance cannot be served by its fleet, whatever the routing.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuralInfeasibility {
    /// A single customer demands more than one vehicle carries.
    OversizedCustomer {
        /// Customer id.
        customer_id: usize,
        /// Its demand.
        demand: i32,
    },
    /// Total demand exceeds total fleet capacity.
    FleetTooSmall {
        /// Sum of all customer demands.
        total_demand: i64,
        /// `vehicle_count * capacity`.
        fleet_capacity: i64,
    },
}

/// An immutable CVRP instance: locations, homogeneous fleet, and distances.
///
/// Location 0 is the depot; locations `1..=N` are customers. Every vehicle
/// has the same capacity and starts and ends at the depot.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Customer, Instance};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10),
///     Customer::new(2, 6.0, 8.0, 20),
/// ];
/// let instance = Instance::new(customers, 2, 25).unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
/// assert!(instance.structural_infeasibility().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    customers: Vec<Customer>,
    vehicle_count: usize,
    capacity: i32,
    distances: DistanceMatrix,
}

impl Instance {
    /// Validates the inputs and computes the distance matrix.
    pub fn new(
        customers: Vec<Customer>,
        vehicle_count: usize,
        capacity: i32,
    ) -> Result<Self, RoutingError> {
        let depot = customers.first().ok_or(RoutingError::EmptyInstance)?;
        if depot.demand() != 0 {
            return Err(RoutingError::InvalidDepot {
                demand: depot.demand(),
            });
        }
        for (index, c) in customers.iter().enumerate() {
            if c.id() != index {
                return Err(RoutingError::CustomerIdMismatch { index, id: c.id() });
            }
            if c.demand() < 0 {
                return Err(RoutingError::NegativeDemand {
                    customer_id: c.id(),
                    demand: c.demand(),
                });
            }
            if !c.x().is_finite() || !c.y().is_finite() {
                return Err(RoutingError::NonFiniteCoordinate {
                    customer_id: c.id(),
                });
            }
        }
        if vehicle_count == 0 {
            return Err(RoutingError::NoVehicles);
        }
        if capacity < 0 {
            return Err(RoutingError::NegativeCapacity(capacity));
        }

        let distances = DistanceMatrix::from_customers(&customers);
        Ok(Self {
            customers,
            vehicle_count,
            capacity,
            distances,
        })
    }

    /// All locations (index 0 = depot).
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// The depot location.
    pub fn depot(&self) -> &Customer {
        &self.customers[0]
    }

    /// Number of customers, excluding the depot.
    pub fn num_customers(&self) -> usize {
        self.customers.len() - 1
    }

    /// Ids of all non-depot customers.
    pub fn customer_ids(&self) -> impl Iterator<Item = usize> + '_ {
        1..self.customers.len()
    }

    /// Number of vehicles (and therefore routes).
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Capacity of every vehicle.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel distance between two locations.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Demand of a location.
    pub fn demand(&self, id: usize) -> i32 {
        self.customers[id].demand()
    }

    /// Sum of demands over the given customer ids.
    pub fn load(&self, route: &[usize]) -> i64 {
        route.iter().map(|&c| i64::from(self.demand(c))).sum()
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> i64 {
        self.customers.iter().map(|c| i64::from(c.demand())).sum()
    }

    /// Mean demand over non-depot customers (0.0 if there are none).
    pub fn average_demand(&self) -> f64 {
        let n = self.num_customers();
        if n == 0 {
            return 0.0;
        }
        self.total_demand() as f64 / n as f64
    }

    /// Detects instances that no assignment of customers to vehicles can
    /// make capacity-feasible.
    pub fn structural_infeasibility(&self) -> Option<StructuralInfeasibility> {
        if let Some(c) = self
            .customers
            .iter()
            .skip(1)
            .find(|c| c.demand() > self.capacity)
        {
            return Some(StructuralInfeasibility::OversizedCustomer {
                customer_id: c.id(),
                demand: c.demand(),
            });
        }

        let total_demand = self.total_demand();
        let fleet_capacity = self.vehicle_count as i64 * i64::from(self.capacity);
        if total_demand > fleet_capacity {
            return Some(StructuralInfeasibility::FleetTooSmall {
                total_demand,
                fleet_capacity,
            });
        }
        None
    }
}
