//! Error type for instance construction, configuration, and solution checks.

use std::fmt;

/// Errors reported by the routing core.
///
/// Structural infeasibility (demand that no fleet arrangement can carry) is
/// not an error: it is reported through
/// [`SolutionStatus`](crate::models::SolutionStatus) on an otherwise valid
/// solution.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// The instance has no locations at all (not even a depot).
    EmptyInstance,
    /// Location 0 must be the depot with zero demand.
    InvalidDepot {
        /// Demand found at the depot.
        demand: i32,
    },
    /// Location ids must match their index in the customer list.
    CustomerIdMismatch {
        /// Index in the customer list.
        index: usize,
        /// Id stored on the customer.
        id: usize,
    },
    /// Customer demand must be non-negative.
    NegativeDemand {
        /// Offending customer id.
        customer_id: usize,
        /// Demand value.
        demand: i32,
    },
    /// Coordinates must be finite.
    NonFiniteCoordinate {
        /// Offending customer id.
        customer_id: usize,
    },
    /// At least one vehicle is required.
    NoVehicles,
    /// Vehicle capacity must be non-negative.
    NegativeCapacity(i32),
    /// A solver parameter is out of range.
    InvalidConfig {
        /// Parameter name.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A customer is missing from, or repeated across, the routes.
    PartitionViolated {
        /// Offending customer id.
        customer_id: usize,
        /// Number of times it was found.
        occurrences: usize,
    },
    /// A route references a location that does not exist or is the depot.
    UnknownCustomer(usize),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInstance => write!(f, "instance has no locations"),
            Self::InvalidDepot { demand } => {
                write!(f, "depot must have zero demand, found {demand}")
            }
            Self::CustomerIdMismatch { index, id } => {
                write!(f, "customer at index {index} has id {id}")
            }
            Self::NegativeDemand {
                customer_id,
                demand,
            } => write!(f, "customer {customer_id} has negative demand {demand}"),
            Self::NonFiniteCoordinate { customer_id } => {
                write!(f, "customer {customer_id} has a non-finite coordinate")
            }
            Self::NoVehicles => write!(f, "at least one vehicle is required"),
            Self::NegativeCapacity(c) => write!(f, "vehicle capacity {c} is negative"),
            Self::InvalidConfig { parameter, reason } => {
                write!(f, "invalid solver parameter `{parameter}`: {reason}")
            }
            Self::PartitionViolated {
                customer_id,
                occurrences,
            } => write!(
                f,
                "customer {customer_id} appears {occurrences} times across routes"
            ),
            Self::UnknownCustomer(id) => write!(f, "route references unknown customer {id}"),
        }
    }
}

impl std::error::Error for RoutingError {}
