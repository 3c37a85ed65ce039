//! Capacity repair across routes.
//!
//! - [`FeasibilityRepairer`] — Penalty-guided relocate/exchange loop
//! - [`RepairMove`] — Candidate inter-route move

mod moves;
mod repairer;

pub use moves::RepairMove;
pub use repairer::{FeasibilityRepairer, RepairOutcome, ResidualCause};
