//! Error types.
//!
//! Two failure families exist and they never mix:
//!
//! - [`ConfigError`]: the static data (airports, legs, orders) is broken.
//!   Fatal at startup — the run refuses to proceed rather than guess a
//!   timezone or continent.
//! - [`CapacityError`]: a reservation would overshoot a leg's capacity.
//!   The search engine checks remaining capacity before committing, so
//!   observing this error means a defect, not an operational condition.
//!
//! Per-order misses (no route, deadline exceeded) are *not* errors: they
//! are ordinary outcomes (`SearchOutcome::Exhausted`, `SplitOutcome::
//! Partial`) absorbed into the assignment as failed orders.

use crate::model::LegId;
use thiserror::Error;

/// Static configuration or data-integrity failure. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An airport code was referenced but never configured.
    #[error("unknown airport '{0}': no UTC offset / continent entry configured")]
    UnknownAirport(String),

    /// The same airport code was configured twice.
    #[error("duplicate airport entry '{0}'")]
    DuplicateAirport(String),

    /// The airport table is empty.
    #[error("airport configuration is empty")]
    NoAirports,

    /// A leg with zero daily capacity can never carry anything.
    #[error("leg {origin}->{destination} has zero daily capacity")]
    ZeroCapacityLeg {
        origin: String,
        destination: String,
    },

    /// A leg departs and arrives at the same airport.
    #[error("leg {0}->{0} loops on itself")]
    DegenerateLeg(String),

    /// No hubs were supplied to the planning problem.
    #[error("hub list is empty")]
    NoHubs,

    /// An order has zero quantity.
    #[error("order '{0}' has zero quantity")]
    EmptyOrder(String),
}

/// An attempted reservation exceeded a leg's remaining daily capacity.
///
/// Internal invariant violation: callers verify remaining capacity before
/// reserving, so this surfacing means the engine is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reserving {requested} on leg {leg:?} day {day} exceeds remaining capacity {remaining}")]
pub struct CapacityError {
    pub leg: LegId,
    pub day: u32,
    pub requested: u32,
    pub remaining: u32,
}

/// Umbrella error for planning entry points that can hit either family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),
}
