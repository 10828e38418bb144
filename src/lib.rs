//! Shipment-to-flight assignment for a hub-based air cargo network.
//!
//! Given a flight network with per-departure capacities and a book of
//! customer orders, this crate finds routes that deliver every order
//! inside its continental SLA window, then optimizes which hub each
//! order ships from:
//!
//! - **Route search**: Depth-first multi-hop search (up to three legs)
//!   over timezone-aware departure instants, with preparation and
//!   connection buffers and capacity reservation against a ledger.
//! - **Order splitting**: When no single route can carry an order, it
//!   is fragmented across several flight instances, all-or-nothing.
//! - **Genetic Algorithm (GA)**: Population-based search over
//!   hub-choice chromosomes with pluggable selection strategies.
//! - **Ant Colony Optimization (ACO)**: Pheromone-guided construction
//!   with clamped trails and a transit-time desirability heuristic.
//!
//! # Architecture
//!
//! The domain layer ([`model`], [`geo`], [`network`], [`ledger`],
//! [`search`], [`split`], [`assign`], [`fitness`]) is deterministic and
//! free of randomness; all stochastic exploration lives in the
//! strategies ([`ga`], [`aco`]), which communicate with the domain only
//! through [`problem::PlanningProblem`]. Candidate assignments own
//! private ledger snapshots, so whole populations can be evaluated in
//! parallel.

pub mod aco;
pub mod assign;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod geo;
pub mod ledger;
pub mod model;
pub mod network;
pub mod optimize;
pub mod problem;
pub mod random;
pub mod search;
pub mod split;
