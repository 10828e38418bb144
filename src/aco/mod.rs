//! Ant colony optimization over hub-choice vectors.
//!
//! The colony learns which hub each order should ship from: pheromone
//! trails accumulate on (order, hub) pairs that appear in good
//! assignments, while a static desirability heuristic derived from
//! unconstrained transit times guides early exploration. Trail levels
//! are clamped to a fixed band in the manner of MAX-MIN ant systems.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Colony parameters (ants, evaporation, exponents, presets)
//! - [`AcoStrategy`]: Executes the construction loop
//! - [`PheromoneTrail`]: The clamped trail matrix
//!
//! # References
//!
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*
//! - Stützle & Hoos (2000), *MAX-MIN Ant System*

mod config;
mod pheromone;
mod runner;

pub use config::AcoConfig;
pub use pheromone::PheromoneTrail;
pub use runner::AcoStrategy;
