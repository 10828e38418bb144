//! Genetic algorithm over hub-choice chromosomes.
//!
//! Each chromosome assigns every order a preferred hub; decoding runs
//! the greedy route search per order against a private capacity ledger.
//! Evolution explores which pattern of hub preferences leaves the most
//! delivery slack across the whole order book.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, presets)
//! - [`GaStrategy`]: Executes the evolutionary loop
//! - [`Chromosome`]: One candidate hub-choice vector with cached score
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod chromosome;
mod config;
mod runner;
mod selection;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use runner::GaStrategy;
pub use selection::Selection;
