//! Ant colony construction loop.
//!
//! Each iteration a colony of ants builds hub-choice vectors by
//! sampling every order's choice with probability proportional to
//! `τ^α · η^β`, where `τ` is the learned pheromone trail and `η` the
//! static desirability of that hub's unconstrained route. The
//! iteration-best and global-best vectors reinforce their trails; the
//! clamp bounds on the trail keep the colony from collapsing onto one
//! solution.

use super::config::AcoConfig;
use super::pheromone::PheromoneTrail;
use crate::error::PlanError;
use crate::optimize::{IterationStats, OptimizeResult, Strategy};
use crate::problem::PlanningProblem;
use crate::random::create_rng;
use rand::Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Ant colony optimizer over hub-choice vectors.
///
/// # Usage
///
/// ```no_run
/// use airlift::aco::{AcoConfig, AcoStrategy};
/// use airlift::optimize::Strategy;
/// # fn demo(problem: &airlift::problem::PlanningProblem) -> Result<(), airlift::error::PlanError> {
/// let strategy = AcoStrategy::new(AcoConfig::balanced().with_seed(42));
/// let result = strategy.optimize(problem, None)?;
/// println!("best score: {}", result.best_score);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AcoStrategy {
    config: AcoConfig,
}

impl AcoStrategy {
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`AcoConfig::validate`] first to get a descriptive error).
    pub fn new(config: AcoConfig) -> Self {
        config.validate().expect("invalid AcoConfig");
        Self { config }
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }
}

impl Strategy for AcoStrategy {
    fn optimize(
        &self,
        problem: &PlanningProblem,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizeResult, PlanError> {
        let config = &self.config;
        let started = Instant::now();
        info!(
            ants = config.ants,
            max_iterations = config.max_iterations,
            orders = problem.order_count(),
            "starting ant colony optimization"
        );
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut trail = PheromoneTrail::new(
            problem.order_count(),
            problem.alternatives(),
            config.initial_pheromone,
            config.min_pheromone,
            config.max_pheromone,
        );

        let mut best_choices: Vec<usize> = Vec::new();
        let mut best_score = f64::NEG_INFINITY;
        let mut history = Vec::with_capacity(config.max_iterations);
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut iterations = 0usize;

        for iter in 1..=config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() as u64 >= limit {
                    debug!(iteration = iter, "time limit reached");
                    break;
                }
            }

            // Per-ant seeds drawn from the master stream, so parallel
            // construction stays reproducible.
            let seeds: Vec<u64> = (0..config.ants).map(|_| rng.random()).collect();
            let colony: Vec<(Vec<usize>, f64)> = if config.parallel {
                seeds
                    .par_iter()
                    .map(|&seed| score_ant(problem, &trail, config, seed))
                    .collect::<Result<_, _>>()?
            } else {
                seeds
                    .iter()
                    .map(|&seed| score_ant(problem, &trail, config, seed))
                    .collect::<Result<_, _>>()?
            };
            iterations = iter;

            let (iter_best_choices, iter_best_score) = colony
                .iter()
                .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(c, s)| (c.clone(), *s))
                .expect("colony has at least one ant");

            if iter_best_score > best_score {
                best_choices = iter_best_choices.clone();
                best_score = iter_best_score;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            trail.evaporate(config.evaporation_rate);
            trail.deposit(&iter_best_choices, config.deposit);
            trail.deposit(&best_choices, config.elite_deposit);

            let average =
                colony.iter().map(|(_, s)| *s).sum::<f64>() / colony.len() as f64;
            history.push(IterationStats {
                iteration: iter,
                best: best_score,
                average,
            });
            debug!(
                iteration = iter,
                best = best_score,
                average,
                "iteration complete"
            );

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        if best_choices.is_empty() {
            // Cancelled or timed out before the first iteration ran;
            // fall back to the all-preferred-hub baseline.
            best_choices = vec![0; problem.order_count()];
            best_score = problem.score(&best_choices)?;
        }
        info!(
            best = best_score,
            iterations,
            stagnated,
            cancelled,
            "ant colony optimization finished"
        );

        let assignment = problem.realize(&best_choices)?;
        Ok(OptimizeResult {
            best: assignment,
            best_choices,
            best_score,
            iterations,
            stagnated,
            cancelled,
            history,
        })
    }
}

fn score_ant(
    problem: &PlanningProblem,
    trail: &PheromoneTrail,
    config: &AcoConfig,
    seed: u64,
) -> Result<(Vec<usize>, f64), PlanError> {
    let mut rng = create_rng(seed);
    let choices = construct_choices(problem, trail, config, &mut rng);
    let score = problem.score(&choices)?;
    Ok((choices, score))
}

/// Samples one hub choice per order, proportional to `τ^α · η^β`.
fn construct_choices<R: Rng>(
    problem: &PlanningProblem,
    trail: &PheromoneTrail,
    config: &AcoConfig,
    rng: &mut R,
) -> Vec<usize> {
    let alternatives = problem.alternatives();
    (0..problem.order_count())
        .map(|order| {
            let weights: Vec<f64> = (0..alternatives)
                .map(|choice| {
                    trail.level(order, choice).powf(config.alpha)
                        * problem.desirability(order, choice).powf(config.beta)
                })
                .collect();
            sample_index(&weights, rng)
        })
        .collect()
}

fn sample_index<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return rng.random_range(0..weights.len());
    }
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    weights.len() - 1 // floating-point fallback
}
