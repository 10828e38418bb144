//! GA evolutionary loop execution.
//!
//! [`GaStrategy`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! repeat. Chromosomes are decoded through
//! [`PlanningProblem::realize`](crate::problem::PlanningProblem::realize),
//! so two runners never share capacity state and whole generations can
//! be scored in parallel.

use super::chromosome::Chromosome;
use super::config::GaConfig;
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

/// Genetic algorithm over hub-choice chromosomes.
///
/// # Usage
///
/// ```no_run
/// use airlift::ga::{GaConfig, GaStrategy};
/// use airlift::optimize::Strategy;
/// # fn demo(problem: &airlift::problem::PlanningProblem) -> Result<(), airlift::error::PlanError> {
/// let strategy = GaStrategy::new(GaConfig::fast().with_seed(42));
/// let result = strategy.optimize(problem, None)?;
/// println!("best score: {}", result.best_score);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GaStrategy {
    config: GaConfig,
}

impl GaStrategy {
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(config: GaConfig) -> Self {
        config.validate().expect("invalid GaConfig");
        Self { config }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

impl Strategy for GaStrategy {
    fn optimize(
        &self,
        problem: &PlanningProblem,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizeResult, PlanError> {
        let config = &self.config;
        let started = Instant::now();
        info!(
            population = config.population_size,
            max_generations = config.max_generations,
            orders = problem.order_count(),
            "starting genetic optimization"
        );
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut population: Vec<Chromosome> = (0..config.population_size)
            .map(|_| Chromosome::random(problem, &mut rng))
            .collect();
        evaluate_slice(problem, &mut population, config.parallel)?;

        let mut best = best_of(&population).clone();
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(IterationStats {
            iteration: 0,
            best: best.score,
            average: average_score(&population),
        });

        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut generations = 0usize;

        for gen in 1..=config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() as u64 >= limit {
                    debug!(generation = gen, "time limit reached");
                    break;
                }
            }

            // Best first.
            population.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let elite_count = (config.population_size as f64 * config.elite_ratio) as usize;
            let mut next_gen: Vec<Chromosome> = population[..elite_count].to_vec();

            while next_gen.len() < config.population_size {
                let p1 = config.selection.select(&population, &mut rng);
                let p2 = config.selection.select(&population, &mut rng);

                let children = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    let (a, b) = population[p1].crossover(&population[p2], &mut rng);
                    vec![a, b]
                } else {
                    vec![population[p1].clone()]
                };

                for mut child in children {
                    if next_gen.len() >= config.population_size {
                        break;
                    }
                    if rng.random_range(0.0..1.0) < config.mutation_rate {
                        child.mutate(problem, &mut rng);
                    }
                    next_gen.push(child);
                }
            }

            // Elites keep their cached score; only offspring need work.
            evaluate_slice(problem, &mut next_gen[elite_count..], config.parallel)?;
            population = next_gen;
            generations = gen;

            let gen_best = best_of(&population);
            if gen_best.score > best.score {
                best = gen_best.clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            let average = average_score(&population);
            history.push(IterationStats {
                iteration: gen,
                best: best.score,
                average,
            });
            debug!(
                generation = gen,
                best = best.score,
                average,
                "generation complete"
            );

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        info!(
            best = best.score,
            generations,
            stagnated,
            cancelled,
            "genetic optimization finished"
        );

        // The decode is deterministic, so realizing the stored choices
        // reproduces the assignment the best score came from.
        let assignment = problem.realize(&best.choices)?;
        Ok(OptimizeResult {
            best: assignment,
            best_choices: best.choices,
            best_score: best.score,
            iterations: generations,
            stagnated,
            cancelled,
            history,
        })
    }
}

fn evaluate_slice(
    problem: &PlanningProblem,
    chromosomes: &mut [Chromosome],
    parallel: bool,
) -> Result<(), PlanError> {
    if parallel {
        chromosomes
            .par_iter_mut()
            .try_for_each(|c| -> Result<(), PlanError> {
                c.score = problem.score(&c.choices)?;
                Ok(())
            })
    } else {
        for c in chromosomes.iter_mut() {
            c.score = problem.score(&c.choices)?;
        }
        Ok(())
    }
}

fn best_of(population: &[Chromosome]) -> &Chromosome {
    population
        .iter()
        .max_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population must not be empty")
}

fn average_score(population: &[Chromosome]) -> f64 {
    population.iter().map(|c| c.score).sum::<f64>() / population.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use crate::problem::PlanningProblem;

    fn run(config: GaConfig) -> OptimizeResult {
        let problem = PlanningProblem::fixture();
        GaStrategy::new(config)
            .optimize(&problem, None)
            .expect("fixture problem is valid")
    }

    #[test]
    fn test_best_never_regresses() {
        let result = run(GaConfig::default()
            .with_population_size(25)
            .with_max_generations(30)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false));

        assert_eq!(result.history.len(), 31);
        for window in result.history.windows(2) {
            assert!(
                window[1].best >= window[0].best,
                "best must be monotone with elitism: {} < {}",
                window[1].best,
                window[0].best
            );
        }
        // The final best is at least as good as the best random seed.
        assert!(result.best_score >= result.history[0].best);
    }

    #[test]
    fn test_fixture_converges_to_full_delivery() {
        // The fixture has ample capacity; the GA must deliver every
        // order from some hub choice within a few generations.
        let result = run(GaConfig::default()
            .with_population_size(20)
            .with_max_generations(40)
            .with_seed(7)
            .with_parallel(false));

        assert_eq!(result.best.failed_count(), 0);
        assert!(result.best_score > 0.0);
    }

    #[test]
    fn test_best_choices_reproduce_best_score() {
        let problem = PlanningProblem::fixture();
        let strategy = GaStrategy::new(
            GaConfig::default()
                .with_population_size(15)
                .with_max_generations(20)
                .with_seed(3)
                .with_parallel(false),
        );
        let result = strategy.optimize(&problem, None).unwrap();
        let rescored = problem.score(&result.best_choices).unwrap();
        assert_eq!(rescored, result.best_score);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = GaConfig::default()
            .with_population_size(15)
            .with_max_generations(25)
            .with_seed(99)
            .with_parallel(false);
        let a = run(config.clone());
        let b = run(config);
        assert_eq!(a.best_choices, b.best_choices);
        assert_eq!(a.best_score, b.best_score);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_parallel_run_completes() {
        let result = run(GaConfig::default()
            .with_population_size(20)
            .with_max_generations(20)
            .with_seed(5)
            .with_parallel(true));
        assert!(result.iterations > 0);
        assert!(!result.history.is_empty());
    }

    #[test]
    fn test_stagnation_termination() {
        let result = run(GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10_000)
            .with_stagnation_limit(5)
            .with_seed(42)
            .with_parallel(false));
        assert!(
            result.stagnated || result.iterations < 10_000,
            "expected stagnation or early stop"
        );
    }

    #[test]
    fn test_cancellation() {
        let problem = PlanningProblem::fixture();
        let strategy = GaStrategy::new(
            GaConfig::default()
                .with_population_size(20)
                .with_max_generations(10_000)
                .with_stagnation_limit(0)
                .with_seed(42)
                .with_parallel(false),
        );

        let cancel = Arc::new(AtomicBool::new(true));
        let result = strategy.optimize(&problem, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        // Best of the initial population still comes back.
        assert_eq!(result.best_choices.len(), problem.order_count());
    }

    #[test]
    fn test_all_selection_strategies_deliver() {
        for selection in [Selection::Tournament(3), Selection::Roulette, Selection::Rank] {
            let result = run(GaConfig::default()
                .with_population_size(20)
                .with_max_generations(30)
                .with_selection(selection)
                .with_seed(42)
                .with_parallel(false));
            assert_eq!(
                result.best.failed_count(),
                0,
                "selection {selection:?} should deliver all fixture orders"
            );
        }
    }

    #[test]
    #[should_panic(expected = "invalid GaConfig")]
    fn test_invalid_config_panics() {
        GaStrategy::new(GaConfig::default().with_population_size(1));
    }
}
