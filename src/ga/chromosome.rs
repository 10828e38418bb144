//! Solution encoding for the genetic algorithm.
//!
//! A chromosome carries one gene per order: the index of the hub the
//! order should preferably ship from. Decoding a chromosome into an
//! [`Assignment`](crate::assign::Assignment) is the job of
//! [`PlanningProblem::realize`](crate::problem::PlanningProblem::realize),
//! which is deterministic, so the population only needs to store the
//! choices and their score.

use crate::problem::PlanningProblem;
use rand::Rng;

/// One candidate solution: hub choices plus cached score.
#[derive(Debug, Clone)]
pub struct Chromosome {
    /// Hub index per order, each in `0..problem.alternatives()`.
    pub choices: Vec<usize>,
    /// Cached fitness, higher is better. Unevaluated chromosomes hold
    /// `f64::NEG_INFINITY`.
    pub score: f64,
}

impl Chromosome {
    /// Creates a chromosome with uniformly random hub choices.
    pub fn random<R: Rng>(problem: &PlanningProblem, rng: &mut R) -> Self {
        let alternatives = problem.alternatives();
        let choices = (0..problem.order_count())
            .map(|_| rng.random_range(0..alternatives))
            .collect();
        Self {
            choices,
            score: f64::NEG_INFINITY,
        }
    }

    /// Uniform crossover: each gene comes from either parent with
    /// probability 1/2. Returns two complementary children.
    pub fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> (Self, Self) {
        debug_assert_eq!(self.choices.len(), other.choices.len());
        let mut a = Vec::with_capacity(self.choices.len());
        let mut b = Vec::with_capacity(self.choices.len());
        for (&x, &y) in self.choices.iter().zip(&other.choices) {
            if rng.random_bool(0.5) {
                a.push(x);
                b.push(y);
            } else {
                a.push(y);
                b.push(x);
            }
        }
        (Self::unevaluated(a), Self::unevaluated(b))
    }

    /// Mutates in place: either re-rolls one gene or swaps two genes.
    ///
    /// The swap variant keeps the multiset of hub choices intact, which
    /// helps when capacity, not hub preference, is the binding
    /// constraint.
    pub fn mutate<R: Rng>(&mut self, problem: &PlanningProblem, rng: &mut R) {
        let n = self.choices.len();
        if n == 0 {
            return;
        }
        if n >= 2 && rng.random_bool(0.5) {
            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            self.choices.swap(i, j);
        } else {
            let i = rng.random_range(0..n);
            self.choices[i] = rng.random_range(0..problem.alternatives());
        }
        self.score = f64::NEG_INFINITY;
    }

    fn unevaluated(choices: Vec<usize>) -> Self {
        Self {
            choices,
            score: f64::NEG_INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::PlanningProblem;
    use crate::random::create_rng;

    #[test]
    fn test_random_chromosome_in_bounds() {
        let problem = PlanningProblem::fixture();
        let mut rng = create_rng(7);
        for _ in 0..50 {
            let c = Chromosome::random(&problem, &mut rng);
            assert_eq!(c.choices.len(), problem.order_count());
            assert!(c.choices.iter().all(|&g| g < problem.alternatives()));
            assert_eq!(c.score, f64::NEG_INFINITY);
        }
    }

    #[test]
    fn test_crossover_genes_come_from_parents() {
        let mut rng = create_rng(11);
        let p1 = Chromosome {
            choices: vec![0, 0, 0],
            score: 1.0,
        };
        let p2 = Chromosome {
            choices: vec![1, 1, 1],
            score: 2.0,
        };
        let (a, b) = p1.crossover(&p2, &mut rng);
        for i in 0..3 {
            // Complementary: together the children hold both parent genes.
            assert_eq!(a.choices[i] + b.choices[i], 1);
        }
        assert_eq!(a.score, f64::NEG_INFINITY);
        assert_eq!(b.score, f64::NEG_INFINITY);
    }

    #[test]
    fn test_mutation_stays_in_bounds() {
        let problem = PlanningProblem::fixture();
        let mut rng = create_rng(13);
        let mut c = Chromosome::random(&problem, &mut rng);
        for _ in 0..100 {
            c.mutate(&problem, &mut rng);
            assert!(c.choices.iter().all(|&g| g < problem.alternatives()));
        }
    }

    #[test]
    fn test_mutation_invalidates_score() {
        let problem = PlanningProblem::fixture();
        let mut rng = create_rng(17);
        let mut c = Chromosome::random(&problem, &mut rng);
        c.score = 5.0;
        c.mutate(&problem, &mut rng);
        assert_eq!(c.score, f64::NEG_INFINITY);
    }
}
