//! Parent selection strategies.
//!
//! Selection decides which chromosomes breed. All strategies here
//! assume **maximization** (higher score = better).

use super::chromosome::Chromosome;
use rand::Rng;

/// Selection strategy for choosing parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tournament selection: pick `k` chromosomes at random, keep the
    /// best. Higher `k` means stronger selection pressure.
    Tournament(usize),

    /// Score-proportionate (roulette wheel) selection. Scores are
    /// shifted so the worst chromosome still has a small positive
    /// weight; this keeps the wheel well-defined when scores go
    /// negative (failed orders).
    Roulette,

    /// Rank-based selection: probability proportional to rank position
    /// rather than raw score, which avoids super-individual dominance
    /// when one assignment's score dwarfs the rest.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "cannot select from empty population");
        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();
    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].score > population[best_idx].score {
            best_idx = idx;
        }
    }
    best_idx
}

fn roulette<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let min = population
        .iter()
        .map(|c| c.score)
        .fold(f64::INFINITY, f64::min);
    let epsilon = 1e-10;

    // Shift so every weight is positive even with negative scores.
    let weights: Vec<f64> = population.iter().map(|c| c.score - min + epsilon).collect();
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    n - 1 // floating-point fallback
}

fn rank<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    // Sort descending so rank 0 is the best chromosome.
    let mut indexed: Vec<(usize, f64)> = population
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.score))
        .collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    // Linear ranking: weight_i = n - rank_i.
    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }
    indexed.last().expect("population has n >= 2 elements").0
}
