//! Pheromone trails over the order × hub-choice grid.

/// Pheromone matrix: one trail level per (order, hub choice) pair.
///
/// Levels are clamped to `[min, max]` on every update, which keeps a
/// floor of exploration and prevents a single early solution from
/// saturating the matrix.
#[derive(Debug, Clone)]
pub struct PheromoneTrail {
    levels: Vec<Vec<f64>>,
    min: f64,
    max: f64,
}

impl PheromoneTrail {
    pub fn new(orders: usize, alternatives: usize, initial: f64, min: f64, max: f64) -> Self {
        debug_assert!(min > 0.0 && min <= max);
        let initial = initial.clamp(min, max);
        Self {
            levels: vec![vec![initial; alternatives]; orders],
            min,
            max,
        }
    }

    /// Trail level for one (order, choice) pair.
    pub fn level(&self, order: usize, choice: usize) -> f64 {
        self.levels[order][choice]
    }

    /// Applies evaporation to every trail: `τ ← (1 - rate) · τ`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for row in &mut self.levels {
            for level in row.iter_mut() {
                *level = (*level * keep).max(self.min);
            }
        }
    }

    /// Reinforces the trails along one choice vector.
    pub fn deposit(&mut self, choices: &[usize], amount: f64) {
        debug_assert_eq!(choices.len(), self.levels.len());
        for (order, &choice) in choices.iter().enumerate() {
            let level = &mut self.levels[order][choice];
            *level = (*level + amount).min(self.max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_levels_clamped() {
        let trail = PheromoneTrail::new(2, 3, 50.0, 0.01, 10.0);
        assert_eq!(trail.level(0, 0), 10.0);
        let trail = PheromoneTrail::new(2, 3, 0.001, 0.01, 10.0);
        assert_eq!(trail.level(1, 2), 0.01);
    }

    #[test]
    fn test_evaporation_respects_floor() {
        let mut trail = PheromoneTrail::new(1, 2, 0.1, 0.01, 10.0);
        for _ in 0..100 {
            trail.evaporate(0.15);
        }
        assert_eq!(trail.level(0, 0), 0.01);
        assert_eq!(trail.level(0, 1), 0.01);
    }

    #[test]
    fn test_deposit_respects_ceiling() {
        let mut trail = PheromoneTrail::new(2, 2, 0.1, 0.01, 10.0);
        for _ in 0..100 {
            trail.deposit(&[1, 0], 1.0);
        }
        assert_eq!(trail.level(0, 1), 10.0);
        assert_eq!(trail.level(1, 0), 10.0);
        // Untouched pairs keep the initial level.
        assert!((trail.level(0, 0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_deposit_then_evaporate() {
        let mut trail = PheromoneTrail::new(1, 2, 1.0, 0.01, 10.0);
        trail.deposit(&[0], 1.0);
        trail.evaporate(0.5);
        assert!((trail.level(0, 0) - 1.0).abs() < 1e-12);
        assert!((trail.level(0, 1) - 0.5).abs() < 1e-12);
    }
}
