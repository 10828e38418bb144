//! ACO configuration.

/// Configuration for the ant colony optimizer.
///
/// # Builder Pattern
///
/// ```
/// use airlift::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ants(30)
///     .with_evaporation_rate(0.1)
///     .with_seed(42);
/// assert_eq!(config.ants, 30);
/// ```
#[derive(Debug, Clone)]
pub struct AcoConfig {
    /// Number of ants constructing solutions each iteration.
    pub ants: usize,

    /// Maximum number of iterations before termination.
    pub max_iterations: usize,

    /// Fraction of pheromone lost per iteration (0.0–1.0).
    ///
    /// Higher rates forget old solutions faster and keep the colony
    /// exploring; lower rates intensify around known good choices.
    pub evaporation_rate: f64,

    /// Pheromone influence exponent (`α`).
    pub alpha: f64,

    /// Desirability influence exponent (`β`).
    ///
    /// Desirability is a static heuristic from unconstrained transit
    /// times, so `β > α` biases early iterations toward fast routes
    /// before the trails carry real information.
    pub beta: f64,

    /// Trail level every pair starts with.
    pub initial_pheromone: f64,

    /// Lower clamp on trail levels; keeps every choice reachable.
    pub min_pheromone: f64,

    /// Upper clamp on trail levels.
    pub max_pheromone: f64,

    /// Amount the iteration-best ant deposits on its choices.
    pub deposit: f64,

    /// Amount the global-best choice vector deposits each iteration.
    pub elite_deposit: f64,

    /// Number of iterations with no improvement before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Whether ants construct and score solutions in parallel.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds, checked at the
    /// start of each iteration.
    pub time_limit_ms: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 15,
            max_iterations: 150,
            evaporation_rate: 0.15,
            alpha: 1.0,
            beta: 2.0,
            initial_pheromone: 0.1,
            min_pheromone: 0.01,
            max_pheromone: 10.0,
            deposit: 1.0,
            elite_deposit: 2.0,
            stagnation_limit: 40,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl AcoConfig {
    pub fn with_ants(mut self, n: usize) -> Self {
        self.ants = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_pheromone_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_pheromone = min;
        self.max_pheromone = max;
        self
    }

    pub fn with_deposit(mut self, amount: f64) -> Self {
        self.deposit = amount;
        self
    }

    pub fn with_elite_deposit(mut self, amount: f64) -> Self {
        self.elite_deposit = amount;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Preset for fast optimization: few ants, few iterations.
    ///
    /// - Ants: 10, Iterations: 50, Time limit: 5s
    pub fn fast() -> Self {
        Self {
            ants: 10,
            max_iterations: 50,
            stagnation_limit: 15,
            time_limit_ms: Some(5_000),
            ..Self::default()
        }
    }

    /// Preset for balanced optimization.
    ///
    /// - Ants: 15, Iterations: 150, Time limit: 30s
    pub fn balanced() -> Self {
        Self {
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Preset for quality optimization: more ants, more iterations.
    ///
    /// - Ants: 30, Iterations: 400, Time limit: 120s
    pub fn quality() -> Self {
        Self {
            ants: 30,
            max_iterations: 400,
            stagnation_limit: 80,
            time_limit_ms: Some(120_000),
            ..Self::default()
        }
    }

    /// Automatically selects a preset from the number of orders.
    pub fn auto_select(order_count: usize) -> Self {
        if order_count < 50 {
            Self::fast()
        } else if order_count < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.ants == 0 {
            return Err("ants must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err("evaporation_rate must be in [0.0, 1.0)".into());
        }
        if self.alpha < 0.0 || self.beta < 0.0 {
            return Err("alpha and beta must be non-negative".into());
        }
        if self.min_pheromone <= 0.0 {
            return Err("min_pheromone must be positive".into());
        }
        if self.max_pheromone < self.min_pheromone {
            return Err("max_pheromone must be at least min_pheromone".into());
        }
        if self.deposit < 0.0 || self.elite_deposit < 0.0 {
            return Err("deposit amounts must be non-negative".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.ants, 15);
        assert_eq!(config.max_iterations, 150);
        assert!((config.evaporation_rate - 0.15).abs() < 1e-10);
        assert!((config.alpha - 1.0).abs() < 1e-10);
        assert!((config.beta - 2.0).abs() < 1e-10);
        assert!((config.initial_pheromone - 0.1).abs() < 1e-10);
        assert!((config.min_pheromone - 0.01).abs() < 1e-10);
        assert!((config.max_pheromone - 10.0).abs() < 1e-10);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = AcoConfig::default()
            .with_ants(40)
            .with_max_iterations(500)
            .with_evaporation_rate(0.05)
            .with_alpha(2.0)
            .with_beta(3.0)
            .with_pheromone_bounds(0.1, 5.0)
            .with_deposit(0.5)
            .with_elite_deposit(1.5)
            .with_parallel(false)
            .with_seed(42);
        assert_eq!(config.ants, 40);
        assert_eq!(config.max_iterations, 500);
        assert!((config.evaporation_rate - 0.05).abs() < 1e-10);
        assert!((config.min_pheromone - 0.1).abs() < 1e-10);
        assert!((config.max_pheromone - 5.0).abs() < 1e-10);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate() {
        assert!(AcoConfig::default().validate().is_ok());
        assert!(AcoConfig::default().with_ants(0).validate().is_err());
        assert!(AcoConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_pheromone_bounds(0.0, 10.0)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_pheromone_bounds(1.0, 0.5)
            .validate()
            .is_err());
        assert!(AcoConfig::default().with_alpha(-1.0).validate().is_err());
        assert!(AcoConfig::default()
            .with_time_limit_ms(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_evaporation_rate_clamped() {
        let config = AcoConfig::default().with_evaporation_rate(1.5);
        assert!((config.evaporation_rate - 1.0).abs() < 1e-10);
        // 1.0 would wipe all trails each iteration; validate rejects it.
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets_validate() {
        for config in [
            AcoConfig::fast(),
            AcoConfig::balanced(),
            AcoConfig::quality(),
        ] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_auto_select() {
        assert_eq!(AcoConfig::auto_select(10).ants, 10);
        assert_eq!(AcoConfig::auto_select(100).ants, 15);
        assert_eq!(AcoConfig::auto_select(500).ants, 30);
    }
}
