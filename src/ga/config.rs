//! Population search configuration.

use crate::error::EngineError;

/// Population size of the quick profile.
pub const QUICK_POPULATION: usize = 10;
/// Generation cap of the quick profile.
pub const QUICK_GENERATIONS: usize = 20;
/// Population size of the thorough profile.
pub const THOROUGH_POPULATION: usize = 50;
/// Generation cap of the thorough profile.
pub const THOROUGH_GENERATIONS: usize = 100;

/// Search parameters.
///
/// # Example
/// ```
/// use timetable_engine::ga::GaConfig;
///
/// let config = GaConfig::thorough().with_seed(7).with_parallel(true);
/// assert_eq!(config.population_size, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaConfig {
    /// Candidates per generation.
    pub population_size: usize,
    /// Generation cap.
    pub max_generations: usize,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Evaluate each generation in parallel.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self::quick()
    }
}

impl GaConfig {
    /// Small, fast search.
    pub fn quick() -> Self {
        Self {
            population_size: QUICK_POPULATION,
            max_generations: QUICK_GENERATIONS,
            seed: None,
            parallel: false,
        }
    }

    /// Larger, slower search.
    pub fn thorough() -> Self {
        Self {
            population_size: THOROUGH_POPULATION,
            max_generations: THOROUGH_GENERATIONS,
            ..Self::quick()
        }
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of candidates kept between generations.
    pub fn survivors(&self) -> usize {
        (self.population_size / 2).max(1)
    }

    /// Rejects configurations that cannot run a single generation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.population_size == 0 {
            return Err(EngineError::InvalidConfig(
                "population size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(EngineError::InvalidConfig(
                "generation count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
