//! Configuration and statistics for the MCCFR trainer.

use serde::{Deserialize, Serialize};

/// Configuration for the MCCFR solver.
///
/// # Example
/// ```
/// use ofc_solver::cfr::SolverConfig;
///
/// let config = SolverConfig::default().with_workers(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Number of worker threads for parallel training.
    ///
    /// `None` uses every available core. A value of 1 trains on the calling
    /// thread, which combined with `seed` gives reproducible runs.
    pub num_workers: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// Only honoured by single-threaded training; parallel workers draw
    /// their generators from OS entropy instead.
    pub seed: Option<u64>,

    /// Emit a progress log line every this many iterations.
    pub log_every: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            num_workers: None,
            seed: None,
            log_every: 1000,
        }
    }
}

impl SolverConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.num_workers = Some(workers);
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the progress log cadence.
    pub fn with_log_every(mut self, log_every: u64) -> Self {
        self.log_every = log_every;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_workers == Some(0) {
            return Err(ConfigError::NoWorkers);
        }
        if self.log_every == 0 {
            return Err(ConfigError::ZeroLogInterval);
        }
        Ok(())
    }
}

/// Errors from validating a [`SolverConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `num_workers` was explicitly set to zero.
    NoWorkers,
    /// `log_every` must be at least 1.
    ZeroLogInterval,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoWorkers => write!(f, "num_workers must be at least 1"),
            ConfigError::ZeroLogInterval => write!(f, "log_every must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics from a training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverStats {
    /// Total iterations completed over the solver's lifetime.
    pub iterations: u64,

    /// Unique infosets discovered so far.
    pub info_sets: usize,

    /// Wall-clock seconds spent in the last `train` call.
    pub elapsed_seconds: f64,

    /// Training speed of the last `train` call.
    pub iterations_per_second: f64,
}

impl SolverStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the rate from the last run's iteration count.
    pub fn update_rate(&mut self, iterations: u64) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = iterations as f64 / self.elapsed_seconds;
        }
    }
}
