use thiserror::Error;

/// Configuration for the bounded Nelder–Mead solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: u64,
    sd_tol: f64,
    initial_step: f64,
    penalty: f64,
    restarts: u32,
}

/// Errors that can occur when validating a bounded Nelder–Mead config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sd_tol must be finite and non-negative")]
    SdTol,

    #[error("initial_step must be in (0, 1]")]
    InitialStep,

    #[error("penalty must be finite and positive")]
    Penalty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            sd_tol: 1e-10,
            initial_step: 0.05,
            penalty: 1e8,
            restarts: 1,
        }
    }
}

impl Config {
    /// Creates a new config with validated settings.
    ///
    /// `initial_step` is the size of the starting simplex as a fraction of
    /// each variable's bound range. `penalty` is the cost of a vertex whose
    /// objective cannot be computed. After converging, the search starts
    /// again from a fresh simplex around the best vertex up to `restarts`
    /// times, stopping once a restart no longer improves the objective.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or non-finite, the
    /// initial step is outside `(0, 1]`, or the penalty is not positive.
    pub fn new(
        max_iters: u64,
        sd_tol: f64,
        initial_step: f64,
        penalty: f64,
        restarts: u32,
    ) -> Result<Self, ConfigError> {
        if !sd_tol.is_finite() || sd_tol < 0.0 {
            return Err(ConfigError::SdTol);
        }
        if !(initial_step > 0.0 && initial_step <= 1.0) {
            return Err(ConfigError::InitialStep);
        }
        if !penalty.is_finite() || penalty <= 0.0 {
            return Err(ConfigError::Penalty);
        }

        Ok(Self {
            max_iters,
            sd_tol,
            initial_step,
            penalty,
            restarts,
        })
    }

    /// Returns the maximum number of iterations per simplex.
    #[must_use]
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Returns the simplex cost standard deviation accepted as converged.
    #[must_use]
    pub fn sd_tol(&self) -> f64 {
        self.sd_tol
    }

    /// Returns the starting simplex size relative to the bound range.
    #[must_use]
    pub fn initial_step(&self) -> f64 {
        self.initial_step
    }

    #[must_use]
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    #[must_use]
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}
