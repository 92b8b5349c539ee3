use thiserror::Error;

/// Configuration for the bounded L-BFGS solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    memory: usize,
    max_iters: u64,
    grad_tol: f64,
    cost_tol: f64,
    fd_step: f64,
    penalty: f64,
}

/// Errors that can occur when validating a bounded L-BFGS config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("memory must be at least 1")]
    Memory,

    #[error("grad_tol must be finite and non-negative")]
    GradTol,

    #[error("cost_tol must be finite and non-negative")]
    CostTol,

    #[error("fd_step must be finite and positive")]
    FdStep,

    #[error("penalty must be finite and positive")]
    Penalty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory: 5,
            max_iters: 200,
            grad_tol: 1e-5,
            cost_tol: 1e-10,
            fd_step: 1e-6,
            penalty: 1e8,
        }
    }
}

impl Config {
    /// Creates a new config with validated settings.
    ///
    /// `fd_step` is the relative finite-difference step used for gradients.
    /// `penalty` is the cost reported wherever the objective cannot be
    /// computed; it should sit well above any real objective value.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory is zero, a tolerance is negative or
    /// non-finite, or the step or penalty is not positive.
    pub fn new(
        memory: usize,
        max_iters: u64,
        grad_tol: f64,
        cost_tol: f64,
        fd_step: f64,
        penalty: f64,
    ) -> Result<Self, ConfigError> {
        if memory == 0 {
            return Err(ConfigError::Memory);
        }
        if !grad_tol.is_finite() || grad_tol < 0.0 {
            return Err(ConfigError::GradTol);
        }
        if !cost_tol.is_finite() || cost_tol < 0.0 {
            return Err(ConfigError::CostTol);
        }
        if !fd_step.is_finite() || fd_step <= 0.0 {
            return Err(ConfigError::FdStep);
        }
        if !penalty.is_finite() || penalty <= 0.0 {
            return Err(ConfigError::Penalty);
        }

        Ok(Self {
            memory,
            max_iters,
            grad_tol,
            cost_tol,
            fd_step,
            penalty,
        })
    }

    /// Returns the number of correction pairs kept by L-BFGS.
    #[must_use]
    pub fn memory(&self) -> usize {
        self.memory
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Returns the gradient norm accepted as converged.
    #[must_use]
    pub fn grad_tol(&self) -> f64 {
        self.grad_tol
    }

    /// Returns the cost change accepted as converged.
    #[must_use]
    pub fn cost_tol(&self) -> f64 {
        self.cost_tol
    }

    /// Returns the relative finite-difference step.
    #[must_use]
    pub fn fd_step(&self) -> f64 {
        self.fd_step
    }

    /// Returns the cost of a point that fails to evaluate.
    #[must_use]
    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_settings() {
        assert_eq!(Config::new(0, 10, 1e-6, 1e-9, 1e-6, 1e8), Err(ConfigError::Memory));
        assert_eq!(Config::new(3, 10, -1.0, 1e-9, 1e-6, 1e8), Err(ConfigError::GradTol));
        assert_eq!(Config::new(3, 10, 1e-6, f64::NAN, 1e-6, 1e8), Err(ConfigError::CostTol));
        assert_eq!(Config::new(3, 10, 1e-6, 1e-9, 0.0, 1e8), Err(ConfigError::FdStep));
        assert_eq!(
            Config::new(3, 10, 1e-6, 1e-9, 1e-6, f64::INFINITY),
            Err(ConfigError::Penalty)
        );
    }
}
