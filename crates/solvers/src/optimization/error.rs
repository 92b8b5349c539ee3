use std::error::Error as StdError;

use thiserror::Error;

use super::{BoundsError, EvalError};

/// Errors that can occur while running a bounded minimizer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("non-finite objective {objective} at x = {x:?}")]
    NonFiniteObjective { x: Vec<f64>, objective: f64 },

    /// The underlying `argmin` solver failed for a reason other than an
    /// objective evaluation.
    #[error("local solver failed: {0}")]
    Solver(String),

    #[error("solver finished without a best point")]
    NoBestPoint,

    #[error("problem error")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("model call failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Returns `true` if the error came from evaluating the objective.
    #[must_use]
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(
            self,
            Self::Model(_) | Self::Problem(_) | Self::NonFiniteObjective { .. }
        )
    }
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model(e) => Self::Model(Box::new(e)),
            EvalError::Problem(e) => Self::Problem(Box::new(e)),
            EvalError::NonFinite { x, objective } => Self::NonFiniteObjective { x, objective },
        }
    }
}
