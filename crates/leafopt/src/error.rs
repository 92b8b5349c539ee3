use thiserror::Error;

use crate::{Convergence, OptionsError, Trait, params::ParamError};

/// Errors returned by [`optimize_leaf`](crate::optimize_leaf).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Every refit cycle finished without a converged attempt.
    #[error(
        "optimization did not converge after {attempts} attempt(s) (n_init = {n_init}, code {})",
        .convergence.code()
    )]
    NotConverged {
        n_init: usize,
        attempts: usize,
        convergence: Convergence,
    },

    #[error("internal consistency check failed: {0}")]
    Internal(#[from] InternalError),
}

/// Malformed or invalid caller input. Never retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("unknown trait `{0}`")]
    UnknownTrait(String),

    #[error("trait `{name}` is ambiguous, could be any of {candidates:?}")]
    AmbiguousTrait {
        name: String,
        candidates: Vec<&'static str>,
    },

    #[error("trait `{0}` is selected more than once")]
    DuplicateTrait(Trait),

    #[error("missing carbon cost `{0}`")]
    MissingCost(&'static str),

    #[error("unknown carbon cost `{0}`")]
    UnknownCost(String),

    #[error("carbon cost `{name}` must be finite and non-negative, got {value}")]
    InvalidCost { name: &'static str, value: f64 },

    #[error("invalid options: {0}")]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error("expected {expected} trait value(s), found {found}")]
    Dimension { expected: usize, found: usize },
}

/// A violated internal invariant. Halts the run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InternalError {
    #[error("initial grid has {found} points, expected {expected}")]
    InitGridSize { expected: usize, found: usize },

    #[error("energy balance not closed at the optimum (residual {residual} W/m^2)")]
    EnergyBalance { residual: f64 },

    #[error("could not solve for {0} at the optimum")]
    RootNotFound(&'static str),
}

impl From<ParamError> for Error {
    fn from(err: ParamError) -> Self {
        Self::Input(err.into())
    }
}

impl From<OptionsError> for Error {
    fn from(err: OptionsError) -> Self {
        Self::Input(err.into())
    }
}
