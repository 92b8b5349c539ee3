//! Bounded local minimizers for [`MinimizationProblem`]s.
//!
//! A [`MinimizationProblem`] maps solver variables `x: [f64; N]` to model
//! inputs, calls the model, and extracts a scalar objective. The solvers here
//! wrap `argmin` and keep every evaluation inside a box of [`Bounds`].
//!
//! A point where the objective cannot be computed (the model fails, the
//! problem fails, or the value is not finite) is scored with a finite penalty
//! during the search. Only the reported best point must evaluate cleanly.
//!
//! # Solvers
//!
//! - [`lbfgsb`]: L-BFGS with projected finite-difference gradients, suited to
//!   smooth problems in few variables
//! - [`nelder_mead`]: derivative-free simplex search
//!
//! [`MinimizationProblem`]: leafopt_core::MinimizationProblem

mod adapter;
mod bounds;
mod error;
mod evaluate;
mod solution;

pub use bounds::{Bounds, BoundsError};
pub use error::Error;
pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};
pub use solution::{Solution, Status};

pub mod lbfgsb;
pub mod nelder_mead;
