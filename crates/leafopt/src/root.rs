//! Bracketed scalar root finding with a sentinel on failure.

use std::convert::Infallible;

use leafopt_core::{EquationProblem, Model, Observer};
use leafopt_solvers::equation::bisection::{self, Action, Config, Event, Status};
use tracing::trace;

/// Outcome of a root solve.
///
/// Failure is data: `root` and `residual` are `NaN` and `convergence` is 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub root: f64,
    pub residual: f64,
    pub convergence: u8,
}

impl Root {
    /// The sentinel returned when no root is found.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            root: f64::NAN,
            residual: f64::NAN,
            convergence: 1,
        }
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.convergence == 0
    }
}

/// A scalar function as a model.
struct Scalar<F>(F);

impl<F: Fn(f64) -> f64> Model for Scalar<F> {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &f64) -> Result<f64, Self::Error> {
        Ok((self.0)(*input))
    }
}

/// Drives the function value itself to zero.
struct Zero;

impl EquationProblem<1> for Zero {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([*output])
    }
}

/// Logs every bisection step at trace level.
struct Trace;

impl Observer<Event<'_, f64, f64>, Action> for Trace {
    fn observe(&mut self, event: &Event<'_, f64, f64>) -> Option<Action> {
        match event {
            Event::Endpoint { eval } => trace!(x = eval.x, residual = eval.residual, "endpoint"),
            Event::Step {
                iter,
                bracket,
                eval,
            } => trace!(
                iter = *iter,
                x = eval.x,
                residual = eval.residual,
                width = bracket.width(),
                "bisection step"
            ),
        }
        None
    }
}

/// Tolerances tight enough that the root is resolved to a few ulps.
fn config() -> Config {
    Config::new(200, 1e-13, 4.0 * f64::EPSILON, 0.0).unwrap_or_default()
}

/// Finds `x` in `bracket` with `f(x) = 0` by bisection.
///
/// Never fails: any solver error, a bracket without a sign change, or an
/// unconverged solve yields [`Root::failed`].
pub fn find_root(f: impl Fn(f64) -> f64, bracket: [f64; 2]) -> Root {
    match bisection::solve(&Scalar(f), &Zero, bracket, &config(), Trace) {
        Ok(solution) if solution.status == Status::Converged => {
            Root {
                root: solution.x,
                residual: solution.residual,
                convergence: 0,
            }
        }
        _ => Root::failed(),
    }
}
