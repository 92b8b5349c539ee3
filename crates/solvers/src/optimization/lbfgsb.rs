//! Bounded L-BFGS minimization.
//!
//! Runs `argmin`'s L-BFGS with a More-Thuente line search on the clamped
//! objective. Gradients come from finite differences (central inside the box,
//! one-sided at its faces) and are projected so that a point resting on a
//! bound is never pushed further out. The reported point is always clamped.
//!
//! A point whose objective cannot be computed costs [`Config::penalty`], and
//! a finite difference that lands on one falls back to the other side. The
//! line search then shortens its step instead of aborting the run.

mod config;

pub use config::{Config, ConfigError};

use argmin::core::{Executor, State};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS;
use leafopt_core::{MinimizationProblem, Model};

use super::{
    Bounds, Error, Solution,
    adapter::{Adapter, Space},
};

/// Minimizes the problem inside `bounds`, starting from `x0`.
///
/// A start outside the bounds is clamped first.
///
/// # Errors
///
/// Returns an error if the best point found still fails to evaluate, or the
/// line search cannot make progress.
pub fn minimize<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    bounds: &Bounds<N>,
    config: &Config,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    P: MinimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    let adapter = Adapter::new(model, problem, bounds, Space::Clamped, config.penalty())
        .with_fd_step(config.fd_step());
    let start = bounds.clamp(&x0)?.to_vec();

    let linesearch = MoreThuenteLineSearch::new();
    let solver = LBFGS::new(linesearch, config.memory())
        .with_tolerance_grad(config.grad_tol())
        .and_then(|solver| solver.with_tolerance_cost(config.cost_tol()))
        .map_err(|e| Error::Solver(e.to_string()))?;

    let res = Executor::new(adapter, solver)
        .configure(|state| state.param(start).max_iters(config.max_iters()))
        .run()
        .map_err(|e| adapter.error(e))?;

    let state = res.state();
    adapter.conclude(
        state.get_best_param(),
        state.get_termination_status(),
        state.get_iter(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use thiserror::Error;

    use crate::optimization::Status;

    /// Identity model over a single variable.
    struct Identity;

    impl Model for Identity {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Self::Error> {
            Ok(*input)
        }
    }

    /// Squared distance from a target.
    struct Parabola {
        target: f64,
    }

    impl MinimizationProblem<1> for Parabola {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
            Ok((output - self.target).powi(2) + 1.0)
        }
    }

    #[derive(Debug, Error)]
    #[error("refused")]
    struct Refused;

    /// Identity model that fails below 0.5.
    struct Cliff;

    impl Model for Cliff {
        type Input = f64;
        type Output = f64;
        type Error = Refused;

        fn call(&self, input: &f64) -> Result<f64, Self::Error> {
            if *input < 0.5 {
                Err(Refused)
            } else {
                Ok(*input)
            }
        }
    }

    /// Problem whose objective cannot be computed.
    struct Broken;

    impl MinimizationProblem<1> for Broken {
        type Input = f64;
        type Output = f64;
        type Error = Refused;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn objective(&self, _input: &f64, _output: &f64) -> Result<f64, Self::Error> {
            Err(Refused)
        }
    }

    #[test]
    fn finds_interior_minimum() {
        let bounds = Bounds::new([0.0], [5.0]).expect("valid bounds");
        let solution = minimize(
            &Identity,
            &Parabola { target: 2.0 },
            [0.5],
            &bounds,
            &Config::default(),
        )
        .expect("should minimize");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(solution.objective, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn stops_on_active_bound() {
        let bounds = Bounds::new([0.0], [5.0]).expect("valid bounds");
        let solution = minimize(
            &Identity,
            &Parabola { target: -1.0 },
            [2.5],
            &bounds,
            &Config::default(),
        )
        .expect("should minimize");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 0.0);
        assert_relative_eq!(solution.snapshot.output, 0.0);
    }

    #[test]
    fn backs_off_a_region_that_fails_to_evaluate() {
        // The first full step from 4 lands at the lower bound, where the model fails.
        let bounds = Bounds::new([0.0], [5.0]).expect("valid bounds");
        let solution = minimize(
            &Cliff,
            &Parabola { target: 0.6 },
            [4.0],
            &bounds,
            &Config::default(),
        )
        .expect("should minimize");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 0.6, epsilon = 1e-4);
    }

    #[test]
    fn start_in_failed_region_is_a_model_error() {
        let bounds = Bounds::new([0.0], [5.0]).expect("valid bounds");
        let err = minimize(
            &Cliff,
            &Parabola { target: 0.6 },
            [0.1],
            &bounds,
            &Config::default(),
        )
        .expect_err("nothing to descend from");

        assert!(matches!(err, Error::Model(_)));
        assert!(err.is_evaluation_failure());
    }

    #[test]
    fn reports_objective_failure() {
        let bounds = Bounds::new([0.0], [5.0]).expect("valid bounds");
        let err = minimize(&Identity, &Broken, [1.0], &bounds, &Config::default())
            .expect_err("objective always fails");

        assert!(matches!(err, Error::Problem(_)));
        assert!(err.is_evaluation_failure());
    }
}
