//! Bisection root finding for scalar equations.
//!
//! The solver evaluates both ends of a bracket, checks that their residuals
//! change sign, then repeatedly halves the bracket around the root. It reports
//! the evaluation with the smallest residual magnitude seen.
//!
//! # Observer Events
//!
//! Each successful evaluation produces one [`Event`]: an [`Event::Endpoint`]
//! for the left then the right end, and an [`Event::Step`] per iteration.
//! An observer may answer [`Action::StopEarly`]. A failed evaluation ends the
//! solve with an error before any event is sent for it.

mod bracket;
mod closest;
mod config;
mod error;
mod event;
mod solution;

pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::{Action, Event};
pub use solution::{Solution, Status};

use leafopt_core::{EquationProblem, Model, Observer};

use crate::equation::evaluate;

use bracket::Interval;
use closest::Closest;

/// Finds a root of the equation using the bisection method.
///
/// See the [module docs](self) for event timing.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or does not change sign, or if
/// any evaluation fails or gives a non-finite residual.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let interval = Interval::new(bracket)?;
    let mut closest = Closest::default();

    let mut signs = [Sign::Positive; 2];
    for (sign, x) in signs.iter_mut().zip([interval.left, interval.right]) {
        let eval = evaluate(model, problem, x)?;
        let action = observer.observe(&Event::Endpoint { eval: &eval });
        *sign = Sign::of(eval.residual);
        closest.offer(eval);

        if action == Some(Action::StopEarly) {
            return closest.into_solution(Status::StoppedByObserver, 0);
        }
        if closest.within(config.residual_tol()) {
            return closest.into_solution(Status::Converged, 0);
        }
    }

    let mut bracket = Bracket::new(interval, signs[0], signs[1])?;

    for iter in 1..=config.max_iters() {
        let x = bracket.midpoint();
        let eval = evaluate(model, problem, x)?;
        let action = observer.observe(&Event::Step {
            iter,
            bracket: &bracket,
            eval: &eval,
        });
        bracket.shrink(x, Sign::of(eval.residual));
        closest.offer(eval);

        if action == Some(Action::StopEarly) {
            return closest.into_solution(Status::StoppedByObserver, iter);
        }
        if closest.within(config.residual_tol())
            || bracket.is_x_converged(config.x_abs_tol(), config.x_rel_tol())
        {
            return closest.into_solution(Status::Converged, iter);
        }
    }

    closest.into_solution(Status::MaxIters, config.max_iters())
}
