use thiserror::Error;

use leafopt_core::{EquationProblem, Model, Snapshot};

/// A scalar equation solved at one point.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O> {
    pub x: f64,

    /// Always finite.
    pub residual: f64,

    pub snapshot: Snapshot<I, O>,
}

/// Why a residual could not be computed at a point.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    #[error("model call failed")]
    Model(#[source] ME),

    #[error("problem error")]
    Problem(#[source] PE),

    #[error("residual is {residual} at x = {x}")]
    NonFinite { x: f64, residual: f64 },
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output>,
    EvalError<<M as Model>::Error, <P as EquationProblem<1>>::Error>,
>;

/// Computes the residual of a scalar equation at `x`.
///
/// A NaN or infinite residual has no sign to bracket with, so it is reported
/// as an error rather than an evaluation.
///
/// # Errors
///
/// Returns an error if input mapping, the model call, or the residual fails,
/// or the residual is not finite.
pub fn evaluate<M, P>(model: &M, problem: &P, x: f64) -> EvaluateResult<M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&[x]).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let [residual] = problem
        .residuals(&input, &output)
        .map_err(EvalError::Problem)?;
    if !residual.is_finite() {
        return Err(EvalError::NonFinite { x, residual });
    }

    Ok(Evaluation {
        x,
        residual,
        snapshot: Snapshot::new(input, output),
    })
}
