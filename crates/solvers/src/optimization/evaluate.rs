use thiserror::Error;

use leafopt_core::{MinimizationProblem, Model, Snapshot};

/// A point where the objective was computed successfully.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],

    /// Always finite.
    pub objective: f64,

    pub snapshot: Snapshot<I, O>,
}

/// Why an objective could not be computed at a point.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    #[error("model call failed")]
    Model(#[source] ME),

    #[error("problem error")]
    Problem(#[source] PE),

    #[error("objective is {objective} at x = {x:?}")]
    NonFinite { x: Vec<f64>, objective: f64 },
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as MinimizationProblem<N>>::Error>,
>;

/// Maps `x` to a model input, calls the model, and scores the output.
///
/// A NaN or infinite objective counts as a failed evaluation, so every
/// [`Evaluation`] returned carries a usable value.
///
/// # Errors
///
/// Returns an error if any of the three steps fails or the objective is not
/// finite.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: MinimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let objective = problem
        .objective(&input, &output)
        .map_err(EvalError::Problem)?;
    if !objective.is_finite() {
        return Err(EvalError::NonFinite {
            x: x.to_vec(),
            objective,
        });
    }

    Ok(Evaluation {
        x,
        objective,
        snapshot: Snapshot::new(input, output),
    })
}

/// Returns the objective at `x`, or `penalty` where it cannot be computed.
///
/// Local solvers see failed regions as a high plateau and step back out of
/// them instead of aborting.
pub(super) fn penalized<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
    penalty: f64,
) -> f64
where
    M: Model,
    P: MinimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    evaluate(model, problem, x).map_or(penalty, |eval| eval.objective)
}
