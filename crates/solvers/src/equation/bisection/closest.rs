use crate::equation::Evaluation;

use super::{Error, Solution, Status};

/// The evaluation closest to a root so far, by residual magnitude.
pub(super) struct Closest<I, O>(Option<Evaluation<I, O>>);

impl<I, O> Default for Closest<I, O> {
    fn default() -> Self {
        Self(None)
    }
}

impl<I, O> Closest<I, O> {
    /// Keeps `eval` if it is strictly closer to a root; ties keep the earlier one.
    pub(super) fn offer(&mut self, eval: Evaluation<I, O>) {
        let closer = self
            .0
            .as_ref()
            .is_none_or(|kept| eval.residual.abs() < kept.residual.abs());
        if closer {
            self.0 = Some(eval);
        }
    }

    pub(super) fn within(&self, residual_tol: f64) -> bool {
        self.0
            .as_ref()
            .is_some_and(|eval| eval.residual.abs() <= residual_tol)
    }

    /// Reports the closest evaluation as the solution.
    pub(super) fn into_solution(self, status: Status, iters: usize) -> Result<Solution<I, O>, Error> {
        let Evaluation {
            x,
            residual,
            snapshot,
        } = self.0.ok_or(Error::NoSuccessfulEvaluation)?;

        Ok(Solution {
            status,
            x,
            residual,
            snapshot,
            iters,
        })
    }
}
