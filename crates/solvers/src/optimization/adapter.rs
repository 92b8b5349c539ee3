use argmin::core::{CostFunction, Gradient, TerminationStatus};
use leafopt_core::{MinimizationProblem, Model};

use super::{Bounds, BoundsError, Error, Solution, Status, evaluate, evaluate::penalized};

/// How solver coordinates map onto points inside the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Space {
    /// Solver coordinates are the variables, clamped into the box.
    Clamped,

    /// Solver coordinates pass through [`Bounds::from_internal`].
    Sine,
}

/// Presents a model and problem to `argmin` as a bounded cost function.
///
/// A point whose objective cannot be computed costs `penalty`, so a failed
/// evaluation makes the solver back off instead of ending the search.
pub(super) struct Adapter<'a, M, P, const N: usize> {
    model: &'a M,
    problem: &'a P,
    bounds: &'a Bounds<N>,
    space: Space,
    penalty: f64,
    fd_step: f64,
}

impl<M, P, const N: usize> Clone for Adapter<'_, M, P, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, P, const N: usize> Copy for Adapter<'_, M, P, N> {}

impl<'a, M, P, const N: usize> Adapter<'a, M, P, N>
where
    M: Model,
    P: MinimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    pub(super) fn new(
        model: &'a M,
        problem: &'a P,
        bounds: &'a Bounds<N>,
        space: Space,
        penalty: f64,
    ) -> Self {
        Self {
            model,
            problem,
            bounds,
            space,
            penalty,
            fd_step: 0.0,
        }
    }

    #[must_use]
    pub(super) fn with_fd_step(mut self, fd_step: f64) -> Self {
        self.fd_step = fd_step;
        self
    }

    /// Maps solver coordinates to a point inside the bounds.
    pub(super) fn point(&self, param: &[f64]) -> Result<[f64; N], BoundsError> {
        match self.space {
            Space::Clamped => self.bounds.clamp(param),
            Space::Sine => self.bounds.from_internal(param),
        }
    }

    /// Objective at a point in the box, `None` where it cannot be computed.
    fn value(&self, x: [f64; N]) -> Option<f64> {
        evaluate(self.model, self.problem, x)
            .ok()
            .map(|eval| eval.objective)
    }

    /// Recovers a typed error from an `argmin` failure.
    pub(super) fn error(&self, err: argmin::core::Error) -> Error {
        match err.downcast::<BoundsError>() {
            Ok(bounds) => bounds.into(),
            Err(err) => Error::Solver(err.to_string()),
        }
    }

    /// Builds a solution by re-evaluating the best point the solver reported.
    ///
    /// A best point that still fails to evaluate is an error: the solver never
    /// left the failed region.
    pub(super) fn conclude(
        &self,
        best: Option<&Vec<f64>>,
        termination: &TerminationStatus,
        iters: u64,
    ) -> Result<Solution<M::Input, M::Output, N>, Error> {
        let best = best.ok_or(Error::NoBestPoint)?;
        let x = self.point(best)?;
        let eval = evaluate(self.model, self.problem, x)?;

        Ok(Solution {
            status: Status::from_termination(termination),
            x,
            objective: eval.objective,
            snapshot: eval.snapshot,
            iters,
        })
    }
}

impl<M, P, const N: usize> CostFunction for Adapter<'_, M, P, N>
where
    M: Model,
    P: MinimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let x = self.point(param)?;
        Ok(penalized(self.model, self.problem, x, self.penalty))
    }
}

impl<M, P, const N: usize> Gradient for Adapter<'_, M, P, N>
where
    M: Model,
    P: MinimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    /// Central differences, one-sided where a step would leave the bounds or
    /// land on a point that fails to evaluate.
    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, argmin::core::Error> {
        let x = self.bounds.clamp(param)?;
        let (lower, upper) = (self.bounds.lower(), self.bounds.upper());
        let center = self.value(x);

        let mut gradient = vec![0.0; N];
        for i in 0..N {
            let h = self.fd_step * x[i].abs().max(1.0);
            let mut forward = x;
            let mut backward = x;
            forward[i] = (x[i] + h).min(upper[i]);
            backward[i] = (x[i] - h).max(lower[i]);

            let f_forward = if forward[i] > x[i] {
                self.value(forward)
            } else {
                center
            };
            let f_backward = if backward[i] < x[i] {
                self.value(backward)
            } else {
                center
            };

            gradient[i] = match (f_forward, f_backward) {
                (Some(f), Some(b)) if forward[i] > backward[i] => {
                    (f - b) / (forward[i] - backward[i])
                }
                (Some(f), None) => center.map_or(0.0, |c| (f - c) / (forward[i] - x[i])),
                (None, Some(b)) => center.map_or(0.0, |c| (c - b) / (x[i] - backward[i])),
                _ => 0.0,
            };
        }

        self.bounds.project_gradient(&x, &mut gradient);
        Ok(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("below the feasible region")]
    struct Infeasible;

    /// Identity model that fails below 0.5.
    struct Cliff;

    impl Model for Cliff {
        type Input = f64;
        type Output = f64;
        type Error = Infeasible;

        fn call(&self, input: &f64) -> Result<f64, Self::Error> {
            if *input < 0.5 {
                Err(Infeasible)
            } else {
                Ok(*input)
            }
        }
    }

    /// The output itself.
    struct Linear;

    impl MinimizationProblem<1> for Linear {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
            Ok(2.0 * output)
        }
    }

    #[test]
    fn failed_points_cost_the_penalty() {
        let bounds = Bounds::new([0.0], [1.0]).expect("valid bounds");
        let adapter = Adapter::new(&Cliff, &Linear, &bounds, Space::Clamped, 1e6);
        assert_eq!(adapter.cost(&vec![0.25]).expect("one entry"), 1e6);
        assert_eq!(adapter.cost(&vec![0.75]).expect("one entry"), 1.5);
        assert_eq!(adapter.cost(&vec![7.0]).expect("one entry"), 2.0);
    }

    #[test]
    fn gradient_falls_back_to_the_feasible_side() {
        let bounds = Bounds::new([0.0], [1.0]).expect("valid bounds");
        let adapter =
            Adapter::new(&Cliff, &Linear, &bounds, Space::Clamped, 1e6).with_fd_step(1e-3);

        let edge = adapter.gradient(&vec![0.5]).expect("one entry");
        assert_relative_eq!(edge[0], 2.0, epsilon = 1e-9);

        let inside = adapter.gradient(&vec![0.25]).expect("one entry");
        assert_eq!(inside[0], 0.0);
    }

    #[test]
    fn sine_space_maps_into_the_box() {
        let bounds = Bounds::new([0.5], [1.0]).expect("valid bounds");
        let adapter = Adapter::new(&Cliff, &Linear, &bounds, Space::Sine, 1e6);
        assert_eq!(adapter.point(&[-std::f64::consts::FRAC_PI_2]), Ok([0.5]));
        assert_relative_eq!(adapter.cost(&vec![0.0]).expect("one entry"), 1.5);
    }
}
