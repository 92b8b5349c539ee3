//! Multi-start bounded optimization over the selected traits.

use std::array;

use leafopt_core::Observer;
use leafopt_solvers::optimization::{self, Bounds, Status, lbfgsb, nelder_mead};

use crate::{
    CarbonCosts, Error, InputError, InternalError, TraitSelection,
    event::{Action, Event},
    grid::init_grid,
    leaf::{LeafModel, solve_leaf},
    objective::{CarbonBalance, carbon_objective},
    params::Inputs,
    physics::LeafPhysics,
};

/// How a local optimization attempt finished.
///
/// Carried through to the output as an integer [`code`](Self::code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Convergence {
    Success,
    IterationLimit,
    SolverFailure,
    EvaluationFailure,
}

impl Convergence {
    /// Returns the integer code: 0 for success, positive otherwise.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::IterationLimit => 1,
            Self::SolverFailure => 2,
            Self::EvaluationFailure => 3,
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<Status> for Convergence {
    fn from(status: Status) -> Self {
        match status {
            Status::Converged => Self::Success,
            Status::MaxIters => Self::IterationLimit,
            Status::Exited => Self::SolverFailure,
        }
    }
}

/// The result of one local optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// Final trait values, or the start point if the attempt failed.
    pub x: Vec<f64>,
    /// Objective at `x`, or `NaN` if the attempt failed.
    pub value: f64,
    pub convergence: Convergence,
}

impl Attempt {
    fn failed(start: &[f64], err: &optimization::Error) -> Self {
        let convergence = if err.is_evaluation_failure() {
            Convergence::EvaluationFailure
        } else {
            Convergence::SolverFailure
        };
        Self {
            x: start.to_vec(),
            value: f64::NAN,
            convergence,
        }
    }

    /// Whether `self` should replace `incumbent` as the best attempt.
    ///
    /// Converged attempts beat unconverged ones. Otherwise the strictly
    /// lower value wins and `NaN` never does.
    #[must_use]
    pub fn improves_on(&self, incumbent: &Attempt) -> bool {
        match (
            self.convergence.is_success(),
            incumbent.convergence.is_success(),
        ) {
            (true, false) => true,
            (false, true) => false,
            _ => self.value < incumbent.value || (incumbent.value.is_nan() && !self.value.is_nan()),
        }
    }
}

/// The outcome of one multi-start cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub best: Attempt,
    /// Whether an observer cut the cycle short.
    pub stopped: bool,
}

/// Runs one local optimization from every point of the `n_init` grid and
/// keeps the best.
///
/// # Errors
///
/// Returns an error if the grid is malformed or empty. Failed attempts are
/// recorded, not raised.
pub(crate) fn run<P, Obs>(
    physics: &P,
    traits: &TraitSelection,
    costs: &CarbonCosts,
    inputs: &Inputs,
    n_init: usize,
    observer: &mut Obs,
) -> Result<Cycle, Error>
where
    P: LeafPhysics + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let grid = init_grid(traits, n_init)?;
    observer.observe(&Event::Started {
        n_init,
        starts: grid.len(),
    });

    let mut best: Option<Attempt> = None;
    let mut stopped = false;
    for (index, start) in grid.iter().enumerate() {
        let attempt = attempt(physics, traits, costs, inputs, start)?;
        let action = observer.observe(&Event::Attempted {
            n_init,
            index,
            attempt: &attempt,
        });

        if best.as_ref().is_none_or(|b| attempt.improves_on(b)) {
            best = Some(attempt);
        }
        if action == Some(Action::StopEarly) {
            stopped = true;
            break;
        }
    }

    let best = best.ok_or(InternalError::InitGridSize {
        expected: 1,
        found: 0,
    })?;
    observer.observe(&Event::Finished {
        n_init,
        best: &best,
    });
    Ok(Cycle { best, stopped })
}

/// Runs one local optimization, dispatching on the number of traits.
///
/// No traits means a single evaluation at the base inputs. One trait uses
/// bounded L-BFGS and two or three use bounded Nelder-Mead.
fn attempt<P>(
    physics: &P,
    traits: &TraitSelection,
    costs: &CarbonCosts,
    inputs: &Inputs,
    start: &[f64],
) -> Result<Attempt, Error>
where
    P: LeafPhysics + ?Sized,
{
    match traits.len() {
        0 => Ok(evaluate_only(physics, costs, inputs)),
        1 => local::<P, 1>(physics, traits, costs, inputs, start),
        2 => local::<P, 2>(physics, traits, costs, inputs, start),
        3 => local::<P, 3>(physics, traits, costs, inputs, start),
        found => Err(InputError::Dimension { expected: 3, found }.into()),
    }
}

/// Scores the leaf as given; there is nothing to search.
fn evaluate_only<P>(physics: &P, costs: &CarbonCosts, inputs: &Inputs) -> Attempt
where
    P: LeafPhysics + ?Sized,
{
    let value = solve_leaf(physics, inputs)
        .map_or(f64::NAN, |state| carbon_objective(inputs, &state, costs));
    let convergence = if value.is_finite() {
        Convergence::Success
    } else {
        Convergence::EvaluationFailure
    };
    Attempt {
        x: Vec::new(),
        value,
        convergence,
    }
}

fn local<P, const N: usize>(
    physics: &P,
    traits: &TraitSelection,
    costs: &CarbonCosts,
    inputs: &Inputs,
    start: &[f64],
) -> Result<Attempt, Error>
where
    P: LeafPhysics + ?Sized,
{
    let problem = CarbonBalance::<P, N>::new(physics, traits, *costs, inputs)?;
    let model = LeafModel::new(physics);
    let x0: [f64; N] = start.try_into().map_err(|_| InputError::Dimension {
        expected: N,
        found: start.len(),
    })?;

    let selected = traits.as_slice();
    let result = Bounds::new(
        array::from_fn(|i| selected[i].bounds().0),
        array::from_fn(|i| selected[i].bounds().1),
    )
    .map_err(optimization::Error::from)
    .and_then(|bounds| {
        if N == 1 {
            lbfgsb::minimize(&model, &problem, x0, &bounds, &lbfgsb::Config::default())
        } else {
            nelder_mead::minimize(&model, &problem, x0, &bounds, &nelder_mead::Config::default())
        }
    });

    Ok(match result {
        Ok(solution) => Attempt {
            x: solution.x.to_vec(),
            value: solution.objective,
            convergence: solution.status.into(),
        },
        Err(err) => Attempt::failed(start, &err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        Trait,
        physics::{C3Leaf, tests::default_inputs},
    };

    fn attempt(value: f64, convergence: Convergence) -> Attempt {
        Attempt {
            x: vec![1.0],
            value,
            convergence,
        }
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(Convergence::Success.code(), 0);
        assert_eq!(Convergence::IterationLimit.code(), 1);
        assert_eq!(Convergence::SolverFailure.code(), 2);
        assert_eq!(Convergence::EvaluationFailure.code(), 3);
    }

    #[test]
    fn converged_beats_lower_unconverged() {
        let converged = attempt(-1.0, Convergence::Success);
        let lower = attempt(-5.0, Convergence::IterationLimit);
        assert!(converged.improves_on(&lower));
        assert!(!lower.improves_on(&converged));
    }

    #[test]
    fn lower_value_wins_within_a_class() {
        let a = attempt(-2.0, Convergence::Success);
        let b = attempt(-1.0, Convergence::Success);
        assert!(a.improves_on(&b));
        assert!(!b.improves_on(&a));
        // Ties keep the incumbent.
        assert!(!a.improves_on(&a.clone()));
    }

    #[test]
    fn nan_never_wins() {
        let failed = attempt(f64::NAN, Convergence::EvaluationFailure);
        let limited = attempt(3.0, Convergence::IterationLimit);
        assert!(limited.improves_on(&failed));
        assert!(!failed.improves_on(&limited));
    }

    #[test]
    fn empty_selection_evaluates_once() {
        let inputs = default_inputs();
        let traits = TraitSelection::new([]).expect("valid selection");
        let cycle = run(&C3Leaf, &traits, &CarbonCosts::new(0.0, 0.0), &inputs, 2, &mut ())
            .expect("cycle runs");

        assert!(!cycle.stopped);
        assert!(cycle.best.x.is_empty());
        assert_eq!(cycle.best.convergence, Convergence::Success);
        assert!(cycle.best.value < 0.0);
    }

    #[test]
    fn empty_selection_reports_unsolvable_leaf() {
        let mut inputs = default_inputs();
        inputs.t_air = f64::NAN;
        let traits = TraitSelection::new([]).expect("valid selection");
        let cycle = run(&C3Leaf, &traits, &CarbonCosts::new(0.0, 0.0), &inputs, 2, &mut ())
            .expect("cycle runs");

        assert!(cycle.best.value.is_nan());
        assert_eq!(cycle.best.convergence, Convergence::EvaluationFailure);
        assert_eq!(cycle.best.convergence.code(), 3);
    }

    #[test]
    fn observer_stops_after_first_attempt() {
        let inputs = default_inputs();
        let traits = TraitSelection::new([Trait::Conductance]).expect("valid selection");
        let mut attempts = 0;
        let mut observer = |event: &Event<'_>| match event {
            Event::Attempted { .. } => {
                attempts += 1;
                Some(Action::StopEarly)
            }
            _ => None,
        };

        let cycle = run(
            &C3Leaf,
            &traits,
            &CarbonCosts::new(0.0, 0.0),
            &inputs,
            3,
            &mut observer,
        )
        .expect("cycle runs");

        assert!(cycle.stopped);
        assert_eq!(attempts, 1);
        assert_eq!(cycle.best.x.len(), 1);
    }
}
