//! The carbon-balance objective minimized over trait values.

use std::convert::Infallible;

use leafopt_core::MinimizationProblem;
use thiserror::Error;

use crate::{
    CarbonCosts, InputError, Trait, TraitSelection,
    leaf::{LeafState, SolveError, solve_leaf},
    params::Inputs,
    physics::LeafPhysics,
};

/// Converts transpiration from mol/m²/s to µmol/m²/s.
const MICRO: f64 = 1e6;

/// Errors from a direct objective evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ObjectiveError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Negated carbon balance of a solved leaf (µmol/m²/s).
///
/// The balance is net assimilation less the carbon cost of transpiration and
/// of upper-surface stomata. Lower is better.
#[must_use]
pub fn carbon_objective(inputs: &Inputs, state: &LeafState, costs: &CarbonCosts) -> f64 {
    let water = state.energy.e * MICRO * costs.h2o;
    let stomata = inputs.g_sw * inputs.sr * costs.sr;
    -(state.assimilation() - water - stomata)
}

/// Evaluates the objective at trait values `x`.
///
/// # Errors
///
/// Returns an error if `x` does not match the selection or the leaf cannot
/// be solved.
pub fn carbon_balance<P>(
    physics: &P,
    x: &[f64],
    traits: &TraitSelection,
    costs: &CarbonCosts,
    inputs: &Inputs,
) -> Result<f64, ObjectiveError>
where
    P: LeafPhysics + ?Sized,
{
    if x.len() != traits.len() {
        return Err(InputError::Dimension {
            expected: traits.len(),
            found: x.len(),
        }
        .into());
    }
    let inputs = inputs.with_traits(physics, traits.as_slice(), x);
    let state = solve_leaf(physics, &inputs)?;
    Ok(carbon_objective(&inputs, &state, costs))
}

/// The objective as a [`MinimizationProblem`] over `N` selected traits.
///
/// Paired with [`LeafModel`](crate::leaf::LeafModel), whose failures surface
/// as model errors.
#[derive(Debug)]
pub struct CarbonBalance<'a, P: ?Sized, const N: usize> {
    physics: &'a P,
    traits: &'a [Trait],
    costs: CarbonCosts,
    base: &'a Inputs,
}

impl<'a, P, const N: usize> CarbonBalance<'a, P, N>
where
    P: LeafPhysics + ?Sized,
{
    /// Creates the problem.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Dimension`] unless exactly `N` traits are selected.
    pub fn new(
        physics: &'a P,
        traits: &'a TraitSelection,
        costs: CarbonCosts,
        base: &'a Inputs,
    ) -> Result<Self, InputError> {
        if traits.len() != N {
            return Err(InputError::Dimension {
                expected: N,
                found: traits.len(),
            });
        }
        Ok(Self {
            physics,
            traits: traits.as_slice(),
            costs,
            base,
        })
    }
}

impl<P, const N: usize> MinimizationProblem<N> for CarbonBalance<'_, P, N>
where
    P: LeafPhysics + ?Sized,
{
    type Input = Inputs;
    type Output = LeafState;
    type Error = Infallible;

    fn input(&self, x: &[f64; N]) -> Result<Inputs, Self::Error> {
        Ok(self.base.with_traits(self.physics, self.traits, x))
    }

    fn objective(&self, input: &Inputs, output: &LeafState) -> Result<f64, Self::Error> {
        Ok(carbon_objective(input, output, &self.costs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        leaf::LeafModel,
        physics::{C3Leaf, tests::default_inputs},
    };

    use leafopt_core::Model;

    fn conductance() -> TraitSelection {
        TraitSelection::new([Trait::Conductance]).expect("valid selection")
    }

    #[test]
    fn zero_costs_give_negated_assimilation() {
        let inputs = default_inputs();
        let state = solve_leaf(&C3Leaf, &inputs).expect("solvable");
        let value = carbon_objective(&inputs, &state, &CarbonCosts::new(0.0, 0.0));
        assert_relative_eq!(value, -state.assimilation());
    }

    #[test]
    fn water_cost_raises_objective() {
        let inputs = default_inputs();
        let x = [inputs.g_sc];
        let cheap = carbon_balance(&C3Leaf, &x, &conductance(), &CarbonCosts::new(0.0, 0.0), &inputs)
            .expect("evaluates");
        let dear = carbon_balance(&C3Leaf, &x, &conductance(), &CarbonCosts::new(1e-3, 0.0), &inputs)
            .expect("evaluates");
        assert!(dear > cheap);
    }

    #[test]
    fn rejects_wrong_dimension() {
        let inputs = default_inputs();
        let err = carbon_balance(&C3Leaf, &[1.0, 2.0], &conductance(), &CarbonCosts::new(0.0, 0.0), &inputs)
            .unwrap_err();
        assert_eq!(
            err,
            ObjectiveError::Input(InputError::Dimension {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn problem_matches_direct_evaluation() {
        let inputs = default_inputs();
        let traits = conductance();
        let costs = CarbonCosts::new(1e-3, 0.0);
        let problem =
            CarbonBalance::<_, 1>::new(&C3Leaf, &traits, costs, &inputs).expect("one trait");

        let input = problem.input(&[2.0]).expect("infallible");
        assert_relative_eq!(input.g_sc, 2.0);

        let state = LeafModel::new(&C3Leaf).call(&input).expect("solvable");
        let value = problem.objective(&input, &state).expect("infallible");
        let direct = carbon_balance(&C3Leaf, &[2.0], &traits, &costs, &inputs).expect("evaluates");
        assert_relative_eq!(value, direct);
    }

    #[test]
    fn problem_checks_dimension() {
        let inputs = default_inputs();
        let traits = conductance();
        let err = CarbonBalance::<_, 2>::new(&C3Leaf, &traits, CarbonCosts::new(0.0, 0.0), &inputs)
            .unwrap_err();
        assert_eq!(err, InputError::Dimension { expected: 2, found: 1 });
    }
}
