//! Turning the best attempt into a [`LeafRecord`].

use crate::{
    Error, InternalError, TraitSelection,
    leaf::{SolveError, solve_leaf},
    params::{Inputs, Namespace, lookup},
    physics::LeafPhysics,
    record::LeafRecord,
    refit::Refit,
    units::{Quantity, Unit},
};

/// Builds the output record from a converged refit.
///
/// The leaf is solved once more at the optimized traits and the energy
/// balance is checked before anything is reported. Constants and
/// temperature-response parameters are left out.
///
/// # Errors
///
/// Returns [`Error::NotConverged`] if the best attempt did not converge, or
/// an [`InternalError`] if the optimized leaf cannot be solved or its energy
/// balance does not close to within 0.05 W/m².
pub(crate) fn assemble<P>(
    physics: &P,
    refit: &Refit,
    traits: &TraitSelection,
    base: &Inputs,
) -> Result<LeafRecord, Error>
where
    P: LeafPhysics + ?Sized,
{
    let best = &refit.best;
    if !best.convergence.is_success() {
        return Err(Error::NotConverged {
            n_init: refit.n_init,
            attempts: refit.attempts,
            convergence: best.convergence,
        });
    }

    let inputs = base.with_traits(physics, traits.as_slice(), &best.x);
    let state = solve_leaf(physics, &inputs).map_err(|err| {
        InternalError::RootNotFound(match err {
            SolveError::LeafTemperature => "T_leaf",
            SolveError::ChloroplastCo2 => "C_chl",
        })
    })?;

    let residual = state.energy.residual();
    if (residual * 10.0).round() != 0.0 {
        return Err(InternalError::EnergyBalance { residual }.into());
    }

    let mut record = LeafRecord::default();
    for (name, value) in inputs.values() {
        if let Some((namespace, def)) = lookup(name)
            && matches!(namespace, Namespace::Leaf | Namespace::Enviro)
        {
            record.insert(name, Quantity::new(value, def.unit));
        }
    }

    use Unit::{
        Dimensionless, Kelvin, MicromolePerSquareMetreSecond as Umol,
        MicromolePerSquareMetreSecondPascal as Cond, MolePerSquareMetreSecond, Pascal,
        WattPerSquareMetre as Flux,
    };
    let energy = state.energy;
    let derived = [
        ("g_sw", inputs.g_sw, Cond),
        ("sr", inputs.sr, Dimensionless),
        ("T_leaf", state.t_leaf, Kelvin),
        ("C_chl", state.photosynthesis.c_chl, Pascal),
        ("A", state.assimilation(), Umol),
        ("E", energy.e, MolePerSquareMetreSecond),
        ("R_abs", energy.r_abs, Flux),
        ("S_r", energy.s_r, Flux),
        ("H", energy.h, Flux),
        ("L", energy.l, Flux),
        ("g_tw", energy.g_tw, Cond),
        ("g_tc", state.g_tc, Cond),
    ];
    for (name, value, unit) in derived.into_iter().chain(state.baked.entries()) {
        record.insert(name, Quantity::new(value, unit));
    }
    record.insert("value", Quantity::new(best.value, Umol));
    record.insert(
        "convergence",
        Quantity::new(f64::from(best.convergence.code()), Dimensionless),
    );

    record.retain(|name| !Namespace::Constants.contains(name) && !Namespace::Bake.contains(name));
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        CarbonCosts, Trait,
        multistart::{Attempt, Convergence},
        objective::carbon_balance,
        physics::{C3Leaf, tests::default_inputs},
        refit::RefitState,
    };

    fn refit_at(x: Vec<f64>, value: f64, convergence: Convergence) -> Refit {
        Refit {
            best: Attempt {
                x,
                value,
                convergence,
            },
            n_init: 1,
            attempts: 1,
            state: RefitState::Converged,
        }
    }

    #[test]
    fn unconverged_best_is_an_error() {
        let refit = refit_at(vec![1.0], f64::NAN, Convergence::SolverFailure);
        let traits = TraitSelection::new([Trait::Conductance]).expect("valid selection");

        let err = assemble(&C3Leaf, &refit, &traits, &default_inputs()).unwrap_err();
        assert!(matches!(
            err,
            Error::NotConverged {
                convergence: Convergence::SolverFailure,
                ..
            }
        ));
    }

    #[test]
    fn record_carries_traits_and_derived_values() {
        let inputs = default_inputs();
        let traits = TraitSelection::new([Trait::Conductance]).expect("valid selection");
        let costs = CarbonCosts::new(1e-3, 0.0);
        let value = carbon_balance(&C3Leaf, &[1.5], &traits, &costs, &inputs).expect("evaluates");
        let refit = refit_at(vec![1.5], value, Convergence::Success);

        let record = assemble(&C3Leaf, &refit, &traits, &inputs).expect("assembles");

        assert_relative_eq!(record.value("g_sc").expect("g_sc"), 1.5);
        assert_eq!(record.get("T_leaf").map(|q| q.unit), Some(Unit::Kelvin));
        assert_eq!(record.value("convergence"), Some(0.0));
        assert_relative_eq!(record.value("value").expect("value"), value);
        for name in ["A", "E", "C_chl", "g_sw", "g_tc", "V_cmax", "J", "K_O"] {
            assert!(record.contains(name), "{name}");
        }
    }

    #[test]
    fn record_omits_constants_and_responses() {
        let inputs = default_inputs();
        let traits = TraitSelection::new([]).expect("valid selection");
        let value = carbon_balance(&C3Leaf, &[], &traits, &CarbonCosts::new(0.0, 0.0), &inputs)
            .expect("evaluates");
        let refit = refit_at(Vec::new(), value, Convergence::Success);

        let record = assemble(&C3Leaf, &refit, &traits, &inputs).expect("assembles");

        for ns in [Namespace::Constants, Namespace::Bake] {
            for def in ns.defs() {
                assert!(!record.contains(def.name), "{}", def.name);
            }
        }
        for ns in [Namespace::Leaf, Namespace::Enviro] {
            for def in ns.defs() {
                assert!(record.contains(def.name), "{}", def.name);
            }
        }
    }
}
