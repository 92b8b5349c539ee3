//! The top-level optimization entry points.

use leafopt_core::Observer;

use crate::{
    CarbonCosts, Error, Options, TraitSelection,
    assemble::assemble,
    event::{Action, Event},
    multistart,
    params::{BakeParams, Constants, EnviroParams, Inputs, LeafParams, ParameterSet, check_ranges},
    physics::{C3Leaf, LeafPhysics},
    progress::ProgressLog,
    record::LeafRecord,
    refit,
};

/// Finds the trait values that maximize the leaf's carbon balance.
///
/// Uses the [`C3Leaf`] physics. Progress is logged through `tracing` unless
/// `options.quiet` is set.
///
/// # Errors
///
/// See [`optimize_leaf_with`].
pub fn optimize_leaf(
    traits: &TraitSelection,
    carbon_costs: &CarbonCosts,
    bake_par: &BakeParams,
    constants: &Constants,
    enviro_par: &EnviroParams,
    leaf_par: &LeafParams,
    options: &Options,
) -> Result<LeafRecord, Error> {
    let params = (bake_par, constants, enviro_par, leaf_par);
    if options.quiet {
        optimize_leaf_with(&C3Leaf, &mut (), traits, carbon_costs, params, options)
    } else {
        optimize_leaf_with(&C3Leaf, &mut ProgressLog, traits, carbon_costs, params, options)
    }
}

/// [`optimize_leaf`] with custom physics and an observer.
///
/// The four parameter groups are passed as `(bake, constants, enviro, leaf)`.
/// The observer sees every [`Event`] and may stop the search early with
/// [`Action::StopEarly`]. The best attempt so far is then reported as usual.
///
/// # Errors
///
/// Returns [`Error::Input`] for invalid options, costs, or parameters,
/// [`Error::NotConverged`] if no attempt converged, and [`Error::Internal`]
/// if a consistency check fails on the optimized leaf.
pub fn optimize_leaf_with<P, Obs>(
    physics: &P,
    observer: &mut Obs,
    traits: &TraitSelection,
    carbon_costs: &CarbonCosts,
    (bake_par, constants, enviro_par, leaf_par): (&BakeParams, &Constants, &EnviroParams, &LeafParams),
    options: &Options,
) -> Result<LeafRecord, Error>
where
    P: LeafPhysics + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    if options.check {
        options.validate()?;
        carbon_costs.validate()?;
    }

    let groups = [
        constants.canonical(options.set_units)?,
        bake_par.canonical(options.set_units)?,
        enviro_par.canonical(options.set_units)?,
        leaf_par.canonical(options.set_units)?,
    ];
    if options.check {
        for group in &groups {
            check_ranges(group)?;
        }
    }
    let merged = ParameterSet::merge(&groups)?;
    let inputs = Inputs::from_values(&merged.magnitudes(), physics)?;

    let refit = refit::run(
        options.n_init.max(1),
        options.max_init,
        options.refit,
        observer,
        |n_init, observer| {
            multistart::run(physics, traits, carbon_costs, &inputs, n_init, observer)
        },
    )?;

    assemble(physics, &refit, traits, &inputs)
}
