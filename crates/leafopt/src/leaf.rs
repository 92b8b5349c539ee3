//! The nested leaf solve: leaf temperature, then chloroplast CO2.

use leafopt_core::Model;
use thiserror::Error;

use crate::{
    params::Inputs,
    physics::{Baked, EnergyBalance, LeafPhysics, Photosynthesis},
    root::find_root,
};

/// Half-width of the leaf temperature bracket around air temperature (K).
const T_LEAF_SPAN: f64 = 30.0;

/// Lower end of the chloroplast CO2 bracket (Pa).
const C_CHL_MIN: f64 = 0.1;

/// Errors from the inner root solves.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("no leaf temperature closes the energy balance")]
    LeafTemperature,

    #[error("no chloroplast CO2 balances supply and demand")]
    ChloroplastCo2,
}

/// A solved leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafState {
    pub t_leaf: f64,
    pub energy: EnergyBalance,
    pub baked: Baked,
    pub photosynthesis: Photosynthesis,
    /// Total conductance to CO2 at the solved leaf temperature.
    pub g_tc: f64,
}

impl LeafState {
    /// Net assimilation (µmol/m²/s).
    #[must_use]
    pub fn assimilation(&self) -> f64 {
        self.photosynthesis.demand
    }
}

/// Solves the energy balance for leaf temperature, bakes the temperature
/// responses, then solves for chloroplast CO2.
///
/// # Errors
///
/// Returns an error if either root cannot be found.
pub fn solve_leaf<P>(physics: &P, inputs: &Inputs) -> Result<LeafState, SolveError>
where
    P: LeafPhysics + ?Sized,
{
    let t_leaf = find_root(
        |t| physics.energy_balance(inputs, t).residual(),
        [inputs.t_air - T_LEAF_SPAN, inputs.t_air + T_LEAF_SPAN],
    );
    if !t_leaf.is_converged() {
        return Err(SolveError::LeafTemperature);
    }
    let t_leaf = t_leaf.root;

    let baked = physics.bake(inputs, t_leaf);
    let c_chl = find_root(
        |c| physics.photosynthesis(inputs, &baked, c).residual(),
        [C_CHL_MIN, inputs.c_air.max(10.0)],
    );
    if !c_chl.is_converged() {
        return Err(SolveError::ChloroplastCo2);
    }

    Ok(LeafState {
        t_leaf,
        energy: physics.energy_balance(inputs, t_leaf),
        baked,
        photosynthesis: physics.photosynthesis(inputs, &baked, c_chl.root),
        g_tc: physics.total_co2_conductance(inputs, &baked),
    })
}

/// [`solve_leaf`] as a [`Model`] from inputs to solved state.
#[derive(Debug)]
pub struct LeafModel<'a, P: ?Sized> {
    physics: &'a P,
}

impl<'a, P: ?Sized> LeafModel<'a, P> {
    pub fn new(physics: &'a P) -> Self {
        Self { physics }
    }
}

impl<P: LeafPhysics + ?Sized> Model for LeafModel<'_, P> {
    type Input = Inputs;
    type Output = LeafState;
    type Error = SolveError;

    fn call(&self, input: &Inputs) -> Result<LeafState, Self::Error> {
        solve_leaf(self.physics, input)
    }
}
