//! Leaf energy balance and C3 photosynthesis.
//!
//! The optimizer only talks to the physics through [`LeafPhysics`], so any
//! implementation can be swapped in. [`C3Leaf`] is the default: a
//! two-surface leaf with forced-convection boundary layers and a
//! Farquhar–von Caemmerer–Berry photosynthesis model.
//!
//! All values are unitless magnitudes in the canonical units of the
//! parameter registry.

mod air;
mod conductance;
mod energy;
mod photosynthesis;
mod temperature;

use crate::{params::Inputs, units::Unit};

/// Energy-balance fluxes at a given leaf temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBalance {
    /// Absorbed radiation (W/m²).
    pub r_abs: f64,
    /// Emitted longwave radiation (W/m²).
    pub s_r: f64,
    /// Sensible heat loss (W/m²).
    pub h: f64,
    /// Latent heat loss (W/m²).
    pub l: f64,
    /// Transpiration (mol/m²/s).
    pub e: f64,
    /// Total conductance to water vapour (µmol/m²/s/Pa).
    pub g_tw: f64,
}

impl EnergyBalance {
    /// Net energy gain, zero at the leaf temperature.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.r_abs - self.s_r - self.h - self.l
    }
}

/// Photosynthetic parameters evaluated at a leaf temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baked {
    pub t_leaf: f64,
    pub v_cmax: f64,
    pub j_max: f64,
    pub r_d: f64,
    pub v_tpu: f64,
    pub g_mc: f64,
    pub k_c: f64,
    pub k_o: f64,
    pub gamma_star: f64,
    /// Electron transport rate at the incident light.
    pub j: f64,
}

impl Baked {
    /// Returns every baked value with its output name and unit.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64, Unit); 9] {
        use Unit::{
            Kilopascal, MicromolePerSquareMetreSecond as Umol,
            MicromolePerSquareMetreSecondPascal as Cond, Pascal,
        };
        [
            ("V_cmax", self.v_cmax, Umol),
            ("J_max", self.j_max, Umol),
            ("R_d", self.r_d, Umol),
            ("V_tpu", self.v_tpu, Umol),
            ("g_mc", self.g_mc, Cond),
            ("K_C", self.k_c, Pascal),
            ("K_O", self.k_o, Kilopascal),
            ("gamma_star", self.gamma_star, Pascal),
            ("J", self.j, Umol),
        ]
    }
}

/// CO2 supply and demand at a chloroplast CO2 partial pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photosynthesis {
    /// Chloroplast CO2 (Pa).
    pub c_chl: f64,
    /// Diffusive supply (µmol/m²/s).
    pub supply: f64,
    /// Biochemical demand, the net assimilation rate (µmol/m²/s).
    pub demand: f64,
}

impl Photosynthesis {
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.supply - self.demand
    }
}

/// The physical rate equations used by the optimizer.
///
/// Implementations must be pure: the same inputs always give the same result.
pub trait LeafPhysics {
    /// Energy-balance fluxes at leaf temperature `t_leaf` (K).
    fn energy_balance(&self, inputs: &Inputs, t_leaf: f64) -> EnergyBalance;

    /// Temperature-dependent parameters at `t_leaf` (K).
    fn bake(&self, inputs: &Inputs, t_leaf: f64) -> Baked;

    /// Supply and demand at chloroplast CO2 `c_chl` (Pa).
    fn photosynthesis(&self, inputs: &Inputs, baked: &Baked, c_chl: f64) -> Photosynthesis;

    /// Stomatal conductance to water vapour for a CO2 conductance `g_sc`.
    fn water_conductance(&self, inputs: &Inputs, g_sc: f64) -> f64;

    /// Total leaf conductance to CO2, from the air to the chloroplast.
    fn total_co2_conductance(&self, inputs: &Inputs, baked: &Baked) -> f64;
}

/// Default C3 leaf physics.
#[derive(Debug, Clone, Copy, Default)]
pub struct C3Leaf;

impl LeafPhysics for C3Leaf {
    fn energy_balance(&self, inputs: &Inputs, t_leaf: f64) -> EnergyBalance {
        energy::balance(inputs, t_leaf)
    }

    fn bake(&self, inputs: &Inputs, t_leaf: f64) -> Baked {
        temperature::bake(inputs, t_leaf)
    }

    fn photosynthesis(&self, inputs: &Inputs, baked: &Baked, c_chl: f64) -> Photosynthesis {
        let g_tc = conductance::total_co2(inputs, baked);
        Photosynthesis {
            c_chl,
            supply: photosynthesis::supply(g_tc, inputs.c_air, c_chl),
            demand: photosynthesis::demand(inputs, baked, c_chl),
        }
    }

    fn water_conductance(&self, inputs: &Inputs, g_sc: f64) -> f64 {
        g_sc * inputs.d_w0 / inputs.d_c0
    }

    fn total_co2_conductance(&self, inputs: &Inputs, baked: &Baked) -> f64 {
        conductance::total_co2(inputs, baked)
    }
}

/// Logistic function mapping the real line onto `(0, 1)`.
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
