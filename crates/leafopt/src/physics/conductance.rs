//! Boundary-layer and total conductances.
//!
//! Molar conductances are in µmol/m²/s/Pa. Each leaf surface has its own
//! boundary layer; stomata are split between the surfaces by `sr`.

use crate::params::Inputs;

use super::{Baked, air};

/// Mean of air and leaf temperature, used for boundary-layer air properties.
fn film_temperature(inputs: &Inputs, t_leaf: f64) -> f64 {
    0.5 * (inputs.t_air + t_leaf)
}

/// Boundary-layer conductance to heat of one surface (m/s).
pub(super) fn heat(inputs: &Inputs, t_leaf: f64) -> f64 {
    let t = film_temperature(inputs, t_leaf);
    let d_m = air::diffusivity(inputs.d_m0, t, inputs.e_t);
    let d_h = air::diffusivity(inputs.d_h0, t, inputs.e_t);

    let reynolds = inputs.wind * inputs.leafsize / d_m;
    let nusselt = inputs.nu_a * reynolds.powf(inputs.nu_b);
    d_h * nusselt / inputs.leafsize
}

/// Boundary-layer conductance to water vapour of one surface.
pub(super) fn boundary_water(inputs: &Inputs, t_leaf: f64) -> f64 {
    let t = film_temperature(inputs, t_leaf);
    let d_w = air::diffusivity(inputs.d_w0, t, inputs.e_t);
    let d_h = air::diffusivity(inputs.d_h0, t, inputs.e_t);

    let g = heat(inputs, t_leaf) * (d_w / d_h).powf(2.0 / 3.0);
    to_molar(g, inputs.r_gas, t)
}

/// Converts m/s to µmol/m²/s/Pa at temperature `t`.
fn to_molar(g: f64, r_gas: f64, t: f64) -> f64 {
    g * 1e6 / (r_gas * t)
}

/// Conductances in series; zero if any part is closed.
fn series(parts: &[f64]) -> f64 {
    if parts.iter().any(|g| *g <= 0.0) {
        return 0.0;
    }
    1.0 / parts.iter().map(|g| g.recip()).sum::<f64>()
}

/// Total leaf conductance to water vapour, both surfaces.
pub(super) fn total_water(inputs: &Inputs, t_leaf: f64) -> f64 {
    let g_b = boundary_water(inputs, t_leaf);
    let upper = series(&[inputs.g_sw * inputs.sr, g_b]);
    let lower = series(&[inputs.g_sw * (1.0 - inputs.sr), g_b]);
    upper + lower
}

/// Total leaf conductance to CO2, both surfaces, including mesophyll.
pub(super) fn total_co2(inputs: &Inputs, baked: &Baked) -> f64 {
    let g_bc = boundary_water(inputs, baked.t_leaf) / (inputs.d_w0 / inputs.d_c0).powf(2.0 / 3.0);
    let g_m = 0.5 * baked.g_mc;

    let upper = series(&[inputs.g_sc * inputs.sr, g_bc, g_m]);
    let lower = series(&[inputs.g_sc * (1.0 - inputs.sr), g_bc, g_m]);
    upper + lower
}
