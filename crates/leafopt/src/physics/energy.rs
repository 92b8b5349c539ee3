use crate::params::Inputs;

use super::{EnergyBalance, air, conductance};

/// Evaluates the leaf energy budget at `t_leaf`.
pub(super) fn balance(inputs: &Inputs, t_leaf: f64) -> EnergyBalance {
    let sigma = inputs.sigma;
    let t_air = inputs.t_air;

    let r_abs = inputs.abs_s * (1.0 + inputs.r) * inputs.s_sw
        + inputs.abs_l * sigma * (air::sky_temperature(t_air).powi(4) + t_air.powi(4));
    let s_r = 2.0 * inputs.abs_l * sigma * t_leaf.powi(4);

    let rho = air::density(inputs.p, inputs.r_air, 0.5 * (t_air + t_leaf));
    let h = rho * inputs.c_p * 2.0 * conductance::heat(inputs, t_leaf) * (t_leaf - t_air);

    let g_tw = conductance::total_water(inputs, t_leaf);
    let deficit = air::saturation_vapour_pressure(t_leaf)
        - inputs.rh * air::saturation_vapour_pressure(t_air);
    let e = g_tw * 1e-6 * deficit;
    let l = air::latent_heat(t_leaf) * e;

    EnergyBalance {
        r_abs,
        s_r,
        h,
        l,
        e,
        g_tw,
    }
}
