//! Temperature responses of photosynthetic parameters.

use crate::params::Inputs;

use super::{Baked, air::T_REF, photosynthesis};

/// Arrhenius response relative to 25 °C.
pub(super) fn arrhenius(k25: f64, ea: f64, r_gas: f64, t: f64) -> f64 {
    k25 * (ea / r_gas * (1.0 / T_REF - 1.0 / t)).exp()
}

/// Arrhenius response with high-temperature deactivation.
///
/// `ds` is the entropy term (J/mol/K) and `dh` the deactivation energy (J/mol).
pub(super) fn peaked(k25: f64, ea: f64, ds: f64, dh: f64, r_gas: f64, t: f64) -> f64 {
    let deactivation =
        |temp: f64| 1.0 + ((temp * ds - dh) / (r_gas * temp)).exp();
    arrhenius(k25, ea, r_gas, t) * deactivation(T_REF) / deactivation(t)
}

/// Evaluates every temperature-dependent parameter at `t_leaf`.
pub(super) fn bake(inputs: &Inputs, t_leaf: f64) -> Baked {
    let r = inputs.r_gas;
    let j_max = peaked(
        inputs.j_max25,
        inputs.ea_j_max,
        inputs.ds_j_max,
        inputs.dh_j_max,
        r,
        t_leaf,
    );

    Baked {
        t_leaf,
        v_cmax: arrhenius(inputs.v_cmax25, inputs.ea_v_cmax, r, t_leaf),
        j_max,
        r_d: arrhenius(inputs.r_d25, inputs.ea_r_d, r, t_leaf),
        v_tpu: arrhenius(inputs.v_tpu25, inputs.ea_v_tpu, r, t_leaf),
        g_mc: peaked(
            inputs.g_mc25,
            inputs.ea_g_mc,
            inputs.ds_g_mc,
            inputs.dh_g_mc,
            r,
            t_leaf,
        ),
        k_c: arrhenius(inputs.k_c25, inputs.ea_k_c, r, t_leaf),
        k_o: arrhenius(inputs.k_o25, inputs.ea_k_o, r, t_leaf),
        gamma_star: arrhenius(inputs.gamma_star25, inputs.ea_gamma_star, r, t_leaf),
        j: photosynthesis::electron_transport(j_max, inputs.ppfd, inputs.phi_j, inputs.theta_j),
    }
}
