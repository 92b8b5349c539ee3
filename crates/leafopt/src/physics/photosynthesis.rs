//! Farquhar–von Caemmerer–Berry C3 photosynthesis.

use crate::params::Inputs;

use super::Baked;

/// Electron transport rate from the non-rectangular hyperbola.
///
/// Smaller root of `θJ² − (J_max + φI)J + J_max·φI = 0`.
pub(super) fn electron_transport(j_max: f64, ppfd: f64, phi: f64, theta: f64) -> f64 {
    let light = phi * ppfd;
    let sum = j_max + light;
    if theta.abs() < f64::EPSILON {
        return if sum > 0.0 { j_max * light / sum } else { 0.0 };
    }
    let discriminant = (sum * sum - 4.0 * theta * j_max * light).max(0.0);
    (sum - discriminant.sqrt()) / (2.0 * theta)
}

/// Net assimilation demanded by the biochemistry at chloroplast CO2 `c` (Pa).
pub(super) fn demand(inputs: &Inputs, baked: &Baked, c: f64) -> f64 {
    let gamma_star = baked.gamma_star;

    let k_m = baked.k_c * (1.0 + inputs.o / baked.k_o);
    let w_c = baked.v_cmax * c / (c + k_m);
    let w_j = baked.j * c / (4.0 * c + 8.0 * gamma_star);
    let w_p = if c > gamma_star {
        3.0 * baked.v_tpu * c / (c - gamma_star)
    } else {
        f64::INFINITY
    };

    w_c.min(w_j).min(w_p) * (1.0 - gamma_star / c) - baked.r_d
}

/// Diffusive CO2 supply through total conductance `g_tc`.
pub(super) fn supply(g_tc: f64, c_air: f64, c: f64) -> f64 {
    g_tc * (c_air - c)
}
