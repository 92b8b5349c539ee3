//! Properties of moist air.

/// Reference temperature for rate constants (K).
pub(super) const T_REF: f64 = 298.15;

/// Temperature of the diffusivity reference values (K).
const T_ZERO: f64 = 273.15;

/// Saturation vapour pressure over water (Pa) at `t` (K), Tetens form.
pub(super) fn saturation_vapour_pressure(t: f64) -> f64 {
    let tc = t - T_ZERO;
    610.78 * (17.27 * tc / (tc + 237.3)).exp()
}

/// Latent heat of vaporization (J/mol) at `t` (K).
pub(super) fn latent_heat(t: f64) -> f64 {
    56_847.682_50 - 43.125_14 * t
}

/// Effective sky temperature (K) for clear-sky longwave radiation.
pub(super) fn sky_temperature(t_air: f64) -> f64 {
    0.0552 * t_air.powf(1.5)
}

/// Scales a diffusivity given at 0 °C to temperature `t` (K).
pub(super) fn diffusivity(d0: f64, t: f64, e_t: f64) -> f64 {
    d0 * (t / T_ZERO).powf(e_t)
}

/// Dry-air density (kg/m³) at pressure `p` (kPa).
pub(super) fn density(p: f64, r_air: f64, t: f64) -> f64 {
    p * 1000.0 / (r_air * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn vapour_pressure_at_reference_points() {
        assert_relative_eq!(saturation_vapour_pressure(273.15), 610.78, epsilon = 1e-9);
        assert_relative_eq!(saturation_vapour_pressure(298.15), 3168.0, max_relative = 1e-2);
    }

    #[test]
    fn latent_heat_near_44_kj() {
        assert_relative_eq!(latent_heat(298.15), 43_989.8, max_relative = 1e-4);
    }

    #[test]
    fn density_of_sea_level_air() {
        assert_relative_eq!(density(101.325, 287.058, 288.15), 1.225, max_relative = 1e-3);
    }
}
