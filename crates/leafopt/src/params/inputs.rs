use std::collections::BTreeMap;

use crate::{
    Trait,
    physics::{LeafPhysics, sigmoid},
};

use super::ParamError;

/// Generates [`Inputs`] from a list of `field => "registered name"` pairs.
macro_rules! inputs {
    ($($field:ident => $name:literal),+ $(,)?) => {
        /// Unitless canonical values of every registered parameter.
        ///
        /// This is the flat numeric view the solvers work on. Besides the
        /// registered parameters it carries two derived values that are kept
        /// in step with the traits they depend on.
        #[derive(Debug, Clone, PartialEq)]
        pub struct Inputs {
            $(pub $field: f64,)+
            /// Stomatal conductance to water vapour, derived from `g_sc`.
            pub g_sw: f64,
            /// Fraction of stomata on the upper surface, `sigmoid(logit_sr)`.
            pub sr: f64,
        }

        impl Inputs {
            fn lookup(values: &BTreeMap<String, f64>) -> Result<Self, ParamError> {
                let get = |name: &str| {
                    values
                        .get(name)
                        .copied()
                        .ok_or_else(|| ParamError::Missing(name.to_owned()))
                };
                Ok(Self {
                    $($field: get($name)?,)+
                    g_sw: f64::NAN,
                    sr: f64::NAN,
                })
            }

            /// Iterates over registered names and their current values.
            pub fn values(&self) -> impl Iterator<Item = (&'static str, f64)> {
                [$(($name, self.$field)),+].into_iter()
            }
        }
    };
}

inputs! {
    r_gas => "R",
    sigma => "sigma",
    c_p => "c_p",
    r_air => "R_air",
    d_h0 => "D_h0",
    d_m0 => "D_m0",
    d_w0 => "D_w0",
    d_c0 => "D_c0",
    e_t => "eT",
    nu_a => "Nu_a",
    nu_b => "Nu_b",

    t_air => "T_air",
    rh => "RH",
    p => "P",
    wind => "wind",
    s_sw => "S_sw",
    ppfd => "PPFD",
    c_air => "C_air",
    o => "O",
    r => "r",

    g_sc => "g_sc",
    leafsize => "leafsize",
    logit_sr => "logit_sr",
    abs_s => "abs_s",
    abs_l => "abs_l",
    v_cmax25 => "V_cmax25",
    j_max25 => "J_max25",
    r_d25 => "R_d25",
    v_tpu25 => "V_tpu25",
    g_mc25 => "g_mc25",
    k_c25 => "K_C25",
    k_o25 => "K_O25",
    gamma_star25 => "gamma_star25",
    phi_j => "phi_J",
    theta_j => "theta_J",

    ea_v_cmax => "Ea_V_cmax",
    ea_r_d => "Ea_R_d",
    ea_v_tpu => "Ea_V_tpu",
    ea_k_c => "Ea_K_C",
    ea_k_o => "Ea_K_O",
    ea_gamma_star => "Ea_gamma_star",
    ea_j_max => "Ea_J_max",
    ds_j_max => "Ds_J_max",
    dh_j_max => "Dh_J_max",
    ea_g_mc => "Ea_g_mc",
    ds_g_mc => "Ds_g_mc",
    dh_g_mc => "Dh_g_mc",
}

impl Inputs {
    /// Extracts every registered parameter from a flat mapping.
    ///
    /// Names that are not registered are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Missing`] for the first registered name absent
    /// from `values`.
    pub fn from_values<P>(values: &BTreeMap<String, f64>, physics: &P) -> Result<Self, ParamError>
    where
        P: LeafPhysics + ?Sized,
    {
        let mut inputs = Self::lookup(values)?;
        inputs.update_derived(physics);
        Ok(inputs)
    }

    /// Returns a registered value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Overwrites one trait and refreshes the derived values.
    pub fn set_trait<P>(&mut self, physics: &P, t: Trait, value: f64)
    where
        P: LeafPhysics + ?Sized,
    {
        match t {
            Trait::Conductance => self.g_sc = value,
            Trait::LeafSize => self.leafsize = value,
            Trait::LogitStomatalRatio => self.logit_sr = value,
        }
        self.update_derived(physics);
    }

    /// Returns a copy with the given traits overwritten, in order.
    #[must_use]
    pub fn with_traits<P>(&self, physics: &P, traits: &[Trait], x: &[f64]) -> Self
    where
        P: LeafPhysics + ?Sized,
    {
        let mut inputs = self.clone();
        for (t, value) in traits.iter().zip(x) {
            inputs.set_trait(physics, *t, *value);
        }
        inputs
    }

    fn update_derived<P>(&mut self, physics: &P)
    where
        P: LeafPhysics + ?Sized,
    {
        self.g_sw = physics.water_conductance(self, self.g_sc);
        self.sr = sigmoid(self.logit_sr);
    }
}
