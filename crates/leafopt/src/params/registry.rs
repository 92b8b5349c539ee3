use crate::units::Unit;

use Unit::{
    Dimensionless as ONE, JoulePerKilogramKelvin as J_KG_K, JoulePerMole as J_MOL,
    JoulePerMoleKelvin as J_MOL_K, Kelvin as K, Kilopascal as KPA, Metre as M,
    MetrePerSecond as M_S, MicromolePerSquareMetreSecond as UMOL,
    MicromolePerSquareMetreSecondPascal as COND, Pascal as PA, SquareMetrePerSecond as M2_S,
    WattPerSquareMetre as W_M2, WattPerSquareMetreKelvin4 as W_M2_K4,
};

/// Registry entry for one named parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDef {
    pub name: &'static str,
    /// Unit the numeric core expects.
    pub unit: Unit,
    pub default: f64,
    /// Plausible range, inclusive, in the canonical unit.
    pub min: f64,
    pub max: f64,
}

/// The four parameter namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Leaf,
    Enviro,
    Constants,
    Bake,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::Constants,
        Namespace::Bake,
        Namespace::Enviro,
        Namespace::Leaf,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Namespace::Leaf => "leaf",
            Namespace::Enviro => "enviro",
            Namespace::Constants => "constants",
            Namespace::Bake => "bake",
        }
    }

    /// Returns the registry of this namespace.
    #[must_use]
    pub fn defs(self) -> &'static [ParamDef] {
        match self {
            Namespace::Leaf => LEAF,
            Namespace::Enviro => ENVIRO,
            Namespace::Constants => CONSTANTS,
            Namespace::Bake => BAKE,
        }
    }

    #[must_use]
    pub fn find(self, name: &str) -> Option<&'static ParamDef> {
        self.defs().iter().find(|def| def.name == name)
    }

    /// Returns `true` if `name` belongs to this namespace.
    #[must_use]
    pub fn contains(self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

/// Finds a parameter in any namespace.
#[must_use]
pub fn lookup(name: &str) -> Option<(Namespace, &'static ParamDef)> {
    Namespace::ALL
        .into_iter()
        .find_map(|ns| ns.find(name).map(|def| (ns, def)))
}

const fn def(name: &'static str, unit: Unit, default: f64, min: f64, max: f64) -> ParamDef {
    ParamDef {
        name,
        unit,
        default,
        min,
        max,
    }
}

static CONSTANTS: &[ParamDef] = &[
    def("R", J_MOL_K, 8.314_459_8, 8.3, 8.4),
    def("sigma", W_M2_K4, 5.670_367e-8, 5.6e-8, 5.8e-8),
    def("c_p", J_KG_K, 1010.0, 900.0, 1100.0),
    def("R_air", J_KG_K, 287.058, 280.0, 295.0),
    def("D_h0", M2_S, 1.9e-5, 1e-6, 1e-4),
    def("D_m0", M2_S, 1.33e-5, 1e-6, 1e-4),
    def("D_w0", M2_S, 2.12e-5, 1e-6, 1e-4),
    def("D_c0", M2_S, 1.29e-5, 1e-6, 1e-4),
    def("eT", ONE, 1.75, 1.0, 2.5),
    def("Nu_a", ONE, 0.6, 0.1, 2.0),
    def("Nu_b", ONE, 0.5, 0.1, 1.0),
];

static ENVIRO: &[ParamDef] = &[
    def("T_air", K, 298.15, 233.15, 333.15),
    def("RH", ONE, 0.5, 0.0, 1.0),
    def("P", KPA, 101.3246, 50.0, 110.0),
    def("wind", M_S, 2.0, 0.01, 20.0),
    def("S_sw", W_M2, 1000.0, 0.0, 1500.0),
    def("PPFD", UMOL, 1500.0, 0.0, 3000.0),
    def("C_air", PA, 41.0, 1.0, 200.0),
    def("O", KPA, 21.27, 0.0, 50.0),
    def("r", ONE, 0.2, 0.0, 1.0),
];

static LEAF: &[ParamDef] = &[
    def("g_sc", COND, 4.0, 0.0, 10.0),
    def("leafsize", M, 0.1, 0.0005, 0.4),
    def("logit_sr", ONE, 0.0, -10.0, 10.0),
    def("abs_s", ONE, 0.8, 0.0, 1.0),
    def("abs_l", ONE, 0.97, 0.0, 1.0),
    def("V_cmax25", UMOL, 50.0, 0.0, 500.0),
    def("J_max25", UMOL, 100.0, 0.0, 1000.0),
    def("R_d25", UMOL, 2.0, 0.0, 50.0),
    def("V_tpu25", UMOL, 200.0, 0.0, 1000.0),
    def("g_mc25", COND, 4.0, 0.0, 100.0),
    def("K_C25", PA, 27.238, 0.0, 200.0),
    def("K_O25", KPA, 16.582, 0.0, 100.0),
    def("gamma_star25", PA, 3.743, 0.0, 20.0),
    def("phi_J", ONE, 0.331, 0.0, 1.0),
    def("theta_J", ONE, 0.825, 0.0, 1.0),
];

static BAKE: &[ParamDef] = &[
    def("Ea_V_cmax", J_MOL, 65_330.0, 0.0, 200_000.0),
    def("Ea_R_d", J_MOL, 46_390.0, 0.0, 200_000.0),
    def("Ea_V_tpu", J_MOL, 53_100.0, 0.0, 200_000.0),
    def("Ea_K_C", J_MOL, 79_430.0, 0.0, 200_000.0),
    def("Ea_K_O", J_MOL, 36_380.0, 0.0, 200_000.0),
    def("Ea_gamma_star", J_MOL, 37_830.0, 0.0, 200_000.0),
    def("Ea_J_max", J_MOL, 43_540.0, 0.0, 200_000.0),
    def("Ds_J_max", J_MOL_K, 650.0, 0.0, 2000.0),
    def("Dh_J_max", J_MOL, 200_000.0, 0.0, 1_000_000.0),
    def("Ea_g_mc", J_MOL, 49_600.0, 0.0, 200_000.0),
    def("Ds_g_mc", J_MOL_K, 1400.0, 0.0, 2000.0),
    def("Dh_g_mc", J_MOL, 437_400.0, 0.0, 1_000_000.0),
];
