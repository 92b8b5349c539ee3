use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::InputError;

/// Carbon costs charged against net photosynthesis.
///
/// `h2o` is the cost of water loss (µmol CO2 per µmol H2O) and `sr` the cost
/// of stomata on the upper surface (per unit water conductance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct CarbonCosts {
    pub h2o: f64,
    pub sr: f64,
}

impl CarbonCosts {
    pub const H2O: &'static str = "H2O";
    pub const SR: &'static str = "SR";

    #[must_use]
    pub fn new(h2o: f64, sr: f64) -> Self {
        Self { h2o, sr }
    }

    /// Builds costs from a string-keyed map with keys `H2O` and `SR`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is missing or an unknown key is present.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self, InputError> {
        if let Some(unknown) = map.keys().find(|k| *k != Self::H2O && *k != Self::SR) {
            return Err(InputError::UnknownCost(unknown.clone()));
        }
        let get = |key: &'static str| map.get(key).copied().ok_or(InputError::MissingCost(key));
        Ok(Self::new(get(Self::H2O)?, get(Self::SR)?))
    }

    /// Checks that both costs are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidCost`] for the first bad value.
    pub fn validate(&self) -> Result<(), InputError> {
        for (name, value) in [(Self::H2O, self.h2o), (Self::SR, self.sr)] {
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::InvalidCost { name, value });
            }
        }
        Ok(())
    }
}

impl TryFrom<BTreeMap<String, f64>> for CarbonCosts {
    type Error = InputError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_map(&map)
    }
}

impl From<CarbonCosts> for BTreeMap<String, f64> {
    fn from(costs: CarbonCosts) -> Self {
        BTreeMap::from([
            (CarbonCosts::H2O.to_owned(), costs.h2o),
            (CarbonCosts::SR.to_owned(), costs.sr),
        ])
    }
}
