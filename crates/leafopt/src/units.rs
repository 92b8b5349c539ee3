//! Unit-tagged values.
//!
//! Every parameter crosses the API boundary as a [`Quantity`]: a magnitude
//! plus a [`Unit`] tag. Units are grouped into families; conversion is only
//! possible within a family and is never implicit. Families with more than
//! one unit convert through the matching `uom` quantity.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    f64::{HeatFluxDensity, Length, MolarEnergy, Pressure, ThermodynamicTemperature, Velocity},
    heat_flux_density::watt_per_square_meter,
    length::{centimeter, meter, millimeter},
    molar_energy::{joule_per_mole, kilojoule_per_mole},
    pressure::{kilopascal, pascal},
    thermodynamic_temperature::{degree_celsius, kelvin},
    velocity::meter_per_second,
};

/// Errors raised by unit parsing and conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("cannot convert {from} to {to}")]
    Incompatible { from: Unit, to: Unit },

    #[error("unknown unit `{0}`")]
    Unknown(String),
}

/// Groups of mutually convertible units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Temperature,
    Pressure,
    Length,
    Velocity,
    Irradiance,
    MolarFlux,
    Conductance,
    MolarEnergy,
    MolarEntropy,
    SpecificHeat,
    Diffusivity,
    Radiative,
    Dimensionless,
}

/// A closed set of unit tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Unit {
    Kelvin,
    Celsius,
    Pascal,
    Kilopascal,
    Metre,
    Centimetre,
    Millimetre,
    MetrePerSecond,
    WattPerSquareMetre,
    MicromolePerSquareMetreSecond,
    MolePerSquareMetreSecond,
    MicromolePerSquareMetreSecondPascal,
    JoulePerMole,
    KilojoulePerMole,
    JoulePerMoleKelvin,
    JoulePerKilogramKelvin,
    SquareMetrePerSecond,
    WattPerSquareMetreKelvin4,
    Dimensionless,
}

impl Unit {
    pub const ALL: [Unit; 19] = [
        Unit::Kelvin,
        Unit::Celsius,
        Unit::Pascal,
        Unit::Kilopascal,
        Unit::Metre,
        Unit::Centimetre,
        Unit::Millimetre,
        Unit::MetrePerSecond,
        Unit::WattPerSquareMetre,
        Unit::MicromolePerSquareMetreSecond,
        Unit::MolePerSquareMetreSecond,
        Unit::MicromolePerSquareMetreSecondPascal,
        Unit::JoulePerMole,
        Unit::KilojoulePerMole,
        Unit::JoulePerMoleKelvin,
        Unit::JoulePerKilogramKelvin,
        Unit::SquareMetrePerSecond,
        Unit::WattPerSquareMetreKelvin4,
        Unit::Dimensionless,
    ];

    /// Returns the textual symbol used for display and parsing.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kelvin => "K",
            Unit::Celsius => "degC",
            Unit::Pascal => "Pa",
            Unit::Kilopascal => "kPa",
            Unit::Metre => "m",
            Unit::Centimetre => "cm",
            Unit::Millimetre => "mm",
            Unit::MetrePerSecond => "m/s",
            Unit::WattPerSquareMetre => "W/m^2",
            Unit::MicromolePerSquareMetreSecond => "umol/m^2/s",
            Unit::MolePerSquareMetreSecond => "mol/m^2/s",
            Unit::MicromolePerSquareMetreSecondPascal => "umol/m^2/s/Pa",
            Unit::JoulePerMole => "J/mol",
            Unit::KilojoulePerMole => "kJ/mol",
            Unit::JoulePerMoleKelvin => "J/mol/K",
            Unit::JoulePerKilogramKelvin => "J/kg/K",
            Unit::SquareMetrePerSecond => "m^2/s",
            Unit::WattPerSquareMetreKelvin4 => "W/m^2/K^4",
            Unit::Dimensionless => "1",
        }
    }

    #[must_use]
    pub fn family(self) -> Family {
        match self {
            Unit::Kelvin | Unit::Celsius => Family::Temperature,
            Unit::Pascal | Unit::Kilopascal => Family::Pressure,
            Unit::Metre | Unit::Centimetre | Unit::Millimetre => Family::Length,
            Unit::MetrePerSecond => Family::Velocity,
            Unit::WattPerSquareMetre => Family::Irradiance,
            Unit::MicromolePerSquareMetreSecond | Unit::MolePerSquareMetreSecond => {
                Family::MolarFlux
            }
            Unit::MicromolePerSquareMetreSecondPascal => Family::Conductance,
            Unit::JoulePerMole | Unit::KilojoulePerMole => Family::MolarEnergy,
            Unit::JoulePerMoleKelvin => Family::MolarEntropy,
            Unit::JoulePerKilogramKelvin => Family::SpecificHeat,
            Unit::SquareMetrePerSecond => Family::Diffusivity,
            Unit::WattPerSquareMetreKelvin4 => Family::Radiative,
            Unit::Dimensionless => Family::Dimensionless,
        }
    }

    /// Returns `true` if values in `self` can be converted to `other`.
    #[must_use]
    pub fn is_compatible(self, other: Unit) -> bool {
        self.family() == other.family()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.symbol() == s)
            .ok_or_else(|| UnitError::Unknown(s.to_owned()))
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for &'static str {
    fn from(unit: Unit) -> Self {
        unit.symbol()
    }
}

/// A magnitude tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    #[must_use]
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Converts to another unit of the same family.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Incompatible`] if the units belong to different
    /// families.
    pub fn convert(self, to: Unit) -> Result<Self, UnitError> {
        if self.unit == to {
            return Ok(self);
        }

        let incompatible = UnitError::Incompatible {
            from: self.unit,
            to,
        };
        if !self.unit.is_compatible(to) {
            return Err(incompatible);
        }

        let (from, value) = (self.unit, self.value);
        let converted = match from.family() {
            Family::Temperature => to_temperature(from, value).and_then(|q| from_temperature(to, q)),
            Family::Pressure => to_pressure(from, value).and_then(|q| from_pressure(to, q)),
            Family::Length => to_length(from, value).and_then(|q| from_length(to, q)),
            Family::MolarEnergy => {
                to_molar_energy(from, value).and_then(|q| from_molar_energy(to, q))
            }
            Family::MolarFlux => Some(value * molar_flux_scale(from) / molar_flux_scale(to)),
            _ => None,
        };

        converted
            .map(|value| Self::new(value, to))
            .ok_or(incompatible)
    }

    /// Returns the magnitude expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Incompatible`] if the units belong to different
    /// families.
    pub fn value_in(self, unit: Unit) -> Result<f64, UnitError> {
        self.convert(unit).map(|q| q.value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Generates the `uom` round trip for a family with several units.
macro_rules! uom_family {
    ($to:ident, $from:ident, $quantity:ty, { $($variant:ident => $unit:ty),+ $(,)? }) => {
        fn $to(unit: Unit, value: f64) -> Option<$quantity> {
            match unit {
                $(Unit::$variant => Some(<$quantity>::new::<$unit>(value)),)+
                _ => None,
            }
        }

        fn $from(unit: Unit, quantity: $quantity) -> Option<f64> {
            match unit {
                $(Unit::$variant => Some(quantity.get::<$unit>()),)+
                _ => None,
            }
        }
    };
}

uom_family!(to_temperature, from_temperature, ThermodynamicTemperature, {
    Kelvin => kelvin,
    Celsius => degree_celsius,
});

uom_family!(to_pressure, from_pressure, Pressure, {
    Pascal => pascal,
    Kilopascal => kilopascal,
});

uom_family!(to_length, from_length, Length, {
    Metre => meter,
    Centimetre => centimeter,
    Millimetre => millimeter,
});

uom_family!(to_molar_energy, from_molar_energy, MolarEnergy, {
    JoulePerMole => joule_per_mole,
    KilojoulePerMole => kilojoule_per_mole,
});

/// Moles per unit, for the molar flux family.
fn molar_flux_scale(unit: Unit) -> f64 {
    match unit {
        Unit::MicromolePerSquareMetreSecond => 1e-6,
        _ => 1.0,
    }
}

impl From<ThermodynamicTemperature> for Quantity {
    fn from(value: ThermodynamicTemperature) -> Self {
        Self::new(value.get::<kelvin>(), Unit::Kelvin)
    }
}

impl From<Pressure> for Quantity {
    fn from(value: Pressure) -> Self {
        Self::new(value.get::<pascal>(), Unit::Pascal)
    }
}

impl From<Length> for Quantity {
    fn from(value: Length) -> Self {
        Self::new(value.get::<meter>(), Unit::Metre)
    }
}

impl From<Velocity> for Quantity {
    fn from(value: Velocity) -> Self {
        Self::new(value.get::<meter_per_second>(), Unit::MetrePerSecond)
    }
}

impl From<HeatFluxDensity> for Quantity {
    fn from(value: HeatFluxDensity) -> Self {
        Self::new(
            value.get::<watt_per_square_meter>(),
            Unit::WattPerSquareMetre,
        )
    }
}

impl From<MolarEnergy> for Quantity {
    fn from(value: MolarEnergy) -> Self {
        Self::new(value.get::<joule_per_mole>(), Unit::JoulePerMole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn converts_within_family() {
        let t = Quantity::new(25.0, Unit::Celsius);
        assert_relative_eq!(t.value_in(Unit::Kelvin).unwrap(), 298.15, epsilon = 1e-9);

        let p = Quantity::new(21.27, Unit::Kilopascal);
        assert_relative_eq!(p.value_in(Unit::Pascal).unwrap(), 21_270.0, epsilon = 1e-9);

        let d = Quantity::new(4.0, Unit::Centimetre);
        assert_relative_eq!(d.value_in(Unit::Metre).unwrap(), 0.04, epsilon = 1e-12);

        let ea = Quantity::new(65.33, Unit::KilojoulePerMole);
        assert_relative_eq!(ea.value_in(Unit::JoulePerMole).unwrap(), 65_330.0, epsilon = 1e-9);

        let e = Quantity::new(5000.0, Unit::MicromolePerSquareMetreSecond);
        assert_relative_eq!(
            e.value_in(Unit::MolePerSquareMetreSecond).unwrap(),
            0.005,
            epsilon = 1e-15
        );
    }

    #[test]
    fn rejects_cross_family_conversion() {
        let t = Quantity::new(300.0, Unit::Kelvin);
        assert_eq!(
            t.convert(Unit::Pascal),
            Err(UnitError::Incompatible {
                from: Unit::Kelvin,
                to: Unit::Pascal,
            })
        );
    }

    #[test]
    fn symbols_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(unit.symbol().parse::<Unit>(), Ok(unit));
        }
        assert!(matches!("furlong".parse::<Unit>(), Err(UnitError::Unknown(_))));
    }

    #[test]
    fn builds_from_uom_quantities() {
        let t = Quantity::from(ThermodynamicTemperature::new::<degree_celsius>(20.0));
        assert_eq!(t.unit, Unit::Kelvin);
        assert_relative_eq!(t.value, 293.15, epsilon = 1e-9);

        let d = Quantity::from(Length::new::<millimeter>(50.0));
        assert_relative_eq!(d.value, 0.05, epsilon = 1e-12);
    }
}
