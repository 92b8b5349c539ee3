use serde::{Deserialize, Serialize};

use crate::units::Quantity;

use super::{Namespace, ParamError, ParameterSet};

/// Generates a validated wrapper around a [`ParameterSet`] for one namespace.
macro_rules! param_group {
    ($(#[$meta:meta])* $name:ident => $namespace:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(try_from = "ParameterSet", into = "ParameterSet")]
        pub struct $name(ParameterSet);

        impl $name {
            pub const NAMESPACE: Namespace = $namespace;

            /// Creates a group, rejecting foreign names and unit families.
            ///
            /// # Errors
            ///
            /// Returns an error if a name is not registered in this namespace
            /// or its unit cannot be converted to the canonical unit.
            pub fn new(set: ParameterSet) -> Result<Self, ParamError> {
                for (name, quantity) in &set {
                    validate(Self::NAMESPACE, name, quantity)?;
                }
                Ok(Self(set))
            }

            /// Sets one parameter.
            ///
            /// # Errors
            ///
            /// Returns an error if the name or unit does not fit this namespace.
            pub fn set(&mut self, name: &str, quantity: Quantity) -> Result<(), ParamError> {
                validate(Self::NAMESPACE, name, &quantity)?;
                self.0.insert(name, quantity);
                Ok(())
            }

            /// Returns the group with one parameter replaced.
            ///
            /// # Errors
            ///
            /// Returns an error if the name or unit does not fit this namespace.
            pub fn with(mut self, name: &str, quantity: Quantity) -> Result<Self, ParamError> {
                self.set(name, quantity)?;
                Ok(self)
            }

            /// Overrides parameters from another set.
            ///
            /// # Errors
            ///
            /// Returns an error on the first name or unit that does not fit.
            pub fn extend(&mut self, overrides: ParameterSet) -> Result<(), ParamError> {
                for (name, quantity) in overrides {
                    self.set(&name, quantity)?;
                }
                Ok(())
            }

            #[must_use]
            pub fn get(&self, name: &str) -> Option<&Quantity> {
                self.0.get(name)
            }

            #[must_use]
            pub fn as_set(&self) -> &ParameterSet {
                &self.0
            }

            /// Returns the group tagged with canonical units.
            ///
            /// With `set_units` each quantity is converted; without it the
            /// magnitudes are taken as already canonical.
            ///
            /// # Errors
            ///
            /// Returns an error if a conversion fails.
            pub fn canonical(&self, set_units: bool) -> Result<ParameterSet, ParamError> {
                canonical(Self::NAMESPACE, &self.0, set_units)
            }
        }

        impl Default for $name {
            /// Every registered parameter at its default value.
            fn default() -> Self {
                Self(
                    Self::NAMESPACE
                        .defs()
                        .iter()
                        .map(|def| (def.name, Quantity::new(def.default, def.unit)))
                        .collect(),
                )
            }
        }

        impl TryFrom<ParameterSet> for $name {
            type Error = ParamError;

            fn try_from(set: ParameterSet) -> Result<Self, Self::Error> {
                Self::new(set)
            }
        }

        impl From<$name> for ParameterSet {
            fn from(group: $name) -> Self {
                group.0
            }
        }
    };
}

param_group!(
    /// Leaf traits and leaf-level photosynthetic parameters.
    LeafParams => Namespace::Leaf
);

param_group!(
    /// Environmental conditions around the leaf.
    EnviroParams => Namespace::Enviro
);

param_group!(
    /// Physical constants.
    Constants => Namespace::Constants
);

param_group!(
    /// Temperature-response parameters used to "bake" rates at leaf temperature.
    BakeParams => Namespace::Bake
);

fn validate(namespace: Namespace, name: &str, quantity: &Quantity) -> Result<(), ParamError> {
    let def = namespace.find(name).ok_or_else(|| ParamError::Unknown {
        name: name.to_owned(),
        namespace: namespace.label(),
    })?;
    if !quantity.unit.is_compatible(def.unit) {
        return Err(ParamError::IncompatibleUnit {
            name: name.to_owned(),
            expected: def.unit,
            found: quantity.unit,
        });
    }
    Ok(())
}

fn canonical(
    namespace: Namespace,
    set: &ParameterSet,
    set_units: bool,
) -> Result<ParameterSet, ParamError> {
    let mut out = ParameterSet::new();
    for (name, quantity) in set {
        let def = namespace.find(name).ok_or_else(|| ParamError::Unknown {
            name: name.clone(),
            namespace: namespace.label(),
        })?;
        let value = if set_units {
            quantity
                .value_in(def.unit)
                .map_err(|_| ParamError::IncompatibleUnit {
                    name: name.clone(),
                    expected: def.unit,
                    found: quantity.unit,
                })?
        } else {
            quantity.value
        };
        out.insert(name.clone(), Quantity::new(value, def.unit));
    }
    Ok(out)
}

/// Checks canonical values against their registered ranges.
///
/// # Errors
///
/// Returns the first non-finite or out-of-range value.
pub(crate) fn check_ranges(set: &ParameterSet) -> Result<(), ParamError> {
    for (name, quantity) in set {
        let value = quantity.value;
        if !value.is_finite() {
            return Err(ParamError::NonFinite(name.clone()));
        }
        if let Some((_, def)) = super::lookup(name)
            && !(def.min..=def.max).contains(&value)
        {
            return Err(ParamError::OutOfRange {
                name: name.clone(),
                value,
                min: def.min,
                max: def.max,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::units::Unit;

    #[test]
    fn defaults_cover_registry() {
        let leaf = LeafParams::default();
        assert_eq!(leaf.as_set().len(), Namespace::Leaf.defs().len());
        assert_eq!(
            leaf.get("g_sc"),
            Some(&Quantity::new(4.0, Unit::MicromolePerSquareMetreSecondPascal))
        );
    }

    #[test]
    fn rejects_foreign_names_and_units() {
        let mut enviro = EnviroParams::default();
        assert!(matches!(
            enviro.set("g_sc", Quantity::new(1.0, Unit::MicromolePerSquareMetreSecondPascal)),
            Err(ParamError::Unknown { .. })
        ));
        assert!(matches!(
            enviro.set("T_air", Quantity::new(1.0, Unit::Pascal)),
            Err(ParamError::IncompatibleUnit { .. })
        ));
        assert!(enviro.set("T_air", Quantity::new(20.0, Unit::Celsius)).is_ok());
    }

    #[test]
    fn canonical_converts_or_retags() {
        let enviro = EnviroParams::default()
            .with("T_air", Quantity::new(20.0, Unit::Celsius))
            .expect("valid");

        let converted = enviro.canonical(true).expect("convertible");
        let t_air = converted.get("T_air").expect("present");
        assert_eq!(t_air.unit, Unit::Kelvin);
        assert_relative_eq!(t_air.value, 293.15, epsilon = 1e-9);

        let retagged = enviro.canonical(false).expect("no conversion");
        assert_eq!(retagged.get("T_air"), Some(&Quantity::new(20.0, Unit::Kelvin)));
    }

    #[test]
    fn range_check_flags_bad_values() {
        let leaf = LeafParams::default()
            .with("g_sc", Quantity::new(12.0, Unit::MicromolePerSquareMetreSecondPascal))
            .expect("valid");
        let set = leaf.canonical(true).expect("convertible");
        assert!(matches!(
            check_ranges(&set),
            Err(ParamError::OutOfRange { ref name, .. }) if name == "g_sc"
        ));

        let leaf = LeafParams::default()
            .with("abs_s", Quantity::new(f64::NAN, Unit::Dimensionless))
            .expect("valid");
        let set = leaf.canonical(true).expect("convertible");
        assert_eq!(check_ranges(&set), Err(ParamError::NonFinite("abs_s".into())));
    }
}
