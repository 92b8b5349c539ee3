//! Which traits are optimized.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::InputError;

/// An optimizable leaf trait, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Trait {
    /// Stomatal conductance to CO2, `g_sc`.
    Conductance,
    /// Characteristic leaf dimension, `leafsize`.
    LeafSize,
    /// Logit of the stomatal ratio, `logit_sr`.
    LogitStomatalRatio,
}

impl Trait {
    pub const ALL: [Trait; 3] = [
        Trait::Conductance,
        Trait::LeafSize,
        Trait::LogitStomatalRatio,
    ];

    /// Returns the parameter name of the trait.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Trait::Conductance => "g_sc",
            Trait::LeafSize => "leafsize",
            Trait::LogitStomatalRatio => "logit_sr",
        }
    }

    /// Returns the search bounds in canonical units.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Trait::Conductance => (0.0, 10.0),
            Trait::LeafSize => (0.0005, 0.4),
            Trait::LogitStomatalRatio => (-10.0, 10.0),
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a trait name, accepting any unique prefix.
impl FromStr for Trait {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(exact) = Trait::ALL.into_iter().find(|t| t.name() == s) {
            return Ok(exact);
        }

        let matches: Vec<Trait> = Trait::ALL
            .into_iter()
            .filter(|t| t.name().starts_with(s))
            .collect();
        match matches.as_slice() {
            [only] => Ok(*only),
            [] => Err(InputError::UnknownTrait(s.to_owned())),
            _ => Err(InputError::AmbiguousTrait {
                name: s.to_owned(),
                candidates: matches.iter().map(|t| t.name()).collect(),
            }),
        }
    }
}

impl TryFrom<String> for Trait {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Trait> for &'static str {
    fn from(t: Trait) -> Self {
        t.name()
    }
}

/// Zero to three distinct traits, always held in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Trait>", into = "Vec<Trait>")]
pub struct TraitSelection(Vec<Trait>);

impl TraitSelection {
    /// Builds a selection from traits in any order.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::DuplicateTrait`] if a trait repeats.
    pub fn new(traits: impl IntoIterator<Item = Trait>) -> Result<Self, InputError> {
        let mut traits: Vec<Trait> = traits.into_iter().collect();
        traits.sort_unstable();
        if let Some(pair) = traits.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(InputError::DuplicateTrait(pair[0]));
        }
        Ok(Self(traits))
    }

    /// Parses trait names, accepting unique prefixes.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown, ambiguous, or repeated names.
    pub fn parse<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Result<Self, InputError> {
        let traits = names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<Trait>, _>>()?;
        Self::new(traits)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Trait] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Trait> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<Vec<Trait>> for TraitSelection {
    type Error = InputError;

    fn try_from(traits: Vec<Trait>) -> Result<Self, Self::Error> {
        Self::new(traits)
    }
}

impl From<TraitSelection> for Vec<Trait> {
    fn from(selection: TraitSelection) -> Self {
        selection.0
    }
}
