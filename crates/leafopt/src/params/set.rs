use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::units::Quantity;

use super::ParamError;

/// An ordered mapping from parameter name to [`Quantity`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, Quantity>);

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a quantity, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, quantity: Quantity) -> Option<Quantity> {
        self.0.insert(name.into(), quantity)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Quantity> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Unions several sets into one.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Duplicate`] if a name appears in more than one set.
    pub fn merge<'a>(sets: impl IntoIterator<Item = &'a ParameterSet>) -> Result<Self, ParamError> {
        let mut merged = BTreeMap::new();
        for set in sets {
            for (name, quantity) in set {
                if merged.insert(name.clone(), *quantity).is_some() {
                    return Err(ParamError::Duplicate(name.clone()));
                }
            }
        }
        Ok(Self(merged))
    }

    /// Drops the units, keeping the magnitudes as given.
    #[must_use]
    pub fn magnitudes(&self) -> BTreeMap<String, f64> {
        self.0
            .iter()
            .map(|(name, quantity)| (name.clone(), quantity.value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a Quantity);
    type IntoIter = btree_map::Iter<'a, String, Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, Quantity);
    type IntoIter = btree_map::IntoIter<String, Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Quantity)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (S, Quantity)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::units::Unit;

    #[test]
    fn merge_unions_disjoint_sets() {
        let a: ParameterSet = [("T_air", Quantity::new(300.0, Unit::Kelvin))]
            .into_iter()
            .collect();
        let b: ParameterSet = [("g_sc", Quantity::new(4.0, Unit::MicromolePerSquareMetreSecondPascal))]
            .into_iter()
            .collect();

        let merged = ParameterSet::merge([&a, &b]).expect("disjoint sets");
        assert_eq!(merged.names().collect::<Vec<_>>(), ["T_air", "g_sc"]);
    }

    #[test]
    fn merge_rejects_duplicates() {
        let a: ParameterSet = [("T_air", Quantity::new(300.0, Unit::Kelvin))]
            .into_iter()
            .collect();
        let b: ParameterSet = [("T_air", Quantity::new(25.0, Unit::Celsius))]
            .into_iter()
            .collect();

        assert_eq!(
            ParameterSet::merge([&a, &b]),
            Err(ParamError::Duplicate("T_air".into()))
        );
    }
}
