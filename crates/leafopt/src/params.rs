//! Named, unit-tagged parameters.
//!
//! Parameters live in four namespaces (leaf, environment, physical constants
//! and temperature response). Each namespace has a fixed registry of names
//! with a canonical unit, default, and plausible range, and a validated group
//! type wrapping a [`ParameterSet`]. Groups are merged into one flat numeric
//! mapping only at the boundary of the numeric core.

mod groups;
mod inputs;
mod registry;
mod set;

pub use groups::{BakeParams, Constants, EnviroParams, LeafParams};
pub(crate) use groups::check_ranges;
pub use inputs::Inputs;
pub use registry::{Namespace, ParamDef, lookup};
pub use set::ParameterSet;

use thiserror::Error;

use crate::units::Unit;

/// Errors raised while validating or merging parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("missing parameter `{0}`")]
    Missing(String),

    #[error("parameter `{0}` is given more than once")]
    Duplicate(String),

    #[error("`{name}` is not a {namespace} parameter")]
    Unknown {
        name: String,
        namespace: &'static str,
    },

    #[error("`{name}` expects a unit compatible with {expected}, found {found}")]
    IncompatibleUnit {
        name: String,
        expected: Unit,
        found: Unit,
    },

    #[error("`{0}` is not finite")]
    NonFinite(String),

    #[error("`{name}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}
