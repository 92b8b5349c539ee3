//! Core traits and types for leafopt.
//!
//! This crate defines the shared abstractions that solvers and the leaf
//! optimizer build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`EquationProblem`], [`MinimizationProblem`]: problem traits that adapt
//!   solver variables to model inputs and extract metrics from outputs

mod model;
mod observer;
mod problems;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problems::{EquationProblem, MinimizationProblem};
