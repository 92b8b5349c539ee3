//! Numerical solvers for leafopt.
//!
//! - [`equation`]: root finding for [`EquationProblem`]s
//! - [`optimization`]: bounded local minimization for [`MinimizationProblem`]s
//!
//! [`EquationProblem`]: leafopt_core::EquationProblem
//! [`MinimizationProblem`]: leafopt_core::MinimizationProblem

pub mod equation;
pub mod optimization;
