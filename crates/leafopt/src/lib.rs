//! Leaf trait optimization.
//!
//! Finds the leaf traits (stomatal conductance, leaf size, and stomatal
//! ratio) that maximize net carbon gain for a leaf in a given environment.
//! Carbon gain is net photosynthesis less user-supplied costs of water loss
//! and upper-surface stomata.
//!
//! Each evaluation nests two root solves: leaf temperature from the energy
//! balance, then chloroplast CO2 from the balance of diffusive supply and
//! biochemical demand. The outer search runs a bounded local optimizer from
//! a grid of start points and refines the grid when nothing converges.
//!
//! # Modules
//!
//! - [`units`]: unit tags and conversions
//! - [`params`]: the parameter registry, groups, and flat numeric inputs
//! - [`physics`]: leaf energy balance and C3 photosynthesis
//!
//! # Example
//!
//! ```no_run
//! use leafopt::{
//!     CarbonCosts, Options, TraitSelection, optimize_leaf,
//!     params::{BakeParams, Constants, EnviroParams, LeafParams},
//! };
//!
//! let traits = TraitSelection::parse(["g_sc"])?;
//! let record = optimize_leaf(
//!     &traits,
//!     &CarbonCosts::new(0.001, 0.0),
//!     &BakeParams::default(),
//!     &Constants::default(),
//!     &EnviroParams::default(),
//!     &LeafParams::default(),
//!     &Options::default(),
//! )?;
//! println!("g_sc = {:?}", record.get("g_sc"));
//! # Ok::<(), leafopt::Error>(())
//! ```

mod assemble;
mod costs;
mod error;
mod event;
mod grid;
mod leaf;
mod multistart;
mod objective;
mod optimize;
mod options;
mod progress;
mod record;
mod refit;
mod root;
mod selection;

pub mod params;
pub mod physics;
pub mod units;

pub use costs::CarbonCosts;
pub use error::{Error, InputError, InternalError};
pub use event::{Action, Event};
pub use grid::{init_grid, interior_points};
pub use leaf::{LeafModel, LeafState, SolveError, solve_leaf};
pub use multistart::{Attempt, Convergence};
pub use objective::{CarbonBalance, ObjectiveError, carbon_balance, carbon_objective};
pub use optimize::{optimize_leaf, optimize_leaf_with};
pub use options::{Options, OptionsError};
pub use progress::ProgressLog;
pub use record::LeafRecord;
pub use refit::RefitState;
pub use root::{Root, find_root};
pub use selection::{Trait, TraitSelection};
