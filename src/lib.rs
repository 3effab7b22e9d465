pub mod analysis;
pub mod cli;
pub mod error;
pub mod generation;
pub mod interface;
pub mod models;
pub mod solver;
pub mod state;

pub use error::{RationError, Result};
pub use models::{Ingredient, NutrientConstraint, NutrientKey, OptimizationMode, RationSolution};
pub use solver::{solve, solve_seeded, solve_with_config, SolverConfig};
