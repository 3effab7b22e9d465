pub mod assemble;
pub mod config;
pub mod constants;
pub mod objective;
pub mod penalty;
pub mod projection;
pub mod search;
pub mod validation;

use std::borrow::Cow;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::error::RationError;
use crate::models::{Ingredient, NutrientConstraint, OptimizationMode, RationSolution};

pub use config::SolverConfig;
pub use constants::*;
pub use objective::{objective_coefficients, profit_potential};
pub use penalty::{evaluate as evaluate_penalty, PenaltyEvaluation};
pub use projection::{project_to_bounded_simplex, InclusionBounds};
pub use search::{Candidate, CandidateTracker, SearchProblem};
pub use validation::validate;

/// Solve a ration with the default search settings.
///
/// Never fails: rejected inputs and failed searches come back as an
/// approximation with an explanatory message and no allocations.
pub fn solve<R: Rng + ?Sized>(
    ingredients: &[Ingredient],
    constraints: &[NutrientConstraint],
    mode: OptimizationMode,
    profit_weight: f64,
    rng: &mut R,
) -> RationSolution {
    solve_with_config(ingredients, constraints, mode, profit_weight, &SolverConfig::default(), rng)
}

/// [`solve`] with a generator seeded from `seed`.
pub fn solve_seeded(
    ingredients: &[Ingredient],
    constraints: &[NutrientConstraint],
    mode: OptimizationMode,
    profit_weight: f64,
    seed: u64,
) -> RationSolution {
    let mut rng = StdRng::seed_from_u64(seed);
    solve(ingredients, constraints, mode, profit_weight, &mut rng)
}

/// Solve a ration with explicit search settings.
pub fn solve_with_config<R: Rng + ?Sized>(
    ingredients: &[Ingredient],
    constraints: &[NutrientConstraint],
    mode: OptimizationMode,
    profit_weight: f64,
    config: &SolverConfig,
    rng: &mut R,
) -> RationSolution {
    let bounds = match validate(ingredients, constraints) {
        Ok(bounds) => bounds,
        Err(e) => return RationSolution::empty(e.to_string()),
    };

    let ingredients = sanitize(ingredients);
    let coefficients = objective_coefficients(&ingredients, mode, profit_weight);
    let problem = SearchProblem::new(&ingredients, constraints, &bounds, coefficients, config);

    let Some((best, feasible)) = problem.run(rng).into_best() else {
        warn!("search produced no candidate");
        return RationSolution::empty(RationError::OptimizationFailed.to_string());
    };

    info!(
        mode = mode.label(),
        feasible,
        cost_per_kg = best.cost,
        max_violation = best.max_violation,
        "ration solved"
    );

    assemble::assemble(&best, feasible, &ingredients, constraints, mode)
}

/// Replace non-finite prices and nutrient values with zero.
fn sanitize(ingredients: &[Ingredient]) -> Cow<'_, [Ingredient]> {
    if ingredients.iter().all(Ingredient::has_finite_data) {
        return Cow::Borrowed(ingredients);
    }

    for ingredient in ingredients.iter().filter(|ing| !ing.has_finite_data()) {
        warn!(ingredient = %ingredient.name, "non-finite price or nutrient data treated as zero");
    }
    Cow::Owned(ingredients.iter().map(Ingredient::sanitized).collect())
}
