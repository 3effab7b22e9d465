use crate::models::{
    Ingredient, NutrientAssessment, NutrientConstraint, OptimizationMode, RationAllocation,
    RationSolution, SolutionStatus,
};
use crate::solver::search::Candidate;

pub const FEASIBLE_LEAST_COST_MESSAGE: &str =
    "Feasible least-cost formula found. All enabled constraints are satisfied.";
pub const FEASIBLE_PROFIT_MESSAGE: &str =
    "Feasible profit-oriented formula found. All enabled constraints are satisfied.";
pub const APPROXIMATION_MESSAGE: &str =
    "No fully feasible solution under current limits. Showing best approximation.";

/// Turn the winning candidate into a [`RationSolution`].
///
/// One allocation per ingredient (zero shares included) and one assessment
/// per constraint, inactive ones included with no targets.
pub fn assemble(
    best: &Candidate,
    feasible: bool,
    ingredients: &[Ingredient],
    constraints: &[NutrientConstraint],
    mode: OptimizationMode,
) -> RationSolution {
    let allocations = ingredients
        .iter()
        .zip(&best.inclusions)
        .map(|(ingredient, &share)| RationAllocation {
            id: ingredient.id.clone(),
            name: ingredient.name.clone(),
            group: ingredient.group,
            inclusion_percent: share * 100.0,
            cost_contribution_per_kg: share * ingredient.price_per_kg,
        })
        .collect();

    let assessments = constraints
        .iter()
        .map(|constraint| NutrientAssessment {
            key: constraint.key,
            achieved: best.profile[constraint.key],
            min_target: constraint.min_bound(),
            max_target: constraint.max_bound(),
        })
        .collect();

    let (status, message, max_violation_percent) = if feasible {
        let message = match mode {
            OptimizationMode::LeastCost => FEASIBLE_LEAST_COST_MESSAGE,
            OptimizationMode::ProfitMax => FEASIBLE_PROFIT_MESSAGE,
        };
        (SolutionStatus::Feasible, message, 0.0)
    } else {
        (
            SolutionStatus::Approximation,
            APPROXIMATION_MESSAGE,
            best.max_violation * 100.0,
        )
    };

    RationSolution {
        status,
        message: message.to_string(),
        optimization_mode: mode,
        cost_per_kg: best.cost,
        objective_per_kg: best.linear_objective,
        max_violation_percent,
        allocations,
        assessments,
    }
}
