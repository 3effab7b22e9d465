use tracing::warn;

use crate::error::{RationError, Result};
use crate::models::{Ingredient, NutrientConstraint};
use crate::solver::constants::{MAX_TOTAL_LIMIT, MIN_TOTAL_LIMIT};
use crate::solver::projection::InclusionBounds;

/// Check the inputs of a solve and derive the inclusion bounds.
///
/// Rejections are checked in a fixed order: empty ingredient list, inverted
/// nutrient constraint, invalid ingredient limits, minimums above 100%,
/// maximums below 100%.
pub fn validate(
    ingredients: &[Ingredient],
    constraints: &[NutrientConstraint],
) -> Result<InclusionBounds> {
    let result = check(ingredients, constraints);
    if let Err(ref e) = result {
        warn!(ingredients = ingredients.len(), "rejected ration inputs: {e}");
    }
    result
}

fn check(ingredients: &[Ingredient], constraints: &[NutrientConstraint]) -> Result<InclusionBounds> {
    if ingredients.is_empty() {
        return Err(RationError::NoIngredients);
    }

    if constraints.iter().any(NutrientConstraint::is_inverted) {
        return Err(RationError::ConstraintMinAboveMax);
    }

    let has_bad_limits = ingredients.iter().any(|ing| {
        !ing.min_percent.is_finite()
            || !ing.max_percent.is_finite()
            || ing.lower_bound() > ing.upper_bound()
    });
    if has_bad_limits {
        return Err(RationError::InvalidInclusionLimits);
    }

    let bounds = InclusionBounds::new(
        ingredients.iter().map(Ingredient::lower_bound).collect(),
        ingredients.iter().map(Ingredient::upper_bound).collect(),
    );

    if bounds.lower_total() > MIN_TOTAL_LIMIT {
        return Err(RationError::MinimumsExceedTotal);
    }

    if bounds.upper_total() < MAX_TOTAL_LIMIT {
        return Err(RationError::MaximumsBelowTotal);
    }

    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientKey;

    fn ingredient(id: &str, min: f64, max: f64) -> Ingredient {
        Ingredient::new(id, id, 1.0).with_limits(min, max)
    }

    #[test]
    fn test_empty_ingredients() {
        let err = validate(&[], &[]).unwrap_err();
        assert!(matches!(err, RationError::NoIngredients));
        assert_eq!(err.to_string(), "No ingredients available for optimization.");
    }

    #[test]
    fn test_inverted_constraint() {
        let constraints = [NutrientConstraint::between(NutrientKey::Calcium, 1.2, 1.0)];
        let err = validate(&[ingredient("a", 0.0, 100.0)], &constraints).unwrap_err();
        assert!(matches!(err, RationError::ConstraintMinAboveMax));
        assert!(err.to_string().ends_with("Min greater than Max."));
    }

    #[test]
    fn test_invalid_limits() {
        let err = validate(&[ingredient("a", 50.0, 40.0), ingredient("b", 0.0, 100.0)], &[])
            .unwrap_err();
        assert!(matches!(err, RationError::InvalidInclusionLimits));

        let err = validate(&[ingredient("a", f64::NAN, 40.0), ingredient("b", 0.0, 100.0)], &[])
            .unwrap_err();
        assert!(matches!(err, RationError::InvalidInclusionLimits));
    }

    #[test]
    fn test_minimums_exceed_total() {
        let err = validate(&[ingredient("a", 60.0, 60.0), ingredient("b", 60.0, 60.0)], &[])
            .unwrap_err();
        assert!(matches!(err, RationError::MinimumsExceedTotal));
        assert!(err.to_string().ends_with("minimum inclusions exceed 100%."));
    }

    #[test]
    fn test_maximums_below_total() {
        let err = validate(&[ingredient("a", 0.0, 40.0), ingredient("b", 0.0, 40.0)], &[])
            .unwrap_err();
        assert!(matches!(err, RationError::MaximumsBelowTotal));
        assert!(err.to_string().ends_with("maximum inclusions are below 100%."));
    }

    #[test]
    fn test_constraint_checked_before_limits() {
        let constraints = [NutrientConstraint::between(NutrientKey::Calcium, 2.0, 1.0)];
        let err = validate(&[ingredient("a", 60.0, 60.0), ingredient("b", 60.0, 60.0)], &constraints)
            .unwrap_err();
        assert!(matches!(err, RationError::ConstraintMinAboveMax));
    }

    #[test]
    fn test_valid_inputs_yield_bounds() {
        let bounds = validate(&[ingredient("a", 10.0, 70.0), ingredient("b", 0.0, 100.0)], &[])
            .unwrap();
        assert_eq!(bounds.len(), 2);
        assert!((bounds.lower[0] - 0.1).abs() < 1e-12);
        assert!((bounds.upper[0] - 0.7).abs() < 1e-12);
        assert_eq!(bounds.upper[1], 1.0);
    }

    #[test]
    fn test_totals_within_slack_accepted() {
        // 100.0005% of minimums is still accepted.
        let ok = validate(&[ingredient("a", 50.0005, 100.0), ingredient("b", 50.0, 100.0)], &[]);
        assert!(ok.is_ok());
    }
}
