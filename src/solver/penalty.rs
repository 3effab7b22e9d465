use crate::models::{bound_scale, NutrientConstraint, NutrientProfile};

/// Squared-violation penalty and worst single violation of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PenaltyEvaluation {
    /// Sum of squared normalized deficits and excesses.
    pub penalty: f64,
    /// Largest normalized deficit or excess.
    pub max_violation: f64,
}

/// Normalized shortfall below the lower bound, zero when met.
#[inline]
pub fn normalized_deficit(achieved: f64, min_value: f64) -> f64 {
    ((min_value - achieved) / bound_scale(min_value)).max(0.0)
}

/// Normalized overshoot above the upper bound, zero when met.
#[inline]
pub fn normalized_excess(achieved: f64, max_value: f64) -> f64 {
    ((achieved - max_value) / bound_scale(max_value)).max(0.0)
}

/// Score `profile` against every active constraint.
///
/// Each violation is divided by its bound's magnitude (floored at 1) so that
/// energy in kcal/kg and selenium in mg/kg weigh comparably.
pub fn evaluate(profile: &NutrientProfile, constraints: &[NutrientConstraint]) -> PenaltyEvaluation {
    let mut eval = PenaltyEvaluation::default();

    for constraint in constraints.iter().filter(|c| c.is_active()) {
        let achieved = profile[constraint.key];

        if let Some(min) = constraint.min_bound() {
            let deficit = normalized_deficit(achieved, min);
            eval.penalty += deficit * deficit;
            eval.max_violation = eval.max_violation.max(deficit);
        }

        if let Some(max) = constraint.max_bound() {
            let excess = normalized_excess(achieved, max);
            eval.penalty += excess * excess;
            eval.max_violation = eval.max_violation.max(excess);
        }
    }

    eval
}
