use serde::{Deserialize, Serialize};

use crate::models::nutrient::NutrientKey;

/// Soft lower and/or upper bound on one nutrient of the finished mix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientConstraint {
    pub key: NutrientKey,

    #[serde(default)]
    pub use_min: bool,

    #[serde(default)]
    pub min_value: f64,

    #[serde(default)]
    pub use_max: bool,

    #[serde(default)]
    pub max_value: f64,
}

impl NutrientConstraint {
    /// Constraint with both bounds disabled.
    pub fn inactive(key: NutrientKey) -> Self {
        Self {
            key,
            use_min: false,
            min_value: 0.0,
            use_max: false,
            max_value: 0.0,
        }
    }

    pub fn at_least(key: NutrientKey, min_value: f64) -> Self {
        Self {
            use_min: true,
            min_value,
            ..Self::inactive(key)
        }
    }

    pub fn at_most(key: NutrientKey, max_value: f64) -> Self {
        Self {
            use_max: true,
            max_value,
            ..Self::inactive(key)
        }
    }

    pub fn between(key: NutrientKey, min_value: f64, max_value: f64) -> Self {
        Self {
            key,
            use_min: true,
            min_value,
            use_max: true,
            max_value,
        }
    }

    /// Lower bound, if enabled and finite.
    pub fn min_bound(&self) -> Option<f64> {
        (self.use_min && self.min_value.is_finite()).then_some(self.min_value)
    }

    /// Upper bound, if enabled and finite.
    pub fn max_bound(&self) -> Option<f64> {
        (self.use_max && self.max_value.is_finite()).then_some(self.max_value)
    }

    pub fn is_active(&self) -> bool {
        self.min_bound().is_some() || self.max_bound().is_some()
    }

    /// Both bounds enabled with min above max.
    pub fn is_inverted(&self) -> bool {
        matches!((self.min_bound(), self.max_bound()), (Some(lo), Some(hi)) if lo > hi)
    }
}

/// Normalization scale for a bound: its own magnitude, floored at 1.
#[inline]
pub fn bound_scale(bound: f64) -> f64 {
    bound.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(!NutrientConstraint::inactive(NutrientKey::Zinc).is_active());
        assert!(NutrientConstraint::at_least(NutrientKey::Zinc, 22.0).is_active());
        assert!(NutrientConstraint::at_most(NutrientKey::Sodium, 0.24).is_active());
    }

    #[test]
    fn test_non_finite_bound_is_ignored() {
        let c = NutrientConstraint::at_least(NutrientKey::Lysine, f64::NAN);
        assert_eq!(c.min_bound(), None);
        assert!(!c.is_active());
    }

    #[test]
    fn test_is_inverted() {
        assert!(NutrientConstraint::between(NutrientKey::Calcium, 1.2, 1.0).is_inverted());
        assert!(!NutrientConstraint::between(NutrientKey::Calcium, 1.0, 1.2).is_inverted());
        assert!(!NutrientConstraint::between(NutrientKey::Calcium, 1.0, 1.0).is_inverted());

        let mut only_min = NutrientConstraint::between(NutrientKey::Calcium, 1.2, 1.0);
        only_min.use_max = false;
        assert!(!only_min.is_inverted());
    }

    #[test]
    fn test_bound_scale() {
        assert_eq!(bound_scale(3200.0), 3200.0);
        assert_eq!(bound_scale(-4.0), 4.0);
        assert_eq!(bound_scale(0.1), 1.0);
    }
}
