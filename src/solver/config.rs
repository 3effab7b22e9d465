use serde::{Deserialize, Serialize};

use crate::error::{RationError, Result};
use crate::solver::constants::*;

/// Tunable parameters of the projected-gradient search.
///
/// Every field defaults to the matching constant in [`crate::solver::constants`],
/// so a partial table in a formulation file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverConfig {
    pub restarts: usize,
    pub max_iterations: usize,
    pub penalty_weight: f64,
    pub feasibility_threshold: f64,
    pub convergence_threshold: f64,
    pub min_dwell_iterations: usize,
    pub initial_step: f64,
    pub step_decay: f64,
    pub min_step: f64,
    pub penalty_tie_tolerance: f64,
    pub cost_tie_tolerance: f64,
    pub projection_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            restarts: RESTART_COUNT,
            max_iterations: MAX_ITERATIONS,
            penalty_weight: PENALTY_WEIGHT,
            feasibility_threshold: FEASIBILITY_THRESHOLD,
            convergence_threshold: CONVERGENCE_THRESHOLD,
            min_dwell_iterations: MIN_DWELL_ITERATIONS,
            initial_step: INITIAL_STEP,
            step_decay: STEP_DECAY,
            min_step: MIN_STEP,
            penalty_tie_tolerance: PENALTY_TIE_TOLERANCE,
            cost_tie_tolerance: COST_TIE_TOLERANCE,
            projection_iterations: PROJECTION_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Decayed, floored step size for `iteration`.
    pub fn step_size(&self, iteration: usize) -> f64 {
        let decayed = self.initial_step * self.step_decay.powi(iteration as i32);
        decayed.max(self.min_step)
    }

    /// Whether a start may stop after `iteration` with the given violation.
    pub fn has_converged(&self, max_violation: f64, iteration: usize) -> bool {
        max_violation < self.convergence_threshold && iteration > self.min_dwell_iterations
    }

    /// Reject settings the search cannot run with.
    ///
    /// Weights, steps and iteration counts must be positive, the step decay
    /// must lie in (0, 1], and thresholds and tolerances must be finite and
    /// non-negative.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("restarts", self.restarts),
            ("maxIterations", self.max_iterations),
            ("projectionIterations", self.projection_iterations),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(invalid(name, "must be at least 1", value as f64));
            }
        }

        let positive = [
            ("penaltyWeight", self.penalty_weight),
            ("initialStep", self.initial_step),
            ("minStep", self.min_step),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(name, "must be positive", value));
            }
        }

        if !(self.step_decay > 0.0 && self.step_decay <= 1.0) {
            return Err(invalid("stepDecay", "must be in (0, 1]", self.step_decay));
        }

        let non_negative = [
            ("feasibilityThreshold", self.feasibility_threshold),
            ("convergenceThreshold", self.convergence_threshold),
            ("penaltyTieTolerance", self.penalty_tie_tolerance),
            ("costTieTolerance", self.cost_tie_tolerance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(name, "must be non-negative", value));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, rule: &str, value: f64) -> RationError {
    RationError::InvalidInput(format!("solver.{field} {rule}, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = SolverConfig::default();
        assert_eq!(config.restarts, 12);
        assert_eq!(config.max_iterations, 1200);
        assert_eq!(config.penalty_weight, 95.0);
        assert_eq!(config.feasibility_threshold, 0.0012);
        assert_eq!(config.projection_iterations, 90);
        assert_eq!(config.cost_tie_tolerance, 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nonsense() {
        let cases = [
            SolverConfig { penalty_weight: -5.0, ..SolverConfig::default() },
            SolverConfig { penalty_weight: f64::NAN, ..SolverConfig::default() },
            SolverConfig { step_decay: -1.0, ..SolverConfig::default() },
            SolverConfig { step_decay: 1.5, ..SolverConfig::default() },
            SolverConfig { initial_step: 0.0, ..SolverConfig::default() },
            SolverConfig { min_step: -0.01, ..SolverConfig::default() },
            SolverConfig { projection_iterations: 0, ..SolverConfig::default() },
            SolverConfig { max_iterations: 0, ..SolverConfig::default() },
            SolverConfig { restarts: 0, ..SolverConfig::default() },
            SolverConfig { feasibility_threshold: -0.1, ..SolverConfig::default() },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(RationError::InvalidInput(_))),
                "accepted {config:?}"
            );
        }
    }

    #[test]
    fn test_validate_names_field() {
        let config = SolverConfig { penalty_weight: -5.0, ..SolverConfig::default() };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: solver.penaltyWeight must be positive, got -5");
    }

    #[test]
    fn test_step_size_decays_to_floor() {
        let config = SolverConfig::default();
        assert!((config.step_size(0) - 0.12).abs() < 1e-15);
        assert!((config.step_size(1) - 0.12 * 0.998).abs() < 1e-15);
        assert!(config.step_size(100) < config.step_size(99));
        // 0.12 * 0.998^n falls below 0.009 after ~1294 steps.
        assert_eq!(config.step_size(5000), MIN_STEP);
    }

    #[test]
    fn test_has_converged_requires_dwell() {
        let config = SolverConfig::default();
        assert!(!config.has_converged(0.0, 260));
        assert!(config.has_converged(0.0, 261));
        assert!(!config.has_converged(0.0001, 500));
    }

    #[test]
    fn test_partial_override_from_json() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"restarts": 3, "penaltyWeight": 50.0}"#).unwrap();
        assert_eq!(config.restarts, 3);
        assert_eq!(config.penalty_weight, 50.0);
        assert_eq!(config.max_iterations, MAX_ITERATIONS);
    }
}
