/// Mix total every inclusion vector is projected onto (100% of the mass).
pub const TARGET_SUM: f64 = 1.0;

/// Default weight of the nutrient-value proxy in profit mode.
pub const DEFAULT_PROFIT_WEIGHT: f64 = 0.16;

// ─────────────────────────────────────────────────────────────────────────────
// Search schedule
// ─────────────────────────────────────────────────────────────────────────────

/// Independent starts per solve (start 0 is the bound midpoint).
pub const RESTART_COUNT: usize = 12;

/// Gradient steps per start.
pub const MAX_ITERATIONS: usize = 1200;

/// Multiplier applied to the squared-violation penalty in the objective.
pub const PENALTY_WEIGHT: f64 = 95.0;

/// Step size at iteration 0.
pub const INITIAL_STEP: f64 = 0.12;

/// Geometric decay of the step size per iteration.
pub const STEP_DECAY: f64 = 0.998;

/// Floor for the decayed step size.
pub const MIN_STEP: f64 = 0.009;

// ─────────────────────────────────────────────────────────────────────────────
// Acceptance thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Largest normalized violation still counted as feasible.
pub const FEASIBILITY_THRESHOLD: f64 = 0.0012;

/// A start stops early once its violation drops below this...
pub const CONVERGENCE_THRESHOLD: f64 = 0.0001;

/// ...and it has run more than this many iterations.
pub const MIN_DWELL_ITERATIONS: usize = 260;

/// Penalties closer than this are compared by objective instead.
pub const PENALTY_TIE_TOLERANCE: f64 = 1e-9;

/// Feasible costs closer than this are compared by linear objective instead.
pub const COST_TIE_TOLERANCE: f64 = 1e-9;

// ─────────────────────────────────────────────────────────────────────────────
// Validation and projection
// ─────────────────────────────────────────────────────────────────────────────

/// Slack allowed on the sum of lower bounds (must stay at or below 1 + slack).
pub const MIN_TOTAL_LIMIT: f64 = 1.00001;

/// Slack allowed on the sum of upper bounds (must stay at or above 1 - slack).
pub const MAX_TOTAL_LIMIT: f64 = 0.99999;

/// Bisection rounds on the projection shift.
pub const PROJECTION_ITERATIONS: usize = 90;

/// Residual sum error left alone after projection.
pub const PROJECTION_RESIDUAL: f64 = 1e-10;

/// Margin for deciding whether a component is pinned at a bound.
pub const BOUND_EPSILON: f64 = 1e-12;

/// Slack on reachability of the target sum before projection falls back to clamping.
pub const REACHABILITY_EPSILON: f64 = 1e-9;
