use crate::solver::constants::{
    BOUND_EPSILON, PROJECTION_ITERATIONS, PROJECTION_RESIDUAL, REACHABILITY_EPSILON, TARGET_SUM,
};

/// Per-ingredient inclusion bounds, as fractions of the mix.
#[derive(Debug, Clone, PartialEq)]
pub struct InclusionBounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl InclusionBounds {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        debug_assert_eq!(lower.len(), upper.len());
        Self { lower, upper }
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn lower_total(&self) -> f64 {
        self.lower.iter().sum()
    }

    pub fn upper_total(&self) -> f64 {
        self.upper.iter().sum()
    }

    /// Component-wise midpoint of the bounds.
    pub fn midpoint(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| (lo + hi) / 2.0)
            .collect()
    }

    /// Whether `target_sum` lies between the bound totals.
    pub fn can_reach(&self, target_sum: f64) -> bool {
        self.lower_total() <= target_sum + REACHABILITY_EPSILON
            && self.upper_total() >= target_sum - REACHABILITY_EPSILON
    }

    /// Component-wise clamp of `values` into the bounds.
    pub fn clamp(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| clamp(v, self.lower[i], self.upper[i]))
            .collect()
    }

    /// Euclidean projection of `values` onto the bounded simplex with sum 1.
    pub fn project(&self, values: &[f64]) -> Vec<f64> {
        project_to_bounded_simplex(values, self, TARGET_SUM, PROJECTION_ITERATIONS)
    }
}

#[inline]
fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

fn shifted_sum(values: &[f64], bounds: &InclusionBounds, theta: f64) -> f64 {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| clamp(v - theta, bounds.lower[i], bounds.upper[i]))
        .sum()
}

/// Project `values` onto `{x : lower <= x <= upper, sum(x) = target_sum}`.
///
/// Bisects on a shared shift `theta` so that `sum(clamp(v - theta)) = target_sum`,
/// then spreads any leftover sum error over the components not pinned at a
/// bound. When the target sum is unreachable the plain clamp is returned.
pub fn project_to_bounded_simplex(
    values: &[f64],
    bounds: &InclusionBounds,
    target_sum: f64,
    iterations: usize,
) -> Vec<f64> {
    if !bounds.can_reach(target_sum) {
        return bounds.clamp(values);
    }

    // At `low` every component sits at its upper bound, at `high` at its lower.
    let mut low = values
        .iter()
        .zip(&bounds.upper)
        .map(|(v, hi)| v - hi)
        .fold(f64::INFINITY, f64::min);
    let mut high = values
        .iter()
        .zip(&bounds.lower)
        .map(|(v, lo)| v - lo)
        .fold(f64::NEG_INFINITY, f64::max);

    for _ in 0..iterations {
        let mid = (low + high) / 2.0;
        if shifted_sum(values, bounds, mid) > target_sum {
            low = mid;
        } else {
            high = mid;
        }
    }

    let theta = (low + high) / 2.0;
    let mut projected: Vec<f64> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| clamp(v - theta, bounds.lower[i], bounds.upper[i]))
        .collect();

    redistribute_residual(&mut projected, bounds, target_sum);
    projected
}

/// Spread `target_sum - sum(x)` evenly over components with room to move.
fn redistribute_residual(projected: &mut [f64], bounds: &InclusionBounds, target_sum: f64) {
    let mut difference = target_sum - projected.iter().sum::<f64>();

    for _ in 0..projected.len() * 2 {
        if difference.abs() <= PROJECTION_RESIDUAL {
            break;
        }

        let adjustable: Vec<usize> = (0..projected.len())
            .filter(|&i| {
                if difference > 0.0 {
                    projected[i] < bounds.upper[i] - BOUND_EPSILON
                } else {
                    projected[i] > bounds.lower[i] + BOUND_EPSILON
                }
            })
            .collect();

        if adjustable.is_empty() {
            break;
        }

        let share = difference / adjustable.len() as f64;
        let mut moved = 0.0;
        for i in adjustable {
            let current = projected[i];
            projected[i] = clamp(current + share, bounds.lower[i], bounds.upper[i]);
            moved += projected[i] - current;
        }
        difference -= moved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_bounds(n: usize) -> InclusionBounds {
        InclusionBounds::new(vec![0.0; n], vec![1.0; n])
    }

    #[test]
    fn test_uniform_shift_inside_bounds() {
        let bounds = unit_bounds(2);
        let x = bounds.project(&[0.38, 0.14]);
        assert!((x[0] - 0.62).abs() < 1e-9);
        assert!((x[1] - 0.38).abs() < 1e-9);
    }

    #[test]
    fn test_pins_to_bounds() {
        let bounds = unit_bounds(2);
        let x = bounds.project(&[1.124, 3.572]);
        assert!(x[0].abs() < 1e-9);
        assert!((x[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_respects_tight_bounds() {
        let bounds = InclusionBounds::new(vec![0.1, 0.2, 0.0], vec![0.5, 0.3, 0.6]);
        let x = bounds.project(&[5.0, -3.0, 0.2]);
        for i in 0..3 {
            assert!(x[i] >= bounds.lower[i] - 1e-12);
            assert!(x[i] <= bounds.upper[i] + 1e-12);
        }
        assert!((x.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        // The overweight component takes everything it can.
        assert!((x[0] - 0.5).abs() < 1e-9);
        assert!((x[1] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_bounds() {
        let bounds = InclusionBounds::new(vec![1.0, 0.0], vec![1.0, 0.0]);
        let x = bounds.project(&[0.3, 0.9]);
        assert_eq!(x, vec![1.0, 0.0]);
    }

    #[test]
    fn test_feasible_point_unchanged() {
        let bounds = InclusionBounds::new(vec![0.0, 0.1, 0.0], vec![0.7, 0.5, 0.4]);
        let x = bounds.project(&[0.45, 0.25, 0.30]);
        assert!((x[0] - 0.45).abs() < 1e-9);
        assert!((x[1] - 0.25).abs() < 1e-9);
        assert!((x[2] - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_unreachable_target_falls_back_to_clamp() {
        let bounds = InclusionBounds::new(vec![0.6, 0.6], vec![0.8, 0.8]);
        let x = bounds.project(&[0.1, 0.9]);
        assert_eq!(x, vec![0.6, 0.8]);
    }

    #[test]
    fn test_midpoint() {
        let bounds = InclusionBounds::new(vec![0.0, 0.2], vec![1.0, 0.4]);
        let mid = bounds.midpoint();
        assert!((mid[0] - 0.5).abs() < 1e-12);
        assert!((mid[1] - 0.3).abs() < 1e-12);
    }
}
