use proptest::prelude::*;

use poultry_ration_rs::solver::{project_to_bounded_simplex, InclusionBounds, PROJECTION_ITERATIONS};

/// Reachable bounds plus an arbitrary point of the same length.
fn bounds_and_point() -> impl Strategy<Value = (InclusionBounds, Vec<f64>)> {
    (2usize..7).prop_flat_map(|n| {
        (
            proptest::collection::vec(0.0f64..0.14, n),
            proptest::collection::vec(0.5f64..1.0, n),
            proptest::collection::vec(-2.0f64..3.0, n),
        )
            .prop_map(|(lower, width, point)| {
                let upper = lower
                    .iter()
                    .zip(&width)
                    .map(|(lo, w)| (lo + w).min(1.0))
                    .collect();
                (InclusionBounds::new(lower, upper), point)
            })
    })
}

fn project(point: &[f64], bounds: &InclusionBounds) -> Vec<f64> {
    project_to_bounded_simplex(point, bounds, 1.0, PROJECTION_ITERATIONS)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_projection_respects_bounds((bounds, point) in bounds_and_point()) {
        let projected = project(&point, &bounds);

        prop_assert_eq!(projected.len(), point.len());
        for (i, x) in projected.iter().enumerate() {
            prop_assert!(*x >= bounds.lower[i] - 1e-9, "x[{}] = {} below {}", i, x, bounds.lower[i]);
            prop_assert!(*x <= bounds.upper[i] + 1e-9, "x[{}] = {} above {}", i, x, bounds.upper[i]);
        }
    }

    #[test]
    fn prop_projection_sums_to_one((bounds, point) in bounds_and_point()) {
        let projected = project(&point, &bounds);
        let total: f64 = projected.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-6, "sum = {}", total);
    }

    #[test]
    fn prop_projection_is_idempotent((bounds, point) in bounds_and_point()) {
        let once = project(&point, &bounds);
        let twice = project(&once, &bounds);
        for (a, b) in once.iter().zip(&twice) {
            prop_assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
        }
    }
}
