use crate::models::{Ingredient, NutrientKey, OptimizationMode};

/// Nutritional-value proxy used by profit mode.
///
/// Scaled energy, protein and the three limiting amino acids, plus vitamin
/// A, D3 and E contributions each capped at 2 so that premixes with huge IU
/// counts cannot dominate. Never negative.
pub fn profit_potential(ingredient: &Ingredient) -> f64 {
    let energy = ingredient.value(NutrientKey::MetabolizableEnergy) / 1000.0;
    let protein = ingredient.value(NutrientKey::CrudeProtein) * 0.35;
    let amino = ingredient.value(NutrientKey::Lysine) * 2.8
        + ingredient.value(NutrientKey::Methionine) * 3.3
        + ingredient.value(NutrientKey::Threonine) * 1.9;
    let micro = (ingredient.value(NutrientKey::VitaminA) / 1_000_000.0).min(2.0)
        + (ingredient.value(NutrientKey::VitaminD3) / 400_000.0).min(2.0)
        + (ingredient.value(NutrientKey::VitaminE) / 10_000.0).min(2.0);

    (energy + protein + amino + micro).max(0.0)
}

/// Linear objective coefficient per ingredient for `mode`.
pub fn objective_coefficients(
    ingredients: &[Ingredient],
    mode: OptimizationMode,
    profit_weight: f64,
) -> Vec<f64> {
    ingredients
        .iter()
        .map(|ing| match mode {
            OptimizationMode::LeastCost => ing.price_per_kg,
            OptimizationMode::ProfitMax => ing.price_per_kg - profit_weight * profit_potential(ing),
        })
        .collect()
}

#[inline]
pub fn dot(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_potential() {
        let soy = Ingredient::new("soy", "Soybean Meal", 0.5)
            .with_nutrient(NutrientKey::MetabolizableEnergy, 2200.0)
            .with_nutrient(NutrientKey::CrudeProtein, 44.0)
            .with_nutrient(NutrientKey::Lysine, 2.7)
            .with_nutrient(NutrientKey::Methionine, 0.6)
            .with_nutrient(NutrientKey::Threonine, 1.7);
        let expected = 2.2 + 44.0 * 0.35 + 2.7 * 2.8 + 0.6 * 3.3 + 1.7 * 1.9;
        assert!((profit_potential(&soy) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_vitamin_contributions_are_capped() {
        let premix = Ingredient::new("premix", "Vitamin Premix", 5.0)
            .with_nutrient(NutrientKey::VitaminA, 50_000_000.0)
            .with_nutrient(NutrientKey::VitaminD3, 200_000.0)
            .with_nutrient(NutrientKey::VitaminE, 1_000_000.0);
        // 2 (capped) + 0.5 + 2 (capped)
        assert!((profit_potential(&premix) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_potential_never_negative() {
        let odd = Ingredient::new("odd", "Odd", 1.0).with_nutrient(NutrientKey::CrudeProtein, -20.0);
        assert_eq!(profit_potential(&odd), 0.0);
    }

    #[test]
    fn test_objective_coefficients_by_mode() {
        let corn = Ingredient::new("corn", "Corn", 0.3)
            .with_nutrient(NutrientKey::MetabolizableEnergy, 3000.0);
        let ingredients = [corn];

        let least = objective_coefficients(&ingredients, OptimizationMode::LeastCost, 0.16);
        assert_eq!(least, vec![0.3]);

        let profit = objective_coefficients(&ingredients, OptimizationMode::ProfitMax, 0.16);
        assert!((profit[0] - (0.3 - 0.16 * 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[0.5, 0.5], &[2.0, 4.0]), 3.0);
        assert_eq!(dot(&[], &[]), 0.0);
    }
}
