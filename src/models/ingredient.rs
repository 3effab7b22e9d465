use serde::{Deserialize, Serialize};

use crate::models::nutrient::{NutrientKey, NutrientValues};

/// Feed ingredient category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IngredientGroup {
    Grain,
    Protein,
    PlantByProducts,
    AnimalSource,
    Fat,
    Mineral,
    SupplementsAdditives,
    #[default]
    UserFeed,
}

impl IngredientGroup {
    pub const ALL: [IngredientGroup; 8] = [
        IngredientGroup::Grain,
        IngredientGroup::Protein,
        IngredientGroup::PlantByProducts,
        IngredientGroup::AnimalSource,
        IngredientGroup::Fat,
        IngredientGroup::Mineral,
        IngredientGroup::SupplementsAdditives,
        IngredientGroup::UserFeed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IngredientGroup::Grain => "Grain",
            IngredientGroup::Protein => "Protein Sources",
            IngredientGroup::PlantByProducts => "Plant By-Products",
            IngredientGroup::AnimalSource => "Animal Source",
            IngredientGroup::Fat => "Fats & Oils",
            IngredientGroup::Mineral => "Minerals",
            IngredientGroup::SupplementsAdditives => "Supp & Additives",
            IngredientGroup::UserFeed => "User Feed",
        }
    }
}

/// A feed ingredient with inclusion limits, price and nutrient composition.
///
/// Inclusion limits are percentages of the mix mass (0-100). Nutrient values
/// are per kg of ingredient, in the unit of each [`NutrientKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub group: IngredientGroup,

    #[serde(default)]
    pub min_percent: f64,

    #[serde(default = "default_max_percent")]
    pub max_percent: f64,

    pub price_per_kg: f64,

    #[serde(default)]
    pub nutrients: NutrientValues,
}

fn default_max_percent() -> f64 {
    100.0
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_per_kg: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: IngredientGroup::default(),
            min_percent: 0.0,
            max_percent: 100.0,
            price_per_kg,
            nutrients: NutrientValues::default(),
        }
    }

    /// Builder-style setter for the ingredient group.
    pub fn with_group(mut self, group: IngredientGroup) -> Self {
        self.group = group;
        self
    }

    /// Builder-style setter for inclusion limits, in percent.
    pub fn with_limits(mut self, min_percent: f64, max_percent: f64) -> Self {
        self.min_percent = min_percent;
        self.max_percent = max_percent;
        self
    }

    /// Builder-style setter for a single nutrient value.
    pub fn with_nutrient(mut self, key: NutrientKey, value: f64) -> Self {
        self.nutrients[key] = value;
        self
    }

    /// Nutrient value per kg for `key`.
    #[inline]
    pub fn value(&self, key: NutrientKey) -> f64 {
        self.nutrients[key]
    }

    /// Lower inclusion bound as a fraction, clamped to `[0, 1]`.
    pub fn lower_bound(&self) -> f64 {
        (self.min_percent / 100.0).max(0.0)
    }

    /// Upper inclusion bound as a fraction, clamped to `[0, 1]`.
    pub fn upper_bound(&self) -> f64 {
        (self.max_percent / 100.0).min(1.0)
    }

    /// True when price and every nutrient value are finite numbers.
    pub fn has_finite_data(&self) -> bool {
        self.price_per_kg.is_finite() && self.nutrients.is_finite()
    }

    /// Copy with non-finite price and nutrient values replaced by zero.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        if !out.price_per_kg.is_finite() {
            out.price_per_kg = 0.0;
        }
        out.nutrients = out.nutrients.sanitized();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ingredient() -> Ingredient {
        Ingredient::new("corn", "Corn", 0.28)
            .with_group(IngredientGroup::Grain)
            .with_limits(10.0, 70.0)
            .with_nutrient(NutrientKey::CrudeProtein, 8.5)
            .with_nutrient(NutrientKey::MetabolizableEnergy, 3350.0)
    }

    #[test]
    fn test_bounds_as_fractions() {
        let corn = sample_ingredient();
        assert!((corn.lower_bound() - 0.10).abs() < 1e-12);
        assert!((corn.upper_bound() - 0.70).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_are_clamped() {
        let odd = sample_ingredient().with_limits(-5.0, 140.0);
        assert_eq!(odd.lower_bound(), 0.0);
        assert_eq!(odd.upper_bound(), 1.0);
    }

    #[test]
    fn test_value_lookup() {
        let corn = sample_ingredient();
        assert_eq!(corn.value(NutrientKey::CrudeProtein), 8.5);
        assert_eq!(corn.value(NutrientKey::Lysine), 0.0);
    }

    #[test]
    fn test_sanitized() {
        let mut corn = sample_ingredient();
        corn.price_per_kg = f64::NAN;
        corn.nutrients[NutrientKey::Lysine] = f64::NEG_INFINITY;
        assert!(!corn.has_finite_data());

        let clean = corn.sanitized();
        assert!(clean.has_finite_data());
        assert_eq!(clean.price_per_kg, 0.0);
        assert_eq!(clean.value(NutrientKey::Lysine), 0.0);
        assert_eq!(clean.value(NutrientKey::CrudeProtein), 8.5);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id": "soy", "name": "Soybean Meal", "pricePerKg": 0.52,
                       "nutrients": {"crudeProtein": 44.0}}"#;
        let soy: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(soy.group, IngredientGroup::UserFeed);
        assert_eq!(soy.min_percent, 0.0);
        assert_eq!(soy.max_percent, 100.0);
        assert_eq!(soy.value(NutrientKey::CrudeProtein), 44.0);
    }
}
