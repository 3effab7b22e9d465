use serde::{Deserialize, Serialize};

use crate::models::{Ingredient, NutrientConstraint, NutrientKey};

/// Highest ME value (kcal/kg) considered plausible for a feed ingredient.
pub const MAX_PLAUSIBLE_ME: f64 = 9500.0;

/// Max% above which an ingredient is flagged as crowding the formula.
pub const FLEXIBILITY_MAX_PERCENT: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualitySeverity {
    Info,
    Warning,
    Critical,
}

impl QualitySeverity {
    pub fn label(self) -> &'static str {
        match self {
            QualitySeverity::Info => "Info",
            QualitySeverity::Warning => "Warning",
            QualitySeverity::Critical => "Critical",
        }
    }
}

/// A data-quality finding about the inputs of a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAlert {
    pub severity: QualitySeverity,
    pub message: String,
}

impl QualityAlert {
    fn new(severity: QualitySeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Pre-solve QC checks on a formulation.
///
/// Critical alerts describe inputs the solver will reject or that make the
/// formula meaningless; warnings describe suspicious but usable data. When
/// nothing fires, a single Info alert is returned.
pub fn check_formulation(
    ingredients: &[Ingredient],
    constraints: &[NutrientConstraint],
) -> Vec<QualityAlert> {
    let mut alerts = Vec::new();

    let min_total: f64 = ingredients.iter().map(|i| i.min_percent).sum();
    let max_total: f64 = ingredients.iter().map(|i| i.max_percent).sum();

    if min_total > 100.0001 {
        alerts.push(QualityAlert::new(
            QualitySeverity::Critical,
            "Total ingredient minimum inclusion exceeds 100%.",
        ));
    }

    if max_total < 99.9999 {
        alerts.push(QualityAlert::new(
            QualitySeverity::Critical,
            "Total ingredient maximum inclusion is below 100%.",
        ));
    }

    if ingredients.len() < 2 {
        alerts.push(QualityAlert::new(
            QualitySeverity::Critical,
            "At least two selected ingredients are required.",
        ));
    }

    if constraints.iter().any(NutrientConstraint::is_inverted) {
        alerts.push(QualityAlert::new(
            QualitySeverity::Critical,
            "One or more nutrient constraints have Min greater than Max.",
        ));
    }

    for ingredient in ingredients {
        alerts.extend(check_ingredient(ingredient));
    }

    if alerts.is_empty() {
        alerts.push(QualityAlert::new(
            QualitySeverity::Info,
            "QC checks passed. No data quality issues found.",
        ));
    }

    alerts
}

fn check_ingredient(ingredient: &Ingredient) -> Vec<QualityAlert> {
    let name = &ingredient.name;
    let mut alerts = Vec::new();

    if ingredient.price_per_kg <= 0.0 {
        alerts.push(QualityAlert::new(
            QualitySeverity::Warning,
            format!("{name}: price is zero or negative."),
        ));
    }

    if ingredient.min_percent > ingredient.max_percent {
        alerts.push(QualityAlert::new(
            QualitySeverity::Critical,
            format!("{name}: Min% is greater than Max%."),
        ));
    }

    if ingredient.max_percent > FLEXIBILITY_MAX_PERCENT {
        alerts.push(QualityAlert::new(
            QualitySeverity::Warning,
            format!("{name}: Max% over 95% may reduce formulation flexibility."),
        ));
    }

    let me = ingredient.value(NutrientKey::MetabolizableEnergy);
    if !(0.0..=MAX_PLAUSIBLE_ME).contains(&me) && me.is_finite() {
        alerts.push(QualityAlert::new(
            QualitySeverity::Warning,
            format!("{name}: ME value appears out of range."),
        ));
    }

    if !ingredient.has_finite_data() {
        alerts.push(QualityAlert::new(
            QualitySeverity::Warning,
            format!("{name}: non-finite nutrient or price data will be treated as zero."),
        ));
    }

    alerts
}

/// Number of Critical alerts.
pub fn critical_count(alerts: &[QualityAlert]) -> usize {
    alerts
        .iter()
        .filter(|a| a.severity == QualitySeverity::Critical)
        .count()
}
