use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Ingredient, NutrientConstraint, OptimizationMode};
use crate::solver::{SolverConfig, DEFAULT_PROFIT_WEIGHT};

fn default_profit_weight() -> f64 {
    DEFAULT_PROFIT_WEIGHT
}

/// Everything needed to run a solve, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formulation {
    #[serde(default)]
    pub mode: OptimizationMode,

    #[serde(default = "default_profit_weight")]
    pub profit_weight: f64,

    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub constraints: Vec<NutrientConstraint>,

    #[serde(default)]
    pub solver: SolverConfig,
}

impl Formulation {
    pub fn new(ingredients: Vec<Ingredient>, constraints: Vec<NutrientConstraint>) -> Self {
        Self {
            mode: OptimizationMode::default(),
            profit_weight: DEFAULT_PROFIT_WEIGHT,
            ingredients,
            constraints,
            solver: SolverConfig::default(),
        }
    }

    /// Collapse repeated ingredient ids and constraint keys.
    ///
    /// The last occurrence wins but keeps the position of the first, so
    /// allocation order follows the file.
    pub fn deduplicated(mut self) -> Self {
        self.ingredients = dedup_last_wins(self.ingredients, |i| i.id.to_lowercase());
        self.constraints = dedup_last_wins(self.constraints, |c| c.key);
        self
    }
}

fn dedup_last_wins<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        match slots.get(&key(&item)) {
            Some(&slot) => out[slot] = item,
            None => {
                slots.insert(key(&item), out.len());
                out.push(item);
            }
        }
    }
    out
}

/// Load a formulation from a JSON file.
///
/// Deduplicates ingredients by case-insensitive id and constraints by nutrient.
/// Rejects a `solver` table the search cannot run with.
pub fn load_formulation<P: AsRef<Path>>(path: P) -> Result<Formulation> {
    let content = fs::read_to_string(path)?;
    let formulation: Formulation = serde_json::from_str(&content)?;
    formulation.solver.validate()?;
    Ok(formulation.deduplicated())
}

/// Save a formulation to a JSON file.
pub fn save_formulation<P: AsRef<Path>>(path: P, formulation: &Formulation) -> Result<()> {
    let json = serde_json::to_string_pretty(formulation)?;
    fs::write(path, json)?;
    Ok(())
}
