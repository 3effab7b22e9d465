use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{RationError, Result};
use crate::models::{Ingredient, IngredientGroup, NutrientConstraint, OptimizationMode, RationSolution};
use crate::solver::{solve_with_config, SolverConfig};

/// Uniform price change applied to one ingredient group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceScenario {
    pub group: IngredientGroup,
    pub price_change_percent: f64,
}

impl PriceScenario {
    pub fn new(group: IngredientGroup, price_change_percent: f64) -> Self {
        Self {
            group,
            price_change_percent,
        }
    }

    /// Price multiplier; never negative.
    pub fn factor(&self) -> f64 {
        (1.0 + self.price_change_percent / 100.0).max(0.0)
    }

    /// Copy of `ingredients` with this scenario's prices.
    pub fn apply(&self, ingredients: &[Ingredient]) -> Vec<Ingredient> {
        let factor = self.factor();
        ingredients
            .iter()
            .map(|ing| {
                let mut copy = ing.clone();
                if copy.group == self.group {
                    copy.price_per_kg *= factor;
                }
                copy
            })
            .collect()
    }
}

/// Zip groups and changes into scenarios, in order.
pub fn pair_scenarios(groups: &[IngredientGroup], changes: &[f64]) -> Result<Vec<PriceScenario>> {
    if groups.is_empty() || groups.len() != changes.len() {
        return Err(RationError::InvalidInput(format!(
            "Each scenario needs one group and one price change (got {} groups, {} changes).",
            groups.len(),
            changes.len()
        )));
    }
    Ok(groups
        .iter()
        .zip(changes)
        .map(|(&group, &change)| PriceScenario::new(group, change))
        .collect())
}

/// Solved scenario, with cost deltas against the baseline when one was given.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub scenario: PriceScenario,
    pub solution: RationSolution,
    pub cost_delta_per_kg: Option<f64>,
    pub cost_delta_percent: Option<f64>,
}

/// Inputs shared by the baseline and every scenario.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioInputs<'a> {
    pub ingredients: &'a [Ingredient],
    pub constraints: &'a [NutrientConstraint],
    pub mode: OptimizationMode,
    pub profit_weight: f64,
    pub config: &'a SolverConfig,
}

/// Re-solve `inputs` under `scenario` and compare against `baseline`.
pub fn run_price_scenario<R: Rng + ?Sized>(
    inputs: &ScenarioInputs<'_>,
    scenario: PriceScenario,
    baseline: Option<&RationSolution>,
    rng: &mut R,
) -> Result<ScenarioOutcome> {
    if inputs.ingredients.len() < 2 {
        return Err(RationError::InvalidInput(
            "Need at least two active ingredients before running scenario.".to_string(),
        ));
    }

    let changed = scenario.apply(inputs.ingredients);
    let solution = solve_with_config(
        &changed,
        inputs.constraints,
        inputs.mode,
        inputs.profit_weight,
        inputs.config,
        rng,
    );

    let (cost_delta_per_kg, cost_delta_percent) = match baseline {
        Some(base) => {
            let delta = solution.cost_per_kg - base.cost_per_kg;
            let pct = if base.cost_per_kg > 0.0 {
                delta / base.cost_per_kg * 100.0
            } else {
                0.0
            };
            (Some(delta), Some(pct))
        }
        None => (None, None),
    };

    Ok(ScenarioOutcome {
        scenario,
        solution,
        cost_delta_per_kg,
        cost_delta_percent,
    })
}

/// Evaluate many scenarios in parallel.
///
/// Scenario `i` draws from its own generator seeded with `base_seed + i`, so
/// the outcome does not depend on thread scheduling. Results keep input order.
pub fn run_price_scenarios(
    inputs: &ScenarioInputs<'_>,
    scenarios: &[PriceScenario],
    baseline: Option<&RationSolution>,
    base_seed: u64,
) -> Result<Vec<ScenarioOutcome>> {
    scenarios
        .par_iter()
        .enumerate()
        .map(|(i, &scenario)| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            run_price_scenario(inputs, scenario, baseline, &mut rng)
        })
        .collect()
}
