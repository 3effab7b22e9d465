use serde::{Deserialize, Serialize};

use crate::models::constraint::bound_scale;
use crate::models::ingredient::IngredientGroup;
use crate::models::nutrient::NutrientKey;

/// Absolute tolerance used by assessment pass/fail flags.
pub const ASSESSMENT_TOLERANCE: f64 = 1e-6;

/// Objective used to rank rations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptimizationMode {
    /// Minimize raw ingredient cost.
    #[default]
    LeastCost,
    /// Minimize cost net of a nutritional-value proxy.
    ProfitMax,
}

impl OptimizationMode {
    pub fn label(self) -> &'static str {
        match self {
            OptimizationMode::LeastCost => "Least Cost",
            OptimizationMode::ProfitMax => "Profit Max",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolutionStatus {
    /// Every enabled constraint is met within the solver's feasibility threshold.
    Feasible,
    /// Best effort: some constraint is still violated, or the solve was rejected.
    Approximation,
}

/// Share of one ingredient in the finished ration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RationAllocation {
    pub id: String,
    pub name: String,
    pub group: IngredientGroup,
    pub inclusion_percent: f64,
    pub cost_contribution_per_kg: f64,
}

/// Achieved level of one constrained nutrient against its targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientAssessment {
    pub key: NutrientKey,
    pub achieved: f64,
    pub min_target: Option<f64>,
    pub max_target: Option<f64>,
}

impl NutrientAssessment {
    pub fn meets_min(&self) -> bool {
        match self.min_target {
            Some(min) => self.achieved + ASSESSMENT_TOLERANCE >= min,
            None => true,
        }
    }

    pub fn meets_max(&self) -> bool {
        match self.max_target {
            Some(max) => self.achieved - ASSESSMENT_TOLERANCE <= max,
            None => true,
        }
    }

    pub fn is_good(&self) -> bool {
        self.meets_min() && self.meets_max()
    }

    /// Worst normalized breach of either target, zero when both are met.
    ///
    /// Uses the same normalization as the solver penalty, so a feasible
    /// ration always reports a value at or below the feasibility threshold
    /// even when `meets_min`/`meets_max` flag a sub-threshold shortfall.
    pub fn normalized_violation(&self) -> f64 {
        let deficit = self
            .min_target
            .map(|min| ((min - self.achieved) / bound_scale(min)).max(0.0))
            .unwrap_or(0.0);
        let excess = self
            .max_target
            .map(|max| ((self.achieved - max) / bound_scale(max)).max(0.0))
            .unwrap_or(0.0);
        deficit.max(excess)
    }
}

/// Outcome of a ration solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RationSolution {
    pub status: SolutionStatus,
    pub message: String,
    pub optimization_mode: OptimizationMode,
    pub cost_per_kg: f64,
    pub objective_per_kg: f64,
    pub max_violation_percent: f64,
    pub allocations: Vec<RationAllocation>,
    pub assessments: Vec<NutrientAssessment>,
}

impl RationSolution {
    /// Failure result: no allocations, zero cost, full violation.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            status: SolutionStatus::Approximation,
            message: message.into(),
            optimization_mode: OptimizationMode::LeastCost,
            cost_per_kg: 0.0,
            objective_per_kg: 0.0,
            max_violation_percent: 100.0,
            allocations: Vec::new(),
            assessments: Vec::new(),
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.status == SolutionStatus::Feasible
    }

    /// Achieved value of `key`, or zero when the nutrient was not assessed.
    pub fn achieved(&self, key: NutrientKey) -> f64 {
        self.assessments
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.achieved)
            .unwrap_or(0.0)
    }

    /// Methionine as a percentage of lysine.
    pub fn met_to_lys_ratio_percent(&self) -> f64 {
        self.ratio_to_lysine(NutrientKey::Methionine)
    }

    /// Threonine as a percentage of lysine.
    pub fn thr_to_lys_ratio_percent(&self) -> f64 {
        self.ratio_to_lysine(NutrientKey::Threonine)
    }

    fn ratio_to_lysine(&self, key: NutrientKey) -> f64 {
        let lys = self.achieved(NutrientKey::Lysine);
        if lys <= 1e-9 {
            return 0.0;
        }
        self.achieved(key) / lys * 100.0
    }

    /// Feed cost per Mcal of metabolizable energy.
    pub fn price_per_mcal(&self) -> f64 {
        let me = self.achieved(NutrientKey::MetabolizableEnergy);
        if me <= 1e-9 {
            return 0.0;
        }
        self.cost_per_kg / (me / 1000.0)
    }

    /// Sum of allocation percentages (100 for any solved ration).
    pub fn total_inclusion_percent(&self) -> f64 {
        self.allocations.iter().map(|a| a.inclusion_percent).sum()
    }
}
