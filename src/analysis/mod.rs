pub mod quality;
pub mod scenario;

pub use quality::{check_formulation, critical_count, QualityAlert, QualitySeverity};
pub use scenario::{
    pair_scenarios, run_price_scenario, run_price_scenarios, PriceScenario, ScenarioInputs, ScenarioOutcome,
};
