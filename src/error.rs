use thiserror::Error;

#[derive(Debug, Error)]
pub enum RationError {
    #[error("No ingredients available for optimization.")]
    NoIngredients,

    #[error("One or more nutrient constraints have Min greater than Max.")]
    ConstraintMinAboveMax,

    #[error("One or more ingredients have invalid min/max inclusion limits.")]
    InvalidInclusionLimits,

    #[error("Ingredient minimum inclusions exceed 100%.")]
    MinimumsExceedTotal,

    #[error("Ingredient maximum inclusions are below 100%.")]
    MaximumsBelowTotal,

    #[error("Optimization failed. Please review constraints and ingredient data.")]
    OptimizationFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RationError>;
