pub mod constraint;
pub mod ingredient;
pub mod nutrient;
pub mod solution;

pub use constraint::{bound_scale, NutrientConstraint};
pub use ingredient::{Ingredient, IngredientGroup};
pub use nutrient::{NutrientGroup, NutrientKey, NutrientProfile, NutrientValues};
pub use solution::{
    NutrientAssessment, OptimizationMode, RationAllocation, RationSolution, SolutionStatus,
    ASSESSMENT_TOLERANCE,
};
