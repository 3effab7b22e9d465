use rand::Rng;
use tracing::{debug, trace};

use crate::models::{bound_scale, Ingredient, NutrientConstraint, NutrientProfile};
use crate::solver::config::SolverConfig;
use crate::solver::constants::TARGET_SUM;
use crate::solver::objective::dot;
use crate::solver::penalty::{self, normalized_deficit, normalized_excess};
use crate::solver::projection::{project_to_bounded_simplex, InclusionBounds};

/// One evaluated point of the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub inclusions: Vec<f64>,
    pub profile: NutrientProfile,
    /// Raw ingredient cost per kg of mix.
    pub cost: f64,
    /// Sum of squared normalized violations.
    pub penalty: f64,
    /// Worst single normalized violation.
    pub max_violation: f64,
    /// Objective coefficients dotted with the inclusions, without the penalty.
    pub linear_objective: f64,
    /// `linear_objective + penalty_weight * penalty`.
    pub objective: f64,
}

/// Best candidates seen across all starts.
#[derive(Debug, Clone, Default)]
pub struct CandidateTracker {
    pub best_feasible: Option<Candidate>,
    pub best_approx: Option<Candidate>,
}

impl CandidateTracker {
    /// Record `candidate` if it beats the current best of its kind.
    ///
    /// Feasible candidates rank by cost. Costs within
    /// `config.cost_tie_tolerance` are compared by linear objective, so profit
    /// mode still separates equally priced mixes; the earlier candidate is
    /// kept on exact ties. Infeasible ones rank by penalty, then
    /// by penalized objective when penalties are within
    /// `config.penalty_tie_tolerance`.
    /// Returns true when the candidate was kept.
    pub fn offer(&mut self, candidate: &Candidate, config: &SolverConfig) -> bool {
        if candidate.max_violation <= config.feasibility_threshold {
            let better = self
                .best_feasible
                .as_ref()
                .is_none_or(|best| {
                    candidate.cost < best.cost - config.cost_tie_tolerance
                        || ((candidate.cost - best.cost).abs() <= config.cost_tie_tolerance
                            && candidate.linear_objective < best.linear_objective)
                });
            if better {
                self.best_feasible = Some(candidate.clone());
            }
            return better;
        }

        let better = self.best_approx.as_ref().is_none_or(|best| {
            candidate.penalty < best.penalty
                || ((candidate.penalty - best.penalty).abs() < config.penalty_tie_tolerance
                    && candidate.objective < best.objective)
        });
        if better {
            self.best_approx = Some(candidate.clone());
        }
        better
    }

    /// Winning candidate and whether it is feasible.
    pub fn into_best(self) -> Option<(Candidate, bool)> {
        match self.best_feasible {
            Some(best) => Some((best, true)),
            None => self.best_approx.map(|best| (best, false)),
        }
    }
}

/// Everything one solve needs, fixed for the duration of the search.
#[derive(Debug)]
pub struct SearchProblem<'a> {
    pub ingredients: &'a [Ingredient],
    pub constraints: &'a [NutrientConstraint],
    pub bounds: &'a InclusionBounds,
    pub costs: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub config: &'a SolverConfig,
}

impl<'a> SearchProblem<'a> {
    pub fn new(
        ingredients: &'a [Ingredient],
        constraints: &'a [NutrientConstraint],
        bounds: &'a InclusionBounds,
        coefficients: Vec<f64>,
        config: &'a SolverConfig,
    ) -> Self {
        Self {
            ingredients,
            constraints,
            bounds,
            costs: ingredients.iter().map(|ing| ing.price_per_kg).collect(),
            coefficients,
            config,
        }
    }

    /// Nutrient levels of the mix described by `inclusions`.
    pub fn profile(&self, inclusions: &[f64]) -> NutrientProfile {
        let mut profile = NutrientProfile::default();
        for (ingredient, &share) in self.ingredients.iter().zip(inclusions) {
            profile.add_scaled(&ingredient.nutrients, share);
        }
        profile
    }

    pub fn evaluate(&self, inclusions: Vec<f64>) -> Candidate {
        let profile = self.profile(&inclusions);
        let eval = penalty::evaluate(&profile, self.constraints);
        let cost = dot(&inclusions, &self.costs);
        let linear_objective = dot(&inclusions, &self.coefficients);

        Candidate {
            profile,
            cost,
            penalty: eval.penalty,
            max_violation: eval.max_violation,
            linear_objective,
            objective: linear_objective + self.config.penalty_weight * eval.penalty,
            inclusions,
        }
    }

    /// Gradient of the penalized objective with respect to each inclusion.
    pub fn gradient(&self, profile: &NutrientProfile) -> Vec<f64> {
        let mut gradient = self.coefficients.clone();
        let weight = self.config.penalty_weight;

        for constraint in self.constraints.iter().filter(|c| c.is_active()) {
            let achieved = profile[constraint.key];

            if let Some(min) = constraint.min_bound() {
                let deficit = normalized_deficit(achieved, min);
                if deficit > 0.0 {
                    let factor = -2.0 * weight * deficit / bound_scale(min);
                    self.accumulate(&mut gradient, constraint, factor);
                }
            }

            if let Some(max) = constraint.max_bound() {
                let excess = normalized_excess(achieved, max);
                if excess > 0.0 {
                    let factor = 2.0 * weight * excess / bound_scale(max);
                    self.accumulate(&mut gradient, constraint, factor);
                }
            }
        }

        gradient
    }

    fn accumulate(&self, gradient: &mut [f64], constraint: &NutrientConstraint, factor: f64) {
        for (g, ingredient) in gradient.iter_mut().zip(self.ingredients) {
            *g += factor * ingredient.value(constraint.key);
        }
    }

    pub fn project(&self, values: &[f64]) -> Vec<f64> {
        project_to_bounded_simplex(
            values,
            self.bounds,
            TARGET_SUM,
            self.config.projection_iterations,
        )
    }

    /// Gradient step from `inclusions`, projected back onto the bounded simplex.
    pub fn descend(&self, inclusions: &[f64], gradient: &[f64], iteration: usize) -> Vec<f64> {
        let step = self.config.step_size(iteration);
        let next: Vec<f64> = inclusions
            .iter()
            .zip(gradient)
            .map(|(x, g)| x - step * g)
            .collect();
        self.project(&next)
    }

    /// Starting point for `restart`: the bound midpoint for restart 0,
    /// a uniform draw within the bounds otherwise.
    pub fn initial_guess<R: Rng + ?Sized>(&self, restart: usize, rng: &mut R) -> Vec<f64> {
        let guess = if restart == 0 {
            self.bounds.midpoint()
        } else {
            self.bounds
                .lower
                .iter()
                .zip(&self.bounds.upper)
                .map(|(&lo, &hi)| if hi > lo { rng.gen_range(lo..=hi) } else { lo })
                .collect()
        };
        self.project(&guess)
    }

    /// Run every start and return the tracker with the best candidates.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> CandidateTracker {
        let mut tracker = CandidateTracker::default();

        for restart in 0..self.config.restarts {
            let mut inclusions = self.initial_guess(restart, rng);
            let mut iterations = 0;
            let mut last_violation = f64::INFINITY;

            for iteration in 0..self.config.max_iterations {
                iterations = iteration + 1;
                let candidate = self.evaluate(inclusions);
                last_violation = candidate.max_violation;

                if tracker.offer(&candidate, self.config) {
                    trace!(
                        restart,
                        iteration,
                        cost = candidate.cost,
                        max_violation = candidate.max_violation,
                        "improved candidate"
                    );
                }

                let gradient = self.gradient(&candidate.profile);
                inclusions = self.descend(&candidate.inclusions, &gradient, iteration);

                if self.config.has_converged(candidate.max_violation, iteration) {
                    break;
                }
            }

            debug!(
                restart,
                iterations,
                max_violation = last_violation,
                feasible_found = tracker.best_feasible.is_some(),
                "restart finished"
            );
        }

        tracker
    }
}
