use crate::analysis::{QualityAlert, ScenarioOutcome};
use crate::models::{NutrientAssessment, RationSolution};

/// Display a solved ration: status, allocation table, nutrient table, ratios.
pub fn display_solution(solution: &RationSolution) {
    println!();
    println!("=== Ration ({}) ===", solution.optimization_mode.label());
    println!("{}", solution.message);
    println!();

    if solution.allocations.is_empty() {
        println!("No allocations.");
        println!();
        return;
    }

    let name_width = solution
        .allocations
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(10)
        .max("Ingredient".len());

    println!(
        "{:<width$}  {:<18} {:>9} {:>10}",
        "Ingredient",
        "Group",
        "Incl %",
        "Cost/kg",
        width = name_width
    );
    for allocation in &solution.allocations {
        println!(
            "{:<width$}  {:<18} {:>9.2} {:>10.4}",
            allocation.name,
            allocation.group.label(),
            allocation.inclusion_percent,
            allocation.cost_contribution_per_kg,
            width = name_width
        );
    }

    println!();
    display_assessments(&solution.assessments);

    println!("--- Summary ---");
    println!("Cost per kg: {:.4}", solution.cost_per_kg);
    println!("Objective per kg: {:.4}", solution.objective_per_kg);
    println!("Total inclusion: {:.2}%", solution.total_inclusion_percent());
    if !solution.is_feasible() {
        println!("Max violation: {:.2}%", solution.max_violation_percent);
    }
    println!("Met:Lys ratio: {:.1}%", solution.met_to_lys_ratio_percent());
    println!("Thr:Lys ratio: {:.1}%", solution.thr_to_lys_ratio_percent());
    println!("Price per Mcal: {:.4}", solution.price_per_mcal());
    println!();
}

fn display_assessments(assessments: &[NutrientAssessment]) {
    if assessments.is_empty() {
        return;
    }

    println!(
        "{:<22} {:>10} {:>10} {:>10} {:<9}  Status",
        "Nutrient", "Achieved", "Min", "Max", "Unit"
    );
    for a in assessments {
        let decimals = a.key.decimals();
        let target = |t: Option<f64>| match t {
            Some(v) => format!("{:.*}", decimals, v),
            None => "-".to_string(),
        };
        let status = if a.is_good() {
            "OK"
        } else if !a.meets_min() {
            "LOW"
        } else {
            "HIGH"
        };

        println!(
            "{:<22} {:>10} {:>10} {:>10} {:<9}  {}",
            a.key.title(),
            format!("{:.*}", decimals, a.achieved),
            target(a.min_target),
            target(a.max_target),
            a.key.unit(),
            status
        );
    }
    println!();
}

/// Display QC alerts, one per line with severity tag.
pub fn display_alerts(alerts: &[QualityAlert]) {
    println!();
    println!("=== Quality Check ({} alerts) ===", alerts.len());
    for alert in alerts {
        println!("  [{}] {}", alert.severity.label(), alert.message);
    }
    println!();
}

/// Display a price scenario next to its baseline.
pub fn display_scenario(baseline: &RationSolution, outcome: &ScenarioOutcome) {
    let scenario = &outcome.scenario;
    let sign = if scenario.price_change_percent >= 0.0 { "+" } else { "" };

    println!();
    println!(
        "=== Scenario: {} {}{:.1}% ===",
        scenario.group.label(),
        sign,
        scenario.price_change_percent
    );
    println!("Baseline cost per kg: {:.4} ({})", baseline.cost_per_kg, status_word(baseline));
    println!(
        "Scenario cost per kg: {:.4} ({})",
        outcome.solution.cost_per_kg,
        status_word(&outcome.solution)
    );

    if let (Some(delta), Some(pct)) = (outcome.cost_delta_per_kg, outcome.cost_delta_percent) {
        let sign = if delta >= 0.0 { "+" } else { "" };
        println!("Cost delta: {}{:.4} per kg ({}{:.2}%)", sign, delta, sign, pct);
    }
    println!();

    display_solution(&outcome.solution);
}

fn status_word(solution: &RationSolution) -> &'static str {
    if solution.is_feasible() {
        "feasible"
    } else {
        "approximation"
    }
}
