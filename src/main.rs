use clap::Parser;
use std::path::Path;
use tracing::Level;

use poultry_ration_rs::analysis::{
    check_formulation, critical_count, pair_scenarios, run_price_scenarios, ScenarioInputs,
};
use poultry_ration_rs::cli::{Cli, Command};
use poultry_ration_rs::error::Result;
use poultry_ration_rs::interface::{display_alerts, display_scenario, display_solution};
use poultry_ration_rs::models::{IngredientGroup, OptimizationMode};
use poultry_ration_rs::solver::solve_with_config;
use poultry_ration_rs::state::{load_formulation, Formulation};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let command = cli.command.unwrap_or_default();
    let path = Path::new(&cli.file);

    if !path.exists() {
        eprintln!("Formulation file not found: {}", cli.file);
        eprintln!("Try: poultry_ration --file demos/broiler_grower.json solve");
        return Ok(1);
    }

    let formulation = load_formulation(path)?;
    println!(
        "Loaded {} ingredients and {} constraints",
        formulation.ingredients.len(),
        formulation.constraints.len()
    );

    match command {
        Command::Solve {
            mode,
            profit_weight,
            seed,
        } => cmd_solve(
            &formulation,
            mode.map(OptimizationMode::from),
            profit_weight,
            seed,
        ),
        Command::Check => cmd_check(&formulation),
        Command::Scenario {
            group,
            change,
            seed,
        } => {
            let groups: Vec<IngredientGroup> = group.into_iter().map(Into::into).collect();
            cmd_scenario(&formulation, &groups, &change, seed)
        }
    }
}

/// Solve the formulation, with optional overrides from the command line.
fn cmd_solve(
    formulation: &Formulation,
    mode: Option<OptimizationMode>,
    profit_weight: Option<f64>,
    seed: u64,
) -> Result<i32> {
    let mode = mode.unwrap_or(formulation.mode);
    let profit_weight = profit_weight.unwrap_or(formulation.profit_weight);

    let mut rng = StdRng::seed_from_u64(seed);
    let solution = solve_with_config(
        &formulation.ingredients,
        &formulation.constraints,
        mode,
        profit_weight,
        &formulation.solver,
        &mut rng,
    );

    display_solution(&solution);
    Ok(0)
}

/// Print QC alerts; non-zero exit when any is critical.
fn cmd_check(formulation: &Formulation) -> Result<i32> {
    let alerts = check_formulation(&formulation.ingredients, &formulation.constraints);
    display_alerts(&alerts);

    let critical = critical_count(&alerts);
    if critical > 0 {
        eprintln!("{} critical issue(s) found.", critical);
        return Ok(2);
    }
    Ok(0)
}

/// Solve the baseline, then each price scenario in parallel against it.
fn cmd_scenario(
    formulation: &Formulation,
    groups: &[IngredientGroup],
    changes: &[f64],
    seed: u64,
) -> Result<i32> {
    let scenarios = pair_scenarios(groups, changes)?;
    let inputs = ScenarioInputs {
        ingredients: &formulation.ingredients,
        constraints: &formulation.constraints,
        mode: formulation.mode,
        profit_weight: formulation.profit_weight,
        config: &formulation.solver,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let baseline = solve_with_config(
        inputs.ingredients,
        inputs.constraints,
        inputs.mode,
        inputs.profit_weight,
        inputs.config,
        &mut rng,
    );

    let outcomes = run_price_scenarios(&inputs, &scenarios, Some(&baseline), seed)?;
    for outcome in &outcomes {
        display_scenario(&baseline, outcome);
    }
    Ok(0)
}
