use clap::{Parser, Subcommand, ValueEnum};

use crate::models::{IngredientGroup, OptimizationMode};

/// Poultry ration formulation: least-cost and profit-oriented feed mixes.
#[derive(Parser, Debug)]
#[command(name = "poultry_ration")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the formulation JSON file.
    #[arg(short, long, global = true, default_value = "formulation.json")]
    pub file: String,

    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve the formulation and print the ration.
    Solve {
        /// Override the optimization mode from the file.
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Override the profit weight from the file.
        #[arg(long)]
        profit_weight: Option<f64>,

        /// Seed for the random restarts.
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },

    /// Run data-quality checks without solving.
    Check,

    /// Re-solve with ingredient group prices changed.
    ///
    /// Repeat `--group`/`--change` to compare several scenarios; they run in
    /// parallel and pair up in order.
    Scenario {
        /// Ingredient group whose prices change.
        #[arg(long, value_enum, required = true)]
        group: Vec<GroupArg>,

        /// Price change in percent (e.g. 10 or -15).
        #[arg(long, required = true, allow_hyphen_values = true)]
        change: Vec<f64>,

        /// Seed for the random restarts.
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Solve {
            mode: None,
            profit_weight: None,
            seed: 1,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    LeastCost,
    ProfitMax,
}

impl From<ModeArg> for OptimizationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::LeastCost => OptimizationMode::LeastCost,
            ModeArg::ProfitMax => OptimizationMode::ProfitMax,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum GroupArg {
    Grain,
    Protein,
    PlantByProducts,
    AnimalSource,
    Fat,
    Mineral,
    SupplementsAdditives,
    UserFeed,
}

impl From<GroupArg> for IngredientGroup {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Grain => IngredientGroup::Grain,
            GroupArg::Protein => IngredientGroup::Protein,
            GroupArg::PlantByProducts => IngredientGroup::PlantByProducts,
            GroupArg::AnimalSource => IngredientGroup::AnimalSource,
            GroupArg::Fat => IngredientGroup::Fat,
            GroupArg::Mineral => IngredientGroup::Mineral,
            GroupArg::SupplementsAdditives => IngredientGroup::SupplementsAdditives,
            GroupArg::UserFeed => IngredientGroup::UserFeed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let cli = Cli::parse_from([
            "poultry_ration",
            "scenario",
            "--group",
            "protein",
            "--change",
            "-15",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, "formulation.json");
        match cli.command {
            Some(Command::Scenario { group, change, seed }) => {
                assert_eq!(group.len(), 1);
                assert_eq!(IngredientGroup::from(group[0]), IngredientGroup::Protein);
                assert_eq!(change, vec![-15.0]);
                assert_eq!(seed, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_repeated_scenarios() {
        let cli = Cli::parse_from([
            "poultry_ration",
            "scenario",
            "--group",
            "grain",
            "--change",
            "10",
            "--group",
            "fat",
            "--change",
            "-5",
            "--seed",
            "9",
        ]);
        match cli.command {
            Some(Command::Scenario { group, change, seed }) => {
                let groups: Vec<IngredientGroup> = group.into_iter().map(Into::into).collect();
                assert_eq!(groups, vec![IngredientGroup::Grain, IngredientGroup::Fat]);
                assert_eq!(change, vec![10.0, -5.0]);
                assert_eq!(seed, 9);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_solve_overrides() {
        let cli = Cli::parse_from([
            "poultry_ration",
            "--file",
            "demos/broiler_grower.json",
            "solve",
            "--mode",
            "profit-max",
            "--profit-weight",
            "0.2",
        ]);
        assert_eq!(cli.file, "demos/broiler_grower.json");
        match cli.command {
            Some(Command::Solve { mode, profit_weight, .. }) => {
                assert_eq!(mode.map(OptimizationMode::from), Some(OptimizationMode::ProfitMax));
                assert_eq!(profit_weight, Some(0.2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
