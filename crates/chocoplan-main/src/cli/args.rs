// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of ChocoPlan.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz


use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chocoplan")]
#[command(version, about = "Hourly production scheduler for a chocolate line")]
#[command(
    long_about = "Places chocolate production batches on the hours of a day where energy is cheap\n\
    and the hall climate suits each process step, and reports the savings against a fixed shift.\n\
    \nForecasts come from a synthetic scenario or a JSON export.\n\
    \nExamples:\n  \
    chocoplan plan                               # Tomorrow, usual_day scenario\n  \
    chocoplan plan --scenario peak_tariff        # Pricier peak hours\n  \
    chocoplan plan --forecast-json fc.json --format json\n  \
    chocoplan catalog                            # Process chains per quality"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a production plan for one day
    #[command(
        long_about = "Build a production plan for one day.\n\
        \nForecast sources (choose one):\n  \
        - Synthetic: --scenario <name> (flat, usual_day, peak_tariff, hot_afternoon, volatile)\n  \
        - JSON export: --forecast-json <path> with {\"prices\": [...], \"climate\": [...]}\n\
        \nExamples:\n  \
        chocoplan plan\n  \
        chocoplan plan --target-kg 150 --premium-ratio 0.5\n  \
        chocoplan plan --date 2026-03-02 --scenario hot_afternoon --no-classifier"
    )]
    Plan(PlanArgs),

    /// Show quality profiles and their process chains
    Catalog(CatalogArgs),

    /// List synthetic forecast scenarios
    Scenarios,
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Configuration file (TOML or JSON)
    #[arg(
        long,
        help = "Path to a chocoplan.toml or chocoplan.json file",
        long_help = "Explicit configuration file. Without it, chocoplan.toml and then\n\
          chocoplan.json are looked up in the working directory, falling back to\n\
          built-in defaults with CHOCOPLAN_* environment overrides."
    )]
    pub config: Option<PathBuf>,

    /// Synthetic forecast scenario
    #[arg(
        long,
        default_value = "usual_day",
        conflicts_with = "forecast_json",
        help = "Synthetic forecast scenario",
        long_help = "Available scenarios:\n  \
          - flat: same price and climate every hour\n  \
          - usual_day: cheap night, evening peak, mild hall\n  \
          - peak_tariff: expensive P1 hours, cheap otherwise\n  \
          - hot_afternoon: usual prices with a hot, humid afternoon\n  \
          - volatile: seeded random price swings\n\
          \nIgnored when using --forecast-json"
    )]
    pub scenario: String,

    /// Forecast JSON export
    #[arg(long, help = "Read prices and climate from a JSON file instead of a scenario")]
    pub forecast_json: Option<PathBuf>,

    /// Output target in kg
    #[arg(long, help = "Daily output target in kg (defaults to the configured target)")]
    pub target_kg: Option<f64>,

    /// Share of premium batches
    #[arg(
        long,
        help = "Share of batches made as premium (0-1)",
        long_help = "Share of batches made as premium, between 0 and 1.\n\
          Replaces the configured quality mix; the rest goes to the default quality."
    )]
    pub premium_ratio: Option<f64>,

    /// Day to plan
    #[arg(long, help = "Day to plan as YYYY-MM-DD (defaults to tomorrow, UTC)")]
    pub date: Option<NaiveDate>,

    /// Output format
    #[arg(
        long,
        default_value = "table",
        value_parser = ["table", "json"],
        help = "Output format (table or json)"
    )]
    pub format: String,

    /// Skip the production-state classifier
    #[arg(
        long,
        default_value_t = false,
        help = "Label every hour Moderate instead of running the state classifier"
    )]
    pub no_classifier: bool,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Configuration file (TOML or JSON)
    #[arg(long, help = "Path to a chocoplan.toml or chocoplan.json file")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plan_defaults() {
        let cli = Cli::try_parse_from(["chocoplan", "plan"]).unwrap();
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan subcommand");
        };
        assert_eq!(args.scenario, "usual_day");
        assert_eq!(args.format, "table");
        assert!(args.forecast_json.is_none());
        assert!(!args.no_classifier);
    }

    #[test]
    fn test_plan_arguments() {
        let cli = Cli::try_parse_from([
            "chocoplan",
            "plan",
            "--date",
            "2026-03-02",
            "--target-kg",
            "150",
            "--premium-ratio",
            "0.5",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan subcommand");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 3, 2));
        assert_eq!(args.target_kg, Some(150.0));
        assert_eq!(args.premium_ratio, Some(0.5));
        assert_eq!(args.format, "json");
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["chocoplan", "plan", "--format", "csv"]).is_err());
    }
}
