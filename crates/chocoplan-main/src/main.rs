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


mod cli;
mod config;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use chocoplan_adapters::{ForecastScenario, JsonForecastFile, ScenarioForecast, ThresholdStateClassifier};
use chocoplan_core::{
    ClimateForecastSource, PlanRequest, PlanningService, PriceForecastSource, ProductionPlanner,
};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use cli::{CatalogArgs, Cli, Commands, JsonFormatter, PlanArgs, TableFormatter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with env filter support
    // Respects RUST_LOG environment variable; logs go to stderr so JSON output stays clean
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    match cli.command {
        Commands::Plan(args) => run_plan(&args).await,
        Commands::Catalog(args) => run_catalog(&args),
        Commands::Scenarios => {
            print!("{}", TableFormatter::format_scenarios());
            Ok(())
        }
    }
}

async fn run_plan(args: &PlanArgs) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let planner = ProductionPlanner::new(config).context("Failed to build planner")?;

    let (prices, climate): (Arc<dyn PriceForecastSource>, Arc<dyn ClimateForecastSource>) =
        if let Some(path) = &args.forecast_json {
            let source = Arc::new(JsonForecastFile::new(path));
            (source.clone(), source)
        } else {
            let scenario: ForecastScenario = args.scenario.parse()?;
            let source = Arc::new(ScenarioForecast::new(scenario));
            (source.clone(), source)
        };
    info!("📈 Forecast source: {}", prices.name());

    let classifier = Arc::new(ThresholdStateClassifier::from_config(planner.config()));
    let mut service = PlanningService::new(planner, prices, climate);
    if !args.no_classifier {
        service = service.with_classifier(classifier);
    }

    let request = PlanRequest {
        target_date: args.date,
        target_kg: args.target_kg,
        quality_mix: args
            .premium_ratio
            .map(|ratio| BTreeMap::from([("premium".to_owned(), ratio)])),
    };

    let plan = service.plan(&request, Utc::now()).await?;

    match args.format.as_str() {
        "json" => println!("{}", JsonFormatter::format_plan(&plan)?),
        _ => print!("{}", TableFormatter::format_plan(&plan)),
    }
    Ok(())
}

fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let planner = ProductionPlanner::new(config).context("Failed to build planner")?;
    print!("{}", TableFormatter::format_catalog(planner.catalog()));
    Ok(())
}
