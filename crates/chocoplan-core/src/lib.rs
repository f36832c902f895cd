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

pub mod baseline;
pub mod catalog;
pub mod error;
pub mod forecast;
pub mod placement;
pub mod planner;
pub mod recommendations;
pub mod request;
pub mod scoring;
pub mod service;
pub mod timeline;
pub mod traits;
pub mod validation;

// Re-export the planner surface
pub use baseline::BaselineEstimator;
pub use catalog::{ProcessCatalog, QualityProfile};
pub use error::{CatalogError, CollaboratorError, PlanError, ValidationError};
pub use forecast::{NormalizedForecast, assemble, normalize_hourly};
pub use placement::{BatchPlacer, PlacementOutcome};
pub use planner::ProductionPlanner;
pub use request::{PlanRequest, ResolvedRequest};
pub use scoring::{HourScore, HourScorer};
pub use service::PlanningService;
pub use timeline::{TimelineBuilder, climate_status, tariff_period};
pub use traits::{ClimateForecastSource, PriceForecastSource, ProductionStateClassifier};
pub use validation::ValidateConfig;
