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

pub mod batch;
pub mod config;
pub mod forecast;
pub mod plan;
pub mod process;
pub mod timeline;

// Re-export common types for convenience
pub use batch::{BatchRecommendation, ClimateSnapshot, ProcessSchedule, ProductionBatch};
pub use config::PlannerConfig;
pub use forecast::{ClimatePoint, HOURS_PER_DAY, HourlyForecast, InputQuality, PricePoint};
pub use plan::{Baseline, OptimizationPlan, Savings};
pub use process::{ProcessDefinition, QualityProfileConfig, TemperatureRange};
pub use timeline::{
    ClimateStatus, HourlyTimelineEntry, ProductionState, StateClassification, TariffPeriod,
};
