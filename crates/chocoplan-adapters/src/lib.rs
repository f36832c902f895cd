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

//! Concrete collaborators for the planner: file and scenario forecast
//! providers, and a rule-based production-state classifier.

pub mod classifier;
pub mod json_file;
pub mod scenario;

pub use classifier::ThresholdStateClassifier;
pub use json_file::{ForecastFile, JsonForecastFile};
pub use scenario::{ForecastScenario, SCENARIO_PRESETS, ScenarioForecast};
