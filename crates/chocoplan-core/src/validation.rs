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

use std::collections::HashSet;

use chocoplan_types::{HOURS_PER_DAY, PlannerConfig};

use crate::catalog::ProcessCatalog;
use crate::error::ValidationError;

/// Sanity checks for a loaded [`PlannerConfig`]
pub trait ValidateConfig {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl ValidateConfig for PlannerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let production = &self.production;
        if !production.batch_size_kg.is_finite() || production.batch_size_kg <= 0.0 {
            return Err(ValidationError::config(format!(
                "production.batch_size_kg must be positive, got {}",
                production.batch_size_kg
            )));
        }
        if !production.daily_target_kg.is_finite() || production.daily_target_kg < 0.0 {
            return Err(ValidationError::InvalidTarget(production.daily_target_kg));
        }
        if production.max_batches == 0 {
            return Err(ValidationError::config("production.max_batches must be at least 1"));
        }
        let default_batches = (production.daily_target_kg / production.batch_size_kg).ceil();
        if default_batches > f64::from(production.max_batches) {
            return Err(ValidationError::config(format!(
                "production.daily_target_kg needs {default_batches} batches, above max_batches {}",
                production.max_batches
            )));
        }

        let catalog = ProcessCatalog::from_config(&self.catalog)?;
        if !catalog.contains(&production.default_quality) {
            return Err(ValidationError::UnknownQuality(
                production.default_quality.clone(),
            ));
        }
        let mut ratio_sum = 0.0;
        for (quality, ratio) in &production.quality_mix {
            if !catalog.contains(quality) {
                return Err(ValidationError::UnknownQuality(quality.clone()));
            }
            if !(0.0..=1.0).contains(ratio) {
                return Err(ValidationError::InvalidRatio {
                    quality: quality.clone(),
                    ratio: *ratio,
                });
            }
            ratio_sum += ratio;
        }
        if ratio_sum > 1.0 + 1e-9 {
            return Err(ValidationError::RatioSumExceeded(ratio_sum));
        }

        let scoring = &self.scoring;
        if scoring.price_ceiling.is_nan() || scoring.price_ceiling <= 0.0 {
            return Err(ValidationError::config(
                "scoring.price_ceiling must be positive",
            ));
        }
        if scoring.price_weight < 0.0
            || scoring.climate_weight < 0.0
            || (scoring.price_weight + scoring.climate_weight - 1.0).abs() > 1e-6
        {
            return Err(ValidationError::config(format!(
                "scoring weights must be non-negative and sum to 1, got {} + {}",
                scoring.price_weight, scoring.climate_weight
            )));
        }
        if scoring.comfort_band.min_c > scoring.comfort_band.max_c {
            return Err(ValidationError::config(
                "scoring.comfort_band min_c is above max_c",
            ));
        }
        if scoring.temp_decay_span_c.is_nan()
            || scoring.temp_decay_span_c <= 0.0
            || scoring.humidity_decay_span_pct.is_nan()
            || scoring.humidity_decay_span_pct <= 0.0
        {
            return Err(ValidationError::config("scoring decay spans must be positive"));
        }

        let defaults = &self.defaults;
        if !defaults.price_per_kwh.is_finite()
            || defaults.price_per_kwh < 0.0
            || !defaults.temperature_c.is_finite()
            || !(0.0..=100.0).contains(&defaults.humidity_pct)
        {
            return Err(ValidationError::config(
                "defaults must hold a non-negative price and humidity within 0-100",
            ));
        }

        let mut seen = HashSet::new();
        for hour in self.tariff.peak_hours.iter().chain(&self.tariff.standard_hours) {
            if *hour >= HOURS_PER_DAY {
                return Err(ValidationError::config(format!(
                    "tariff hour {hour} is outside 0-23"
                )));
            }
            if !seen.insert(*hour) {
                return Err(ValidationError::config(format!(
                    "tariff hour {hour} is listed more than once"
                )));
            }
        }

        let climate = &self.climate_status;
        if climate.optimal_temp_max > climate.acceptable_temp_max
            || climate.optimal_humidity_max > climate.acceptable_humidity_max
        {
            return Err(ValidationError::config(
                "climate_status optimal limits must not exceed acceptable limits",
            ));
        }

        if self.baseline.hours.is_empty() {
            return Err(ValidationError::config("baseline.hours must not be empty"));
        }
        if let Some(hour) = self.baseline.hours.iter().find(|h| **h >= HOURS_PER_DAY) {
            return Err(ValidationError::config(format!(
                "baseline hour {hour} is outside 0-23"
            )));
        }

        if self.projections.monthly_business_days < 0.0
            || self.projections.annual_business_days < 0.0
        {
            return Err(ValidationError::config(
                "projection multipliers must not be negative",
            ));
        }

        let rec = &self.recommendations;
        if rec.strong_savings_pct < rec.good_savings_pct
            || rec.good_savings_pct < rec.moderate_savings_pct
        {
            return Err(ValidationError::config(
                "savings thresholds must satisfy strong >= good >= moderate",
            ));
        }

        if self.collaborators.timeout_ms == 0 {
            return Err(ValidationError::config(
                "collaborators.timeout_ms must be positive",
            ));
        }

        Ok(())
    }
}
