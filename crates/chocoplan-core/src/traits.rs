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

use anyhow::Result;
use async_trait::async_trait;
use chocoplan_types::{ClimatePoint, PricePoint, StateClassification};
use chrono::NaiveDate;

// ============= Collaborator Traits =============

/// Hourly price forecast provider
/// The planner never knows whether prices come from a model, a file or a market feed
#[async_trait]
pub trait PriceForecastSource: Send + Sync {
    /// Up to 168 hourly points; the planner picks the ones on `target_date` (UTC)
    async fn fetch_prices(&self, target_date: NaiveDate) -> Result<Vec<PricePoint>>;

    /// Get data source name for logging
    fn name(&self) -> &str;
}

/// Hourly climate forecast provider for the production hall
#[async_trait]
pub trait ClimateForecastSource: Send + Sync {
    /// Up to 24 hourly points for `target_date`
    async fn fetch_climate(&self, target_date: NaiveDate) -> Result<Vec<ClimatePoint>>;

    /// Get data source name for logging
    fn name(&self) -> &str;
}

/// Advisory production-state labeller
/// Only annotates the timeline; scheduling never depends on it
#[async_trait]
pub trait ProductionStateClassifier: Send + Sync {
    async fn classify(
        &self,
        price_per_kwh: f64,
        temperature_c: f64,
        humidity_pct: f64,
    ) -> Result<StateClassification>;

    fn name(&self) -> &str;
}
