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

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chocoplan_core::{ClimateForecastSource, PriceForecastSource};
use chocoplan_types::{ClimatePoint, PricePoint};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Most price points a provider hands out (one week of hours)
pub const MAX_PRICE_POINTS: usize = 168;

/// On-disk layout: `{"prices": [...], "climate": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastFile {
    #[serde(default)]
    pub prices: Vec<PricePoint>,
    #[serde(default)]
    pub climate: Vec<ClimatePoint>,
}

/// Forecast provider reading a JSON export
///
/// The file is re-read on each call so an external job can refresh it between plans.
#[derive(Debug, Clone)]
pub struct JsonForecastFile {
    path: PathBuf,
}

impl JsonForecastFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<ForecastFile> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read forecast file {}", self.path.display()))?;
        let file: ForecastFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse forecast file {}", self.path.display()))?;
        debug!(
            "Loaded {} price and {} climate points from {}",
            file.prices.len(),
            file.climate.len(),
            self.path.display()
        );
        Ok(file)
    }
}

#[async_trait]
impl PriceForecastSource for JsonForecastFile {
    async fn fetch_prices(&self, _target_date: NaiveDate) -> Result<Vec<PricePoint>> {
        let mut prices = self.load().await?.prices;
        if prices.len() > MAX_PRICE_POINTS {
            warn!(
                "Forecast file holds {} price points, keeping the first {}",
                prices.len(),
                MAX_PRICE_POINTS
            );
            prices.truncate(MAX_PRICE_POINTS);
        }
        Ok(prices)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

#[async_trait]
impl ClimateForecastSource for JsonForecastFile {
    async fn fetch_climate(&self, _target_date: NaiveDate) -> Result<Vec<ClimatePoint>> {
        Ok(self.load().await?.climate)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}
