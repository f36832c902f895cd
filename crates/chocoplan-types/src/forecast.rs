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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of hourly slots in the planning horizon
pub const HOURS_PER_DAY: u32 = 24;

// ============= Forecast Inputs =============

/// Merged price and climate forecast for one hour of the target day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Hour of day (0-23)
    pub hour: u32,

    /// Forecast energy price (EUR/kWh)
    pub price_per_kwh: f64,

    /// Forecast ambient temperature (°C)
    pub temperature_c: f64,

    /// Forecast relative humidity (%)
    pub humidity_pct: f64,
}

/// A single point returned by the price forecast provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Start of the hour this price applies to
    pub timestamp: DateTime<Utc>,

    /// Predicted price (EUR/kWh)
    pub predicted_price: f64,

    /// Lower bound of the prediction interval
    #[serde(default)]
    pub confidence_lower: f64,

    /// Upper bound of the prediction interval
    #[serde(default)]
    pub confidence_upper: f64,
}

/// A single point returned by the climate forecast provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimatePoint {
    /// Hour of the target day (0-23)
    pub hour: u32,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    #[serde(default)]
    pub pressure_hpa: Option<f64>,
}

/// Record of which forecast values were substituted with defaults
///
/// A plan built on fallback data is still a valid plan, but callers need to be able
/// to tell it apart from one built on real forecasts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputQuality {
    /// Hours without a price from the provider
    pub missing_price_hours: Vec<u32>,

    /// Hours without climate data from the provider
    pub missing_climate_hours: Vec<u32>,

    /// Hours where at least one provided value was rejected (NaN, negative price,
    /// humidity outside 0-100 %)
    pub malformed_hours: Vec<u32>,

    /// Price provider returned nothing usable for the target day
    pub price_fallback: bool,

    /// Climate provider returned nothing usable for the target day
    pub climate_fallback: bool,
}

impl InputQuality {
    /// True when any value of the horizon came from defaults
    pub fn is_degraded(&self) -> bool {
        self.price_fallback
            || self.climate_fallback
            || !self.missing_price_hours.is_empty()
            || !self.missing_climate_hours.is_empty()
            || !self.malformed_hours.is_empty()
    }

    /// Number of distinct hours affected by any substitution
    pub fn affected_hours(&self) -> usize {
        let mut hours: Vec<u32> = self
            .missing_price_hours
            .iter()
            .chain(&self.missing_climate_hours)
            .chain(&self.malformed_hours)
            .copied()
            .collect();
        hours.sort_unstable();
        hours.dedup();
        hours.len()
    }
}
