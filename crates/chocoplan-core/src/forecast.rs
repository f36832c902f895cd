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

//! Turns raw provider output into exactly one forecast entry per hour.
//!
//! Gaps and malformed values are replaced by [`ForecastDefaults`] and recorded in
//! [`InputQuality`] so a plan built on fallback data stays distinguishable.

use chocoplan_types::config::ForecastDefaults;
use chocoplan_types::{ClimatePoint, HOURS_PER_DAY, HourlyForecast, InputQuality, PricePoint};
use chrono::{NaiveDate, Timelike};
use tracing::{debug, warn};

/// 24 hourly entries indexed by hour, plus a record of substitutions
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedForecast {
    pub hours: Vec<HourlyForecast>,
    pub quality: InputQuality,
}

impl NormalizedForecast {
    /// Horizon made entirely of default values, flagged as fallback
    pub fn fallback(defaults: &ForecastDefaults) -> Self {
        assemble(None, None, NaiveDate::MIN, defaults)
    }

    pub fn price_at(&self, hour: u32) -> f64 {
        self.hours[(hour % HOURS_PER_DAY) as usize].price_per_kwh
    }

    pub fn mean_temperature(&self) -> f64 {
        self.hours.iter().map(|h| h.temperature_c).sum::<f64>() / f64::from(HOURS_PER_DAY)
    }

    pub fn mean_humidity(&self) -> f64 {
        self.hours.iter().map(|h| h.humidity_pct).sum::<f64>() / f64::from(HOURS_PER_DAY)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    price: Option<f64>,
    climate: Option<(f64, f64)>,
}

/// Normalize already-merged hourly entries (first entry wins for duplicate hours)
pub fn normalize_hourly(entries: &[HourlyForecast], defaults: &ForecastDefaults) -> NormalizedForecast {
    let mut slots = [Slot::default(); HOURS_PER_DAY as usize];
    for entry in entries {
        let Some(slot) = slots.get_mut(entry.hour as usize) else {
            warn!("Ignoring forecast entry for out-of-range hour {}", entry.hour);
            continue;
        };
        if slot.price.is_none() && slot.climate.is_none() {
            slot.price = Some(entry.price_per_kwh);
            slot.climate = Some((entry.temperature_c, entry.humidity_pct));
        }
    }
    finish(&slots, false, false, defaults)
}

/// Select the target day from provider output and merge prices with climate
///
/// `None` means the provider was unavailable. Price points are matched by the UTC
/// date of their timestamp; the hour index is the timestamp hour.
pub fn assemble(
    prices: Option<&[PricePoint]>,
    climate: Option<&[ClimatePoint]>,
    target_date: NaiveDate,
    defaults: &ForecastDefaults,
) -> NormalizedForecast {
    let mut slots = [Slot::default(); HOURS_PER_DAY as usize];

    let mut price_matches = 0;
    for point in prices.unwrap_or_default() {
        if point.timestamp.date_naive() != target_date {
            continue;
        }
        let slot = &mut slots[point.timestamp.hour() as usize];
        if slot.price.is_none() {
            slot.price = Some(point.predicted_price);
            price_matches += 1;
        }
    }

    let mut climate_matches = 0;
    for point in climate.unwrap_or_default() {
        let Some(slot) = slots.get_mut(point.hour as usize) else {
            warn!("Ignoring climate point for out-of-range hour {}", point.hour);
            continue;
        };
        if slot.climate.is_none() {
            slot.climate = Some((point.temperature_c, point.humidity_pct));
            climate_matches += 1;
        }
    }

    debug!(
        "Forecast for {}: {} price hours, {} climate hours",
        target_date, price_matches, climate_matches
    );

    finish(&slots, price_matches == 0, climate_matches == 0, defaults)
}

fn finish(
    slots: &[Slot],
    price_fallback: bool,
    climate_fallback: bool,
    defaults: &ForecastDefaults,
) -> NormalizedForecast {
    let mut quality = InputQuality {
        price_fallback,
        climate_fallback,
        ..Default::default()
    };
    let mut hours = Vec::with_capacity(slots.len());

    for (hour, slot) in (0..HOURS_PER_DAY).zip(slots) {
        let mut malformed = false;

        let price_per_kwh = match slot.price {
            Some(price) if price.is_finite() && price >= 0.0 => price,
            Some(_) => {
                malformed = true;
                defaults.price_per_kwh
            }
            None => {
                quality.missing_price_hours.push(hour);
                defaults.price_per_kwh
            }
        };

        let (temperature_c, humidity_pct) = match slot.climate {
            Some((temperature, humidity)) => {
                let temperature = if temperature.is_finite() {
                    temperature
                } else {
                    malformed = true;
                    defaults.temperature_c
                };
                let humidity = if humidity.is_finite() && (0.0..=100.0).contains(&humidity) {
                    humidity
                } else {
                    malformed = true;
                    defaults.humidity_pct
                };
                (temperature, humidity)
            }
            None => {
                quality.missing_climate_hours.push(hour);
                (defaults.temperature_c, defaults.humidity_pct)
            }
        };

        if malformed {
            quality.malformed_hours.push(hour);
        }

        hours.push(HourlyForecast {
            hour,
            price_per_kwh,
            temperature_c,
            humidity_pct,
        });
    }

    if quality.is_degraded() {
        warn!(
            "Degraded forecast input: {} hours substituted (price fallback: {}, climate fallback: {}, malformed: {:?})",
            quality.affected_hours(),
            quality.price_fallback,
            quality.climate_fallback,
            quality.malformed_hours
        );
    }

    NormalizedForecast { hours, quality }
}
