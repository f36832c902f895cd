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

//! Synthetic forecast scenarios for trying the planner without live providers
//!
//! Scenarios:
//! - **Flat**: same price and climate every hour
//! - **Usual Day**: cheap night, morning ramp, evening peak, mild hall
//! - **Peak Tariff**: P1 hours expensive, everything else cheap
//! - **Hot Afternoon**: usual prices with a hot and humid afternoon
//! - **Volatile**: seeded random swings around a day pattern
//!
//! Every scenario is deterministic: the volatile one draws from a seeded RNG.

use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use chocoplan_core::{ClimateForecastSource, PriceForecastSource};
use chocoplan_types::{ClimatePoint, HOURS_PER_DAY, PricePoint};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seed used when a volatile scenario is picked by id
pub const DEFAULT_VOLATILE_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ForecastScenario {
    Flat,
    UsualDay,
    PeakTariff,
    HotAfternoon,
    Volatile { seed: u64 },
}

impl ForecastScenario {
    pub fn name(&self) -> &str {
        match self {
            Self::Flat => "Flat",
            Self::UsualDay => "Usual Day",
            Self::PeakTariff => "Peak Tariff",
            Self::HotAfternoon => "Hot Afternoon",
            Self::Volatile { .. } => "Volatile",
        }
    }

    /// Hourly prices for `date` and the following day (EUR/kWh)
    pub fn generate_prices(&self, date: NaiveDate) -> Vec<PricePoint> {
        let hourly: Vec<f64> = match self {
            Self::Flat => vec![0.15; HOURS_PER_DAY as usize],
            Self::UsualDay | Self::HotAfternoon => (0..HOURS_PER_DAY).map(usual_day_price).collect(),
            Self::PeakTariff => (0..HOURS_PER_DAY)
                .map(|hour| if is_peak(hour) { 0.35 } else { 0.10 })
                .collect(),
            Self::Volatile { seed } => volatile_prices(*seed),
        };

        // Providers hand out more than one day; the planner selects by date
        (0..2 * HOURS_PER_DAY)
            .map(|offset| {
                let price = hourly[(offset % HOURS_PER_DAY) as usize];
                PricePoint {
                    timestamp: date.and_time(NaiveTime::MIN).and_utc()
                        + TimeDelta::hours(i64::from(offset)),
                    predicted_price: price,
                    confidence_lower: price * 0.9,
                    confidence_upper: price * 1.1,
                }
            })
            .collect()
    }

    /// Hall climate per hour of the day
    pub fn generate_climate(&self) -> Vec<ClimatePoint> {
        (0..HOURS_PER_DAY)
            .map(|hour| {
                let (temperature_c, humidity_pct) = match self {
                    Self::Flat => (22.0, 55.0),
                    Self::PeakTariff => (22.0, 45.0),
                    Self::UsualDay | Self::Volatile { .. } => usual_day_climate(hour),
                    Self::HotAfternoon => hot_afternoon_climate(hour),
                };
                ClimatePoint {
                    hour,
                    temperature_c,
                    humidity_pct,
                    pressure_hpa: Some(1013.0),
                }
            })
            .collect()
    }
}

impl FromStr for ForecastScenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SCENARIO_PRESETS
            .iter()
            .find(|preset| preset.id == s)
            .map(|preset| preset.scenario)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown scenario '{}'. Available: {}",
                    s,
                    SCENARIO_PRESETS
                        .iter()
                        .map(|p| p.id)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Scenario preset with metadata
#[derive(Debug, Clone)]
pub struct ScenarioPreset {
    pub id: &'static str,
    pub description: &'static str,
    pub scenario: ForecastScenario,
}

pub const SCENARIO_PRESETS: &[ScenarioPreset] = &[
    ScenarioPreset {
        id: "flat",
        description: "0.15 EUR/kWh, 22 °C and 55% every hour",
        scenario: ForecastScenario::Flat,
    },
    ScenarioPreset {
        id: "usual_day",
        description: "Cheap night (0-6), morning ramp, midday plateau, evening peak (18-22)",
        scenario: ForecastScenario::UsualDay,
    },
    ScenarioPreset {
        id: "peak_tariff",
        description: "0.35 EUR/kWh in P1 hours (10-14, 18-22), 0.10 EUR/kWh otherwise",
        scenario: ForecastScenario::PeakTariff,
    },
    ScenarioPreset {
        id: "hot_afternoon",
        description: "Usual prices, hall reaching 33 °C and 72% humidity in the afternoon",
        scenario: ForecastScenario::HotAfternoon,
    },
    ScenarioPreset {
        id: "volatile",
        description: "Seeded random swings between 0.03 and 0.40 EUR/kWh",
        scenario: ForecastScenario::Volatile {
            seed: DEFAULT_VOLATILE_SEED,
        },
    },
];

fn is_peak(hour: u32) -> bool {
    matches!(hour, 10..=13 | 18..=21)
}

/// Pattern:
/// - 00:00-06:00: 0.08 (cheap night)
/// - 06:00-10:00: 0.16 (morning ramp)
/// - 10:00-14:00: 0.22 (midday)
/// - 14:00-18:00: 0.14 (afternoon)
/// - 18:00-22:00: 0.26 (evening peak)
/// - 22:00-24:00: 0.12 (late evening)
fn usual_day_price(hour: u32) -> f64 {
    match hour {
        0..=5 => 0.08,
        6..=9 => 0.16,
        10..=13 => 0.22,
        14..=17 => 0.14,
        18..=21 => 0.26,
        _ => 0.12,
    }
}

fn usual_day_climate(hour: u32) -> (f64, f64) {
    match hour {
        0..=6 => (19.0, 52.0),
        7..=11 => (22.0, 50.0),
        12..=17 => (25.0, 48.0),
        18..=21 => (23.0, 52.0),
        _ => (20.0, 54.0),
    }
}

fn hot_afternoon_climate(hour: u32) -> (f64, f64) {
    match hour {
        0..=6 => (21.0, 58.0),
        7..=10 => (26.0, 62.0),
        11..=13 => (30.0, 68.0),
        14..=17 => (33.0, 72.0),
        18..=20 => (28.0, 65.0),
        _ => (23.0, 60.0),
    }
}

fn volatile_prices(seed: u64) -> Vec<f64> {
    // (first hour, last hour, low, high)
    const PATTERN: [(u32, u32, f64, f64); 8] = [
        (0, 2, 0.05, 0.10),
        (3, 4, 0.03, 0.06),
        (5, 8, 0.12, 0.30),
        (9, 11, 0.18, 0.35),
        (12, 14, 0.06, 0.14),
        (15, 17, 0.15, 0.28),
        (18, 20, 0.28, 0.40),
        (21, 23, 0.08, 0.18),
    ];

    let mut rng = StdRng::seed_from_u64(seed);
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let (low, high) = PATTERN
                .iter()
                .find(|&&(first, last, _, _)| (first..=last).contains(&hour))
                .map_or((0.10, 0.20), |&(_, _, low, high)| (low, high));
            rng.gen_range(low..high)
        })
        .collect()
}

/// Price and climate provider backed by a [`ForecastScenario`]
#[derive(Debug, Clone, Copy)]
pub struct ScenarioForecast {
    scenario: ForecastScenario,
}

impl ScenarioForecast {
    pub fn new(scenario: ForecastScenario) -> Self {
        Self { scenario }
    }
}

#[async_trait]
impl PriceForecastSource for ScenarioForecast {
    async fn fetch_prices(&self, target_date: NaiveDate) -> Result<Vec<PricePoint>> {
        Ok(self.scenario.generate_prices(target_date))
    }

    fn name(&self) -> &str {
        self.scenario.name()
    }
}

#[async_trait]
impl ClimateForecastSource for ScenarioForecast {
    async fn fetch_climate(&self, _target_date: NaiveDate) -> Result<Vec<ClimatePoint>> {
        Ok(self.scenario.generate_climate())
    }

    fn name(&self) -> &str {
        self.scenario.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_all_presets_cover_two_days() {
        for preset in SCENARIO_PRESETS {
            let prices = preset.scenario.generate_prices(date());
            assert_eq!(prices.len(), 48, "preset '{}'", preset.id);
            assert_eq!(prices[0].timestamp.date_naive(), date());
            assert_eq!(prices[47].timestamp.hour(), 23);
            assert_eq!(preset.scenario.generate_climate().len(), 24);
        }
    }

    #[test]
    fn test_volatile_is_reproducible() {
        let a = ForecastScenario::Volatile { seed: 7 }.generate_prices(date());
        let b = ForecastScenario::Volatile { seed: 7 }.generate_prices(date());
        let c = ForecastScenario::Volatile { seed: 8 }.generate_prices(date());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_peak_tariff_pattern() {
        let prices = ForecastScenario::PeakTariff.generate_prices(date());
        assert_eq!(prices[12].predicted_price, 0.35);
        assert_eq!(prices[3].predicted_price, 0.10);
    }

    #[test]
    fn test_usual_day_evening_above_night() {
        let prices = ForecastScenario::UsualDay.generate_prices(date());
        let night: f64 = prices[0..6].iter().map(|p| p.predicted_price).sum::<f64>() / 6.0;
        let evening: f64 = prices[18..22].iter().map(|p| p.predicted_price).sum::<f64>() / 4.0;
        assert!(evening > night * 2.0);
    }

    #[test]
    fn test_parse_preset_ids() {
        assert_eq!(
            "hot_afternoon".parse::<ForecastScenario>().unwrap(),
            ForecastScenario::HotAfternoon
        );
        assert!("sunny".parse::<ForecastScenario>().is_err());
    }

    #[tokio::test]
    async fn test_provider_returns_scenario_data() {
        let provider = ScenarioForecast::new(ForecastScenario::Flat);
        let prices = provider.fetch_prices(date()).await.unwrap();
        let climate = provider.fetch_climate(date()).await.unwrap();
        assert!(prices.iter().all(|p| p.predicted_price == 0.15));
        assert!(climate.iter().all(|c| c.temperature_c == 22.0));
    }
}
