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

use chocoplan_types::HourlyForecast;
use chocoplan_types::config::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Desirability of one hour for production
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourScore {
    pub hour: u32,
    pub price_per_kwh: f64,
    pub price_score: f64,
    pub climate_score: f64,

    /// Weighted total in 0..=1
    pub score: f64,
}

/// Scores hours from price and climate forecasts
#[derive(Debug, Clone, Copy)]
pub struct HourScorer<'a> {
    config: &'a ScoringConfig,
}

impl<'a> HourScorer<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// 1 at zero price, falling linearly to 0 at the price ceiling
    pub fn price_score(&self, price_per_kwh: f64) -> f64 {
        (1.0 - (price_per_kwh / self.config.price_ceiling).min(1.0)).clamp(0.0, 1.0)
    }

    /// 1 inside the comfort band, falling linearly to 0 at `temp_decay_span_c` outside it
    pub fn temperature_score(&self, temperature_c: f64) -> f64 {
        let band = &self.config.comfort_band;
        let distance = if temperature_c < band.min_c {
            band.min_c - temperature_c
        } else if temperature_c > band.max_c {
            temperature_c - band.max_c
        } else {
            return 1.0;
        };
        (1.0 - distance / self.config.temp_decay_span_c).max(0.0)
    }

    /// 1 up to the ideal maximum, falling linearly to 0 at `humidity_decay_span_pct` above it
    pub fn humidity_score(&self, humidity_pct: f64) -> f64 {
        if humidity_pct <= self.config.humidity_ideal_max {
            return 1.0;
        }
        let excess = humidity_pct - self.config.humidity_ideal_max;
        (1.0 - excess / self.config.humidity_decay_span_pct).max(0.0)
    }

    pub fn score_hour(&self, forecast: &HourlyForecast) -> HourScore {
        let price_score = self.price_score(forecast.price_per_kwh);
        let climate_score = (self.temperature_score(forecast.temperature_c)
            + self.humidity_score(forecast.humidity_pct))
            / 2.0;
        let score = (self.config.price_weight * price_score
            + self.config.climate_weight * climate_score)
            .clamp(0.0, 1.0);

        HourScore {
            hour: forecast.hour,
            price_per_kwh: forecast.price_per_kwh,
            price_score,
            climate_score,
            score,
        }
    }

    pub fn score_all(&self, forecasts: &[HourlyForecast]) -> Vec<HourScore> {
        forecasts.iter().map(|f| self.score_hour(f)).collect()
    }
}

/// Candidate order: highest score first, then cheapest, then earliest hour
pub fn rank_hours(scores: &[HourScore]) -> Vec<HourScore> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(compare_candidates);
    ranked
}

fn compare_candidates(a: &HourScore, b: &HourScore) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.price_per_kwh.total_cmp(&b.price_per_kwh))
        .then_with(|| a.hour.cmp(&b.hour))
}
