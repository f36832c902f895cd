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

//! The 24-hour annotated view of a plan.

use chocoplan_types::config::{ClimateStatusConfig, TariffConfig};
use chocoplan_types::{
    ClimateStatus, HourlyTimelineEntry, ProductionBatch, StateClassification, TariffPeriod,
};
use tracing::trace;

use crate::forecast::NormalizedForecast;

/// Tariff period of an hour; anything not listed as peak or standard is off-peak
pub fn tariff_period(hour: u32, tariff: &TariffConfig) -> TariffPeriod {
    if tariff.peak_hours.contains(&hour) {
        TariffPeriod::P1
    } else if tariff.standard_hours.contains(&hour) {
        TariffPeriod::P2
    } else {
        TariffPeriod::P3
    }
}

pub fn climate_status(
    temperature_c: f64,
    humidity_pct: f64,
    config: &ClimateStatusConfig,
) -> ClimateStatus {
    if temperature_c <= config.optimal_temp_max && humidity_pct <= config.optimal_humidity_max {
        ClimateStatus::Optimal
    } else if temperature_c <= config.acceptable_temp_max
        && humidity_pct <= config.acceptable_humidity_max
    {
        ClimateStatus::Acceptable
    } else {
        ClimateStatus::Suboptimal
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimelineBuilder<'a> {
    tariff: &'a TariffConfig,
    climate: &'a ClimateStatusConfig,
}

impl<'a> TimelineBuilder<'a> {
    pub fn new(tariff: &'a TariffConfig, climate: &'a ClimateStatusConfig) -> Self {
        Self { tariff, climate }
    }

    /// One entry per forecast hour
    ///
    /// `states[h]` is the classifier answer for hour `h`. Hours without an answer,
    /// or all hours when `states` is `None`, get the default Moderate label with zero confidence.
    pub fn build(
        &self,
        forecast: &NormalizedForecast,
        batches: &[ProductionBatch],
        states: Option<&[Option<StateClassification>]>,
    ) -> Vec<HourlyTimelineEntry> {
        forecast
            .hours
            .iter()
            .map(|hour| {
                let active = batches.iter().find(|b| b.is_active_at(hour.hour));
                let state = states
                    .and_then(|s| s.get(hour.hour as usize).copied().flatten())
                    .unwrap_or_default();

                let entry = HourlyTimelineEntry {
                    hour: hour.hour,
                    price: hour.price_per_kwh,
                    tariff_period: tariff_period(hour.hour, self.tariff),
                    temperature: hour.temperature_c,
                    humidity: hour.humidity_pct,
                    climate_status: climate_status(
                        hour.temperature_c,
                        hour.humidity_pct,
                        self.climate,
                    ),
                    active_batch_id: active.map(|b| b.batch_id.clone()),
                    active_process_name: active
                        .and_then(|b| b.process_at(hour.hour))
                        .map(|p| p.process_name.clone()),
                    production_state: state.state,
                    state_confidence: state.confidence,
                };
                trace!("Timeline {:02}:00 {:?}", entry.hour, entry.active_batch_id);
                entry
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::normalize_hourly;
    use chocoplan_types::config::ForecastDefaults;
    use chocoplan_types::{
        BatchRecommendation, ClimateSnapshot, HourlyForecast, ProcessSchedule, ProductionState,
    };

    fn flat_forecast() -> NormalizedForecast {
        let entries: Vec<_> = (0..24)
            .map(|hour| HourlyForecast {
                hour,
                price_per_kwh: 0.12,
                temperature_c: 22.0,
                humidity_pct: 50.0,
            })
            .collect();
        normalize_hourly(&entries, &ForecastDefaults::default())
    }

    fn step(name: &str, start: u32, end: u32) -> ProcessSchedule {
        ProcessSchedule {
            process_name: name.to_owned(),
            start_offset_min: start,
            end_offset_min: end,
            energy_kwh: 1.0,
            avg_price_per_kwh: 0.12,
            cost: 0.12,
        }
    }

    fn batch(id: &str, start_hour: u32) -> ProductionBatch {
        ProductionBatch {
            batch_id: id.to_owned(),
            quality_type: "standard".to_owned(),
            start_hour,
            window_hours: 2,
            processes: vec![step("mixing", 0, 30), step("refining", 30, 90)],
            total_duration_hours: 1.5,
            total_energy_kwh: 2.0,
            total_cost: 0.24,
            avg_price_per_kwh: 0.12,
            climate_snapshot: ClimateSnapshot::default(),
            recommendation: BatchRecommendation::Optimal,
        }
    }

    #[test]
    fn test_tariff_periods_cover_the_day_without_overlap() {
        let tariff = TariffConfig::default();
        let periods: Vec<_> = (0..24).map(|h| tariff_period(h, &tariff)).collect();
        assert_eq!(periods.iter().filter(|p| **p == TariffPeriod::P1).count(), 8);
        assert_eq!(periods.iter().filter(|p| **p == TariffPeriod::P2).count(), 8);
        assert_eq!(periods.iter().filter(|p| **p == TariffPeriod::P3).count(), 8);
        assert_eq!(tariff_period(12, &tariff), TariffPeriod::P1);
        assert_eq!(tariff_period(9, &tariff), TariffPeriod::P2);
        assert_eq!(tariff_period(3, &tariff), TariffPeriod::P3);
    }

    #[test]
    fn test_climate_status_thresholds() {
        let config = ClimateStatusConfig::default();
        assert_eq!(climate_status(28.0, 60.0, &config), ClimateStatus::Optimal);
        assert_eq!(climate_status(28.5, 60.0, &config), ClimateStatus::Acceptable);
        assert_eq!(climate_status(25.0, 70.0, &config), ClimateStatus::Acceptable);
        assert_eq!(climate_status(32.5, 50.0, &config), ClimateStatus::Suboptimal);
        assert_eq!(climate_status(20.0, 71.0, &config), ClimateStatus::Suboptimal);
    }

    #[test]
    fn test_active_batch_and_process() {
        let tariff = TariffConfig::default();
        let climate = ClimateStatusConfig::default();
        let timeline = TimelineBuilder::new(&tariff, &climate).build(
            &flat_forecast(),
            &[batch("B01", 23)],
            None,
        );

        assert_eq!(timeline.len(), 24);
        assert_eq!(timeline[23].active_batch_id.as_deref(), Some("B01"));
        assert_eq!(timeline[23].active_process_name.as_deref(), Some("mixing"));
        assert_eq!(timeline[0].active_batch_id.as_deref(), Some("B01"));
        assert_eq!(timeline[0].active_process_name.as_deref(), Some("refining"));
        assert!(timeline[1].active_batch_id.is_none());
        assert!(timeline[1].active_process_name.is_none());
    }

    #[test]
    fn test_missing_classifier_defaults_to_moderate() {
        let tariff = TariffConfig::default();
        let climate = ClimateStatusConfig::default();
        let mut states = vec![None; 24];
        states[4] = Some(StateClassification {
            state: ProductionState::Optimal,
            confidence: 0.9,
        });

        let timeline = TimelineBuilder::new(&tariff, &climate).build(
            &flat_forecast(),
            &[],
            Some(states.as_slice()),
        );
        assert_eq!(timeline[4].production_state, ProductionState::Optimal);
        assert_eq!(timeline[4].state_confidence, 0.9);
        assert_eq!(timeline[5].production_state, ProductionState::Moderate);
        assert_eq!(timeline[5].state_confidence, 0.0);

        let unclassified =
            TimelineBuilder::new(&tariff, &climate).build(&flat_forecast(), &[], None);
        assert!(
            unclassified
                .iter()
                .all(|e| e.production_state == ProductionState::Moderate)
        );
    }
}
