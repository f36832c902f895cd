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

//! Greedy assignment of batches to conflict-free hour windows on the shared line.
//!
//! Quality types are placed longest window first. For every batch the ranked hour
//! list is scanned and the first start hour whose whole window (modulo 24) is
//! still free wins. Once a batch finds no such window, it and the rest of its
//! quality are counted as unscheduled and placement moves on to the next quality.

use std::collections::BTreeMap;

use chocoplan_types::config::RecommendationConfig;
use chocoplan_types::{
    BatchRecommendation, ClimateSnapshot, HOURS_PER_DAY, ProcessSchedule, ProductionBatch,
};
use tracing::{debug, warn};

use crate::catalog::{ProcessCatalog, QualityProfile};
use crate::error::ValidationError;
use crate::forecast::NormalizedForecast;
use crate::scoring::{HourScore, rank_hours};

/// Batches placed by one run, plus the ones that did not fit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlacementOutcome {
    /// Ordered by start hour, ids assigned in that order
    pub scheduled: Vec<ProductionBatch>,
    pub unscheduled_count: u32,
    pub unscheduled_by_quality: BTreeMap<String, u32>,
}

/// Sum of per-quality counts, rejected above `limit`
pub fn checked_total(counts: &BTreeMap<String, u32>, limit: u32) -> Result<u32, ValidationError> {
    let requested: u64 = counts.values().map(|&c| u64::from(c)).sum();
    match u32::try_from(requested) {
        Ok(total) if total <= limit => Ok(total),
        _ => Err(ValidationError::TooManyBatches { requested, limit }),
    }
}

/// Check signed per-quality counts against the catalog and the batch limit
pub fn validate_counts(
    requested: &BTreeMap<String, i64>,
    catalog: &ProcessCatalog,
    limit: u32,
) -> Result<BTreeMap<String, u32>, ValidationError> {
    let mut counts = BTreeMap::new();
    for (quality, count) in requested {
        if !catalog.contains(quality) {
            return Err(ValidationError::UnknownQuality(quality.clone()));
        }
        let Ok(count) = u32::try_from(*count) else {
            return Err(ValidationError::NegativeCount {
                quality: quality.clone(),
                count: *count,
            });
        };
        counts.insert(quality.clone(), count);
    }
    checked_total(&counts, limit)?;
    Ok(counts)
}

#[derive(Debug, Clone, Copy)]
pub struct BatchPlacer<'a> {
    catalog: &'a ProcessCatalog,
    labels: &'a RecommendationConfig,
}

impl<'a> BatchPlacer<'a> {
    pub fn new(catalog: &'a ProcessCatalog, labels: &'a RecommendationConfig) -> Self {
        Self { catalog, labels }
    }

    /// Place `requested` batches onto the horizon
    ///
    /// `scores` and `forecast` must describe the same 24 hours.
    pub fn place(
        &self,
        requested: &BTreeMap<String, u32>,
        scores: &[HourScore],
        forecast: &NormalizedForecast,
    ) -> Result<PlacementOutcome, ValidationError> {
        let mut profiles = requested
            .iter()
            .map(|(quality, count)| self.catalog.get_profile(quality).map(|p| (p, *count)))
            .collect::<Result<Vec<_>, _>>()?;
        profiles.sort_by(|(a, _), (b, _)| {
            b.required_hours()
                .cmp(&a.required_hours())
                .then_with(|| a.quality_type.cmp(&b.quality_type))
        });

        let ranked = rank_hours(scores);
        let mut occupied = [false; HOURS_PER_DAY as usize];
        let mut outcome = PlacementOutcome::default();

        for (profile, count) in profiles {
            let window = profile.required_hours();
            for placed in 0..count {
                let start = if window <= HOURS_PER_DAY {
                    ranked
                        .iter()
                        .map(|candidate| candidate.hour)
                        .find(|&hour| window_is_free(&occupied, hour, window))
                } else {
                    None
                };

                // Occupancy only grows, so the rest of this quality cannot fit either
                let Some(start_hour) = start else {
                    let left = count - placed;
                    warn!(
                        "No free {}h window left for {} '{}' batches, leaving them unscheduled",
                        window, left, profile.quality_type
                    );
                    outcome.unscheduled_count = outcome.unscheduled_count.saturating_add(left);
                    outcome
                        .unscheduled_by_quality
                        .insert(profile.quality_type.clone(), left);
                    break;
                };

                for offset in 0..window {
                    occupied[((start_hour + offset) % HOURS_PER_DAY) as usize] = true;
                }
                let batch = self.build_batch(profile, start_hour, forecast);
                debug!(
                    "Placed '{}' batch at {:02}:00 for {}h, cost {:.2} EUR",
                    batch.quality_type, batch.start_hour, batch.window_hours, batch.total_cost
                );
                outcome.scheduled.push(batch);
            }
        }

        outcome.scheduled.sort_by_key(|b| b.start_hour);
        for (index, batch) in outcome.scheduled.iter_mut().enumerate() {
            batch.batch_id = format!("B{:02}", index + 1);
        }

        Ok(outcome)
    }

    fn build_batch(
        &self,
        profile: &QualityProfile,
        start_hour: u32,
        forecast: &NormalizedForecast,
    ) -> ProductionBatch {
        let mut processes = Vec::with_capacity(profile.processes.len());
        let mut offset_min = 0;
        let mut worst = BatchRecommendation::Good;

        for definition in &profile.processes {
            let end_offset_min = offset_min + definition.nominal_duration_min;
            let mut step = ProcessSchedule {
                process_name: definition.name.clone(),
                start_offset_min: offset_min,
                end_offset_min,
                energy_kwh: definition.energy_kw * f64::from(definition.nominal_duration_min)
                    / 60.0,
                avg_price_per_kwh: 0.0,
                cost: 0.0,
            };

            let touched = step.hour_offsets();
            let hours = f64::from(touched.end() - touched.start() + 1);
            let mut price_sum = 0.0;
            for hour_offset in touched {
                let entry = &forecast.hours[((start_hour + hour_offset) % HOURS_PER_DAY) as usize];
                price_sum += entry.price_per_kwh;

                if entry.temperature_c > definition.critical_temp_max {
                    worst = BatchRecommendation::ClimateRisk;
                } else if worst != BatchRecommendation::ClimateRisk
                    && (!definition.optimal_temp_range.contains(entry.temperature_c)
                        || entry.humidity_pct > definition.optimal_humidity_max)
                {
                    worst = BatchRecommendation::Acceptable;
                }
            }
            step.avg_price_per_kwh = price_sum / hours;
            step.cost = step.energy_kwh * step.avg_price_per_kwh;

            offset_min = end_offset_min;
            processes.push(step);
        }

        let window_hours = profile.required_hours();
        let occupied: Vec<_> = (0..window_hours)
            .map(|offset| &forecast.hours[((start_hour + offset) % HOURS_PER_DAY) as usize])
            .collect();
        let span = occupied.len().max(1) as f64;
        let climate_snapshot = ClimateSnapshot {
            avg_temperature_c: occupied.iter().map(|h| h.temperature_c).sum::<f64>() / span,
            avg_humidity_pct: occupied.iter().map(|h| h.humidity_pct).sum::<f64>() / span,
        };

        let total_energy_kwh: f64 = processes.iter().map(|p| p.energy_kwh).sum();
        let total_cost: f64 = processes.iter().map(|p| p.cost).sum();
        let avg_price_per_kwh = if total_energy_kwh > 0.0 {
            total_cost / total_energy_kwh
        } else {
            occupied.iter().map(|h| h.price_per_kwh).sum::<f64>() / span
        };

        let recommendation = match worst {
            BatchRecommendation::Good if avg_price_per_kwh <= self.labels.cheap_price_threshold => {
                BatchRecommendation::Optimal
            }
            other => other,
        };

        ProductionBatch {
            batch_id: String::new(),
            quality_type: profile.quality_type.clone(),
            start_hour,
            window_hours,
            processes,
            total_duration_hours: f64::from(offset_min) / 60.0,
            total_energy_kwh,
            total_cost,
            avg_price_per_kwh,
            climate_snapshot,
            recommendation,
        }
    }
}

fn window_is_free(occupied: &[bool], start_hour: u32, window: u32) -> bool {
    (0..window).all(|offset| !occupied[((start_hour + offset) % HOURS_PER_DAY) as usize])
}
