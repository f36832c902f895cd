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

use std::collections::{BTreeMap, HashSet};

use chocoplan_core::scoring::rank_hours;
use chocoplan_core::{
    HourScorer, NormalizedForecast, PlanRequest, ProductionPlanner, normalize_hourly,
    tariff_period,
};
use chocoplan_types::config::{ForecastDefaults, TariffConfig};
use chocoplan_types::{
    HourlyForecast, OptimizationPlan, PlannerConfig, ProcessDefinition, QualityProfileConfig,
    TariffPeriod, TemperatureRange,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

const PEAK: [u32; 8] = [10, 11, 12, 13, 18, 19, 20, 21];

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap()
}

fn target_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn forecast_with(price: impl Fn(u32) -> f64, temperature: f64, humidity: f64) -> NormalizedForecast {
    let entries: Vec<_> = (0..24)
        .map(|hour| HourlyForecast {
            hour,
            price_per_kwh: price(hour),
            temperature_c: temperature,
            humidity_pct: humidity,
        })
        .collect();
    normalize_hourly(&entries, &ForecastDefaults::default())
}

fn peak_priced() -> NormalizedForecast {
    forecast_with(|h| if PEAK.contains(&h) { 0.35 } else { 0.10 }, 22.0, 45.0)
}

fn default_plan(forecast: &NormalizedForecast) -> OptimizationPlan {
    let planner = ProductionPlanner::new(PlannerConfig::default()).unwrap();
    let request = planner
        .resolve_request(&PlanRequest::default(), reference())
        .unwrap();
    planner.optimize(&request, forecast, None, reference()).unwrap()
}

fn counts_plan(counts: &[(&str, i64)], forecast: &NormalizedForecast) -> OptimizationPlan {
    let planner = ProductionPlanner::new(PlannerConfig::default()).unwrap();
    let requested: BTreeMap<String, i64> =
        counts.iter().map(|(q, c)| ((*q).to_owned(), *c)).collect();
    planner
        .optimize_counts(target_date(), &requested, forecast, None, reference())
        .unwrap()
}

fn assert_invariants(plan: &OptimizationPlan) {
    let mut seen = HashSet::new();
    for batch in &plan.scheduled_batches {
        for hour in batch.occupied_hours() {
            assert!(seen.insert(hour), "hour {hour} occupied by two batches");
        }

        let energy: f64 = batch.processes.iter().map(|p| p.energy_kwh).sum();
        let cost: f64 = batch.processes.iter().map(|p| p.cost).sum();
        assert!((energy - batch.total_energy_kwh).abs() < 1e-9);
        assert!((cost - batch.total_cost).abs() < 1e-9);

        for pair in batch.processes.windows(2) {
            assert_eq!(pair[0].end_offset_min, pair[1].start_offset_min);
        }
    }

    assert_eq!(
        plan.scheduled_batches.len() as u32 + plan.unscheduled_batch_count,
        plan.requested_batch_count
    );
    assert_eq!(plan.hourly_timeline.len(), 24);
}

#[test]
fn test_scenario_a_quantity_split() {
    let plan = default_plan(&peak_priced());

    assert_eq!(plan.requested_batch_count, 20);
    assert_eq!(plan.requested_by_quality["premium"], 6);
    assert_eq!(plan.requested_by_quality["standard"], 14);
    assert_eq!(plan.target_date, target_date());
    assert_invariants(&plan);
}

#[test]
fn test_scenario_b_flat_day_fills_from_midnight() {
    let forecast = forecast_with(|_| 0.15, 22.0, 55.0);
    let config = PlannerConfig::default();
    let scores = HourScorer::new(&config.scoring).score_all(&forecast.hours);
    assert!(scores.windows(2).all(|w| (w[0].score - w[1].score).abs() < 1e-12));

    let plan = counts_plan(&[("standard", 4)], &forecast);
    let starts: Vec<u32> = plan.scheduled_batches.iter().map(|b| b.start_hour).collect();
    assert_eq!(starts, vec![0, 5, 10, 15]);
    assert_invariants(&plan);

    // Premium goes first and tiles the whole day
    let plan = default_plan(&forecast);
    let premium_starts: Vec<u32> = plan
        .scheduled_batches
        .iter()
        .filter(|b| b.quality_type == "premium")
        .map(|b| b.start_hour)
        .collect();
    assert_eq!(premium_starts, vec![0, 8, 16]);
    assert_invariants(&plan);
}

#[test]
fn test_scenario_c_avoids_peak_hours() {
    let forecast = peak_priced();
    let plan = default_plan(&forecast);

    assert!(plan.savings.percent > 0.0);
    for batch in &plan.scheduled_batches {
        let hours = batch.occupied_hours();
        let peak = hours.iter().filter(|h| PEAK.contains(h)).count();
        assert!(
            peak * 2 <= hours.len(),
            "batch {} sits mostly in peak hours",
            batch.batch_id
        );
    }
    assert_invariants(&plan);

    // With room to spare, standard batches stay entirely off-peak
    let plan = counts_plan(&[("standard", 2)], &forecast);
    for batch in &plan.scheduled_batches {
        assert!(batch.occupied_hours().iter().all(|h| !PEAK.contains(h)));
    }
    assert!(plan.savings.percent > 0.0);
}

#[test]
fn test_scenario_d_single_batch_at_best_hour() {
    let forecast = forecast_with(|h| 0.05 + f64::from(h.abs_diff(3)) * 0.01, 22.0, 45.0);
    let planner = ProductionPlanner::new(PlannerConfig::default()).unwrap();
    let request = planner
        .resolve_request(
            &PlanRequest {
                target_kg: Some(10.0),
                ..Default::default()
            },
            reference(),
        )
        .unwrap();
    assert_eq!(request.total_batches(), 1);
    assert_eq!(request.batches["standard"], 1);

    let plan = planner.optimize(&request, &forecast, None, reference()).unwrap();
    let scores = HourScorer::new(&planner.config().scoring).score_all(&forecast.hours);
    let best = rank_hours(&scores)[0].hour;

    assert_eq!(plan.scheduled_batches.len(), 1);
    assert_eq!(plan.scheduled_batches[0].start_hour, best);
    assert_eq!(best, 3);
}

#[test]
fn test_scenario_e_overlong_profile_is_reported() {
    let mut config = PlannerConfig::default();
    config.catalog.processes.push(ProcessDefinition {
        name: "aging".to_owned(),
        nominal_duration_min: 1500,
        min_duration_min: 1440,
        max_duration_min: 1600,
        energy_kw: 5.0,
        sequence_order: 1,
        optimal_temp_range: TemperatureRange::new(12.0, 18.0),
        critical_temp_max: 22.0,
        optimal_humidity_max: 60.0,
    });
    config.catalog.profiles.push(QualityProfileConfig {
        quality_type: "aged".to_owned(),
        processes: vec!["aging".to_owned()],
    });
    let planner = ProductionPlanner::new(config).unwrap();
    assert_eq!(planner.catalog().get_profile("aged").unwrap().required_hours(), 25);

    let requested = BTreeMap::from([("aged".to_owned(), 2_i64), ("standard".to_owned(), 1)]);
    let plan = planner
        .optimize_counts(target_date(), &requested, &peak_priced(), None, reference())
        .unwrap();

    assert_eq!(plan.unscheduled_batch_count, 2);
    assert_eq!(plan.unscheduled_by_quality["aged"], 2);
    assert_eq!(plan.scheduled_batches.len(), 1);
    assert!(plan.recommendations.iter().any(|r| r.contains("2 aged")));
    assert_invariants(&plan);
}

#[test]
fn test_identical_inputs_give_identical_plans() {
    let forecast = forecast_with(|h| 0.08 + f64::from((h * 7) % 11) / 50.0, 24.0, 58.0);
    let first = serde_json::to_string(&default_plan(&forecast)).unwrap();
    let second = serde_json::to_string(&default_plan(&forecast)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tariff_periods_partition_the_day() {
    let tariff = TariffConfig::default();
    let mut per_period: BTreeMap<String, usize> = BTreeMap::new();
    for hour in 0..24 {
        let period = tariff_period(hour, &tariff);
        assert_eq!(period, tariff_period(hour, &tariff));
        *per_period.entry(format!("{period:?}")).or_default() += 1;
    }
    assert_eq!(per_period.values().sum::<usize>(), 24);
    assert_eq!(tariff_period(20, &tariff), TariffPeriod::P1);
    assert_eq!(tariff_period(23, &tariff), TariffPeriod::P2);
    assert_eq!(tariff_period(0, &tariff), TariffPeriod::P3);
}

#[test]
fn test_timeline_marks_every_scheduled_hour() {
    let plan = default_plan(&peak_priced());
    for batch in &plan.scheduled_batches {
        for hour in batch.occupied_hours() {
            let entry = &plan.hourly_timeline[hour as usize];
            assert_eq!(entry.active_batch_id.as_deref(), Some(batch.batch_id.as_str()));
            assert!(entry.active_process_name.is_some());
        }
    }
    let busy: usize = plan
        .scheduled_batches
        .iter()
        .map(|b| b.window_hours as usize)
        .sum();
    let marked = plan
        .hourly_timeline
        .iter()
        .filter(|e| e.active_batch_id.is_some())
        .count();
    assert_eq!(busy, marked);
}
