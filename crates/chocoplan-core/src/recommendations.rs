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

use chocoplan_types::config::RecommendationConfig;
use chocoplan_types::{BatchRecommendation, OptimizationPlan};

use crate::forecast::NormalizedForecast;

/// Human-readable advice for an otherwise complete plan
pub fn recommend(
    plan: &OptimizationPlan,
    forecast: &NormalizedForecast,
    config: &RecommendationConfig,
) -> Vec<String> {
    let mut out = Vec::new();

    if plan.requested_batch_count == 0 {
        out.push("No production requested for this day.".to_owned());
    } else {
        out.push(savings_message(plan, config));
    }

    let mean_temperature = forecast.mean_temperature();
    if mean_temperature > config.comfort_temp_max {
        out.push(format!(
            "Mean temperature {mean_temperature:.1} °C exceeds {:.1} °C: pre-cool the hall before tempering and molding.",
            config.comfort_temp_max
        ));
    }
    let mean_humidity = forecast.mean_humidity();
    if mean_humidity > config.comfort_humidity_max {
        out.push(format!(
            "Mean humidity {mean_humidity:.0}% exceeds {:.0}%: run dehumidification to protect tempering.",
            config.comfort_humidity_max
        ));
    }

    let at_risk: Vec<&str> = plan
        .scheduled_batches
        .iter()
        .filter(|b| b.recommendation == BatchRecommendation::ClimateRisk)
        .map(|b| b.batch_id.as_str())
        .collect();
    if !at_risk.is_empty() {
        out.push(format!(
            "Batches {} run above a process critical temperature; check climate control for those hours.",
            at_risk.join(", ")
        ));
    }

    if plan.unscheduled_batch_count > 0 {
        let breakdown: Vec<String> = plan
            .unscheduled_by_quality
            .iter()
            .map(|(quality, count)| format!("{count} {quality}"))
            .collect();
        out.push(format!(
            "{} of {} requested batches do not fit on the line ({}); move them to another day.",
            plan.unscheduled_batch_count,
            plan.requested_batch_count,
            breakdown.join(", ")
        ));
    }

    if plan.input_quality.is_degraded() {
        out.push(format!(
            "Forecast data incomplete: {} hours use default values, treat the savings as an estimate.",
            plan.input_quality.affected_hours()
        ));
    }

    out
}

fn savings_message(plan: &OptimizationPlan, config: &RecommendationConfig) -> String {
    let savings = &plan.savings;
    let pct = savings.percent;
    if pct >= config.strong_savings_pct {
        format!(
            "Strong savings: {pct:.1}% below the fixed shift ({:.2} EUR/day, about {:.0} EUR/year).",
            savings.absolute, savings.annual_projection
        )
    } else if pct >= config.good_savings_pct {
        format!(
            "Good savings: {pct:.1}% below the fixed shift ({:.2} EUR/day, about {:.0} EUR/month).",
            savings.absolute, savings.monthly_projection
        )
    } else if pct >= config.moderate_savings_pct {
        format!(
            "Moderate savings: {pct:.1}% below the fixed shift ({:.2} EUR/day).",
            savings.absolute
        )
    } else {
        format!(
            "Limited savings: {pct:.1}% versus the fixed shift; prices are flat or the line is nearly full."
        )
    }
}
