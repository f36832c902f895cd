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


use anyhow::{Context, Result};
use chocoplan_adapters::SCENARIO_PRESETS;
use chocoplan_core::ProcessCatalog;
use chocoplan_types::{BatchRecommendation, ClimateStatus, OptimizationPlan, TariffPeriod};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};

/// Formatter for pretty ASCII tables
pub struct TableFormatter;

/// Formatter for machine-readable output
pub struct JsonFormatter;

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
        .collect()
}

fn recommendation_cell(recommendation: BatchRecommendation) -> Cell {
    let cell = Cell::new(recommendation.display_name());
    match recommendation {
        BatchRecommendation::Optimal => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        BatchRecommendation::Good => cell.fg(Color::Green),
        BatchRecommendation::Acceptable => cell.fg(Color::Yellow),
        BatchRecommendation::ClimateRisk => cell.fg(Color::Red),
    }
}

impl TableFormatter {
    /// Batches, savings and recommendations, followed by the hourly timeline
    pub fn format_plan(plan: &OptimizationPlan) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Production plan for {} ({:.0} kg, {} batches requested)\n\n",
            plan.target_date, plan.target_kg, plan.requested_batch_count
        ));

        output.push_str(&Self::format_batches(plan));
        output.push('\n');
        output.push_str(&Self::format_savings(plan));
        output.push('\n');
        output.push_str(&Self::format_timeline(plan));
        output.push('\n');

        output.push_str("Recommendations:\n");
        for recommendation in &plan.recommendations {
            output.push_str(&format!("  - {recommendation}\n"));
        }

        output
    }

    pub fn format_batches(plan: &OptimizationPlan) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&[
            "Batch",
            "Quality",
            "Window",
            "Steps",
            "Energy\n(kWh)",
            "Cost\n(EUR)",
            "Avg Price\n(EUR/kWh)",
            "Climate\n(°C / %)",
            "Label",
        ]));

        for batch in &plan.scheduled_batches {
            let end_hour = (batch.start_hour + batch.window_hours) % 24;
            let steps = batch
                .processes
                .iter()
                .map(|p| format!("{} {}m", p.process_name, p.duration_min()))
                .collect::<Vec<_>>()
                .join("\n");

            table.add_row(vec![
                Cell::new(&batch.batch_id),
                Cell::new(&batch.quality_type),
                Cell::new(format!("{:02}:00-{:02}:00", batch.start_hour, end_hour)),
                Cell::new(steps),
                Cell::new(format!("{:.2}", batch.total_energy_kwh)),
                Cell::new(format!("{:.2}", batch.total_cost)),
                Cell::new(format!("{:.3}", batch.avg_price_per_kwh)),
                Cell::new(format!(
                    "{:.1} / {:.0}",
                    batch.climate_snapshot.avg_temperature_c, batch.climate_snapshot.avg_humidity_pct
                )),
                recommendation_cell(batch.recommendation),
            ]);
        }

        let mut output = table.to_string();
        output.push('\n');

        if plan.unscheduled_batch_count > 0 {
            let missing = plan
                .unscheduled_by_quality
                .iter()
                .map(|(quality, count)| format!("{count} {quality}"))
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "Unscheduled: {} of {} batches ({missing})\n",
                plan.unscheduled_batch_count, plan.requested_batch_count
            ));
        }

        output
    }

    pub fn format_savings(plan: &OptimizationPlan) -> String {
        let baseline = &plan.baseline;
        let savings = &plan.savings;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&["", "Energy\n(kWh)", "Cost\n(EUR)", "Avg Price\n(EUR/kWh)"]));

        let scheduled_energy = plan.scheduled_energy_kwh();
        let scheduled_cost = plan.scheduled_cost();
        let scheduled_avg = if scheduled_energy > 0.0 {
            scheduled_cost / scheduled_energy
        } else {
            0.0
        };

        let first = baseline.hours.first().copied().unwrap_or_default();
        let last = baseline.hours.last().copied().unwrap_or_default();
        table.add_row(vec![
            Cell::new(format!("Fixed shift {first:02}:00-{:02}:00", (last + 1) % 24)),
            Cell::new(format!("{:.2}", baseline.total_energy_kwh)),
            Cell::new(format!("{:.2}", baseline.total_cost)),
            Cell::new(format!("{:.3}", baseline.avg_price_per_kwh)),
        ]);
        table.add_row(vec![
            Cell::new("Optimized").add_attribute(Attribute::Bold),
            Cell::new(format!("{scheduled_energy:.2}")),
            Cell::new(format!("{scheduled_cost:.2}")),
            Cell::new(format!("{scheduled_avg:.3}")),
        ]);

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&format!(
            "Savings: {:.2} EUR ({:.1}%) | Monthly: {:.2} EUR | Annual: {:.2} EUR\n",
            savings.absolute, savings.percent, savings.monthly_projection, savings.annual_projection
        ));

        if plan.is_degraded() {
            let quality = &plan.input_quality;
            output.push_str(&format!(
                "Forecast gaps: {} hours without price, {} without climate, {} malformed{}\n",
                quality.missing_price_hours.len(),
                quality.missing_climate_hours.len(),
                quality.malformed_hours.len(),
                if quality.price_fallback || quality.climate_fallback {
                    " (provider fallback used)"
                } else {
                    ""
                }
            ));
        }

        output
    }

    pub fn format_timeline(plan: &OptimizationPlan) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&[
            "Hour",
            "Price\n(EUR/kWh)",
            "Tariff",
            "Temp\n(°C)",
            "Humidity\n(%)",
            "Climate",
            "Batch",
            "Process",
            "State",
        ]));

        for entry in &plan.hourly_timeline {
            let tariff = Cell::new(entry.tariff_period.to_string());
            let tariff = match entry.tariff_period {
                TariffPeriod::P1 => tariff.fg(Color::Red),
                TariffPeriod::P2 => tariff,
                TariffPeriod::P3 => tariff.fg(Color::Green),
            };
            let climate = Cell::new(entry.climate_status.to_string());
            let climate = match entry.climate_status {
                ClimateStatus::Optimal => climate,
                ClimateStatus::Acceptable => climate.fg(Color::Yellow),
                ClimateStatus::Suboptimal => climate.fg(Color::Red),
            };

            table.add_row(vec![
                Cell::new(format!("{:02}:00", entry.hour)),
                Cell::new(format!("{:.3}", entry.price)),
                tariff,
                Cell::new(format!("{:.1}", entry.temperature)),
                Cell::new(format!("{:.0}", entry.humidity)),
                climate,
                Cell::new(entry.active_batch_id.as_deref().unwrap_or("-")),
                Cell::new(entry.active_process_name.as_deref().unwrap_or("-")),
                Cell::new(format!(
                    "{} ({:.0}%)",
                    entry.production_state,
                    entry.state_confidence * 100.0
                )),
            ]);
        }

        let mut output = table.to_string();
        output.push('\n');
        output
    }

    pub fn format_catalog(catalog: &ProcessCatalog) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&[
            "Quality",
            "Process chain",
            "Duration\n(min)",
            "Line hours",
            "Energy\n(kWh/batch)",
        ]));

        for profile in catalog.profiles() {
            let chain = profile
                .processes
                .iter()
                .map(|p| format!("{} ({} min, {} kW)", p.name, p.nominal_duration_min, p.energy_kw))
                .collect::<Vec<_>>()
                .join("\n");

            table.add_row(vec![
                Cell::new(&profile.quality_type).add_attribute(Attribute::Bold),
                Cell::new(chain),
                Cell::new(profile.total_nominal_minutes()),
                Cell::new(profile.required_hours()),
                Cell::new(format!("{:.2}", profile.energy_per_batch_kwh())),
            ]);
        }

        let mut output = table.to_string();
        output.push('\n');
        output
    }

    pub fn format_scenarios() -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&["Scenario", "Description"]));

        for preset in SCENARIO_PRESETS {
            table.add_row(vec![
                Cell::new(preset.id).add_attribute(Attribute::Bold),
                Cell::new(preset.description),
            ]);
        }

        let mut output = table.to_string();
        output.push('\n');
        output
    }
}

impl JsonFormatter {
    pub fn format_plan(plan: &OptimizationPlan) -> Result<String> {
        serde_json::to_string_pretty(plan).context("Failed to serialize plan")
    }
}
