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

//! Plan assembly.
//!
//! [`ProductionPlanner`] is a pure function of its inputs: the reference time and
//! the forecast are passed in, nothing reads the clock or shared state.

use std::collections::BTreeMap;

use chocoplan_types::{
    OptimizationPlan, PlannerConfig, Savings, StateClassification,
};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::baseline::BaselineEstimator;
use crate::catalog::ProcessCatalog;
use crate::error::{Result, ValidationError};
use crate::forecast::NormalizedForecast;
use crate::placement::{BatchPlacer, checked_total, validate_counts};
use crate::recommendations::recommend;
use crate::request::{PlanRequest, ResolvedRequest, derive_batch_counts};
use crate::scoring::HourScorer;
use crate::timeline::TimelineBuilder;
use crate::validation::ValidateConfig;

#[derive(Debug, Clone)]
pub struct ProductionPlanner {
    config: PlannerConfig,
    catalog: ProcessCatalog,
}

impl ProductionPlanner {
    /// Validate `config` and build its catalog
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let catalog = ProcessCatalog::from_config(&config.catalog)?;
        Ok(Self { config, catalog })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ProcessCatalog {
        &self.catalog
    }

    /// Apply configuration defaults and derive per-quality batch counts
    pub fn resolve_request(
        &self,
        request: &PlanRequest,
        reference_time: DateTime<Utc>,
    ) -> Result<ResolvedRequest> {
        let production = &self.config.production;
        let target_date = request.target_date.unwrap_or_else(|| {
            let today = reference_time.date_naive();
            today.succ_opt().unwrap_or(today)
        });
        let target_kg = request.target_kg.unwrap_or(production.daily_target_kg);
        let mix = request.quality_mix.as_ref().unwrap_or(&production.quality_mix);

        if let Some(unknown) = mix.keys().find(|q| !self.catalog.contains(q)) {
            return Err(ValidationError::UnknownQuality(unknown.clone()).into());
        }

        let batches = derive_batch_counts(
            target_kg,
            production.batch_size_kg,
            production.max_batches,
            &production.default_quality,
            mix,
        )?;

        Ok(ResolvedRequest {
            target_date,
            target_kg,
            batches,
        })
    }

    /// Plan explicitly counted batches, bypassing the quantity split
    pub fn optimize_counts(
        &self,
        target_date: NaiveDate,
        requested: &BTreeMap<String, i64>,
        forecast: &NormalizedForecast,
        states: Option<&[Option<StateClassification>]>,
        generated_at: DateTime<Utc>,
    ) -> Result<OptimizationPlan> {
        let limit = self.config.production.max_batches;
        let batches = validate_counts(requested, &self.catalog, limit)?;
        let total = checked_total(&batches, limit)?;
        let request = ResolvedRequest {
            target_date,
            target_kg: f64::from(total) * self.config.production.batch_size_kg,
            batches,
        };
        self.optimize(&request, forecast, states, generated_at)
    }

    /// Run scoring, placement, baseline and timeline for one day
    ///
    /// `states` holds optional classifier answers indexed by hour.
    pub fn optimize(
        &self,
        request: &ResolvedRequest,
        forecast: &NormalizedForecast,
        states: Option<&[Option<StateClassification>]>,
        generated_at: DateTime<Utc>,
    ) -> Result<OptimizationPlan> {
        if let Some(unknown) = request.batches.keys().find(|q| !self.catalog.contains(q)) {
            return Err(ValidationError::UnknownQuality(unknown.clone()).into());
        }
        let requested_batch_count =
            checked_total(&request.batches, self.config.production.max_batches)?;

        let scores = HourScorer::new(&self.config.scoring).score_all(&forecast.hours);
        let placement = BatchPlacer::new(&self.catalog, &self.config.recommendations)
            .place(&request.batches, &scores, forecast)?;
        let baseline = BaselineEstimator::new(&self.catalog, &self.config.baseline)
            .estimate(&request.batches, forecast)?;
        let hourly_timeline =
            TimelineBuilder::new(&self.config.tariff, &self.config.climate_status).build(
                forecast,
                &placement.scheduled,
                states,
            );

        let scheduled_cost: f64 = placement.scheduled.iter().map(|b| b.total_cost).sum();
        let absolute = baseline.total_cost - scheduled_cost;
        let percent = if baseline.total_cost > 0.0 {
            absolute / baseline.total_cost * 100.0
        } else {
            0.0
        };
        let savings = Savings {
            absolute,
            percent,
            monthly_projection: absolute * self.config.projections.monthly_business_days,
            annual_projection: absolute * self.config.projections.annual_business_days,
        };

        let mut plan = OptimizationPlan {
            target_date: request.target_date,
            generated_at,
            target_kg: request.target_kg,
            requested_batch_count,
            requested_by_quality: request.batches.clone(),
            scheduled_batches: placement.scheduled,
            unscheduled_batch_count: placement.unscheduled_count,
            unscheduled_by_quality: placement.unscheduled_by_quality,
            baseline,
            savings,
            hourly_timeline,
            recommendations: Vec::new(),
            input_quality: forecast.quality.clone(),
        };
        plan.recommendations = recommend(&plan, forecast, &self.config.recommendations);

        info!(
            "Plan for {}: {}/{} batches scheduled, cost {:.2} EUR vs baseline {:.2} EUR ({:.1}% saved){}",
            plan.target_date,
            plan.scheduled_batches.len(),
            plan.requested_batch_count,
            scheduled_cost,
            plan.baseline.total_cost,
            plan.savings.percent,
            if plan.is_degraded() { ", degraded input" } else { "" }
        );

        Ok(plan)
    }
}
