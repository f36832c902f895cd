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

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::batch::ProductionBatch;
use crate::forecast::InputQuality;
use crate::timeline::HourlyTimelineEntry;

/// Reference cost of running every requested batch inside the fixed shift window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Baseline {
    /// Hours of the fixed shift
    pub hours: Vec<u32>,
    pub avg_price_per_kwh: f64,
    pub total_energy_kwh: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Savings {
    /// baseline cost - scheduled cost (EUR)
    pub absolute: f64,
    pub percent: f64,
    pub monthly_projection: f64,
    pub annual_projection: f64,
}

/// Result of one optimization call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationPlan {
    pub target_date: NaiveDate,

    /// Reference timestamp supplied by the caller
    pub generated_at: DateTime<Utc>,

    pub target_kg: f64,
    pub requested_batch_count: u32,
    pub requested_by_quality: BTreeMap<String, u32>,

    /// Scheduled batches ordered by start hour
    pub scheduled_batches: Vec<ProductionBatch>,

    pub unscheduled_batch_count: u32,
    pub unscheduled_by_quality: BTreeMap<String, u32>,

    pub baseline: Baseline,
    pub savings: Savings,
    pub hourly_timeline: Vec<HourlyTimelineEntry>,
    pub recommendations: Vec<String>,
    pub input_quality: InputQuality,
}

impl OptimizationPlan {
    pub fn scheduled_cost(&self) -> f64 {
        self.scheduled_batches.iter().map(|b| b.total_cost).sum()
    }

    pub fn scheduled_energy_kwh(&self) -> f64 {
        self.scheduled_batches.iter().map(|b| b.total_energy_kwh).sum()
    }

    /// True when the plan was built (partly) on default forecast values
    pub fn is_degraded(&self) -> bool {
        self.input_quality.is_degraded()
    }
}
