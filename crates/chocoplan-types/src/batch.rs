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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::forecast::HOURS_PER_DAY;

// ============= Batch Components =============

/// One process step placed inside a batch, with offsets relative to the batch start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSchedule {
    pub process_name: String,

    /// Minutes after batch start when this step begins
    pub start_offset_min: u32,

    /// Minutes after batch start when this step ends (exclusive)
    pub end_offset_min: u32,

    /// Energy consumed by this step (kWh)
    pub energy_kwh: f64,

    /// Mean price over the hours this step touches (EUR/kWh)
    pub avg_price_per_kwh: f64,

    /// energy_kwh × avg_price_per_kwh (EUR)
    pub cost: f64,
}

impl ProcessSchedule {
    pub fn duration_min(&self) -> u32 {
        self.end_offset_min - self.start_offset_min
    }

    /// Hour offsets (relative to the batch start hour) that this step overlaps
    ///
    /// A step ending exactly on an hour boundary does not touch the following hour.
    /// A zero-length step touches only the hour it starts in.
    pub fn hour_offsets(&self) -> RangeInclusive<u32> {
        let first = self.start_offset_min / 60;
        let last = if self.end_offset_min > self.start_offset_min {
            (self.end_offset_min - 1) / 60
        } else {
            first
        };
        first..=last
    }

    /// True when the step is running at the given minute offset
    pub fn covers_minute(&self, offset_min: u32) -> bool {
        offset_min >= self.start_offset_min && offset_min < self.end_offset_min
    }
}

/// Average climate over the hours a batch occupies
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClimateSnapshot {
    pub avg_temperature_c: f64,
    pub avg_humidity_pct: f64,
}

/// Qualitative verdict attached to each scheduled batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchRecommendation {
    /// Cheap hours and every step inside its optimal climate band
    Optimal,
    /// Every step inside its optimal climate band
    Good,
    /// Some step runs outside its optimal band but below its critical temperature
    Acceptable,
    /// Some step runs above its critical temperature
    ClimateRisk,
}

impl BatchRecommendation {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::ClimateRisk => "Climate risk",
        }
    }
}

impl fmt::Display for BatchRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A batch assigned to a start hour on the shared line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionBatch {
    pub batch_id: String,
    pub quality_type: String,

    /// Hour of day the batch starts (0-23)
    pub start_hour: u32,

    /// Whole hours the batch holds the line, starting at start_hour (wraps past midnight)
    pub window_hours: u32,

    /// Steps in sequence order, back to back
    pub processes: Vec<ProcessSchedule>,

    pub total_duration_hours: f64,
    pub total_energy_kwh: f64,
    pub total_cost: f64,

    /// Energy-weighted average price paid by this batch (EUR/kWh)
    pub avg_price_per_kwh: f64,

    pub climate_snapshot: ClimateSnapshot,
    pub recommendation: BatchRecommendation,
}

impl ProductionBatch {
    /// Hours of day this batch occupies, in production order
    pub fn occupied_hours(&self) -> Vec<u32> {
        (0..self.window_hours)
            .map(|offset| (self.start_hour + offset) % HOURS_PER_DAY)
            .collect()
    }

    /// Offset of `hour` from the batch start, if the batch occupies that hour
    pub fn hour_offset(&self, hour: u32) -> Option<u32> {
        let offset = (hour + HOURS_PER_DAY - self.start_hour % HOURS_PER_DAY) % HOURS_PER_DAY;
        (offset < self.window_hours).then_some(offset)
    }

    pub fn is_active_at(&self, hour: u32) -> bool {
        self.hour_offset(hour).is_some()
    }

    /// Step running at the start of `hour`, if the batch occupies that hour
    pub fn process_at(&self, hour: u32) -> Option<&ProcessSchedule> {
        let offset = self.hour_offset(hour)?;
        let minute = offset * 60;
        self.processes
            .iter()
            .find(|process| process.covers_minute(minute))
            .or_else(|| self.processes.last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str, start: u32, end: u32) -> ProcessSchedule {
        ProcessSchedule {
            process_name: name.to_owned(),
            start_offset_min: start,
            end_offset_min: end,
            energy_kwh: 0.0,
            avg_price_per_kwh: 0.0,
            cost: 0.0,
        }
    }

    fn batch(start_hour: u32, window_hours: u32) -> ProductionBatch {
        ProductionBatch {
            batch_id: "B01".to_owned(),
            quality_type: "standard".to_owned(),
            start_hour,
            window_hours,
            processes: vec![step("mixing", 0, 30), step("refining", 30, 150)],
            total_duration_hours: 2.5,
            total_energy_kwh: 0.0,
            total_cost: 0.0,
            avg_price_per_kwh: 0.0,
            climate_snapshot: ClimateSnapshot::default(),
            recommendation: BatchRecommendation::Good,
        }
    }

    #[test]
    fn test_hour_offsets_within_one_hour() {
        assert_eq!(step("mixing", 0, 30).hour_offsets(), 0..=0);
    }

    #[test]
    fn test_hour_offsets_crossing_boundary() {
        assert_eq!(step("refining", 30, 150).hour_offsets(), 0..=2);
    }

    #[test]
    fn test_hour_offsets_ending_on_boundary() {
        assert_eq!(step("conching", 60, 180).hour_offsets(), 1..=2);
    }

    #[test]
    fn test_hour_offsets_zero_length() {
        assert_eq!(step("inspection", 120, 120).hour_offsets(), 2..=2);
    }

    #[test]
    fn test_occupied_hours_wrap_midnight() {
        assert_eq!(batch(22, 4).occupied_hours(), vec![22, 23, 0, 1]);
    }

    #[test]
    fn test_hour_offset_wraps() {
        let b = batch(22, 4);
        assert_eq!(b.hour_offset(22), Some(0));
        assert_eq!(b.hour_offset(1), Some(3));
        assert_eq!(b.hour_offset(2), None);
        assert!(!b.is_active_at(21));
    }

    #[test]
    fn test_process_at_hour() {
        let b = batch(5, 3);
        assert_eq!(b.process_at(5).unwrap().process_name, "mixing");
        assert_eq!(b.process_at(6).unwrap().process_name, "refining");
        assert_eq!(b.process_at(7).unwrap().process_name, "refining");
        assert!(b.process_at(8).is_none());
    }

    #[test]
    fn test_recommendation_serializes_snake_case() {
        let json = serde_json::to_string(&BatchRecommendation::ClimateRisk).unwrap();
        assert_eq!(json, "\"climate_risk\"");
    }
}
