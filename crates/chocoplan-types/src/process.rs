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

/// Closed temperature interval in °C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min_c: f64,
    pub max_c: f64,
}

impl TemperatureRange {
    pub const fn new(min_c: f64, max_c: f64) -> Self {
        Self { min_c, max_c }
    }

    pub fn contains(&self, temperature_c: f64) -> bool {
        temperature_c >= self.min_c && temperature_c <= self.max_c
    }
}

/// Static definition of one production step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// Unique process name (e.g. "conching_premium")
    pub name: String,

    /// Duration used for planning (minutes)
    pub nominal_duration_min: u32,

    /// Shortest acceptable duration (minutes)
    pub min_duration_min: u32,

    /// Longest acceptable duration (minutes)
    pub max_duration_min: u32,

    /// Average electrical draw while running (kW)
    pub energy_kw: f64,

    /// Position within a quality profile; strictly increasing along the chain
    pub sequence_order: u32,

    /// Ambient temperature band in which the step runs without corrections
    pub optimal_temp_range: TemperatureRange,

    /// Ambient temperature above which product quality is at risk
    pub critical_temp_max: f64,

    /// Relative humidity above which the step needs attention (%)
    pub optimal_humidity_max: f64,
}

impl ProcessDefinition {
    /// Energy for one run at nominal duration (kWh)
    pub fn nominal_energy_kwh(&self) -> f64 {
        self.energy_kw * f64::from(self.nominal_duration_min) / 60.0
    }
}

/// Configured process chain for one quality type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfileConfig {
    /// Quality type key (e.g. "standard", "premium")
    pub quality_type: String,

    /// Process names in production order
    pub processes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_range_is_inclusive() {
        let range = TemperatureRange::new(18.0, 28.0);
        assert!(range.contains(18.0));
        assert!(range.contains(28.0));
        assert!(!range.contains(28.1));
        assert!(!range.contains(17.9));
    }

    #[test]
    fn test_nominal_energy() {
        let process = ProcessDefinition {
            name: "refining".to_owned(),
            nominal_duration_min: 90,
            min_duration_min: 60,
            max_duration_min: 120,
            energy_kw: 40.0,
            sequence_order: 2,
            optimal_temp_range: TemperatureRange::new(18.0, 26.0),
            critical_temp_max: 30.0,
            optimal_humidity_max: 55.0,
        };
        assert!((process.nominal_energy_kwh() - 60.0).abs() < 1e-9);
    }
}
