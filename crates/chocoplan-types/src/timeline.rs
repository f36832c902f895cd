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

/// Spanish access-tariff period of an hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TariffPeriod {
    /// Peak
    P1,
    /// Standard
    P2,
    /// Off-peak
    P3,
}

impl TariffPeriod {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::P1 => "P1 (peak)",
            Self::P2 => "P2 (standard)",
            Self::P3 => "P3 (off-peak)",
        }
    }
}

impl fmt::Display for TariffPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateStatus {
    Optimal,
    Acceptable,
    Suboptimal,
}

impl fmt::Display for ClimateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Optimal => "optimal",
            Self::Acceptable => "acceptable",
            Self::Suboptimal => "suboptimal",
        };
        write!(f, "{label}")
    }
}

/// Advisory label produced by the external production-state classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductionState {
    Optimal,
    #[default]
    Moderate,
    Reduced,
    Halt,
}

impl fmt::Display for ProductionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Optimal => "Optimal",
            Self::Moderate => "Moderate",
            Self::Reduced => "Reduced",
            Self::Halt => "Halt",
        };
        write!(f, "{label}")
    }
}

/// Classifier answer for one hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateClassification {
    pub state: ProductionState,

    /// Classifier confidence (0-1)
    pub confidence: f64,
}

/// One row of the 24-hour annotated view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyTimelineEntry {
    pub hour: u32,
    pub price: f64,
    pub tariff_period: TariffPeriod,
    pub temperature: f64,
    pub humidity: f64,
    pub climate_status: ClimateStatus,
    pub active_batch_id: Option<String>,
    pub active_process_name: Option<String>,
    pub production_state: ProductionState,
    pub state_confidence: f64,
}
