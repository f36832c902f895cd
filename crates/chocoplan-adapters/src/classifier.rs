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

use anyhow::{Result, ensure};
use async_trait::async_trait;
use chocoplan_core::{ProductionStateClassifier, climate_status};
use chocoplan_types::config::ClimateStatusConfig;
use chocoplan_types::{ClimateStatus, PlannerConfig, ProductionState, StateClassification};

/// Rule-based stand-in for a trained production-state model
///
/// | climate     | price < half ceiling | price < ceiling | price >= ceiling |
/// |-------------|----------------------|-----------------|------------------|
/// | optimal     | Optimal              | Moderate        | Reduced          |
/// | acceptable  | Moderate             | Moderate        | Reduced          |
/// | suboptimal  | Reduced              | Reduced         | Halt             |
#[derive(Debug, Clone)]
pub struct ThresholdStateClassifier {
    price_ceiling: f64,
    climate: ClimateStatusConfig,
}

impl ThresholdStateClassifier {
    pub fn new(price_ceiling: f64, climate: ClimateStatusConfig) -> Self {
        Self {
            price_ceiling,
            climate,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.scoring.price_ceiling, config.climate_status.clone())
    }

    fn decide(&self, price_per_kwh: f64, temperature_c: f64, humidity_pct: f64) -> StateClassification {
        let ratio = price_per_kwh / self.price_ceiling;
        let status = climate_status(temperature_c, humidity_pct, &self.climate);

        let state = match (status, ratio >= 1.0) {
            (ClimateStatus::Suboptimal, true) => ProductionState::Halt,
            (ClimateStatus::Suboptimal, false)
            | (ClimateStatus::Optimal | ClimateStatus::Acceptable, true) => ProductionState::Reduced,
            (ClimateStatus::Optimal, false) if ratio < 0.5 => ProductionState::Optimal,
            (ClimateStatus::Optimal | ClimateStatus::Acceptable, false) => ProductionState::Moderate,
        };

        // Closer to a rule boundary means less certain
        let distance = match state {
            ProductionState::Optimal => 0.5 - ratio,
            ProductionState::Halt | ProductionState::Reduced => (ratio - 1.0).abs(),
            ProductionState::Moderate => (ratio - 0.5).abs().min((1.0 - ratio).abs()),
        };
        let confidence = (0.6 + distance).clamp(0.6, 0.95);

        StateClassification { state, confidence }
    }
}

#[async_trait]
impl ProductionStateClassifier for ThresholdStateClassifier {
    async fn classify(
        &self,
        price_per_kwh: f64,
        temperature_c: f64,
        humidity_pct: f64,
    ) -> Result<StateClassification> {
        ensure!(
            price_per_kwh.is_finite() && temperature_c.is_finite() && humidity_pct.is_finite(),
            "non-finite classifier input ({price_per_kwh}, {temperature_c}, {humidity_pct})"
        );
        Ok(self.decide(price_per_kwh, temperature_c, humidity_pct))
    }

    fn name(&self) -> &str {
        "threshold"
    }
}
