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
use std::collections::BTreeMap;
use std::time::Duration;

use crate::process::{ProcessDefinition, QualityProfileConfig, TemperatureRange};

// ============= Planner Configuration =============

/// Central configuration for the production planner
///
/// Every tunable policy constant of the optimizer lives here so that it can be
/// adjusted from a config file instead of being hardcoded in the algorithms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub production: ProductionConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub defaults: ForecastDefaults,
    #[serde(default)]
    pub tariff: TariffConfig,
    #[serde(default)]
    pub climate_status: ClimateStatusConfig,
    #[serde(default)]
    pub baseline: BaselineConfig,
    #[serde(default)]
    pub projections: ProjectionConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
    #[serde(default)]
    pub collaborators: CollaboratorConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Output quantity and quality mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionConfig {
    /// Output of one batch (kg)
    #[serde(default = "default_batch_size_kg")]
    pub batch_size_kg: f64,

    /// Target used when a request does not name one (kg)
    #[serde(default = "default_daily_target_kg")]
    pub daily_target_kg: f64,

    /// Quality type that receives the batches left after applying `quality_mix`
    #[serde(default = "default_quality")]
    pub default_quality: String,

    /// Share of batches per non-default quality type (0-1)
    #[serde(default = "default_quality_mix")]
    pub quality_mix: BTreeMap<String, f64>,

    /// Most batches a single plan may request; larger requests are rejected
    #[serde(default = "default_max_batches")]
    pub max_batches: u32,
}

fn default_batch_size_kg() -> f64 {
    10.0
}
fn default_daily_target_kg() -> f64 {
    200.0
}
fn default_quality() -> String {
    "standard".to_owned()
}
fn default_quality_mix() -> BTreeMap<String, f64> {
    BTreeMap::from([("premium".to_owned(), 0.3)])
}
fn default_max_batches() -> u32 {
    100
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            batch_size_kg: default_batch_size_kg(),
            daily_target_kg: default_daily_target_kg(),
            default_quality: default_quality(),
            quality_mix: default_quality_mix(),
            max_batches: default_max_batches(),
        }
    }
}

/// Hour desirability policy
///
/// score = price_weight × price_score + climate_weight × climate_score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Price at or above which the price score is 0 (EUR/kWh)
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    #[serde(default = "default_price_weight")]
    pub price_weight: f64,

    #[serde(default = "default_climate_weight")]
    pub climate_weight: f64,

    /// Temperatures inside this band score 1
    #[serde(default = "default_comfort_band")]
    pub comfort_band: TemperatureRange,

    /// Distance outside the band (°C) at which the temperature score reaches 0
    #[serde(default = "default_temp_decay_span")]
    pub temp_decay_span_c: f64,

    /// Humidity at or below which the humidity score is 1 (%)
    #[serde(default = "default_humidity_ideal_max")]
    pub humidity_ideal_max: f64,

    /// Humidity above the ideal maximum (%) at which the humidity score reaches 0
    #[serde(default = "default_humidity_decay_span")]
    pub humidity_decay_span_pct: f64,
}

fn default_price_ceiling() -> f64 {
    0.30
}
fn default_price_weight() -> f64 {
    0.6
}
fn default_climate_weight() -> f64 {
    0.4
}
fn default_comfort_band() -> TemperatureRange {
    TemperatureRange::new(18.0, 28.0)
}
fn default_temp_decay_span() -> f64 {
    15.0
}
fn default_humidity_ideal_max() -> f64 {
    50.0
}
fn default_humidity_decay_span() -> f64 {
    40.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            price_ceiling: default_price_ceiling(),
            price_weight: default_price_weight(),
            climate_weight: default_climate_weight(),
            comfort_band: default_comfort_band(),
            temp_decay_span_c: default_temp_decay_span(),
            humidity_ideal_max: default_humidity_ideal_max(),
            humidity_decay_span_pct: default_humidity_decay_span(),
        }
    }
}

/// Values substituted for missing or malformed forecast hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDefaults {
    #[serde(default = "default_fallback_price")]
    pub price_per_kwh: f64,
    #[serde(default = "default_fallback_temperature")]
    pub temperature_c: f64,
    #[serde(default = "default_fallback_humidity")]
    pub humidity_pct: f64,
}

fn default_fallback_price() -> f64 {
    0.15
}
fn default_fallback_temperature() -> f64 {
    22.0
}
fn default_fallback_humidity() -> f64 {
    55.0
}

impl Default for ForecastDefaults {
    fn default() -> Self {
        Self {
            price_per_kwh: default_fallback_price(),
            temperature_c: default_fallback_temperature(),
            humidity_pct: default_fallback_humidity(),
        }
    }
}

/// Tariff hour sets; every hour not listed is P3
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffConfig {
    #[serde(default = "default_peak_hours")]
    pub peak_hours: Vec<u32>,
    #[serde(default = "default_standard_hours")]
    pub standard_hours: Vec<u32>,
}

fn default_peak_hours() -> Vec<u32> {
    vec![10, 11, 12, 13, 18, 19, 20, 21]
}
fn default_standard_hours() -> Vec<u32> {
    vec![8, 9, 14, 15, 16, 17, 22, 23]
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            peak_hours: default_peak_hours(),
            standard_hours: default_standard_hours(),
        }
    }
}

/// Thresholds for the per-hour climate status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateStatusConfig {
    #[serde(default = "default_optimal_temp_max")]
    pub optimal_temp_max: f64,
    #[serde(default = "default_optimal_humidity_max")]
    pub optimal_humidity_max: f64,
    #[serde(default = "default_acceptable_temp_max")]
    pub acceptable_temp_max: f64,
    #[serde(default = "default_acceptable_humidity_max")]
    pub acceptable_humidity_max: f64,
}

fn default_optimal_temp_max() -> f64 {
    28.0
}
fn default_optimal_humidity_max() -> f64 {
    60.0
}
fn default_acceptable_temp_max() -> f64 {
    32.0
}
fn default_acceptable_humidity_max() -> f64 {
    70.0
}

impl Default for ClimateStatusConfig {
    fn default() -> Self {
        Self {
            optimal_temp_max: default_optimal_temp_max(),
            optimal_humidity_max: default_optimal_humidity_max(),
            acceptable_temp_max: default_acceptable_temp_max(),
            acceptable_humidity_max: default_acceptable_humidity_max(),
        }
    }
}

/// Fixed shift used as the savings reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineConfig {
    #[serde(default = "default_baseline_hours")]
    pub hours: Vec<u32>,
}

fn default_baseline_hours() -> Vec<u32> {
    (8..=15).collect()
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            hours: default_baseline_hours(),
        }
    }
}

/// Business-day multipliers for savings projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_monthly_business_days")]
    pub monthly_business_days: f64,
    #[serde(default = "default_annual_business_days")]
    pub annual_business_days: f64,
}

fn default_monthly_business_days() -> f64 {
    22.0
}
fn default_annual_business_days() -> f64 {
    248.0
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            monthly_business_days: default_monthly_business_days(),
            annual_business_days: default_annual_business_days(),
        }
    }
}

/// Thresholds driving the textual recommendations and per-batch labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_strong_savings_pct")]
    pub strong_savings_pct: f64,
    #[serde(default = "default_good_savings_pct")]
    pub good_savings_pct: f64,
    #[serde(default = "default_moderate_savings_pct")]
    pub moderate_savings_pct: f64,

    /// Mean horizon temperature above which cooling is flagged (°C)
    #[serde(default = "default_comfort_temp_max")]
    pub comfort_temp_max: f64,

    /// Mean horizon humidity above which humidity is flagged (%)
    #[serde(default = "default_comfort_humidity_max")]
    pub comfort_humidity_max: f64,

    /// Batch average price at or below which a climate-clean batch is labelled optimal
    #[serde(default = "default_cheap_price_threshold")]
    pub cheap_price_threshold: f64,
}

fn default_strong_savings_pct() -> f64 {
    20.0
}
fn default_good_savings_pct() -> f64 {
    15.0
}
fn default_moderate_savings_pct() -> f64 {
    10.0
}
fn default_comfort_temp_max() -> f64 {
    26.0
}
fn default_comfort_humidity_max() -> f64 {
    60.0
}
fn default_cheap_price_threshold() -> f64 {
    0.12
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            strong_savings_pct: default_strong_savings_pct(),
            good_savings_pct: default_good_savings_pct(),
            moderate_savings_pct: default_moderate_savings_pct(),
            comfort_temp_max: default_comfort_temp_max(),
            comfort_humidity_max: default_comfort_humidity_max(),
            cheap_price_threshold: default_cheap_price_threshold(),
        }
    }
}

/// Limits for calls to external forecast providers and the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    #[serde(default = "default_collaborator_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_collaborator_timeout_ms() -> u64 {
    2000
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_collaborator_timeout_ms(),
        }
    }
}

impl CollaboratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Process definitions and the quality profiles built from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_processes")]
    pub processes: Vec<ProcessDefinition>,
    #[serde(default = "default_profiles")]
    pub profiles: Vec<QualityProfileConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            processes: default_processes(),
            profiles: default_profiles(),
        }
    }
}

#[expect(clippy::too_many_arguments)]
fn process(
    name: &str,
    nominal: u32,
    min: u32,
    max: u32,
    energy_kw: f64,
    sequence_order: u32,
    optimal_temp_range: TemperatureRange,
    critical_temp_max: f64,
    optimal_humidity_max: f64,
) -> ProcessDefinition {
    ProcessDefinition {
        name: name.to_owned(),
        nominal_duration_min: nominal,
        min_duration_min: min,
        max_duration_min: max,
        energy_kw,
        sequence_order,
        optimal_temp_range,
        critical_temp_max,
        optimal_humidity_max,
    }
}

/// Chocolate line: standard runs about 5 h, premium about 8 h (longer conching)
fn default_processes() -> Vec<ProcessDefinition> {
    let ambient = TemperatureRange::new(18.0, 28.0);
    let cool = TemperatureRange::new(18.0, 24.0);
    vec![
        process("mixing", 30, 20, 45, 15.0, 1, ambient, 32.0, 60.0),
        process("refining", 60, 45, 90, 45.0, 2, TemperatureRange::new(18.0, 26.0), 30.0, 55.0),
        process("conching_standard", 120, 90, 180, 30.0, 3, ambient, 32.0, 60.0),
        process("conching_premium", 300, 240, 420, 30.0, 3, ambient, 32.0, 60.0),
        process("tempering", 30, 20, 45, 12.0, 4, cool, 27.0, 55.0),
        process("molding", 20, 15, 30, 8.0, 5, cool, 27.0, 55.0),
        process("cooling", 20, 15, 30, 20.0, 6, TemperatureRange::new(15.0, 22.0), 25.0, 50.0),
    ]
}

fn default_profiles() -> Vec<QualityProfileConfig> {
    let chain = |conching: &str| {
        ["mixing", "refining", conching, "tempering", "molding", "cooling"]
            .iter()
            .map(|name| (*name).to_owned())
            .collect()
    };
    vec![
        QualityProfileConfig {
            quality_type: "standard".to_owned(),
            processes: chain("conching_standard"),
        },
        QualityProfileConfig {
            quality_type: "premium".to_owned(),
            processes: chain("conching_premium"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_constants() {
        let config = PlannerConfig::default();
        assert_eq!(config.production.batch_size_kg, 10.0);
        assert_eq!(config.scoring.price_ceiling, 0.30);
        assert_eq!(config.scoring.price_weight, 0.6);
        assert_eq!(config.scoring.climate_weight, 0.4);
        assert_eq!(config.baseline.hours, vec![8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(config.projections.monthly_business_days, 22.0);
        assert_eq!(config.projections.annual_business_days, 248.0);
        assert_eq!(config.collaborators.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_default_catalog_has_both_profiles() {
        let catalog = CatalogConfig::default();
        assert_eq!(catalog.profiles.len(), 2);
        assert!(catalog.processes.iter().any(|p| p.name == "conching_premium"));
        assert_eq!(catalog.profiles[1].processes[2], "conching_premium");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
            [production]
            batch_size_kg = 25.0

            [scoring]
            price_ceiling = 0.40
        "#;
        let config: PlannerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.production.batch_size_kg, 25.0);
        assert_eq!(config.production.default_quality, "standard");
        assert_eq!(config.scoring.price_ceiling, 0.40);
        assert_eq!(config.scoring.price_weight, 0.6);
        assert_eq!(config.tariff, TariffConfig::default());
    }

    #[test]
    fn test_toml_serialization() {
        let config = PlannerConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: PlannerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }
}
