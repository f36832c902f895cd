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

use std::collections::BTreeMap;

use chocoplan_types::Baseline;
use chocoplan_types::config::BaselineConfig;
use tracing::debug;

use crate::catalog::ProcessCatalog;
use crate::error::CatalogError;
use crate::forecast::NormalizedForecast;

/// Cost of running every requested batch on the fixed shift
///
/// Line conflicts are ignored: the shift is a price reference, not an executable plan.
#[derive(Debug, Clone, Copy)]
pub struct BaselineEstimator<'a> {
    catalog: &'a ProcessCatalog,
    config: &'a BaselineConfig,
}

impl<'a> BaselineEstimator<'a> {
    pub fn new(catalog: &'a ProcessCatalog, config: &'a BaselineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn estimate(
        &self,
        requested: &BTreeMap<String, u32>,
        forecast: &NormalizedForecast,
    ) -> Result<Baseline, CatalogError> {
        let mut total_energy_kwh = 0.0;
        for (quality, count) in requested {
            let profile = self.catalog.get_profile(quality)?;
            total_energy_kwh += profile.energy_per_batch_kwh() * f64::from(*count);
        }

        let hours = self.config.hours.clone();
        let avg_price_per_kwh = if hours.is_empty() {
            0.0
        } else {
            hours.iter().map(|&h| forecast.price_at(h)).sum::<f64>() / hours.len() as f64
        };
        let total_cost = total_energy_kwh * avg_price_per_kwh;

        debug!(
            "Baseline: {:.1} kWh at {:.4} EUR/kWh = {:.2} EUR",
            total_energy_kwh, avg_price_per_kwh, total_cost
        );

        Ok(Baseline {
            hours,
            avg_price_per_kwh,
            total_energy_kwh,
            total_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::normalize_hourly;
    use chocoplan_types::HourlyForecast;
    use chocoplan_types::config::{CatalogConfig, ForecastDefaults};

    fn forecast(price: impl Fn(u32) -> f64) -> NormalizedForecast {
        let entries: Vec<_> = (0..24)
            .map(|hour| HourlyForecast {
                hour,
                price_per_kwh: price(hour),
                temperature_c: 22.0,
                humidity_pct: 50.0,
            })
            .collect();
        normalize_hourly(&entries, &ForecastDefaults::default())
    }

    #[test]
    fn test_baseline_uses_shift_hours_only() {
        let catalog = ProcessCatalog::from_config(&CatalogConfig::default()).unwrap();
        let config = BaselineConfig::default();
        // 0.20 inside 8..=15, 0.05 elsewhere
        let forecast = forecast(|h| if (8..=15).contains(&h) { 0.20 } else { 0.05 });
        let requested = BTreeMap::from([("standard".to_owned(), 2)]);

        let baseline = BaselineEstimator::new(&catalog, &config)
            .estimate(&requested, &forecast)
            .unwrap();

        assert_eq!(baseline.hours, (8..=15).collect::<Vec<_>>());
        assert!((baseline.avg_price_per_kwh - 0.20).abs() < 1e-12);
        let energy = 2.0 * catalog.get_profile("standard").unwrap().energy_per_batch_kwh();
        assert!((baseline.total_energy_kwh - energy).abs() < 1e-9);
        assert!((baseline.total_cost - energy * 0.20).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_with_no_batches_costs_nothing() {
        let catalog = ProcessCatalog::from_config(&CatalogConfig::default()).unwrap();
        let config = BaselineConfig::default();
        let baseline = BaselineEstimator::new(&catalog, &config)
            .estimate(&BTreeMap::new(), &forecast(|_| 0.10))
            .unwrap();
        assert_eq!(baseline.total_cost, 0.0);
        assert_eq!(baseline.total_energy_kwh, 0.0);
    }

    #[test]
    fn test_unknown_quality_rejected() {
        let catalog = ProcessCatalog::from_config(&CatalogConfig::default()).unwrap();
        let config = BaselineConfig::default();
        let requested = BTreeMap::from([("ruby".to_owned(), 1)]);
        assert!(
            BaselineEstimator::new(&catalog, &config)
                .estimate(&requested, &forecast(|_| 0.10))
                .is_err()
        );
    }
}
