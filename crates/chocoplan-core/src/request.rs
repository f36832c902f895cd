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

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Caller's planning request; unset fields fall back to configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Day to plan; defaults to the day after the reference time
    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    /// Output quantity (kg); defaults to `production.daily_target_kg`
    #[serde(default)]
    pub target_kg: Option<f64>,

    /// Share of batches per non-default quality; defaults to `production.quality_mix`
    #[serde(default)]
    pub quality_mix: Option<BTreeMap<String, f64>>,
}

impl PlanRequest {
    pub fn for_date(target_date: NaiveDate) -> Self {
        Self {
            target_date: Some(target_date),
            ..Default::default()
        }
    }
}

/// Request with every default applied and batch counts derived
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub target_date: NaiveDate,
    pub target_kg: f64,
    pub batches: BTreeMap<String, u32>,
}

impl ResolvedRequest {
    pub fn total_batches(&self) -> u32 {
        self.batches.values().fold(0, |sum, count| sum.saturating_add(*count))
    }
}

/// Split `ceil(target_kg / batch_size_kg)` batches across quality types
///
/// Every quality in `mix` except the default gets `round(total × ratio)`, never more
/// than what is left; the default quality receives the remainder. A total above
/// `max_batches` is rejected.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn derive_batch_counts(
    target_kg: f64,
    batch_size_kg: f64,
    max_batches: u32,
    default_quality: &str,
    mix: &BTreeMap<String, f64>,
) -> Result<BTreeMap<String, u32>, ValidationError> {
    if !target_kg.is_finite() || target_kg < 0.0 {
        return Err(ValidationError::InvalidTarget(target_kg));
    }
    if !batch_size_kg.is_finite() || batch_size_kg <= 0.0 {
        return Err(ValidationError::config(format!(
            "production.batch_size_kg must be positive, got {batch_size_kg}"
        )));
    }

    let mut ratio_sum = 0.0;
    for (quality, ratio) in mix {
        if quality == default_quality {
            continue;
        }
        if !(0.0..=1.0).contains(ratio) {
            return Err(ValidationError::InvalidRatio {
                quality: quality.clone(),
                ratio: *ratio,
            });
        }
        ratio_sum += ratio;
    }
    if ratio_sum > 1.0 + 1e-9 {
        return Err(ValidationError::RatioSumExceeded(ratio_sum));
    }

    let total = (target_kg / batch_size_kg).ceil();
    if total > f64::from(max_batches) {
        return Err(ValidationError::TooManyBatches {
            requested: total as u64,
            limit: max_batches,
        });
    }
    let total = total as u32;
    let mut remaining = total;
    let mut counts = BTreeMap::new();
    for (quality, ratio) in mix {
        if quality == default_quality {
            continue;
        }
        let count = ((f64::from(total) * ratio).round() as u32).min(remaining);
        remaining -= count;
        counts.insert(quality.clone(), count);
    }
    counts.insert(default_quality.to_owned(), remaining);

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mix(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(q, r)| ((*q).to_owned(), *r)).collect()
    }

    #[test]
    fn test_default_production_split() {
        let counts =
            derive_batch_counts(200.0, 10.0, 100, "standard", &mix(&[("premium", 0.3)]))
                .unwrap();
        assert_eq!(counts["premium"], 6);
        assert_eq!(counts["standard"], 14);
    }

    #[test]
    fn test_partial_batch_rounds_up() {
        let counts = derive_batch_counts(95.0, 10.0, 100, "standard", &BTreeMap::new()).unwrap();
        assert_eq!(counts["standard"], 10);
    }

    #[test]
    fn test_zero_target_gives_zero_batches() {
        let counts =
            derive_batch_counts(0.0, 10.0, 100, "standard", &mix(&[("premium", 0.3)]))
                .unwrap();
        assert_eq!(counts.values().sum::<u32>(), 0);
    }

    #[test]
    fn test_rounding_never_exceeds_total() {
        // 3 batches: round(1.5) + round(1.5) would be 4
        let counts = derive_batch_counts(
            30.0,
            10.0,
            100,
            "standard",
            &mix(&[("premium", 0.5), ("ruby", 0.5)]),
        )
        .unwrap();
        assert_eq!(counts.values().sum::<u32>(), 3);
        assert_eq!(counts["premium"], 2);
        assert_eq!(counts["ruby"], 1);
        assert_eq!(counts["standard"], 0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            derive_batch_counts(-5.0, 10.0, 100, "standard", &BTreeMap::new()).unwrap_err(),
            ValidationError::InvalidTarget(-5.0)
        );
        assert!(matches!(
            derive_batch_counts(100.0, 10.0, 100, "standard", &mix(&[("premium", 1.2)])),
            Err(ValidationError::InvalidRatio { .. })
        ));
        assert!(matches!(
            derive_batch_counts(
                100.0,
                10.0,
                100,
                "standard",
                &mix(&[("premium", 0.7), ("ruby", 0.6)])
            ),
            Err(ValidationError::RatioSumExceeded(_))
        ));
        assert!(matches!(
            derive_batch_counts(100.0, 0.0, 100, "standard", &BTreeMap::new()),
            Err(ValidationError::Config(_))
        ));
    }

    #[test]
    fn test_total_above_limit_rejected() {
        assert_eq!(
            derive_batch_counts(2.0e7, 10.0, 100, "standard", &BTreeMap::new()).unwrap_err(),
            ValidationError::TooManyBatches {
                requested: 2_000_000,
                limit: 100
            }
        );
        // Exactly at the limit is fine
        let counts = derive_batch_counts(1000.0, 10.0, 100, "standard", &BTreeMap::new()).unwrap();
        assert_eq!(counts["standard"], 100);
    }

    #[test]
    fn test_total_batches_saturates() {
        let request = ResolvedRequest {
            target_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            target_kg: 0.0,
            batches: BTreeMap::from([("standard".to_owned(), u32::MAX), ("premium".to_owned(), 1)]),
        };
        assert_eq!(request.total_batches(), u32::MAX);
    }
}
