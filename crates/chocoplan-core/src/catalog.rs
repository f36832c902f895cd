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

//! Registry of process definitions and the quality profiles chained from them.
//!
//! The catalog is built once from [`CatalogConfig`] and then only read. Editing it
//! is a configuration change, never a runtime operation.

use std::collections::{BTreeMap, HashMap};

use chocoplan_types::ProcessDefinition;
use chocoplan_types::config::CatalogConfig;
use tracing::debug;

use crate::error::CatalogError;

/// Mandatory process chain for one quality type, in sequence order
#[derive(Debug, Clone, PartialEq)]
pub struct QualityProfile {
    pub quality_type: String,
    pub processes: Vec<ProcessDefinition>,
}

impl QualityProfile {
    pub fn total_nominal_minutes(&self) -> u32 {
        self.processes
            .iter()
            .fold(0, |sum, p| sum.saturating_add(p.nominal_duration_min))
    }

    /// Whole hours one batch holds the line: ceil(total nominal minutes / 60)
    pub fn required_hours(&self) -> u32 {
        self.total_nominal_minutes().div_ceil(60)
    }

    /// Energy of one batch at nominal durations (kWh)
    pub fn energy_per_batch_kwh(&self) -> f64 {
        self.processes
            .iter()
            .map(ProcessDefinition::nominal_energy_kwh)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCatalog {
    profiles: BTreeMap<String, QualityProfile>,
}

impl ProcessCatalog {
    /// Resolve and validate every configured profile
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut definitions: HashMap<&str, &ProcessDefinition> = HashMap::new();
        for process in &config.processes {
            if process.min_duration_min > process.nominal_duration_min
                || process.nominal_duration_min > process.max_duration_min
                || process.energy_kw.is_nan()
                || process.energy_kw < 0.0
            {
                return Err(CatalogError::InvalidProcess(process.name.clone()));
            }
            if definitions.insert(process.name.as_str(), process).is_some() {
                return Err(CatalogError::DuplicateProcess(process.name.clone()));
            }
        }

        let mut profiles = BTreeMap::new();
        for profile in &config.profiles {
            if profile.processes.is_empty() {
                return Err(CatalogError::EmptyProfile(profile.quality_type.clone()));
            }

            let mut chain = profile
                .processes
                .iter()
                .map(|name| {
                    definitions
                        .get(name.as_str())
                        .map(|definition| (*definition).clone())
                        .ok_or_else(|| CatalogError::UnknownProcess {
                            profile: profile.quality_type.clone(),
                            process: name.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            chain.sort_by_key(|p| p.sequence_order);

            for pair in chain.windows(2) {
                if pair[1].sequence_order != pair[0].sequence_order + 1 {
                    return Err(CatalogError::SequenceOrder {
                        profile: profile.quality_type.clone(),
                        process: pair[1].name.clone(),
                        previous: pair[0].sequence_order,
                        found: pair[1].sequence_order,
                    });
                }
            }

            let resolved = QualityProfile {
                quality_type: profile.quality_type.clone(),
                processes: chain,
            };
            if resolved.total_nominal_minutes() == 0 {
                return Err(CatalogError::ZeroDuration(resolved.quality_type));
            }
            debug!(
                "Catalog profile '{}': {} processes, {} min, {} h window",
                resolved.quality_type,
                resolved.processes.len(),
                resolved.total_nominal_minutes(),
                resolved.required_hours()
            );
            if profiles
                .insert(profile.quality_type.clone(), resolved)
                .is_some()
            {
                return Err(CatalogError::DuplicateProfile(profile.quality_type.clone()));
            }
        }

        Ok(Self { profiles })
    }

    pub fn get_profile(&self, quality_type: &str) -> Result<&QualityProfile, CatalogError> {
        self.profiles
            .get(quality_type)
            .ok_or_else(|| CatalogError::UnknownQuality(quality_type.to_owned()))
    }

    pub fn contains(&self, quality_type: &str) -> bool {
        self.profiles.contains_key(quality_type)
    }

    /// Profiles ordered by quality type name
    pub fn profiles(&self) -> impl Iterator<Item = &QualityProfile> {
        self.profiles.values()
    }

    pub fn quality_types(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}
