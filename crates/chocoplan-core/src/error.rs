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

//! Error types for the planner

use thiserror::Error;

/// Structural faults in the process catalog, and lookups of unknown profiles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown quality type '{0}'")]
    UnknownQuality(String),

    #[error("process '{0}' is defined more than once")]
    DuplicateProcess(String),

    #[error("quality profile '{0}' is defined more than once")]
    DuplicateProfile(String),

    #[error("quality profile '{0}' has no processes")]
    EmptyProfile(String),

    #[error("quality profile '{0}' has a total nominal duration of zero")]
    ZeroDuration(String),

    #[error("quality profile '{profile}' references unknown process '{process}'")]
    UnknownProcess { profile: String, process: String },

    #[error(
        "quality profile '{profile}': sequence order must increase by one, '{process}' has {found} after {previous}"
    )]
    SequenceOrder {
        profile: String,
        process: String,
        previous: u32,
        found: u32,
    },

    #[error("process '{0}' needs min <= nominal <= max duration and a non-negative energy draw")]
    InvalidProcess(String),
}

/// Invalid request or configuration; no partial plan is produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown quality type '{0}'")]
    UnknownQuality(String),

    #[error("batch count for '{quality}' must not be negative, got {count}")]
    NegativeCount { quality: String, count: i64 },

    #[error("target quantity must be a non-negative number, got {0} kg")]
    InvalidTarget(f64),

    #[error("quality mix ratio for '{quality}' must be within 0..=1, got {ratio}")]
    InvalidRatio { quality: String, ratio: f64 },

    #[error("quality mix ratios sum to {0}, must not exceed 1")]
    RatioSumExceeded(f64),

    #[error("{requested} batches requested, at most {limit} fit in one plan")]
    TooManyBatches { requested: u64, limit: u32 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ValidationError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Failure of an external collaborator; always recovered inside the planner
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("{collaborator} did not answer within {timeout_ms} ms")]
    Timeout {
        collaborator: &'static str,
        timeout_ms: u64,
    },

    #[error("{collaborator} failed: {source}")]
    Failed {
        collaborator: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// Errors surfaced by a planning call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<CatalogError> for PlanError {
    fn from(err: CatalogError) -> Self {
        Self::Validation(ValidationError::from(err))
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
