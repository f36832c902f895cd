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

//! Async front of the planner.
//!
//! Collaborator calls are the only places that may block. Each one runs under
//! `collaborators.timeout_ms`; a timeout or failure degrades to defaults and never
//! fails the plan. The optimizer itself runs synchronously afterwards.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chocoplan_types::{HOURS_PER_DAY, OptimizationPlan, StateClassification};
use chrono::{DateTime, Utc};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{CollaboratorError, Result};
use crate::forecast::{NormalizedForecast, assemble};
use crate::planner::ProductionPlanner;
use crate::request::PlanRequest;
use crate::traits::{ClimateForecastSource, PriceForecastSource, ProductionStateClassifier};

pub struct PlanningService {
    planner: Arc<ProductionPlanner>,
    prices: Arc<dyn PriceForecastSource>,
    climate: Arc<dyn ClimateForecastSource>,
    classifier: Option<Arc<dyn ProductionStateClassifier>>,
}

impl fmt::Debug for PlanningService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanningService")
            .field("prices", &self.prices.name())
            .field("climate", &self.climate.name())
            .field("classifier", &self.classifier.as_ref().map(|c| c.name()))
            .finish_non_exhaustive()
    }
}

impl PlanningService {
    pub fn new(
        planner: ProductionPlanner,
        prices: Arc<dyn PriceForecastSource>,
        climate: Arc<dyn ClimateForecastSource>,
    ) -> Self {
        Self {
            planner: Arc::new(planner),
            prices,
            climate,
            classifier: None,
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn ProductionStateClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn planner(&self) -> &ProductionPlanner {
        &self.planner
    }

    /// Fetch forecasts, classify hours and build the plan
    ///
    /// Only validation errors are returned; collaborator trouble shows up as
    /// degraded-input flags and default timeline labels.
    pub async fn plan(
        &self,
        request: &PlanRequest,
        reference_time: DateTime<Utc>,
    ) -> Result<OptimizationPlan> {
        let resolved = self.planner.resolve_request(request, reference_time)?;
        let config = self.planner.config();
        let limit = config.collaborators.timeout_ms;
        let date = resolved.target_date;

        let (prices, climate) = tokio::join!(
            bounded("price forecast", limit, self.prices.fetch_prices(date)),
            bounded("climate forecast", limit, self.climate.fetch_climate(date)),
        );
        let prices = prices
            .inspect_err(|e| warn!("{e}; using default prices"))
            .ok();
        let climate = climate
            .inspect_err(|e| warn!("{e}; using default climate"))
            .ok();

        let forecast = assemble(prices.as_deref(), climate.as_deref(), date, &config.defaults);
        let states = match &self.classifier {
            Some(classifier) => Some(classify_hours(classifier, &forecast, limit).await),
            None => None,
        };

        self.planner
            .optimize(&resolved, &forecast, states.as_deref(), reference_time)
    }
}

/// Run a collaborator call under a timeout
async fn bounded<T>(
    collaborator: &'static str,
    timeout_ms: u64,
    call: impl Future<Output = anyhow::Result<T>>,
) -> std::result::Result<T, CollaboratorError> {
    match timeout(Duration::from_millis(timeout_ms), call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(CollaboratorError::Failed {
            collaborator,
            source,
        }),
        Err(_) => Err(CollaboratorError::Timeout {
            collaborator,
            timeout_ms,
        }),
    }
}

/// Classify every hour concurrently; failed hours stay `None`
async fn classify_hours(
    classifier: &Arc<dyn ProductionStateClassifier>,
    forecast: &NormalizedForecast,
    timeout_ms: u64,
) -> Vec<Option<StateClassification>> {
    let tasks: Vec<_> = forecast
        .hours
        .iter()
        .map(|hour| {
            let classifier = Arc::clone(classifier);
            let hour = *hour;
            tokio::spawn(async move {
                bounded(
                    "production-state classifier",
                    timeout_ms,
                    classifier.classify(hour.price_per_kwh, hour.temperature_c, hour.humidity_pct),
                )
                .await
            })
        })
        .collect();

    let mut states = Vec::with_capacity(HOURS_PER_DAY as usize);
    let mut failures = 0;
    for (hour, task) in tasks.into_iter().enumerate() {
        let state = match task.await {
            Ok(Ok(state)) if state.confidence.is_nan() => {
                debug!("Hour {hour}: classifier returned NaN confidence");
                failures += 1;
                None
            }
            Ok(Ok(state)) => Some(StateClassification {
                confidence: state.confidence.clamp(0.0, 1.0),
                ..state
            }),
            Ok(Err(e)) => {
                debug!("Hour {hour}: {e}");
                failures += 1;
                None
            }
            Err(e) => {
                debug!("Hour {hour}: classifier task aborted: {e}");
                failures += 1;
                None
            }
        };
        states.push(state);
    }

    if failures > 0 {
        warn!(
            "Production-state classifier failed for {failures} hours, labelled Moderate"
        );
    }
    states
}
