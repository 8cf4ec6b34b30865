//! Concurrent per-destination forecast fetching.
//!
//! One future per destination, all dispatched together and all driven to
//! completion. Outcomes come back in input order regardless of which fetch
//! settled first.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::{ProviderError, TravelError};
use crate::model::ForecastData;
use crate::provider::WeatherDataProvider;

/// How a fan-out treats individual failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOutPolicy {
    /// Failures are captured per destination and never abort the batch.
    Tolerant,
    /// Any failure fails the whole batch.
    Strict,
}

/// Result of fetching one destination.
#[derive(Debug, Clone)]
pub struct DestinationOutcome {
    pub destination: String,
    pub outcome: Result<ForecastData, ProviderError>,
}

impl DestinationOutcome {
    /// The forecast, if the fetch succeeded.
    pub fn forecast(&self) -> Option<&ForecastData> {
        self.outcome.as_ref().ok()
    }
}

/// Dispatches provider calls for many destinations at once.
#[derive(Clone)]
pub struct FanOutCoordinator {
    provider: Arc<dyn WeatherDataProvider>,
}

impl FanOutCoordinator {
    pub fn new(provider: Arc<dyn WeatherDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch every destination concurrently.
    ///
    /// Under [`FanOutPolicy::Tolerant`] this never fails. Under
    /// [`FanOutPolicy::Strict`] the first failing destination in input order
    /// is reported as [`TravelError::Batch`] and no outcomes are returned.
    /// In both modes every fetch runs to completion.
    pub async fn fan_out<S>(
        &self,
        destinations: &[S],
        policy: FanOutPolicy,
    ) -> Result<Vec<DestinationOutcome>, TravelError>
    where
        S: AsRef<str>,
    {
        let fetches = destinations.iter().map(|destination| {
            let destination = destination.as_ref();
            async move {
                let outcome = self.provider.fetch_forecast(destination).await;
                DestinationOutcome {
                    destination: destination.to_string(),
                    outcome,
                }
            }
        });

        let outcomes = join_all(fetches).await;

        let failed = outcomes.iter().filter(|o| o.outcome.is_err()).count();
        for outcome in &outcomes {
            if let Err(e) = &outcome.outcome {
                warn!(
                    destination = %outcome.destination,
                    error = %e,
                    "Forecast fetch failed"
                );
            }
        }

        debug!(
            total = outcomes.len(),
            failed,
            ?policy,
            "Fan-out settled"
        );

        if policy == FanOutPolicy::Strict {
            let first_failure = outcomes.iter().find_map(|o| {
                o.outcome
                    .as_ref()
                    .err()
                    .map(|source| (o.destination.clone(), source.clone()))
            });

            if let Some((destination, source)) = first_failure {
                return Err(TravelError::Batch {
                    destination,
                    source,
                });
            }
        }

        Ok(outcomes)
    }
}
