//! Orchestration of the caller-facing flows.
//!
//! - Single-location lookup: one fetch, then every windowed summary.
//! - Multi-destination comparison: strict fan-out, then daily reduction.
//! - Preference-based suggestion: tolerant fan-out over the built-in
//!   candidate pool, then preference matching.
//!
//! # Usage
//!
//! ```ignore
//! let planner = TravelPlanner::new(Some(provider), utc());
//! let forecast = planner.lookup_location(Some("Paris,FR"), None).await?;
//! ```

use std::sync::Arc;

use chrono::FixedOffset;
use tracing::{info, instrument};

use crate::aggregation::{DEFAULT_OUTLOOK_DAYS, ForecastAggregator, RepresentativePolicy};
use crate::error::TravelError;
use crate::fanout::{FanOutCoordinator, FanOutPolicy};
use crate::matching::{PreferenceMatcher, SUGGESTION_CANDIDATES};
use crate::model::{
    ComparedDestination, LocationForecast, MatchResult, Preference, TimezoneChoice,
};
use crate::provider::WeatherDataProvider;
use crate::tips::{TouristTips, tips_for};

/// Entry point for the travel-weather flows.
#[derive(Clone)]
pub struct TravelPlanner {
    /// `None` when no provider credential is configured.
    provider: Option<Arc<dyn WeatherDataProvider>>,
    offset: FixedOffset,
    policy: RepresentativePolicy,
}

impl TravelPlanner {
    /// Create a planner bucketing dates under `offset`.
    pub fn new(provider: Option<Arc<dyn WeatherDataProvider>>, offset: FixedOffset) -> Self {
        Self {
            provider,
            offset,
            policy: RepresentativePolicy::default(),
        }
    }

    /// Use a different representative-condition strategy for daily aggregates.
    pub fn with_policy(mut self, policy: RepresentativePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn provider(&self) -> Result<&Arc<dyn WeatherDataProvider>, TravelError> {
        self.provider.as_ref().ok_or_else(|| {
            TravelError::configuration(
                "Weather API key is not configured. Set WEATHER_API_KEY in the environment or .env file.",
            )
        })
    }

    fn aggregator(&self, offset: FixedOffset) -> ForecastAggregator {
        ForecastAggregator::new(offset).with_policy(self.policy)
    }

    /// Fetch one location and derive every summary from its forecast.
    ///
    /// # Errors
    ///
    /// - `Configuration` when no provider is configured
    /// - `Validation` (`LOCATION_MISSING`) for a missing or blank location
    /// - `Validation` (`VALIDATION_FAILED`) for a timezone other than `utc`
    ///   or `location`
    /// - `Provider` with the exact provider error kind
    #[instrument(skip(self))]
    pub async fn lookup_location(
        &self,
        location: Option<&str>,
        timezone: Option<&str>,
    ) -> Result<LocationForecast, TravelError> {
        let provider = self.provider()?;
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| TravelError::missing("LOCATION_MISSING", "Location"))?;
        let timezone = TimezoneChoice::parse(timezone).map_err(|value| {
            TravelError::validation(format!(
                "timezone must be 'utc' or 'location', got '{value}'"
            ))
        })?;

        let forecast = provider.fetch_forecast(location).await?;

        let offset = match timezone {
            TimezoneChoice::Utc => self.offset,
            TimezoneChoice::Location => forecast.location.offset(),
        };
        let aggregator = self.aggregator(offset);

        let response = LocationForecast {
            utc_offset_seconds: offset.local_minus_utc(),
            current: aggregator.current(&forecast.points, &forecast.location),
            hourly: aggregator.short_horizon(&forecast.points),
            rain_chance: aggregator.rain_chance(&forecast.points),
            outlook: aggregator.outlook(&forecast.points, &forecast.location, DEFAULT_OUTLOOK_DAYS),
            daily: aggregator.reduce_to_daily(&forecast.points),
            location: forecast.location,
            points: forecast.points,
        };

        info!(
            location,
            resolved = %response.location.resolved_name,
            points = response.points.len(),
            days = response.daily.len(),
            "Location forecast served"
        );

        Ok(response)
    }

    /// Compare a comma-separated list of destinations. Any failure fails
    /// the whole comparison.
    #[instrument(skip(self))]
    pub async fn compare_destinations(
        &self,
        destinations: Option<&str>,
    ) -> Result<Vec<ComparedDestination>, TravelError> {
        let provider = self.provider()?;
        let destinations = split_destinations(destinations.unwrap_or_default());
        if destinations.is_empty() {
            return Err(TravelError::missing("VALIDATION_FAILED", "Destinations"));
        }

        let outcomes = FanOutCoordinator::new(provider.clone())
            .fan_out(&destinations, FanOutPolicy::Strict)
            .await?;

        let aggregator = self.aggregator(self.offset);
        let compared: Vec<ComparedDestination> = outcomes
            .into_iter()
            .filter_map(|o| {
                let forecast = o.outcome.ok()?;
                Some(ComparedDestination {
                    daily: aggregator.reduce_to_daily(&forecast.points),
                    destination: o.destination,
                    location: forecast.location,
                    points: forecast.points,
                })
            })
            .collect();

        info!(count = compared.len(), "Destinations compared");
        Ok(compared)
    }

    /// Suggest destinations from the built-in candidate pool.
    ///
    /// Unreachable candidates are dropped, so the result may be empty.
    #[instrument(skip(self))]
    pub async fn suggest_destinations(
        &self,
        preference: &Preference,
    ) -> Result<Vec<MatchResult>, TravelError> {
        let provider = self.provider()?;
        validate_preference(preference)?;

        let outcomes = FanOutCoordinator::new(provider.clone())
            .fan_out(&SUGGESTION_CANDIDATES, FanOutPolicy::Tolerant)
            .await?;

        let matches = PreferenceMatcher::new(self.offset).match_destinations(&outcomes, preference);

        info!(
            candidates = outcomes.len(),
            reachable = outcomes.iter().filter(|o| o.outcome.is_ok()).count(),
            matched = matches.len(),
            "Suggestions computed"
        );
        Ok(matches)
    }

    /// Suggest destinations from a JSON-encoded preference such as
    /// `{"temperature":"warm","conditions":"sunny","month":7}`.
    pub async fn suggest_from_json(
        &self,
        preferences: Option<&str>,
    ) -> Result<Vec<MatchResult>, TravelError> {
        self.provider()?;
        let preference = parse_preference(preferences)?;
        self.suggest_destinations(&preference).await
    }

    /// Tourist tips for a location. Needs no provider.
    pub fn tourist_tips(&self, location: Option<&str>) -> Result<TouristTips, TravelError> {
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| TravelError::missing("LOCATION_MISSING", "Location"))?;

        Ok(tips_for(location))
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_destinations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect()
}

/// Decode and validate a JSON preference.
pub fn parse_preference(raw: Option<&str>) -> Result<Preference, TravelError> {
    let raw = raw
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| TravelError::missing("VALIDATION_FAILED", "Preferences"))?;

    let preference: Preference = serde_json::from_str(raw)
        .map_err(|e| TravelError::validation(format!("invalid preferences: {e}")))?;

    validate_preference(&preference)?;
    Ok(preference)
}

fn validate_preference(preference: &Preference) -> Result<(), TravelError> {
    if !(1..=12).contains(&preference.month) {
        return Err(TravelError::validation(format!(
            "month must be between 1 and 12, got {}",
            preference.month
        )));
    }
    Ok(())
}
