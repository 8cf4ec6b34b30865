//! Preference matching for destination suggestions.
//!
//! Each destination is judged on its own: the forecast points falling in the
//! target month are averaged, the average must land in the requested
//! temperature band, and at least one of those points must satisfy the
//! condition filter.
//!
//! The provider only forecasts a few days ahead, so a month outside that
//! window has no points and every destination is excluded.

use chrono::{Datelike, FixedOffset};
use tracing::debug;

use crate::fanout::DestinationOutcome;
use crate::model::{ForecastData, MatchResult, Preference, utc};

/// Destinations considered when the caller asks for suggestions.
pub const SUGGESTION_CANDIDATES: [&str; 15] = [
    "London,UK",
    "Paris,FR",
    "New York,US",
    "Tokyo,JP",
    "Sydney,AU",
    "Rome,IT",
    "Barcelona,ES",
    "Amsterdam,NL",
    "Dubai,AE",
    "Singapore,SG",
    "Bangkok,TH",
    "Istanbul,TR",
    "Cairo,EG",
    "Cape Town,ZA",
    "Rio de Janeiro,BR",
];

/// Filters destinations against a [`Preference`].
#[derive(Debug, Clone, Copy)]
pub struct PreferenceMatcher {
    offset: FixedOffset,
}

impl Default for PreferenceMatcher {
    fn default() -> Self {
        Self::new(utc())
    }
}

impl PreferenceMatcher {
    /// Create a matcher deriving calendar months under `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Judge a single destination.
    ///
    /// Returns `None` when no point falls in the target month, when the
    /// average is outside the band, or when no point satisfies the
    /// condition filter.
    pub fn evaluate(
        &self,
        destination: &str,
        forecast: &ForecastData,
        preference: &Preference,
    ) -> Option<MatchResult> {
        let in_month: Vec<_> = forecast
            .points
            .iter()
            .filter(|p| {
                p.local_time(self.offset)
                    .is_some_and(|t| t.month() == preference.month)
            })
            .collect();

        if in_month.is_empty() {
            debug!(destination, month = preference.month, "No points in target month");
            return None;
        }

        let avg_temperature_c =
            in_month.iter().map(|p| p.temperature_c).sum::<f64>() / in_month.len() as f64;

        if !preference.temperature.contains(avg_temperature_c) {
            debug!(destination, avg_temperature_c, "Outside temperature band");
            return None;
        }

        if !in_month
            .iter()
            .any(|p| preference.conditions.accepts(&p.condition_main))
        {
            debug!(destination, "No point satisfies condition filter");
            return None;
        }

        Some(MatchResult {
            destination: destination.to_string(),
            avg_temperature_c,
            resolved_name: forecast.location.resolved_name.clone(),
            country_code: forecast.location.country_code.clone(),
        })
    }

    /// Filter fan-out outcomes, keeping input order. Failed fetches are
    /// skipped.
    pub fn match_destinations(
        &self,
        outcomes: &[DestinationOutcome],
        preference: &Preference,
    ) -> Vec<MatchResult> {
        outcomes
            .iter()
            .filter_map(|o| {
                o.forecast()
                    .and_then(|forecast| self.evaluate(&o.destination, forecast, preference))
            })
            .collect()
    }
}
