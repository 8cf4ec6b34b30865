//! Travelcast - weather-aware travel planning.
//!
//! # Overview
//!
//! Travelcast consumes a third-party 3-hour forecast feed, reduces it into
//! per-day summaries, and matches destinations against a traveller's
//! temperature and sky-condition preferences. It never forecasts weather
//! itself and keeps no state between requests.
//!
//! # Modules
//!
//! - [`model`]: Forecast points, location metadata, and derived summaries
//! - [`aggregation`]: Pure reduction of forecast points into daily aggregates
//! - [`provider`]: The weather data capability
//! - [`data_sources`]: OpenWeatherMap client
//! - [`fanout`]: Concurrent per-destination fetching (tolerant or strict)
//! - [`matching`]: Preference matching for suggestions
//! - [`planner`]: The single-lookup, comparison, and suggestion flows
//! - [`tips`]: Static tourist tips
//! - [`api`]: HTTP API handlers
//! - [`config`]: Environment configuration
//! - [`error`]: Error types

pub mod aggregation;
pub mod api;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod fanout;
pub mod matching;
pub mod model;
pub mod planner;
pub mod provider;
pub mod tips;

#[cfg(test)]
mod testing;
