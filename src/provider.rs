//! The weather data capability the rest of the crate depends on.
//!
//! Anything that can turn a free-text location query into a forecast can
//! back the planner: the production [`OpenWeatherMapClient`] or an in-memory
//! double in tests.
//!
//! [`OpenWeatherMapClient`]: crate::data_sources::OpenWeatherMapClient

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::model::ForecastData;

/// Source of short-horizon forecasts.
///
/// Implementations must not retry internally: every error is reported once
/// and treated as final for the current request.
#[async_trait]
pub trait WeatherDataProvider: Send + Sync {
    /// Fetch the forecast for a location query such as `"Paris,FR"`.
    ///
    /// Points are returned ordered by timestamp.
    async fn fetch_forecast(&self, location_query: &str) -> Result<ForecastData, ProviderError>;
}
