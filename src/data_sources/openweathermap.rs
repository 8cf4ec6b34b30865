//! OpenWeatherMap 5-day / 3-hour forecast client.
//!
//! Returns up to 40 forecast points per location at 3-hour steps, plus the
//! resolved city with its sunrise, sunset and UTC offset.
//!
//! # API Reference
//!
//! See: <https://openweathermap.org/forecast5>
//!
//! # Authentication
//!
//! Requires an API key (`appid`). The key is sent as a query parameter and
//! is never logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProviderError;
use crate::model::{ForecastData, ForecastPoint, LocationMetadata};
use crate::provider::WeatherDataProvider;

/// Client for the OpenWeatherMap forecast API.
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherMapClient {
    /// Create a client against `base_url`, usually
    /// `https://api.openweathermap.org/data/2.5`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base, without the `/forecast` path.
    /// * `api_key` - OpenWeatherMap API key.
    /// * `timeout` - Transport timeout for each request.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the raw 5-day forecast for a location query.
    ///
    /// # Arguments
    ///
    /// * `location` - City query, e.g. "London,UK" or "Cape Town,ZA"
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Unauthorized`] on HTTP 401
    /// - [`ProviderError::NotFound`] on HTTP 404
    /// - [`ProviderError::RateLimited`] on HTTP 429
    /// - [`ProviderError::Unavailable`] on any other failure
    pub async fn get_forecast(&self, location: &str) -> Result<OwmForecastResponse, ProviderError> {
        let url = format!(
            "{}/forecast?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(location),
            urlencoding::encode(&self.api_key)
        );

        debug!(location = %location, "Requesting forecast");

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(ProviderError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(ProviderError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            status if !status.is_success() => {
                return Err(ProviderError::Unavailable(format!(
                    "unexpected HTTP status {status}"
                )));
            }
            _ => {}
        }

        let data = response.json::<OwmForecastResponse>().await?;
        Ok(data)
    }
}

#[async_trait]
impl WeatherDataProvider for OpenWeatherMapClient {
    async fn fetch_forecast(&self, location_query: &str) -> Result<ForecastData, ProviderError> {
        let response = self.get_forecast(location_query).await?;
        Ok(response.into_forecast())
    }
}

// ============================================================================
// Response types
// ============================================================================

/// Response from the `/forecast` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwmForecastResponse {
    /// Forecast entries at 3-hour steps.
    #[serde(default)]
    pub list: Vec<OwmForecastItem>,

    /// The city the query resolved to.
    pub city: OwmCity,
}

impl OwmForecastResponse {
    /// Convert into the provider-neutral model, ordered by timestamp.
    pub fn into_forecast(self) -> ForecastData {
        let mut points: Vec<ForecastPoint> =
            self.list.into_iter().map(ForecastPoint::from).collect();
        points.sort_by_key(|p| p.timestamp_utc);

        ForecastData {
            location: self.city.into(),
            points,
        }
    }
}

/// A single 3-hour forecast entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwmForecastItem {
    /// Unix timestamp of the interval start.
    pub dt: i64,

    /// Temperature and humidity.
    pub main: OwmMain,

    /// Weather conditions; the first entry is the primary one.
    #[serde(default)]
    pub weather: Vec<OwmWeather>,

    /// Wind data.
    #[serde(default)]
    pub wind: OwmWind,

    /// Probability of precipitation (0.0-1.0).
    #[serde(default)]
    pub pop: f64,
}

/// Main measurements of a forecast entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwmMain {
    /// Temperature (Celsius with `units=metric`).
    pub temp: f64,

    /// Relative humidity in percent.
    #[serde(default)]
    pub humidity: u8,
}

/// Weather condition of a forecast entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwmWeather {
    /// Condition code (e.g. 500 = light rain, 800 = clear).
    pub id: i32,

    /// Condition group, e.g. "Rain", "Clouds".
    pub main: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Wind of a forecast entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwmWind {
    /// Wind speed (m/s with `units=metric`).
    #[serde(default)]
    pub speed: f64,
}

/// City block of the forecast response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwmCity {
    pub name: String,

    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub sunrise: i64,

    #[serde(default)]
    pub sunset: i64,

    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: i32,
}

impl From<OwmForecastItem> for ForecastPoint {
    fn from(item: OwmForecastItem) -> Self {
        let (condition_code, condition_main, description) = match item.weather.into_iter().next() {
            Some(w) => (w.id, w.main.to_lowercase(), w.description),
            None => (0, "unknown".to_string(), String::new()),
        };

        ForecastPoint {
            timestamp_utc: item.dt,
            temperature_c: item.main.temp,
            condition_code,
            condition_main,
            description,
            wind_speed_ms: item.wind.speed,
            humidity_pct: item.main.humidity.min(100),
            precipitation_probability: item.pop.clamp(0.0, 1.0),
        }
    }
}

impl From<OwmCity> for LocationMetadata {
    fn from(city: OwmCity) -> Self {
        LocationMetadata {
            resolved_name: city.name,
            country_code: city.country,
            sunrise_utc: city.sunrise,
            sunset_utc: city.sunset,
            utc_offset_seconds: city.timezone,
        }
    }
}
