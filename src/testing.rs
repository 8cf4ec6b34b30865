//! In-memory provider and fixtures shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::model::{ForecastData, ForecastPoint, LocationMetadata};
use crate::provider::WeatherDataProvider;

/// Provider answering from a fixed table. Unknown queries are `NotFound`.
#[derive(Default)]
pub struct StaticProvider {
    responses: HashMap<String, Result<ForecastData, ProviderError>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, response: Result<ForecastData, ProviderError>) -> Self {
        self.responses.insert(query.to_string(), response);
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherDataProvider for StaticProvider {
    async fn fetch_forecast(&self, location_query: &str) -> Result<ForecastData, ProviderError> {
        if let Some(delay) = self.delays.get(location_query) {
            tokio::time::sleep(*delay).await;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.responses
            .get(location_query)
            .cloned()
            .unwrap_or(Err(ProviderError::NotFound))
    }
}

pub fn point(timestamp_utc: i64, temperature_c: f64, condition_main: &str) -> ForecastPoint {
    let condition_code = match condition_main {
        "clear" => 800,
        "clouds" => 803,
        "rain" => 500,
        "drizzle" => 300,
        "snow" => 600,
        "thunderstorm" => 200,
        _ => 701,
    };

    ForecastPoint {
        timestamp_utc,
        temperature_c,
        condition_code,
        condition_main: condition_main.to_string(),
        description: String::new(),
        wind_speed_ms: 2.0,
        humidity_pct: 60,
        precipitation_probability: 0.0,
    }
}

pub fn forecast(name: &str, country: &str, points: Vec<ForecastPoint>) -> ForecastData {
    ForecastData {
        location: LocationMetadata {
            resolved_name: name.to_string(),
            country_code: country.to_string(),
            sunrise_utc: 0,
            sunset_utc: 0,
            utc_offset_seconds: 0,
        },
        points,
    }
}
