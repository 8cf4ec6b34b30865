//! Runtime configuration read from the environment.

use std::env::VarError;
use std::time::Duration;

use chrono::FixedOffset;

use crate::aggregation::RepresentativePolicy;
use crate::error::ConfigError;

/// Default listen port.
const DEFAULT_PORT: &str = "5000";

/// Default OpenWeatherMap API base.
const DEFAULT_WEATHER_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default HTTP timeout for provider calls, in seconds.
const DEFAULT_WEATHER_API_TIMEOUT_SECS: &str = "10";

/// Default browser origins allowed by CORS.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3002";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,

    /// Provider credential. `None` means every forecast request fails with a
    /// configuration error instead of the server refusing to start.
    pub weather_api_key: Option<String>,

    pub weather_api_base_url: String,
    pub weather_api_timeout: Duration,

    /// Offset used to derive calendar dates and months.
    pub utc_offset: FixedOffset,

    /// How each day's representative point is chosen.
    pub representative_policy: RepresentativePolicy,

    pub cors_origins: Vec<String>,
}

/// Load configuration, reading a `.env` file first if one exists.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from an env-var lookup function.
///
/// Kept separate from the process environment so tests can pass a plain map.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let port = or_default("TRAVELCAST_PORT", DEFAULT_PORT)
        .trim()
        .parse::<u16>()
        .map_err(|e| invalid("TRAVELCAST_PORT", e.to_string()))?;

    let weather_api_key = lookup("WEATHER_API_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    let weather_api_base_url = or_default("WEATHER_API_BASE_URL", DEFAULT_WEATHER_API_BASE_URL);

    let timeout_secs = or_default("WEATHER_API_TIMEOUT_SECS", DEFAULT_WEATHER_API_TIMEOUT_SECS)
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid("WEATHER_API_TIMEOUT_SECS", e.to_string()))?;
    if timeout_secs == 0 {
        return Err(invalid(
            "WEATHER_API_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }

    let offset_seconds = or_default("TRAVELCAST_UTC_OFFSET_SECONDS", "0")
        .trim()
        .parse::<i32>()
        .map_err(|e| invalid("TRAVELCAST_UTC_OFFSET_SECONDS", e.to_string()))?;
    let utc_offset = FixedOffset::east_opt(offset_seconds).ok_or_else(|| {
        invalid(
            "TRAVELCAST_UTC_OFFSET_SECONDS",
            format!("{offset_seconds} is outside -86399..=86399"),
        )
    })?;

    let representative_policy = parse_policy(&or_default(
        "TRAVELCAST_REPRESENTATIVE_POLICY",
        "first_point_of_day",
    ))
    .ok_or_else(|| {
        invalid(
            "TRAVELCAST_REPRESENTATIVE_POLICY",
            "expected 'first_point_of_day' or 'most_frequent'".to_string(),
        )
    })?;

    let cors_origins = parse_origins(&or_default("TRAVELCAST_CORS_ORIGINS", DEFAULT_CORS_ORIGINS));

    Ok(AppConfig {
        port,
        weather_api_key,
        weather_api_base_url,
        weather_api_timeout: Duration::from_secs(timeout_secs),
        utc_offset,
        representative_policy,
        cors_origins,
    })
}

fn parse_policy(raw: &str) -> Option<RepresentativePolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "first_point_of_day" => Some(RepresentativePolicy::FirstPointOfDay),
        "most_frequent" => Some(RepresentativePolicy::MostFrequent),
        _ => None,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
