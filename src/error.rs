//! Error types for Travelcast.
//!
//! Two layers:
//!
//! - [`ProviderError`]: what a single forecast fetch can fail with. These are
//!   per-destination and never retried.
//! - [`TravelError`]: what a whole request can fail with. Configuration and
//!   validation problems are raised before any network call; provider errors
//!   surface either directly (single lookup) or wrapped in
//!   [`TravelError::Batch`] (strict comparison).

use thiserror::Error;

/// Failure of one forecast fetch from the weather provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider rejected the API key.
    #[error("weather provider rejected the API key")]
    Unauthorized,

    /// The provider does not know the requested location.
    #[error("location not found by weather provider")]
    NotFound,

    /// The provider is throttling requests.
    #[error("weather provider rate limit exceeded")]
    RateLimited,

    /// Network failure, upstream outage, or an undecodable response.
    #[error("weather provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Stable machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::Unauthorized => "INVALID_API_KEY",
            ProviderError::NotFound => "LOCATION_NOT_FOUND",
            ProviderError::RateLimited => "RATE_LIMITED",
            ProviderError::Unavailable(_) => "PROVIDER_UNAVAILABLE",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        ProviderError::Unavailable(err.without_url().to_string())
    }
}

/// Request-level error returned by the planner.
#[derive(Debug, Error)]
pub enum TravelError {
    /// Missing provider credential or similar setup problem.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Missing or malformed caller input.
    #[error("invalid input: {message}")]
    Validation {
        /// Machine-readable code, e.g. `LOCATION_MISSING`.
        code: &'static str,
        message: String,
    },

    /// A single-location fetch failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A strict fan-out failed because one destination failed.
    #[error("forecast for '{destination}' failed: {source}")]
    Batch {
        destination: String,
        #[source]
        source: ProviderError,
    },
}

impl TravelError {
    /// Create a configuration error.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error with the generic `VALIDATION_FAILED` code.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            code: "VALIDATION_FAILED",
            message: message.into(),
        }
    }

    /// Create a validation error for a missing required parameter.
    pub fn missing(code: &'static str, parameter: &str) -> Self {
        Self::Validation {
            code,
            message: format!("{parameter} parameter is required"),
        }
    }

    /// Stable machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            TravelError::Configuration { .. } => "API_KEY_MISSING",
            TravelError::Validation { code, .. } => *code,
            TravelError::Provider(err) | TravelError::Batch { source: err, .. } => err.code(),
        }
    }
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_codes() {
        assert_eq!(ProviderError::Unauthorized.code(), "INVALID_API_KEY");
        assert_eq!(ProviderError::NotFound.code(), "LOCATION_NOT_FOUND");
        assert_eq!(ProviderError::RateLimited.code(), "RATE_LIMITED");
        assert_eq!(
            ProviderError::Unavailable("boom".to_string()).code(),
            "PROVIDER_UNAVAILABLE"
        );
    }

    #[test]
    fn test_batch_error_carries_destination_and_kind() {
        let err = TravelError::Batch {
            destination: "Paris,FR".to_string(),
            source: ProviderError::NotFound,
        };

        assert!(err.to_string().contains("Paris,FR"));
        assert_eq!(err.code(), "LOCATION_NOT_FOUND");
        assert!(matches!(
            err,
            TravelError::Batch {
                source: ProviderError::NotFound,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = TravelError::missing("LOCATION_MISSING", "Location");

        assert_eq!(err.code(), "LOCATION_MISSING");
        assert!(err.to_string().contains("Location parameter is required"));
    }

    #[test]
    fn test_configuration_error_code() {
        let err = TravelError::configuration("WEATHER_API_KEY is not set");
        assert_eq!(err.code(), "API_KEY_MISSING");
    }
}
