//! HTTP API handlers for Travelcast.
//!
//! # Endpoints
//!
//! - **GET /health**: Liveness check.
//! - **GET /api/travel/location**: Forecast and summaries for one location.
//! - **GET /api/travel/compare**: Forecasts for several destinations; fails
//!   as a whole if any destination fails.
//! - **GET /api/travel/suggestions**: Destinations matching a weather
//!   preference.
//! - **GET /api/travel/tips**: Tourist tips for a destination.
//!
//! Failures are returned as `{"message": ..., "error": CODE}`.
//!
//! The provider API key never appears in logs or responses.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use crate::error::{ProviderError, TravelError};
use crate::model::{
    ComparedDestination, CompareQuery, LocationForecast, LocationQuery, MatchResult,
    SuggestionsQuery, TipsQuery,
};
use crate::planner::TravelPlanner;
use crate::tips::TouristTips;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub planner: TravelPlanner,
}

/// Build the router with tracing and CORS for `cors_origins`.
///
/// Origins that are not valid header values are skipped.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/travel/location", get(get_location_weather))
        .route("/api/travel/compare", get(get_compare))
        .route("/api/travel/suggestions", get(get_suggestions))
        .route("/api/travel/tips", get(get_tips))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

// ============================================================================
// Errors
// ============================================================================

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: &'static str,
}

/// A [`TravelError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub TravelError);

impl From<TravelError> for ApiError {
    fn from(err: TravelError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TravelError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            TravelError::Validation { .. } => StatusCode::BAD_REQUEST,
            TravelError::Provider(err) | TravelError::Batch { source: err, .. } => match err {
                ProviderError::Unauthorized => StatusCode::UNAUTHORIZED,
                ProviderError::NotFound => StatusCode::NOT_FOUND,
                ProviderError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                ProviderError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            TravelError::Provider(ProviderError::Unauthorized) => {
                "Invalid API key. Please check your OpenWeatherMap API key.".to_string()
            }
            TravelError::Provider(ProviderError::NotFound) => {
                "Location not found. Please check the spelling or try a different location."
                    .to_string()
            }
            TravelError::Configuration { message } | TravelError::Validation { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message(),
            error: self.0.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Response for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}

/// GET /api/travel/location - Forecast for a single location.
///
/// # Query Parameters
///
/// - `location` (required): e.g. `London,UK`
/// - `timezone` (optional): `utc` (default) or `location` to bucket days and
///   label hours in the location's own time
///
/// # Response
///
/// Location metadata, the raw points, current conditions, the 8-point
/// hourly series, rain chances, a 3-day outlook, and all daily aggregates.
#[instrument(skip(state))]
pub async fn get_location_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<LocationForecast>, ApiError> {
    let forecast = state
        .planner
        .lookup_location(query.location.as_deref(), query.timezone.as_deref())
        .await
        .inspect_err(|e| warn!(code = e.code(), error = %e, "Location lookup failed"))?;

    info!(
        location = %forecast.location.resolved_name,
        points = forecast.points.len(),
        "Location forecast returned"
    );
    Ok(Json(forecast))
}

/// GET /api/travel/compare - Compare several destinations.
///
/// # Query Parameters
///
/// - `destinations` (required): comma-separated, e.g. `London,Paris,Tokyo`
///
/// # Response
///
/// One entry per destination, in request order. If any destination fails
/// the whole request fails with that destination's error.
#[instrument(skip(state))]
pub async fn get_compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Vec<ComparedDestination>>, ApiError> {
    let compared = state
        .planner
        .compare_destinations(query.destinations.as_deref())
        .await
        .inspect_err(|e| warn!(code = e.code(), error = %e, "Comparison failed"))?;

    info!(destinations = compared.len(), "Comparison returned");
    Ok(Json(compared))
}

/// GET /api/travel/suggestions - Destinations matching a preference.
///
/// # Query Parameters
///
/// - `preferences` (required): JSON such as
///   `{"temperature":"warm","conditions":"sunny","month":7}`
///
/// # Response
///
/// Matching destinations in candidate order. Unreachable candidates are
/// left out, so the list may be empty.
#[instrument(skip(state))]
pub async fn get_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<Vec<MatchResult>>, ApiError> {
    let matches = state
        .planner
        .suggest_from_json(query.preferences.as_deref())
        .await
        .inspect_err(|e| warn!(code = e.code(), error = %e, "Suggestions failed"))?;

    info!(matched = matches.len(), "Suggestions returned");
    Ok(Json(matches))
}

/// GET /api/travel/tips - Tourist tips for a destination.
#[instrument(skip(state))]
pub async fn get_tips(
    State(state): State<AppState>,
    Query(query): Query<TipsQuery>,
) -> Result<Json<TouristTips>, ApiError> {
    let tips = state
        .planner
        .tourist_tips(query.location.as_deref())
        .inspect_err(|e| warn!(code = e.code(), error = %e, "Tips request rejected"))?;

    info!(location = ?query.location, "Tips served");
    Ok(Json(tips))
}
