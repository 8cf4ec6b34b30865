//! Integration tests for Travelcast API endpoints.
//!
//! These tests drive the full request/response cycle through the HTTP API
//! with an in-process weather provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use travelcast::api::{AppState, router};
use travelcast::error::ProviderError;
use travelcast::model::{ForecastData, ForecastPoint, LocationMetadata, utc};
use travelcast::planner::TravelPlanner;
use travelcast::provider::WeatherDataProvider;

// 2024-06-10 00:00:00 UTC, a Monday
const JUNE_10: i64 = 1_717_977_600;

struct FakeProvider {
    responses: HashMap<&'static str, Result<ForecastData, ProviderError>>,
}

#[async_trait]
impl WeatherDataProvider for FakeProvider {
    async fn fetch_forecast(&self, location_query: &str) -> Result<ForecastData, ProviderError> {
        self.responses
            .get(location_query)
            .cloned()
            .unwrap_or(Err(ProviderError::NotFound))
    }
}

/// Five days of 3-hourly points, temperatures cycling base..base+7.
fn five_day_forecast(name: &str, country: &str, base: f64, condition: &str, code: i32) -> ForecastData {
    let points = (0..40)
        .map(|i| ForecastPoint {
            timestamp_utc: JUNE_10 + i * 3 * 3600,
            temperature_c: base + (i % 8) as f64,
            condition_code: code,
            condition_main: condition.to_string(),
            description: format!("{condition} sky"),
            wind_speed_ms: 3.5,
            humidity_pct: 55,
            precipitation_probability: if i == 1 { 0.35 } else { 0.0 },
        })
        .collect();

    ForecastData {
        location: LocationMetadata {
            resolved_name: name.to_string(),
            country_code: country.to_string(),
            sunrise_utc: JUNE_10 + 4 * 3600,
            sunset_utc: JUNE_10 + 20 * 3600,
            utc_offset_seconds: 3600,
        },
        points,
    }
}

fn create_test_server() -> TestServer {
    let mut responses = HashMap::new();
    responses.insert("London,UK", Ok(five_day_forecast("London", "GB", 12.0, "clouds", 803)));
    responses.insert("Rome,IT", Ok(five_day_forecast("Rome", "IT", 22.0, "clear", 800)));
    responses.insert("Rome", Ok(five_day_forecast("Rome", "IT", 22.0, "clear", 800)));
    responses.insert("Oslo", Ok(five_day_forecast("Oslo", "NO", 2.0, "snow", 600)));
    responses.insert("Locked", Err(ProviderError::Unauthorized));
    responses.insert("Busy", Err(ProviderError::RateLimited));
    responses.insert("Down", Err(ProviderError::Unavailable("timeout".to_string())));

    let provider: Arc<dyn WeatherDataProvider> = Arc::new(FakeProvider { responses });
    let state = AppState {
        planner: TravelPlanner::new(Some(provider), utc()),
    };

    TestServer::new(router(state, &[])).unwrap()
}

fn create_unconfigured_server() -> TestServer {
    let state = AppState {
        planner: TravelPlanner::new(None, utc()),
    };
    TestServer::new(router(state, &[])).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_location_forecast() {
    let server = create_test_server();

    let response = server
        .get("/api/travel/location")
        .add_query_param("location", "London,UK")
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["location"]["resolved_name"], "London");
    assert_eq!(body["utc_offset_seconds"], 0);
    assert_eq!(body["points"].as_array().unwrap().len(), 40);
    assert_eq!(body["hourly"].as_array().unwrap().len(), 8);
    assert_eq!(body["hourly"][0]["hour_label"], "12 am");
    assert_eq!(body["rain_chance"][1]["precipitation_pct"], 35);
    assert_eq!(body["daily"].as_array().unwrap().len(), 5);
    assert_eq!(body["daily"][0]["date"], "2024-06-10");
    assert_eq!(body["daily"][0]["min_temperature_c"], 12.0);
    assert_eq!(body["daily"][0]["max_temperature_c"], 19.0);

    let outlook = body["outlook"].as_array().unwrap();
    assert_eq!(outlook.len(), 3);
    assert_eq!(outlook[0]["weekday"], "Monday");
    assert_eq!(outlook[1]["weekday"], "Tuesday");
    assert_eq!(outlook[0]["sky"]["family"], "overcast");

    assert_eq!(body["current"]["description"], "clouds sky");
    assert_eq!(body["current"]["sky"]["daytime"], false);
}

#[tokio::test]
async fn test_location_forecast_in_local_time() {
    let server = create_test_server();

    let response = server
        .get("/api/travel/location")
        .add_query_param("location", "London,UK")
        .add_query_param("timezone", "location")
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["utc_offset_seconds"], 3600);
    assert_eq!(body["hourly"][0]["hour_label"], "01 am");
    assert_eq!(body["hourly"][7]["hour_label"], "10 pm");
    assert_eq!(body["daily"].as_array().unwrap().len(), 5);
    assert_eq!(body["daily"][0]["date"], "2024-06-10");
}

#[tokio::test]
async fn test_location_missing() {
    let server = create_test_server();

    let response = server.get("/api/travel/location").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "LOCATION_MISSING");
    assert_eq!(body["message"], "Location parameter is required");
}

#[tokio::test]
async fn test_location_unknown_timezone() {
    let server = create_test_server();

    let response = server
        .get("/api/travel/location")
        .add_query_param("location", "London,UK")
        .add_query_param("timezone", "bogus")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("bogus"));

    // Credential check still comes first
    let response = create_unconfigured_server()
        .get("/api/travel/location")
        .add_query_param("location", "London,UK")
        .add_query_param("timezone", "bogus")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "API_KEY_MISSING");
}

#[tokio::test]
async fn test_location_provider_errors() {
    let server = create_test_server();

    let cases = [
        ("Atlantis", StatusCode::NOT_FOUND, "LOCATION_NOT_FOUND"),
        ("Locked", StatusCode::UNAUTHORIZED, "INVALID_API_KEY"),
        ("Busy", StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
        ("Down", StatusCode::BAD_GATEWAY, "PROVIDER_UNAVAILABLE"),
    ];

    for (location, status, code) in cases {
        let response = server
            .get("/api/travel/location")
            .add_query_param("location", location)
            .await;

        response.assert_status(status);
        let body: Value = response.json();
        assert_eq!(body["error"], code, "location {location}");
    }
}

#[tokio::test]
async fn test_missing_api_key() {
    let server = create_unconfigured_server();

    for path in [
        "/api/travel/location?location=London,UK",
        "/api/travel/compare?destinations=Rome,Oslo",
        "/api/travel/suggestions",
    ] {
        let response = server.get(path).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "API_KEY_MISSING", "path {path}");
    }
}

#[tokio::test]
async fn test_tips_work_without_api_key() {
    let server = create_unconfigured_server();

    let response = server
        .get("/api/travel/tips")
        .add_query_param("location", "Sydney,AU")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["best_time_to_visit"], "September to November, March to May");
}

#[tokio::test]
async fn test_tips_fallback_and_missing_location() {
    let server = create_test_server();

    let response = server
        .get("/api/travel/tips")
        .add_query_param("location", "Lima,PE")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["best_time_to_visit"], "Varies by season");

    let response = server.get("/api/travel/tips").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compare_destinations() {
    let server = create_test_server();

    let response = server
        .get("/api/travel/compare")
        .add_query_param("destinations", "Oslo, Rome")
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["destination"], "Oslo");
    assert_eq!(entries[0]["location"]["country_code"], "NO");
    assert_eq!(entries[1]["destination"], "Rome");
    assert_eq!(entries[1]["daily"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_compare_fails_as_a_whole() {
    let server = create_test_server();

    let response = server
        .get("/api/travel/compare")
        .add_query_param("destinations", "Rome,Busy,Atlantis")
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["error"], "RATE_LIMITED");
    assert!(body["message"].as_str().unwrap().contains("Busy"));
}

#[tokio::test]
async fn test_compare_requires_destinations() {
    let server = create_test_server();

    let response = server.get("/api/travel/compare").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_suggestions() {
    let server = create_test_server();

    // Rome averages 25.5 with clear skies; London averages 15.5
    let response = server
        .get("/api/travel/suggestions")
        .add_query_param(
            "preferences",
            r#"{"temperature":"warm","conditions":"sunny","month":6}"#,
        )
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["destination"], "Rome,IT");
    assert_eq!(matches[0]["avg_temperature_c"], 25.5);
    assert_eq!(matches[0]["resolved_name"], "Rome");
    assert_eq!(matches[0]["country_code"], "IT");
}

#[tokio::test]
async fn test_suggestions_outside_horizon_are_empty() {
    let server = create_test_server();

    let response = server
        .get("/api/travel/suggestions")
        .add_query_param(
            "preferences",
            r#"{"temperature":"mild","conditions":"any","month":12}"#,
        )
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn test_suggestions_invalid_preferences() {
    let server = create_test_server();

    let response = server
        .get("/api/travel/suggestions")
        .add_query_param("preferences", "{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");
}
