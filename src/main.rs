//! Travelcast - weather-aware travel planning service.
//!
//! # API Endpoints
//!
//! - `GET /api/travel/location` - Forecast and summaries for one location
//! - `GET /api/travel/compare` - Compare several destinations
//! - `GET /api/travel/suggestions` - Destinations matching a weather preference
//! - `GET /api/travel/tips` - Tourist tips
//! - `GET /health` - Health check

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use travelcast::api::{AppState, router};
use travelcast::config::load_app_config;
use travelcast::data_sources::OpenWeatherMapClient;
use travelcast::planner::TravelPlanner;
use travelcast::provider::WeatherDataProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("travelcast=info".parse()?))
        .init();

    let config = load_app_config()?;

    info!(
        port = config.port,
        base_url = %config.weather_api_base_url,
        utc_offset_seconds = config.utc_offset.local_minus_utc(),
        policy = ?config.representative_policy,
        "Starting Travelcast server"
    );

    // A missing key is reported per request, not at start-up
    let provider: Option<Arc<dyn WeatherDataProvider>> = match &config.weather_api_key {
        Some(key) => {
            let client = OpenWeatherMapClient::with_base_url(
                &config.weather_api_base_url,
                key,
                config.weather_api_timeout,
            )?;
            Some(Arc::new(client))
        }
        None => {
            warn!("WEATHER_API_KEY is not set; forecast endpoints will return API_KEY_MISSING");
            None
        }
    };

    let state = AppState {
        planner: TravelPlanner::new(provider, config.utc_offset)
            .with_policy(config.representative_policy),
    };

    let app = router(state, &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Travelcast is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
