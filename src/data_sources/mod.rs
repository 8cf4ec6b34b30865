//! External weather data sources.
//!
//! # Data Sources
//!
//! - [`openweathermap`]: OpenWeatherMap 5-day / 3-hour forecast, the
//!   production [`WeatherDataProvider`](crate::provider::WeatherDataProvider).

pub mod openweathermap;

pub use openweathermap::OpenWeatherMapClient;
