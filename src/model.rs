//! Data models for Travelcast.
//!
//! Everything here is request-scoped: forecasts are fetched, reduced and
//! matched within one call and never persisted. Raw provider data enters as
//! [`ForecastPoint`]s and [`LocationMetadata`]; everything else is derived.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// One 3-hour forecast sample for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Start of the interval, Unix seconds (UTC).
    pub timestamp_utc: i64,

    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,

    /// Provider condition code (2xx thunderstorm, 3xx drizzle, 5xx rain,
    /// 6xx snow, 7xx atmosphere, 800 clear, 801-804 clouds).
    pub condition_code: i32,

    /// Lower-case condition category, e.g. "clear", "clouds", "rain".
    pub condition_main: String,

    /// Free-text description such as "light rain".
    #[serde(default)]
    pub description: String,

    /// Wind speed in metres per second.
    pub wind_speed_ms: f64,

    /// Relative humidity, 0-100.
    pub humidity_pct: u8,

    /// Probability of precipitation, 0.0-1.0.
    #[serde(default)]
    pub precipitation_probability: f64,
}

impl ForecastPoint {
    /// The point's timestamp viewed through a fixed UTC offset.
    ///
    /// Returns `None` only for timestamps chrono cannot represent.
    pub fn local_time(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        DateTime::<Utc>::from_timestamp(self.timestamp_utc, 0).map(|dt| dt.with_timezone(&offset))
    }

    /// Precipitation probability as a rounded percentage.
    pub fn precipitation_pct(&self) -> u8 {
        (self.precipitation_probability.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Coarse condition family derived from the condition code.
    pub fn family(&self) -> ConditionFamily {
        ConditionFamily::from_code(self.condition_code)
    }
}

/// Location details reported by the provider alongside the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMetadata {
    /// Name the provider resolved the query to.
    pub resolved_name: String,

    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,

    /// Sunrise, Unix seconds (UTC).
    pub sunrise_utc: i64,

    /// Sunset, Unix seconds (UTC).
    pub sunset_utc: i64,

    /// Shift of the location's local time from UTC, in seconds.
    #[serde(default)]
    pub utc_offset_seconds: i32,
}

impl LocationMetadata {
    /// Whether a timestamp falls strictly between sunrise and sunset.
    pub fn is_daytime(&self, timestamp_utc: i64) -> bool {
        self.sunrise_utc < timestamp_utc && timestamp_utc < self.sunset_utc
    }

    /// The location's own UTC offset, falling back to UTC when the provider
    /// reported something out of range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(utc)
    }
}

/// Everything the provider returns for one location query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub location: LocationMetadata,
    pub points: Vec<ForecastPoint>,
}

/// The zero offset. Used as the default date-bucketing policy.
pub fn utc() -> FixedOffset {
    Utc.fix()
}

/// Coarse sky-condition family, derived from the provider's condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionFamily {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    /// Mist, fog, haze, dust and the rest of the 7xx group.
    Atmosphere,
    Clear,
    FewClouds,
    ScatteredClouds,
    Overcast,
    Unknown,
}

impl ConditionFamily {
    /// Map a provider condition code onto its family.
    pub fn from_code(code: i32) -> Self {
        match code {
            200..=299 => ConditionFamily::Thunderstorm,
            300..=399 => ConditionFamily::Drizzle,
            500..=599 => ConditionFamily::Rain,
            600..=699 => ConditionFamily::Snow,
            700..=799 => ConditionFamily::Atmosphere,
            800 => ConditionFamily::Clear,
            801 => ConditionFamily::FewClouds,
            802 => ConditionFamily::ScatteredClouds,
            803.. => ConditionFamily::Overcast,
            _ => ConditionFamily::Unknown,
        }
    }
}

/// Sky classification of a single point: its family plus day or night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sky {
    pub family: ConditionFamily,
    pub daytime: bool,
}

/// Per-calendar-date reduction of forecast points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    /// Calendar date under the offset used for bucketing.
    pub date: NaiveDate,

    pub min_temperature_c: f64,
    pub max_temperature_c: f64,
    pub avg_temperature_c: f64,

    /// `condition_main` of the representative point.
    pub representative_condition: String,

    /// Condition code of the representative point.
    pub representative_code: i32,

    /// Timestamp of the representative point, for day/night classification.
    pub representative_timestamp_utc: i64,

    /// Highest precipitation probability seen that day.
    pub precipitation_probability: f64,

    /// Number of points in the bucket (always at least 1).
    pub point_count: usize,
}

/// One element of the short-horizon (intraday) series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub timestamp_utc: i64,
    /// 12-hour clock label, e.g. "09 am".
    pub hour_label: String,
    pub temperature_c: f64,
    pub precipitation_probability: f64,
    pub precipitation_pct: u8,
}

/// One element of the rain-chance series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainChance {
    pub hour_label: String,
    pub precipitation_pct: u8,
}

/// A daily aggregate prepared for an N-day outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOutlook {
    /// Full weekday name, e.g. "Monday".
    pub weekday: String,
    pub sky: Sky,
    #[serde(flatten)]
    pub day: DailyAggregate,
}

/// Summary of the first forecast point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub timestamp_utc: i64,
    pub temperature_c: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub precipitation_pct: u8,
    pub sky: Sky,
}

/// Temperature preference bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    /// Below 10 °C.
    Cold,
    /// 10 °C up to (not including) 20 °C.
    Mild,
    /// 20 °C up to (not including) 30 °C.
    Warm,
    /// 30 °C and above.
    Hot,
}

impl TemperatureBand {
    /// The single band an average temperature falls into.
    pub fn classify(avg_temperature_c: f64) -> Self {
        if avg_temperature_c < 10.0 {
            TemperatureBand::Cold
        } else if avg_temperature_c < 20.0 {
            TemperatureBand::Mild
        } else if avg_temperature_c < 30.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }

    pub fn contains(self, avg_temperature_c: f64) -> bool {
        Self::classify(avg_temperature_c) == self
    }
}

/// Sky-condition preference.
///
/// Any string is accepted. Values other than the four known filters are kept
/// as [`ConditionFilter::Unrecognized`] and never match anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionFilter {
    Any,
    Sunny,
    Rainy,
    Snowy,
    Unrecognized(String),
}

impl ConditionFilter {
    /// Whether a provider `condition_main` satisfies this filter.
    ///
    /// `Any` accepts everything, including unknown conditions.
    pub fn accepts(&self, condition_main: &str) -> bool {
        let condition = condition_main.to_ascii_lowercase();
        match self {
            ConditionFilter::Any => true,
            ConditionFilter::Sunny => matches!(condition.as_str(), "clear" | "clouds"),
            ConditionFilter::Rainy => matches!(condition.as_str(), "rain" | "drizzle"),
            ConditionFilter::Snowy => condition == "snow",
            ConditionFilter::Unrecognized(_) => false,
        }
    }
}

impl From<String> for ConditionFilter {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" => ConditionFilter::Any,
            "sunny" => ConditionFilter::Sunny,
            "rainy" => ConditionFilter::Rainy,
            "snowy" => ConditionFilter::Snowy,
            _ => ConditionFilter::Unrecognized(value),
        }
    }
}

impl From<ConditionFilter> for String {
    fn from(filter: ConditionFilter) -> Self {
        match filter {
            ConditionFilter::Any => "any".to_string(),
            ConditionFilter::Sunny => "sunny".to_string(),
            ConditionFilter::Rainy => "rainy".to_string(),
            ConditionFilter::Snowy => "snowy".to_string(),
            ConditionFilter::Unrecognized(value) => value,
        }
    }
}

/// A traveller's weather preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub temperature: TemperatureBand,
    pub conditions: ConditionFilter,
    /// Target calendar month, 1 = January.
    pub month: u32,
}

/// A destination admitted by the preference matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The candidate identifier as it was queried.
    pub destination: String,

    /// Mean temperature over the points in the target month.
    pub avg_temperature_c: f64,

    pub resolved_name: String,
    pub country_code: String,
}

/// One entry of a strict multi-destination comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedDestination {
    pub destination: String,
    pub location: LocationMetadata,
    pub points: Vec<ForecastPoint>,
    pub daily: Vec<DailyAggregate>,
}

/// Full response for a single-location lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationForecast {
    pub location: LocationMetadata,

    /// Offset used to derive dates and hour labels in this response.
    pub utc_offset_seconds: i32,

    pub points: Vec<ForecastPoint>,
    pub current: Option<CurrentConditions>,
    pub hourly: Vec<HourlyPoint>,
    pub rain_chance: Vec<RainChance>,
    pub outlook: Vec<DayOutlook>,
    pub daily: Vec<DailyAggregate>,
}

/// Which clock a single-location lookup should use for dates and labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimezoneChoice {
    /// The service-wide configured offset (UTC unless configured otherwise).
    #[default]
    Utc,
    /// The location's own offset as reported by the provider.
    Location,
}

impl TimezoneChoice {
    /// Parse the `timezone` query value. Absent or blank means [`Utc`](Self::Utc).
    ///
    /// Returns the rejected value on failure.
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match raw.map(str::trim).filter(|r| !r.is_empty()) {
            None => Ok(TimezoneChoice::Utc),
            Some(value) if value.eq_ignore_ascii_case("utc") => Ok(TimezoneChoice::Utc),
            Some(value) if value.eq_ignore_ascii_case("location") => Ok(TimezoneChoice::Location),
            Some(value) => Err(value.to_string()),
        }
    }
}

/// Query parameters for GET /api/travel/location.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub location: Option<String>,

    /// `utc` (default) or `location`.
    pub timezone: Option<String>,
}

/// Query parameters for GET /api/travel/compare.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Comma-separated destination list.
    pub destinations: Option<String>,
}

/// Query parameters for GET /api/travel/suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    /// JSON-encoded [`Preference`].
    pub preferences: Option<String>,
}

/// Query parameters for GET /api/travel/tips.
#[derive(Debug, Deserialize)]
pub struct TipsQuery {
    pub location: Option<String>,
}
