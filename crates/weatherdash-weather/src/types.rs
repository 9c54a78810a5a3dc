use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of forecast days requested from the provider
pub const FORECAST_DAYS: u32 = 5;

/// Maximum number of hourly entries kept
pub const MAX_HOURLY_ENTRIES: usize = 12;

/// Current weather conditions, temperatures in °C
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: String,
    pub temperature: i32,
    pub condition: String,
    pub humidity: u8,
    /// km/h
    pub wind_speed: f64,
    pub feels_like: i32,
    pub is_day: bool,
}

/// One day of the multi-day forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Short weekday label, e.g. "Mon"
    pub day: String,
    /// Daily average in °C
    pub temperature: i32,
    pub condition: String,
}

/// One hour of the hourly forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Hour label in the location's local time, e.g. "3 PM"
    pub time: String,
    pub temp: i32,
    pub condition: String,
    pub is_day: bool,
}

/// Current conditions, daily forecast and hourly forecast, always replaced together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
    pub hourly: Vec<HourlyEntry>,
    pub fetched_at: DateTime<Utc>,
}

/// Where a held snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No API key found")]
    MissingApiKey,
    #[error("Weather data not available (HTTP {status})")]
    Status { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}
