//! WeatherAPI.com forecast client.
//!
//! One GET to `forecast.json` returns current conditions, day records and
//! hour records; they are normalised into a [`WeatherSnapshot`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::units::round_half_up;
use crate::types::{
    CurrentWeather, ForecastDay, HourlyEntry, WeatherError, WeatherSnapshot, FORECAST_DAYS,
    MAX_HOURLY_ENTRIES,
};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
const USER_AGENT: &str = concat!("weatherdash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherProvider {
    /// Create a provider. `timeout` of `None` keeps the HTTP client's default.
    pub fn new(api_key: Option<String>, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the provider at another host (mirrors, mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch and normalise the forecast for `location`.
    ///
    /// Hourly entries are limited to hours strictly after `now`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(
        &self,
        location: &str,
        now: DateTime<Utc>,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let url = format!("{}/forecast.json", self.base_url);
        let days = FORECAST_DAYS.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", api_key),
                ("q", location),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Forecast request for '{}' returned {}", location, status);
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: api::ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        tracing::debug!(
            "Received {} forecast day(s) for {}",
            body.forecast.forecastday.len(),
            body.location.name
        );

        snapshot_from_response(body, now)
    }
}

/// Map a provider response into the dashboard shape
pub(crate) fn snapshot_from_response(
    body: api::ForecastResponse,
    now: DateTime<Utc>,
) -> Result<WeatherSnapshot, WeatherError> {
    let current = CurrentWeather {
        location: body.location.name,
        temperature: round_c(body.current.temp_c),
        condition: body.current.condition.text,
        humidity: body.current.humidity,
        wind_speed: body.current.wind_kph,
        feels_like: round_c(body.current.feelslike_c),
        is_day: body.current.is_day == 1,
    };

    let forecast = body
        .forecast
        .forecastday
        .iter()
        .map(|day| {
            Ok(ForecastDay {
                day: weekday_label(&day.date)?,
                temperature: round_c(day.day.avgtemp_c),
                condition: day.day.condition.text.clone(),
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    let mut hours: Vec<&api::Hour> = body
        .forecast
        .forecastday
        .iter()
        .flat_map(|day| day.hour.iter())
        .collect();
    hours.sort_by_key(|h| h.time_epoch);

    let cutoff = now.timestamp();
    let hourly = hours
        .into_iter()
        .filter(|h| h.time_epoch > cutoff)
        .take(MAX_HOURLY_ENTRIES)
        .map(|h| {
            Ok(HourlyEntry {
                time: hour_label(&h.time)?,
                temp: round_c(h.temp_c),
                condition: h.condition.text.clone(),
                is_day: h.is_day == 1,
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    Ok(WeatherSnapshot {
        current,
        forecast,
        hourly,
        fetched_at: now,
    })
}

fn round_c(value: f64) -> i32 {
    round_half_up(value) as i32
}

/// Weekday of a calendar date ("2024-05-06" -> "Mon"). The date is taken as
/// is, with no timezone conversion, so it cannot shift to a neighbouring day.
fn weekday_label(date: &str) -> Result<String, WeatherError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .map_err(|e| WeatherError::Parse(format!("bad forecast date '{date}': {e}")))
}

/// Hour label from the provider's local time ("2024-05-06 15:00" -> "3 PM")
fn hour_label(time: &str) -> Result<String, WeatherError> {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M")
        .map(|t| t.format("%-I %p").to_string())
        .map_err(|e| WeatherError::Parse(format!("bad hour time '{time}': {e}")))
}

/// WeatherAPI.com response structures (only the fields the dashboard uses)
pub(crate) mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub location: Location,
        pub current: Current,
        pub forecast: Forecast,
    }

    #[derive(Debug, Deserialize)]
    pub struct Location {
        pub name: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Current {
        pub temp_c: f64,
        pub is_day: u8,
        pub condition: Condition,
        pub wind_kph: f64,
        pub humidity: u8,
        pub feelslike_c: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Forecast {
        pub forecastday: Vec<ForecastDay>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastDay {
        pub date: String,
        pub day: Day,
        #[serde(default)]
        pub hour: Vec<Hour>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Day {
        pub avgtemp_c: f64,
        pub condition: Condition,
    }

    #[derive(Debug, Deserialize)]
    pub struct Hour {
        pub time_epoch: i64,
        pub time: String,
        pub temp_c: f64,
        pub is_day: u8,
        pub condition: Condition,
    }
}
