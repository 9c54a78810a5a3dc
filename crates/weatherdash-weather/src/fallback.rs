//! Placeholder weather for a failed first load.
//!
//! Synthetic data only ever fills an empty dashboard: once any snapshot is
//! held, a failed fetch leaves it in place.

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{
    CurrentWeather, ForecastDay, HourlyEntry, WeatherSnapshot, MAX_HOURLY_ENTRIES,
};

/// Number of synthetic forecast days
pub const FALLBACK_DAYS: usize = 5;

const CONDITIONS: [&str; 4] = ["Sunny", "Cloudy", "Rainy", "Partly Cloudy"];

/// Guard for substituting placeholder data after a failed fetch
pub fn should_substitute(has_data: bool, location: &str) -> bool {
    !has_data && !location.trim().is_empty()
}

/// Decide what a failed fetch leaves on screen.
///
/// Returns placeholder data when [`should_substitute`] allows it, `None` when
/// the held data (if any) stays.
pub fn resolve_failure<R: Rng + ?Sized>(
    has_data: bool,
    location: &str,
    local_now: NaiveDateTime,
    fetched_at: DateTime<Utc>,
    rng: &mut R,
) -> Option<WeatherSnapshot> {
    if !should_substitute(has_data, location) {
        tracing::debug!("Keeping held data after failed fetch for '{}'", location);
        return None;
    }
    tracing::warn!("Substituting placeholder weather for '{}'", location);
    Some(generate(location, local_now, fetched_at, rng))
}

/// Build a plausible random snapshot for `location`.
///
/// `local_now` labels the days and hours; `fetched_at` stamps the snapshot.
pub fn generate<R: Rng + ?Sized>(
    location: &str,
    local_now: NaiveDateTime,
    fetched_at: DateTime<Utc>,
    rng: &mut R,
) -> WeatherSnapshot {
    let temperature = rng.gen_range(5..35);

    let current = CurrentWeather {
        location: location.to_string(),
        temperature,
        condition: pick_condition(rng),
        humidity: rng.gen_range(30..80),
        wind_speed: f64::from(rng.gen_range(5u8..25)),
        feels_like: rng.gen_range(5..35),
        is_day: is_daytime(local_now.hour()),
    };

    let forecast = (0..FALLBACK_DAYS)
        .map(|i| ForecastDay {
            day: (local_now.date() + Duration::days(i as i64))
                .format("%a")
                .to_string(),
            temperature: rng.gen_range(5..35),
            condition: pick_condition(rng),
        })
        .collect();

    let hourly = (0..MAX_HOURLY_ENTRIES)
        .map(|i| {
            let at = local_now + Duration::hours(i as i64);
            HourlyEntry {
                time: at.format("%-I %p").to_string(),
                temp: temperature - 5 + rng.gen_range(0..10),
                condition: pick_condition(rng),
                is_day: is_daytime(at.hour()),
            }
        })
        .collect();

    WeatherSnapshot {
        current,
        forecast,
        hourly,
        fetched_at,
    }
}

fn pick_condition<R: Rng + ?Sized>(rng: &mut R) -> String {
    CONDITIONS
        .choose(rng)
        .copied()
        .unwrap_or(CONDITIONS[0])
        .to_string()
}

fn is_daytime(hour: u32) -> bool {
    hour > 6 && hour < 18
}
