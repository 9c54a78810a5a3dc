//! Plain-text rendering of the dashboard.
//!
//! Every function here is pure: model in, text out. Temperatures and speeds
//! go through the model's [`UnitSystem`].

use weatherdash_weather::{icon_for, DataSource, UnitSystem, WeatherSnapshot};

use crate::dashboard::{ActiveTab, DashboardModel};
use crate::notification::{Notification, NotificationVariant};

const RULE: &str = "────────────────────────────────────────────────────────";
const SPINNER: &str = "⏳ Loading...";
pub const NO_DATA: &str = "No weather data available";
pub const MOCK_MARKER: &str = "[mock data]";

/// Render the full dashboard.
pub fn render_dashboard(model: &DashboardModel, refresh_minutes: u32) -> String {
    let mut out = Vec::new();
    out.extend(header());
    out.extend(location_panel(model));
    out.extend(current_panel(model));
    out.extend(forecast_panel(model, refresh_minutes));
    out.extend(tabs_panel(model));
    out.push(RULE.to_string());
    out.join("\n") + "\n"
}

/// One line per notification, oldest first
pub fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| {
            let mark = match n.variant {
                NotificationVariant::Info => "ℹ",
                NotificationVariant::Error => "✖",
            };
            format!("{mark} {}: {}\n", n.title, n.description)
        })
        .collect()
}

fn header() -> Vec<String> {
    vec![
        RULE.to_string(),
        "  Weather Dashboard".to_string(),
        "  Real-time weather information at your fingertips".to_string(),
        RULE.to_string(),
    ]
}

fn location_panel(model: &DashboardModel) -> Vec<String> {
    let mut lines = vec![format!("Location: {}", model.location())];
    if model.is_loading() {
        lines.push("  Searching...".to_string());
    } else {
        lines.push("  Type a city name and press Enter to search".to_string());
    }
    if let Some(updated) = model.last_updated() {
        lines.push(format!(
            "  Updated: {}   (type `refresh` to refresh)",
            updated.format("%-I:%M:%S %p")
        ));
    }
    lines
}

fn current_panel(model: &DashboardModel) -> Vec<String> {
    let mut title = "\nCurrent Weather".to_string();
    if model.source() == Some(DataSource::Fallback) {
        title.push(' ');
        title.push_str(MOCK_MARKER);
    }
    let mut lines = vec![title];

    match (model.is_loading(), model.snapshot()) {
        (true, _) => lines.push(format!("  {SPINNER}")),
        (false, None) => lines.push(format!("  {NO_DATA}")),
        (false, Some(snapshot)) => lines.extend(current_lines(snapshot, model.units())),
    }
    lines
}

fn current_lines(snapshot: &WeatherSnapshot, units: UnitSystem) -> Vec<String> {
    let c = &snapshot.current;
    vec![
        format!("  📍 {}", c.location),
        format!(
            "  {}  {}  {}",
            icon_for(&c.condition, c.is_day),
            units.format_temperature(c.temperature),
            c.condition
        ),
        format!(
            "  Feels like {}   Humidity {}%   Wind {}",
            units.format_temperature(c.feels_like),
            c.humidity,
            units.format_speed(c.wind_speed)
        ),
    ]
}

fn forecast_panel(model: &DashboardModel, refresh_minutes: u32) -> Vec<String> {
    let days = model.snapshot().map_or(0, |s| s.forecast.len());
    let mut lines = vec![format!("\n{days}-Day Forecast")];

    match (model.is_loading(), model.snapshot()) {
        (true, _) => lines.push(format!("  {SPINNER}")),
        (false, None) => lines.push(format!("  {NO_DATA}")),
        (false, Some(snapshot)) => {
            for day in &snapshot.forecast {
                lines.push(format!(
                    "  {:<4} {}  {:>5}  {}",
                    day.day,
                    icon_for(&day.condition, true),
                    model.units().format_temperature(day.temperature),
                    day.condition
                ));
            }
        }
    }

    let every = if refresh_minutes == 1 {
        "minute".to_string()
    } else {
        format!("{refresh_minutes} minutes")
    };
    lines.push(format!("  Weather data updates automatically every {every}"));
    lines
}

fn tabs_panel(model: &DashboardModel) -> Vec<String> {
    let tab_bar = match model.active_tab() {
        ActiveTab::Hourly => "\n[ Hourly ]   Details ",
        ActiveTab::Details => "\n  Hourly   [ Details ]",
    };
    let mut lines = vec![tab_bar.to_string()];

    match model.active_tab() {
        ActiveTab::Hourly => lines.extend(hourly_lines(model)),
        ActiveTab::Details => lines.extend(details_lines(model.units())),
    }
    lines
}

fn hourly_lines(model: &DashboardModel) -> Vec<String> {
    match (model.is_loading(), model.snapshot()) {
        (true, _) => vec![format!("  {SPINNER}")],
        (false, None) => vec![format!("  {NO_DATA}")],
        (false, Some(snapshot)) if snapshot.hourly.is_empty() => {
            vec!["  No hourly data for the rest of the forecast window".to_string()]
        }
        (false, Some(snapshot)) => snapshot
            .hourly
            .iter()
            .map(|h| {
                format!(
                    "  {:>5}  {}  {}",
                    h.time,
                    icon_for(&h.condition, h.is_day),
                    model.units().format_temperature(h.temp)
                )
            })
            .collect(),
    }
}

/// Illustrative values; the provider response does not carry them.
fn details_lines(units: UnitSystem) -> Vec<String> {
    let visibility = match units {
        UnitSystem::Metric => "10 km",
        UnitSystem::Imperial => "6.2 miles",
    };
    [
        ("Pressure", "1015 hPa".to_string()),
        ("Visibility", visibility.to_string()),
        ("UV Index", "5 (Moderate)".to_string()),
        ("Dew Point", units.format_temperature(12)),
        ("Sunrise", "6:42 AM".to_string()),
        ("Sunset", "7:51 PM".to_string()),
        ("Moon Phase", "Waxing Crescent".to_string()),
        ("Air Quality", "Good".to_string()),
    ]
    .into_iter()
    .map(|(label, value)| format!("  {label:<12} {value}"))
    .collect()
}
