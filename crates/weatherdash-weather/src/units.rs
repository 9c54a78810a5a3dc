//! Presentational unit conversion. Stored values are always metric.

use serde::{Deserialize, Serialize};

/// Display unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Imperial for the US English locale, metric otherwise.
    ///
    /// Accepts BCP 47 tags ("en-US") and POSIX locale names ("en_US.UTF-8").
    pub fn from_locale(locale: &str) -> Self {
        if normalize_locale(locale) == "en-US" {
            Self::Imperial
        } else {
            Self::Metric
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Self::Metric => "km/h",
            Self::Imperial => "mph",
        }
    }

    /// Format a Celsius value, e.g. "20°C" or "68°F"
    pub fn format_temperature(&self, celsius: i32) -> String {
        match self {
            Self::Metric => format!("{}{}", celsius, self.temperature_suffix()),
            Self::Imperial => format!(
                "{}{}",
                celsius_to_fahrenheit(f64::from(celsius)),
                self.temperature_suffix()
            ),
        }
    }

    /// Format a km/h value, e.g. "12.5 km/h" or "8 mph"
    pub fn format_speed(&self, kph: f64) -> String {
        match self {
            Self::Metric => format!("{} {}", kph, self.speed_suffix()),
            Self::Imperial => format!("{} {}", kph_to_mph(kph), self.speed_suffix()),
        }
    }
}

/// Strip encoding/modifier suffixes and turn "en_US" into "en-US"
pub fn normalize_locale(locale: &str) -> String {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    base.replace('_', "-")
}

/// Round to the nearest integer with halves going up (-2.5 -> -2, 2.5 -> 3).
///
/// `f64::round` sends halves away from zero, which reads one degree colder
/// for negative half-degree readings.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// round(c × 9/5 + 32)
pub fn celsius_to_fahrenheit(celsius: f64) -> i64 {
    round_half_up(celsius * 9.0 / 5.0 + 32.0) as i64
}

/// round((f − 32) × 5/9)
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> i64 {
    round_half_up((fahrenheit - 32.0) * 5.0 / 9.0) as i64
}

/// round(kph × 0.621)
pub fn kph_to_mph(kph: f64) -> i64 {
    round_half_up(kph * 0.621) as i64
}
