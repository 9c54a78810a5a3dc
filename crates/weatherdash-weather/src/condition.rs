//! Condition text to icon mapping.
//!
//! Provider condition strings are free text ("Patchy rain nearby",
//! "Partly cloudy"). They are classified by case-insensitive keyword match
//! over a fixed, ordered list of groups; the first group with a matching
//! keyword wins.

use serde::{Deserialize, Serialize};

/// Condition categories, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rain,
    PartlyCloudy,
    Snow,
    Thunderstorm,
    Fog,
    Unknown,
}

/// Keyword groups checked in this order. "partly cloudy" lands in `Cloudy`
/// because "cloud" is checked before "partly".
const KEYWORD_GROUPS: [(WeatherCondition, &[&str]); 7] = [
    (WeatherCondition::Clear, &["sunny", "clear"]),
    (WeatherCondition::Cloudy, &["cloud", "overcast"]),
    (WeatherCondition::Rain, &["rain", "drizzle", "shower"]),
    (WeatherCondition::PartlyCloudy, &["partly"]),
    (WeatherCondition::Snow, &["snow", "blizzard"]),
    (WeatherCondition::Thunderstorm, &["thunder", "lightning"]),
    (WeatherCondition::Fog, &["fog", "mist"]),
];

impl WeatherCondition {
    /// Classify provider condition text
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        KEYWORD_GROUPS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(condition, _)| *condition)
            .unwrap_or(Self::Unknown)
    }

    /// Icon for this condition, with day/night variants
    pub fn icon(&self, is_day: bool) -> &'static str {
        match (self, is_day) {
            (Self::Clear, true) => "☀️",
            (Self::Clear, false) => "🌙",
            (Self::Cloudy, _) => "☁️",
            (Self::Rain, _) => "🌧️",
            (Self::PartlyCloudy, true) => "⛅",
            (Self::PartlyCloudy, false) => "☁️",
            (Self::Snow, _) => "❄️",
            (Self::Thunderstorm, _) => "⚡",
            (Self::Fog, _) => "🌫️",
            (Self::Unknown, true) => "🌤️",
            (Self::Unknown, false) => "🌙",
        }
    }
}

/// Icon for raw provider condition text
pub fn icon_for(condition: &str, is_day: bool) -> &'static str {
    WeatherCondition::from_text(condition).icon(is_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_day_and_night() {
        assert_eq!(icon_for("Sunny", true), "☀️");
        assert_eq!(icon_for("Clear", false), "🌙");
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(WeatherCondition::from_text("OVERCAST"), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_text("light DRIZZLE"), WeatherCondition::Rain);
    }

    #[test]
    fn test_partly_cloudy_matches_cloud_first() {
        assert_eq!(
            WeatherCondition::from_text("Partly cloudy"),
            WeatherCondition::Cloudy
        );
        assert_eq!(icon_for("Partly cloudy", true), "☁️");
    }

    #[test]
    fn test_partly_without_cloud() {
        assert_eq!(
            WeatherCondition::from_text("Partly sunny"),
            WeatherCondition::Clear
        );
        assert_eq!(
            WeatherCondition::from_text("Partly bright"),
            WeatherCondition::PartlyCloudy
        );
        assert_eq!(icon_for("Partly bright", true), "⛅");
        assert_eq!(icon_for("Partly bright", false), "☁️");
    }

    #[test]
    fn test_rain_before_thunder() {
        // "Patchy light rain with thunder" contains both keywords
        assert_eq!(
            WeatherCondition::from_text("Patchy light rain with thunder"),
            WeatherCondition::Rain
        );
        assert_eq!(icon_for("Thundery outbreaks", true), "⚡");
    }

    #[test]
    fn test_snow_and_fog() {
        assert_eq!(icon_for("Blizzard", true), "❄️");
        assert_eq!(icon_for("Freezing fog", false), "🌫️");
        assert_eq!(icon_for("Mist", true), "🌫️");
    }

    #[test]
    fn test_unknown_falls_back_to_generic() {
        assert_eq!(WeatherCondition::from_text("Haze"), WeatherCondition::Unknown);
        assert_eq!(icon_for("Haze", true), "🌤️");
        assert_eq!(icon_for("Haze", false), "🌙");
    }
}
