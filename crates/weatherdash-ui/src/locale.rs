//! Locale detection and unit system selection.

use weatherdash_core::UnitPreference;
use weatherdash_weather::UnitSystem;

/// Environment variables consulted for the locale, highest priority first
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Detect the user's locale from the process environment
pub fn detect_locale() -> Option<String> {
    detect_locale_with(|name| std::env::var(name).ok())
}

/// Same as [`detect_locale`] with a custom variable lookup.
///
/// Empty values and the POSIX "C"/"POSIX" locales are skipped.
pub fn detect_locale_with<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

/// Pick the display units once at start-up
pub fn resolve_units(preference: UnitPreference, locale: Option<&str>) -> UnitSystem {
    match preference {
        UnitPreference::Metric => UnitSystem::Metric,
        UnitPreference::Imperial => UnitSystem::Imperial,
        UnitPreference::Auto => locale.map(UnitSystem::from_locale).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn lc_all_wins() {
        let lookup = env(&[("LC_ALL", "de_DE.UTF-8"), ("LANG", "en_US.UTF-8")]);
        assert_eq!(detect_locale_with(lookup).as_deref(), Some("de_DE.UTF-8"));
    }

    #[test]
    fn posix_locale_is_skipped() {
        let lookup = env(&[("LC_ALL", "C"), ("LANG", "en_US.UTF-8")]);
        assert_eq!(detect_locale_with(lookup).as_deref(), Some("en_US.UTF-8"));
    }

    #[test]
    fn nothing_set() {
        assert_eq!(detect_locale_with(env(&[])), None);
    }

    #[test]
    fn auto_follows_locale() {
        assert_eq!(
            resolve_units(UnitPreference::Auto, Some("en_US.UTF-8")),
            UnitSystem::Imperial
        );
        assert_eq!(
            resolve_units(UnitPreference::Auto, Some("en-GB")),
            UnitSystem::Metric
        );
        assert_eq!(resolve_units(UnitPreference::Auto, None), UnitSystem::Metric);
    }

    #[test]
    fn explicit_preference_overrides_locale() {
        assert_eq!(
            resolve_units(UnitPreference::Metric, Some("en-US")),
            UnitSystem::Metric
        );
        assert_eq!(
            resolve_units(UnitPreference::Imperial, Some("fr-FR")),
            UnitSystem::Imperial
        );
    }
}
