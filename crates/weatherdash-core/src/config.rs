use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{AppError, ConfigError};

/// Environment variable holding the WeatherAPI.com key.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Key baked in at build time, if `WEATHER_API_KEY` was set for `cargo build`.
const BUILD_TIME_API_KEY: Option<&str> = option_env!("WEATHER_API_KEY");

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `config.toml`
    #[serde(skip, default = "default_config_dir")]
    pub config_dir: PathBuf,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// WeatherAPI.com key. `WEATHER_API_KEY` in the environment takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Provider base URL, without the trailing `/forecast.json`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Location shown on first start
    #[serde(default = "default_location")]
    pub default_location: String,

    /// Periodic refresh interval in minutes
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,

    /// Request timeout; the HTTP client default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_location() -> String {
    "Nashville".to_string()
}

fn default_refresh_minutes() -> u32 {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_location: default_location(),
            refresh_minutes: default_refresh_minutes(),
            timeout_secs: None,
        }
    }
}

impl WeatherConfig {
    /// Resolve the API key: environment, then config file, then build-time value.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with the environment value supplied.
    pub fn resolve_api_key_with(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .or_else(|| self.api_key.clone())
            .or_else(|| BUILD_TIME_API_KEY.map(str::to_string))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

/// Unit preference for displayed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    /// Pick from the detected locale at start-up
    #[default]
    Auto,
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub units: UnitPreference,

    /// Locale override (e.g. "en-US"); detected from the environment when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing level; `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weatherdash")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            weather: WeatherConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .map_err(AppError::Io)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| AppError::Config(ConfigError::ParseError(e.to_string())))
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if let Some(parent) = path.parent() {
            config.config_dir = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(AppError::Config(ConfigError::Invalid(validation.error_summary())).into());
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if self.weather.default_location.trim().is_empty() {
            result.add_error(
                "weather.default_location",
                "Default location must not be empty",
            );
        }

        if self.weather.refresh_minutes == 0 {
            result.add_error(
                "weather.refresh_minutes",
                "Refresh interval must be at least 1 minute",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        if self.weather.timeout_secs == Some(0) {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        }

        if self.weather.resolve_api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                "No API key configured - placeholder data will be shown",
            );
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            result.add_error(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(AppError::Io)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(ConfigError::Invalid(e.to_string())))
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .map_err(AppError::Io)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("weatherdash");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert_eq!(config.weather.default_location, "Nashville");
        assert_eq!(config.weather.refresh_minutes, 5);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.base_url = "ftp://api.weatherapi.com/v1".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_zero_refresh_is_error() {
        let mut config = Config::default();
        config.weather.refresh_minutes = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.refresh_minutes"));
    }

    #[test]
    fn test_long_refresh_is_warning() {
        let mut config = Config::default();
        config.weather.refresh_minutes = 2000;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.refresh_minutes"));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.error_summary().contains("Invalid log level"));
    }

    #[test]
    fn test_api_key_resolution_order() {
        let mut weather = WeatherConfig::default();
        weather.api_key = Some("from-file".to_string());

        assert_eq!(
            weather.resolve_api_key_with(Some("from-env".to_string())).as_deref(),
            Some("from-env")
        );
        assert_eq!(weather.resolve_api_key_with(None).as_deref(), Some("from-file"));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let mut weather = WeatherConfig::default();
        weather.api_key = Some("   ".to_string());
        if BUILD_TIME_API_KEY.is_none() {
            assert!(weather.resolve_api_key_with(None).is_none());
        }
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weatherdash").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.config_dir, dir.path().join("weatherdash"));
        assert_eq!(config.weather.default_location, "Nashville");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[weather]\ndefault_location = \"Oslo\"\n\n[display]\nunits = \"imperial\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.weather.default_location, "Oslo");
        assert_eq!(config.weather.refresh_minutes, 5);
        assert_eq!(config.display.units, UnitPreference::Imperial);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\nbroken").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\ndefault_location = \"  \"\n").unwrap();

        let err = Config::load_validated(Some(&path)).unwrap_err();
        let app_err = err.downcast_ref::<AppError>().unwrap();
        assert!(matches!(app_err, AppError::Config(ConfigError::Invalid(_))));
        assert!(app_err.to_string().contains("weather.default_location"));
        assert!(app_err.user_message().contains("Check your settings"));
    }

    #[test]
    fn test_unwritable_location_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let err = Config::load_from(&blocker.join("config.toml")).unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Io(_))));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
