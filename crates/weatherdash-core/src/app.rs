use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::config::ValidationResult;
use crate::Config;

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Load and validate configuration, from `config_path` or the default location
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let (config, validation) = Config::load_validated(config_path)?;
        Ok(Self::with_config(config, validation))
    }

    /// Build an application around an already loaded configuration
    pub fn with_config(config: Config, validation: ValidationResult) -> Self {
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Log the effective settings and any configuration warnings.
    ///
    /// Call after logging is initialized; warnings found while loading are
    /// replayed here.
    pub fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            location = %self.config.weather.default_location,
            refresh_minutes = self.config.weather.refresh_minutes,
            "Initializing weatherdash"
        );

        for warning in &self.validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down weatherdash");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the configuration
    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\ndefault_location = \"Lisbon\"\n").unwrap();

        let mut app = App::new(Some(&path)).unwrap();
        app.initialize().unwrap();

        assert_eq!(app.config().weather.default_location, "Lisbon");
        app.shutdown().unwrap();
    }

    #[test]
    fn test_app_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\nrefresh_minutes = 0\n").unwrap();

        let err = App::new(Some(&path)).err().unwrap();
        assert!(err.to_string().contains("weather.refresh_minutes"));
    }
}
