pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    Config, DisplayConfig, LoggingConfig, UnitPreference, ValidationResult, WeatherConfig,
    API_KEY_ENV,
};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError};

use anyhow::Result;

/// Initialize tracing/logging.
///
/// `default_level` applies when `RUST_LOG` is not set. Output goes to stderr
/// so it never interleaves with the dashboard on stdout.
pub fn init(default_level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    tracing::info!("weatherdash core initialized");
    Ok(())
}
