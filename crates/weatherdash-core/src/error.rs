//! Centralized error types for the weatherdash application.
//!
//! This module provides a typed error hierarchy that:
//! - Separates transport, configuration and weather-service failures
//! - Provides short messages suitable for dashboard notifications
//! - Preserves full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Provider and UI errors are mapped into this type before being shown.
/// Use `user_message()` to get a notification-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for a notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is having issues. Showing last known data."
            }
            NetworkError::ServerError { .. } => "The request failed. Showing last known data.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Showing last known data."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Weather service errors as seen by the user.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No weather API key configured")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Weather API error: {0}")]
    ApiError(String),

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::MissingApiKey => {
                "No weather API key configured. Run `weatherdash setup` for help."
            }
            WeatherError::InvalidApiKey => "Weather API key is invalid. Check settings.",
            WeatherError::LocationNotFound(_) => "Location not found. Check and try again.",
            WeatherError::ApiError(_) => "Weather service error. Showing last known data.",
            WeatherError::ServiceUnavailable => {
                "Weather service unavailable. Please try again later."
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::Network(NetworkError::Timeout),
            AppError::Config(ConfigError::Invalid("test".into())),
            AppError::Weather(WeatherError::MissingApiKey),
            AppError::Weather(WeatherError::ServiceUnavailable),
            AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{err:?}");
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = WeatherError::InvalidApiKey.into();
        assert!(matches!(
            app_err,
            AppError::Weather(WeatherError::InvalidApiKey)
        ));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Weather(WeatherError::MissingApiKey);
        assert!(app_err.user_message().contains("weatherdash setup"));
    }

    #[test]
    fn test_server_error_message_depends_on_status() {
        let server = NetworkError::ServerError {
            status: 503,
            message: "down".into(),
        };
        let client = NetworkError::ServerError {
            status: 400,
            message: "bad".into(),
        };
        assert!(server.user_message().contains("having issues"));
        assert!(client.user_message().contains("request failed"));
    }
}
