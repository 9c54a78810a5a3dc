use weatherdash_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use weatherdash_weather::WeatherError as ProviderError;

use super::IntoAppError;

impl IntoAppError for ProviderError {
    fn into_app_error(self) -> AppError {
        match self {
            ProviderError::MissingApiKey => AppError::Weather(WeatherError::MissingApiKey),
            ProviderError::Status { status: 401 | 403, .. } => {
                AppError::Weather(WeatherError::InvalidApiKey)
            }
            ProviderError::Status { status: 400, body } => {
                AppError::Weather(WeatherError::LocationNotFound(body))
            }
            ProviderError::Status { status: 503, .. } => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            ProviderError::Status { status, body } if status >= 500 => {
                AppError::Network(NetworkError::ServerError {
                    status,
                    message: body,
                })
            }
            ProviderError::Status { status, body } => {
                AppError::Weather(WeatherError::ApiError(format!("HTTP {status}: {body}")))
            }
            ProviderError::Network(e) => AppError::Network(e.into_network_error()),
            ProviderError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        }
    }
}
