//! Maps provider errors to weatherdash_core::AppError for consistent user-facing messages.

use weatherdash_core::AppError;

mod weather;

/// Conversion into the application error shown to the user
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
