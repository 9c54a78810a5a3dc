//! Weather data for weatherdash
//!
//! Fetches current conditions and forecasts from WeatherAPI.com, normalises
//! them, and produces placeholder data when a first load fails.

pub mod condition;
pub mod fallback;
pub mod provider;
pub mod types;
pub mod units;

pub use condition::{icon_for, WeatherCondition};
pub use provider::WeatherProvider;
pub use types::*;
pub use units::UnitSystem;
