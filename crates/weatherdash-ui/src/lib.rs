//! Presentation layer for weatherdash
//!
//! Holds the dashboard state, decides when to fetch, renders the dashboard
//! as text and drives it from an async event loop.

pub mod clock;
pub mod dashboard;
pub mod error_mapping;
pub mod fetch_state;
pub mod help;
pub mod locale;
pub mod notification;
pub mod render;
pub mod runner;
pub mod scheduler;
pub mod services;

pub use clock::Now;
pub use dashboard::{ActiveTab, DashboardModel};
pub use error_mapping::IntoAppError;
pub use fetch_state::{FetchOutcome, FetchPhase, FetchTicket};
pub use locale::{detect_locale, resolve_units};
pub use notification::{Notification, NotificationCenter, NotificationVariant};
pub use runner::{parse_command, Command, DashboardRunner};
pub use scheduler::{RefreshTimer, TimerEvent};
