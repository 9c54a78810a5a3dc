//! Dashboard presentation state.
//!
//! `DashboardModel` owns everything the renderer shows and decides when to
//! fetch. It never performs I/O itself: trigger methods hand back a
//! [`FetchTicket`] for the caller to dispatch, and the result comes back
//! through [`DashboardModel::complete_fetch`].

use chrono::NaiveDateTime;
use rand::Rng;
use weatherdash_weather::{fallback, DataSource, UnitSystem, WeatherError, WeatherSnapshot};

use crate::clock::Now;
use crate::error_mapping::IntoAppError;
use crate::fetch_state::{FetchOutcome, FetchPhase, FetchTicket};
use crate::notification::{Notification, NotificationCenter};

pub const FETCH_ERROR_TITLE: &str = "Error fetching weather data";
pub const FALLBACK_DESCRIPTION: &str = "Using mock data as fallback.";
pub const REFRESHED_TITLE: &str = "Weather data refreshed";

/// Lower panel tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Hourly,
    Details,
}

#[derive(Debug)]
pub struct DashboardModel {
    location: String,
    search_input: String,
    snapshot: Option<WeatherSnapshot>,
    source: Option<DataSource>,
    phase: FetchPhase,
    last_outcome: Option<FetchOutcome>,
    last_updated: Option<NaiveDateTime>,
    units: UnitSystem,
    tab: ActiveTab,
    latest_seq: u64,
    notifications: NotificationCenter,
}

impl DashboardModel {
    pub fn new(location: impl Into<String>, units: UnitSystem) -> Self {
        Self {
            location: location.into(),
            search_input: String::new(),
            snapshot: None,
            source: None,
            phase: FetchPhase::Idle,
            last_outcome: None,
            last_updated: None,
            units,
            tab: ActiveTab::default(),
            latest_seq: 0,
            notifications: NotificationCenter::default(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn source(&self) -> Option<DataSource> {
        self.source
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<FetchOutcome> {
        self.last_outcome
    }

    /// Local wall-clock time the held snapshot was applied
    pub fn last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.tab
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.tab = tab;
    }

    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// First display: fetch only if nothing is held yet.
    pub fn on_mount(&mut self) -> Option<FetchTicket> {
        if self.has_data() {
            return None;
        }
        Some(self.dispatch())
    }

    /// Periodic timer: always re-fetch the current location.
    pub fn on_tick(&mut self) -> FetchTicket {
        self.dispatch()
    }

    /// Submit the search input as the new location.
    ///
    /// Ignored while loading or when the input is blank. The location is
    /// taken verbatim.
    pub fn submit_search(&mut self) -> Option<FetchTicket> {
        if !self.phase.can_submit_search() || self.search_input.trim().is_empty() {
            return None;
        }
        self.location = self.search_input.clone();
        tracing::info!("Location set to '{}'", self.location);
        Some(self.dispatch())
    }

    /// Manual refresh of the current location.
    pub fn refresh(&mut self) -> FetchTicket {
        self.notifications.push(Notification::info(
            REFRESHED_TITLE,
            format!("Latest data for {}", self.location),
        ));
        self.dispatch()
    }

    fn dispatch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.phase = self.phase.on_dispatch(self.latest_seq);
        tracing::debug!(
            "Dispatching fetch #{} for '{}'",
            self.latest_seq,
            self.location
        );
        FetchTicket {
            seq: self.latest_seq,
            location: self.location.clone(),
        }
    }

    /// Apply the result of a dispatched fetch.
    ///
    /// The snapshot is replaced whole or not at all. Placeholder data is
    /// substituted only when nothing is held and this is the latest fetch.
    pub fn complete_fetch<R: Rng + ?Sized>(
        &mut self,
        ticket: &FetchTicket,
        result: Result<WeatherSnapshot, WeatherError>,
        now: Now,
        rng: &mut R,
    ) -> FetchOutcome {
        let is_current = ticket.seq == self.latest_seq;
        if is_current {
            self.phase = self.phase.on_fetch_done(ticket.seq);
            self.search_input.clear();
        }

        let outcome = match result {
            Ok(_) if !is_current => {
                tracing::debug!("Discarding superseded fetch #{}", ticket.seq);
                FetchOutcome::Superseded
            }
            Ok(snapshot) => {
                self.apply(snapshot, DataSource::Live, now);
                FetchOutcome::Success
            }
            Err(err) => {
                tracing::error!("Error fetching weather data for '{}': {}", ticket.location, err);

                // A superseded failure never substitutes
                let placeholder = if is_current {
                    fallback::resolve_failure(
                        self.has_data(),
                        &ticket.location,
                        now.local,
                        now.utc,
                        rng,
                    )
                } else {
                    None
                };

                if let Some(placeholder) = placeholder {
                    self.apply(placeholder, DataSource::Fallback, now);
                    self.notifications
                        .push(Notification::error(FETCH_ERROR_TITLE, FALLBACK_DESCRIPTION));
                    FetchOutcome::Fallback
                } else {
                    let app_err = err.into_app_error();
                    self.notifications
                        .push(Notification::error(FETCH_ERROR_TITLE, app_err.user_message()));
                    if is_current {
                        FetchOutcome::Stale
                    } else {
                        FetchOutcome::Superseded
                    }
                }
            }
        };

        if is_current {
            self.last_outcome = Some(outcome);
        }
        outcome
    }

    fn apply(&mut self, snapshot: WeatherSnapshot, source: DataSource, now: Now) {
        self.snapshot = Some(snapshot);
        self.source = Some(source);
        self.last_updated = Some(now.local);
    }
}
