//! Weather backend: async weather fetching.
//! Network work runs on spawned tasks; results are sent back via mpsc.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use weatherdash_weather::{WeatherError, WeatherProvider, WeatherSnapshot};

use crate::fetch_state::FetchTicket;

/// Messages sent from async operations back to the dashboard loop
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching weather data for `ticket`
    FetchDone {
        ticket: FetchTicket,
        result: Result<WeatherSnapshot, WeatherError>,
    },
}

/// Request to fetch weather data asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &mpsc::UnboundedSender<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    ticket: FetchTicket,
) -> JoinHandle<()> {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = provider.fetch(&ticket.location, Utc::now()).await;
        if tx
            .send(WeatherServiceMessage::FetchDone { ticket, result })
            .is_err()
        {
            tracing::debug!("Dashboard gone; dropping fetch result");
        }
    })
}
