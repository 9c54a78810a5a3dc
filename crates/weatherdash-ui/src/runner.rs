//! Interactive dashboard loop.
//!
//! One task owns the [`DashboardModel`] and selects over typed commands,
//! fetch completions and timer ticks. Fetches run on spawned tasks.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use weatherdash_weather::WeatherProvider;

use crate::clock::Now;
use crate::dashboard::{ActiveTab, DashboardModel};
use crate::fetch_state::{FetchOutcome, FetchTicket};
use crate::help::command_help;
use crate::render::{render_dashboard, render_notifications};
use crate::scheduler::{RefreshTimer, TimerEvent};
use crate::services::{request_weather_fetch, WeatherServiceMessage};

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Refresh,
    ShowTab(ActiveTab),
    Help,
    Quit,
    Empty,
}

/// Parse one input line. Anything that is not a known command is a location.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "q" | "quit" | "exit" => Command::Quit,
        "r" | "refresh" => Command::Refresh,
        "hourly" => Command::ShowTab(ActiveTab::Hourly),
        "details" => Command::ShowTab(ActiveTab::Details),
        "help" | "?" => Command::Help,
        _ => match trimmed.get(..7) {
            Some(prefix) if prefix.eq_ignore_ascii_case("search ") => {
                Command::Search(trimmed[7..].trim_start().to_string())
            }
            _ => Command::Search(line.to_string()),
        },
    }
}

pub struct DashboardRunner {
    model: DashboardModel,
    provider: Arc<WeatherProvider>,
    refresh_minutes: u32,
    rng: StdRng,
}

impl DashboardRunner {
    pub fn new(model: DashboardModel, provider: Arc<WeatherProvider>, refresh_minutes: u32) -> Self {
        Self {
            model,
            provider,
            refresh_minutes: refresh_minutes.max(1),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    fn refresh_every(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_minutes) * 60)
    }

    /// Fetch once, print the dashboard and return.
    pub async fn run_once<W: Write>(&mut self, out: &mut W) -> Result<FetchOutcome> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticket = self.model.on_tick();
        request_weather_fetch(&tx, self.provider.clone(), ticket);
        drop(tx);

        let message = rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Weather fetch ended without a result"))?;
        let outcome = self.handle_message(message);
        self.draw(out)?;
        Ok(outcome)
    }

    /// Run until `quit`, or until end of input once no fetch is pending.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel();
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut timer = RefreshTimer::start(tick_tx, self.refresh_every());

        if let Some(ticket) = self.model.on_mount() {
            self.dispatch(&fetch_tx, ticket);
        }
        self.draw(out)?;
        writeln!(out, "Type `help` for commands.")?;

        let mut lines = input.lines();
        let mut input_open = true;
        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        if self.model.is_loading() {
                            tracing::debug!("Input closed, waiting for pending fetch");
                            continue;
                        }
                        break;
                    };
                    match parse_command(&line) {
                        Command::Quit => break,
                        Command::Empty => continue,
                        Command::Help => {
                            out.write_all(command_help().as_bytes())?;
                            continue;
                        }
                        Command::Refresh => {
                            let ticket = self.model.refresh();
                            self.dispatch(&fetch_tx, ticket);
                        }
                        Command::ShowTab(tab) => self.model.set_active_tab(tab),
                        Command::Search(place) => {
                            let previous = self.model.location().to_string();
                            self.model.set_search_input(place);
                            match self.model.submit_search() {
                                Some(ticket) => {
                                    if ticket.location != previous {
                                        timer.restart();
                                    }
                                    self.dispatch(&fetch_tx, ticket);
                                }
                                None if self.model.is_loading() => {
                                    writeln!(out, "Still loading, try again in a moment.")?;
                                }
                                None => {}
                            }
                        }
                    }
                    self.draw(out)?;
                }
                Some(message) = fetch_rx.recv() => {
                    self.handle_message(message);
                    self.draw(out)?;
                    if !input_open && !self.model.is_loading() {
                        break;
                    }
                }
                Some(TimerEvent::Tick) = tick_rx.recv(), if input_open => {
                    tracing::debug!("Periodic refresh of '{}'", self.model.location());
                    let ticket = self.model.on_tick();
                    self.dispatch(&fetch_tx, ticket);
                    self.draw(out)?;
                }
            }
        }

        timer.stop();
        Ok(())
    }

    fn dispatch(&self, tx: &mpsc::UnboundedSender<WeatherServiceMessage>, ticket: FetchTicket) {
        request_weather_fetch(tx, self.provider.clone(), ticket);
    }

    fn handle_message(&mut self, message: WeatherServiceMessage) -> FetchOutcome {
        match message {
            WeatherServiceMessage::FetchDone { ticket, result } => {
                let outcome =
                    self.model
                        .complete_fetch(&ticket, result, Now::system(), &mut self.rng);
                tracing::info!("Fetch #{} for '{}': {:?}", ticket.seq, ticket.location, outcome);
                outcome
            }
        }
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let toasts = self.model.take_notifications();
        out.write_all(render_notifications(&toasts).as_bytes())?;
        out.write_all(render_dashboard(&self.model, self.refresh_minutes).as_bytes())?;
        out.flush()
    }
}
