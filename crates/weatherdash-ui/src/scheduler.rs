//! Periodic refresh timer.
//!
//! A tokio task sends [`TimerEvent::Tick`] every interval until the
//! [`RefreshTimer`] is stopped, restarted or dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
}

pub struct RefreshTimer {
    tx: mpsc::UnboundedSender<TimerEvent>,
    every: Duration,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    /// Start ticking. The first tick comes one full interval from now.
    pub fn start(tx: mpsc::UnboundedSender<TimerEvent>, every: Duration) -> Self {
        let cancel = CancellationToken::new();
        let handle = spawn_ticker(tx.clone(), every, cancel.clone());
        Self {
            tx,
            every,
            cancel,
            handle,
        }
    }

    /// Cancel the running task and start a fresh interval
    pub fn restart(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.handle = spawn_ticker(self.tx.clone(), self.every, self.cancel.clone());
        tracing::debug!("Refresh timer restarted ({:?})", self.every);
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn interval(&self) -> Duration {
        self.every
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn spawn_ticker(
    tx: mpsc::UnboundedSender<TimerEvent>,
    every: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + every, every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if tx.send(TimerEvent::Tick).is_err() {
                        break;
                    }
                }
            }
        }
    })
}
