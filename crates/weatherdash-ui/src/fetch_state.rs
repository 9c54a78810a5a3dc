//! Fetch state machine for the dashboard.
//!
//! `Idle -> Loading -> (Success | Fallback | Stale) -> Idle`. Only the most
//! recently dispatched fetch may leave `Loading`; older completions are
//! reported as `Superseded`.

/// Identifies one dispatched fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub location: String,
}

/// Whether a fetch is in flight, and which one counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading {
        seq: u64,
    },
}

impl FetchPhase {
    pub fn is_loading(self) -> bool {
        matches!(self, FetchPhase::Loading { .. })
    }

    /// True if a search may be submitted.
    pub fn can_submit_search(self) -> bool {
        matches!(self, FetchPhase::Idle)
    }

    /// State after dispatching fetch `seq`. A newer dispatch takes over.
    pub fn on_dispatch(self, seq: u64) -> Self {
        FetchPhase::Loading { seq }
    }

    /// State after fetch `seq` completed.
    pub fn on_fetch_done(self, seq: u64) -> Self {
        match self {
            FetchPhase::Loading { seq: current } if current == seq => FetchPhase::Idle,
            other => other,
        }
    }
}

/// What a completed fetch did to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Live data applied
    Success,
    /// Fetch failed with nothing held; placeholder data applied
    Fallback,
    /// Fetch failed; previously held data kept
    Stale,
    /// A newer fetch was dispatched meanwhile; nothing applied
    Superseded,
}
