use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};

/// A point in time as both an absolute instant and the user's wall clock.
///
/// Passed explicitly to anything that stamps or labels data, so tests can
/// pin it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Now {
    pub utc: DateTime<Utc>,
    pub local: NaiveDateTime,
}

impl Now {
    /// Read the system clock in the system timezone
    pub fn system() -> Self {
        let local = Local::now();
        Self {
            utc: local.with_timezone(&Utc),
            local: local.naive_local(),
        }
    }

    /// `utc` seen from a fixed UTC offset
    pub fn at(utc: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            utc,
            local: utc.with_timezone(&offset).naive_local(),
        }
    }
}
