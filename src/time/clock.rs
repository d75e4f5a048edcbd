use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::time::local::canonical_date;

/// A port that provides the **current instant** for the application.
///
/// # Purpose
/// Accounting logic never reads the system clock directly. Services receive a
/// `Clock` and pass the instant down as an explicit argument, so that:
///
/// - "now" and "today" are deterministic in tests
/// - implementations can be swapped (system clock, fixed clock, mock)
///
/// # Design Notes
/// - The clock knows nothing about time zones. "Today" is always resolved
///   against a zone supplied by the caller (see [`Clock::today_in`]).
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the calendar date of [`Clock::now`] as observed in `tz`.
    fn today_in(&self, tz: Tz) -> NaiveDate {
        canonical_date(self.now(), tz)
    }
}

/// A [`Clock`] that always returns the same instant.
///
/// Used in tests and in batch jobs that evaluate "as of" a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
