//! Daily accounting: the clock-in/clock-out state machine and the derived
//! net, required and diff minutes.
//!
//! Everything here is a pure function of its arguments. The current instant
//! is always passed in; nothing reads the system clock.

use chrono::{DateTime, NaiveDate, Utc};

use crate::attendance::record::{DayRecord, DayState};
use crate::config::accounting::AccountingConfig;
use crate::error::{AttendanceError, AttendanceResult};
use crate::time::local::canonical_date;

/// Whole minutes from `start` to `end`, rounded towards negative infinity.
pub fn elapsed_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds().div_euclid(60_000)
}

/// Worked minutes after the break deduction, never negative.
///
/// The break is always deducted, even from days shorter than the break.
pub fn net_from_interval(start: DateTime<Utc>, end: DateTime<Utc>, break_minutes: i64) -> i64 {
    (elapsed_minutes(start, end) - break_minutes).max(0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accounting {
    config: AccountingConfig,
}

impl Accounting {
    pub fn new(config: AccountingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AccountingConfig {
        &self.config
    }

    /// The calendar date `now` falls on in the configured zone.
    pub fn date_of(&self, now: DateTime<Utc>) -> NaiveDate {
        canonical_date(now, self.config.time_zone)
    }

    /// Starts the working day.
    ///
    /// Allowed from Open or from no record at all. A new record is dated
    /// with the zone-local date of `now`; an existing Open record keeps its
    /// date. The stored note is replaced by `note`, so clocking in without
    /// one clears it.
    pub fn request_clock_in(
        &self,
        existing: Option<&DayRecord>,
        now: DateTime<Utc>,
        note: Option<String>,
    ) -> AttendanceResult<DayRecord> {
        let date = match existing {
            None => self.date_of(now),
            Some(record) => match record.state {
                DayState::Open => record.date,
                DayState::Active { .. } => return Err(AttendanceError::AlreadyClockedIn),
                DayState::Closed { .. } => return Err(AttendanceError::DayAlreadyComplete),
            },
        };

        Ok(DayRecord {
            date,
            state: DayState::Active { clock_in: now },
            note,
        })
    }

    /// Ends the working day. Only an Active record can be closed.
    pub fn request_clock_out(
        &self,
        existing: Option<&DayRecord>,
        now: DateTime<Utc>,
    ) -> AttendanceResult<DayRecord> {
        let record = existing.ok_or(AttendanceError::NotClockedIn)?;

        match record.state {
            DayState::Open => Err(AttendanceError::NotClockedIn),
            DayState::Closed { .. } => Err(AttendanceError::AlreadyClockedOut),
            DayState::Active { clock_in } => Ok(DayRecord {
                date: record.date,
                state: DayState::closed(clock_in, now)?,
                note: record.note.clone(),
            }),
        }
    }

    /// Net worked minutes of a day.
    ///
    /// Closed days use the recorded clock-out. Active days use `now_if_active`
    /// as a provisional clock-out and yield `None` without it. Open or absent
    /// days yield `None`.
    pub fn net_minutes(
        &self,
        record: Option<&DayRecord>,
        now_if_active: Option<DateTime<Utc>>,
    ) -> Option<i64> {
        let (start, end) = match record?.state {
            DayState::Open => return None,
            DayState::Active { clock_in } => (clock_in, now_if_active?),
            DayState::Closed {
                clock_in,
                clock_out,
            } => (clock_in, clock_out),
        };
        Some(net_from_interval(start, end, self.config.break_minutes))
    }

    pub fn required_minutes(&self, date: NaiveDate) -> i64 {
        self.config.required.for_date(date)
    }

    /// `net - required`, or `None` when there is no net time.
    pub fn diff_minutes(
        &self,
        record: Option<&DayRecord>,
        date: NaiveDate,
        now_if_active: Option<DateTime<Utc>>,
    ) -> Option<i64> {
        self.net_minutes(record, now_if_active)
            .map(|net| net - self.required_minutes(date))
    }
}
