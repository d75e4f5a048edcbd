//! # Attendance Service
//!
//! Application layer tying the accounting core to its collaborators: the
//! caller identity, the [`Clock`] and the [`DayRecordStore`].
//!
//! Transitions follow read → validate → compare-and-swap. When the swap
//! loses against a concurrent writer the record is re-read and validated
//! again, which turns the race into the regular refusal (e.g. the second of
//! two simultaneous clock-ins fails with `AlreadyClockedIn`).

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::attendance::accounting::Accounting;
use crate::attendance::record::DayRecord;
use crate::attendance::store::DayRecordStore;
use crate::attendance::summary::{RangeSummary, summarize_range};
use crate::auth::identity::{UserId, require_user};
use crate::auth::principal::CurrentUser;
use crate::config::accounting::AccountingConfig;
use crate::error::{AttendanceError, AttendanceResult};
use crate::time::calendar::{DateRange, parse_date, week_window};
use crate::time::clock::Clock;

const MAX_ATTEMPTS: usize = 3;

/// The caller's current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayView {
    pub date: NaiveDate,
    pub record: Option<DayRecord>,
    pub required_minutes: i64,
    /// Live while clocked in.
    pub net_minutes: Option<i64>,
    pub diff_minutes: Option<i64>,
}

impl TodayView {
    pub fn is_clocked_in(&self) -> bool {
        self.record.as_ref().is_some_and(|r| r.state.is_active())
    }

    pub fn is_done(&self) -> bool {
        self.record.as_ref().is_some_and(|r| r.state.is_closed())
    }
}

pub struct AttendanceService<S, C> {
    store: S,
    clock: C,
    accounting: Accounting,
}

impl<S: DayRecordStore, C: Clock> AttendanceService<S, C> {
    pub fn new(store: S, clock: C, config: AccountingConfig) -> Self {
        Self {
            store,
            clock,
            accounting: Accounting::new(config),
        }
    }

    pub fn accounting(&self) -> &Accounting {
        &self.accounting
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Storage keeps microseconds, so instants are truncated up front to
    /// compare equal after a round trip.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }

    pub fn today(&self, user: Option<&CurrentUser>) -> AttendanceResult<TodayView> {
        let user_id = require_user(user)?;
        let now = self.now();
        let date = self.accounting.date_of(now);
        let record = self.store.find(user_id, date)?;

        Ok(TodayView {
            date,
            required_minutes: self.accounting.required_minutes(date),
            net_minutes: self.accounting.net_minutes(record.as_ref(), Some(now)),
            diff_minutes: self
                .accounting
                .diff_minutes(record.as_ref(), date, Some(now)),
            record,
        })
    }

    pub fn clock_in(
        &self,
        user: Option<&CurrentUser>,
        note: Option<&str>,
    ) -> AttendanceResult<DayRecord> {
        let user_id = require_user(user)?;
        let now = self.now();
        let note = note.map(str::trim).filter(|n| !n.is_empty()).map(String::from);

        let record = self.transition(user_id, now, |existing| {
            self.accounting.request_clock_in(existing, now, note.clone())
        })?;
        info!(user = %user_id, date = %record.date, "clocked in");
        Ok(record)
    }

    pub fn clock_out(&self, user: Option<&CurrentUser>) -> AttendanceResult<DayRecord> {
        let user_id = require_user(user)?;
        let now = self.now();

        let record = self.transition(user_id, now, |existing| {
            self.accounting.request_clock_out(existing, now)
        })?;
        info!(user = %user_id, date = %record.date, "clocked out");
        Ok(record)
    }

    /// Summary of the week containing `date` (`YYYY-MM-DD`), or of the
    /// current week.
    pub fn week_summary(
        &self,
        user: Option<&CurrentUser>,
        date: Option<&str>,
    ) -> AttendanceResult<RangeSummary> {
        let user_id = require_user(user)?;
        let now = self.now();
        let base = match date {
            Some(s) => parse_date(s)?,
            None => self.accounting.date_of(now),
        };
        self.summarize(user_id, week_window(base).range(), now)
    }

    /// Summary of an arbitrary inclusive date range.
    pub fn range_summary(
        &self,
        user: Option<&CurrentUser>,
        from: &str,
        to: &str,
    ) -> AttendanceResult<RangeSummary> {
        let user_id = require_user(user)?;
        let range = DateRange::parse(from, to)?;
        self.summarize(user_id, range, self.now())
    }

    fn summarize(
        &self,
        user_id: UserId,
        range: DateRange,
        now: DateTime<Utc>,
    ) -> AttendanceResult<RangeSummary> {
        let records = self.store.find_range(user_id, range.from, range.to)?;
        Ok(summarize_range(&self.accounting, range, &records, Some(now)))
    }

    fn transition<F>(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
        decide: F,
    ) -> AttendanceResult<DayRecord>
    where
        F: Fn(Option<&DayRecord>) -> AttendanceResult<DayRecord>,
    {
        let date = self.accounting.date_of(now);

        for attempt in 1..=MAX_ATTEMPTS {
            let existing = self.store.find(user_id, date)?;
            let next = decide(existing.as_ref())?;

            if self
                .store
                .compare_and_swap(user_id, existing.as_ref(), &next)?
            {
                return Ok(next);
            }
            warn!(user = %user_id, date = %date, attempt, "lost concurrent update, retrying");
        }

        Err(AttendanceError::ConcurrentModification)
    }
}
