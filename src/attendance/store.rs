//! # Day Record Store (port)
//!
//! Persistence boundary for [`DayRecord`]s, keyed by `(user, date)`.
//!
//! Writes are conditional: [`DayRecordStore::compare_and_swap`] only
//! replaces the record when the stored value still equals what the caller
//! validated against. Together with the one-record-per-day key this makes
//! the store the serialization point for concurrent clock-in/clock-out
//! requests of the same user.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::attendance::record::DayRecord;
use crate::auth::identity::UserId;
use crate::error::{AttendanceError, AttendanceResult};

pub trait DayRecordStore: Send + Sync {
    /// Point lookup.
    fn find(&self, user: UserId, date: NaiveDate) -> AttendanceResult<Option<DayRecord>>;

    /// All records of `user` with `from <= date <= to`, ordered by date.
    fn find_range(
        &self,
        user: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AttendanceResult<Vec<DayRecord>>;

    /// Stores `next` if the current record for `(user, next.date)` equals
    /// `expected` (`None` meaning "no record yet").
    ///
    /// Returns `Ok(false)` when another writer got there first; nothing is
    /// written in that case.
    fn compare_and_swap(
        &self,
        user: UserId,
        expected: Option<&DayRecord>,
        next: &DayRecord,
    ) -> AttendanceResult<bool>;
}

/// Process-local store, used in tests and single-instance deployments.
#[derive(Debug, Default)]
pub struct InMemoryDayRecordStore {
    records: Mutex<HashMap<(UserId, NaiveDate), DayRecord>>,
}

impl InMemoryDayRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AttendanceResult<MutexGuard<'_, HashMap<(UserId, NaiveDate), DayRecord>>> {
        self.records
            .lock()
            .map_err(|_| AttendanceError::Store(anyhow::anyhow!("day record store lock poisoned")))
    }

    /// Number of stored records across all users.
    pub fn len(&self) -> usize {
        self.records.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DayRecordStore for InMemoryDayRecordStore {
    fn find(&self, user: UserId, date: NaiveDate) -> AttendanceResult<Option<DayRecord>> {
        Ok(self.lock()?.get(&(user, date)).cloned())
    }

    fn find_range(
        &self,
        user: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AttendanceResult<Vec<DayRecord>> {
        let mut out: Vec<DayRecord> = self
            .lock()?
            .iter()
            .filter(|((u, d), _)| *u == user && from <= *d && *d <= to)
            .map(|(_, r)| r.clone())
            .collect();
        out.sort_by_key(|r| r.date);
        Ok(out)
    }

    fn compare_and_swap(
        &self,
        user: UserId,
        expected: Option<&DayRecord>,
        next: &DayRecord,
    ) -> AttendanceResult<bool> {
        let mut records = self.lock()?;
        let key = (user, next.date);

        if records.get(&key) != expected {
            return Ok(false);
        }
        records.insert(key, next.clone());
        Ok(true)
    }
}
