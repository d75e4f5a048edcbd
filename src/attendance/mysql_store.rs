//! # MySQL Day Record Store
//!
//! [`DayRecordStore`] on top of the [`Db`] port.
//!
//! Timestamps are stored as UTC in `DATETIME(6)` columns. Conditional writes
//! rely on the `(user_id, work_date)` primary key for inserts and on a
//! `WHERE` clause repeating the expected state for updates, so the database
//! decides which of two racing writers wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::attendance::record::DayRecord;
use crate::attendance::store::DayRecordStore;
use crate::auth::identity::UserId;
use crate::db::port::{Db, Row};
use crate::error::AttendanceResult;
use crate::params;

/// Table definition used by [`MySqlDayRecordStore::ensure_schema`].
pub const WORKDAYS_DDL: &str = "CREATE TABLE IF NOT EXISTS workdays (
    user_id   CHAR(36)    NOT NULL,
    work_date DATE        NOT NULL,
    clock_in  DATETIME(6) NULL,
    clock_out DATETIME(6) NULL,
    note      TEXT        NULL,
    PRIMARY KEY (user_id, work_date),
    CONSTRAINT workdays_out_needs_in CHECK (clock_out IS NULL OR clock_in IS NOT NULL),
    CONSTRAINT workdays_out_after_in CHECK (clock_out IS NULL OR clock_out >= clock_in)
)";

const SELECT_ONE: &str = "SELECT work_date, clock_in, clock_out, note FROM workdays \
     WHERE user_id = ? AND work_date = ?";

const SELECT_RANGE: &str = "SELECT work_date, clock_in, clock_out, note FROM workdays \
     WHERE user_id = ? AND work_date BETWEEN ? AND ? ORDER BY work_date";

// A duplicate key turns into a no-op update, so only a fresh row reports
// an affected row.
const INSERT_IF_ABSENT: &str = "INSERT INTO workdays (user_id, work_date, clock_in, clock_out, note) \
     VALUES (?, ?, ?, ?, ?) ON DUPLICATE KEY UPDATE user_id = user_id";

const UPDATE_IF_UNCHANGED: &str = "UPDATE workdays SET clock_in = ?, clock_out = ?, note = ? \
     WHERE user_id = ? AND work_date = ? \
     AND clock_in <=> ? AND clock_out <=> ? AND note <=> ?";

fn to_db_time(at: Option<DateTime<Utc>>) -> Option<NaiveDateTime> {
    at.map(|t| t.naive_utc())
}

fn from_db_time(at: Option<NaiveDateTime>) -> Option<DateTime<Utc>> {
    at.map(|t| t.and_utc())
}

fn record_from_row(row: &Row) -> AttendanceResult<DayRecord> {
    DayRecord::from_parts(
        row.get_date("work_date")?,
        from_db_time(row.get_datetime_opt("clock_in")?),
        from_db_time(row.get_datetime_opt("clock_out")?),
        row.get_string_opt("note")?,
    )
}

pub struct MySqlDayRecordStore<D: Db> {
    db: D,
}

impl<D: Db> MySqlDayRecordStore<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }

    /// Creates the `workdays` table if it does not exist.
    pub fn ensure_schema(&self) -> AttendanceResult<()> {
        self.db.exec(WORKDAYS_DDL, &[])?;
        Ok(())
    }
}

impl<D: Db> DayRecordStore for MySqlDayRecordStore<D> {
    fn find(&self, user: UserId, date: NaiveDate) -> AttendanceResult<Option<DayRecord>> {
        let uid = user.to_string();
        self.db
            .fetch_one(SELECT_ONE, &params![uid.as_str(), date])?
            .as_ref()
            .map(record_from_row)
            .transpose()
    }

    fn find_range(
        &self,
        user: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AttendanceResult<Vec<DayRecord>> {
        let uid = user.to_string();
        self.db
            .fetch_all(SELECT_RANGE, &params![uid.as_str(), from, to])?
            .iter()
            .map(record_from_row)
            .collect()
    }

    fn compare_and_swap(
        &self,
        user: UserId,
        expected: Option<&DayRecord>,
        next: &DayRecord,
    ) -> AttendanceResult<bool> {
        let uid = user.to_string();
        let next_in = to_db_time(next.clock_in());
        let next_out = to_db_time(next.clock_out());
        let next_note = next.note.as_deref();

        let affected = match expected {
            None => self.db.exec(
                INSERT_IF_ABSENT,
                &params![uid.as_str(), next.date, next_in, next_out, next_note],
            )?,
            Some(prev) => self.db.exec(
                UPDATE_IF_UNCHANGED,
                &params![
                    next_in,
                    next_out,
                    next_note,
                    uid.as_str(),
                    next.date,
                    to_db_time(prev.clock_in()),
                    to_db_time(prev.clock_out()),
                    prev.note.as_deref(),
                ],
            )?,
        };

        debug!(user = %user, date = %next.date, affected, "workday write");
        Ok(affected == 1)
    }
}
