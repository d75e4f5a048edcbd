//! Domain error type shared by the accounting core, the stores and the
//! application services.
//!
//! Every variant except [`AttendanceError::Store`] is user-facing: it is the
//! reason a requested transition was refused, and the previously persisted
//! state is left unchanged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    #[error("invalid date range {from}..{to}: {reason}")]
    InvalidDateRange {
        from: String,
        to: String,
        reason: &'static str,
    },

    #[error("invalid time zone: {0}")]
    InvalidTimeZone(String),

    #[error("already clocked in")]
    AlreadyClockedIn,

    /// Only one in/out segment per day is supported.
    #[error("a completed entry already exists for this day")]
    DayAlreadyComplete,

    #[error("not clocked in")]
    NotClockedIn,

    #[error("already clocked out")]
    AlreadyClockedOut,

    #[error("clock-out must not be earlier than clock-in")]
    InvalidInterval,

    #[error("not authenticated")]
    Unauthenticated,

    #[error("access denied")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("stored record is inconsistent: {0}")]
    CorruptRecord(String),

    #[error("record was modified concurrently, please retry")]
    ConcurrentModification,

    /// Opaque pass-through for storage and driver failures.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type AttendanceResult<T> = Result<T, AttendanceError>;
