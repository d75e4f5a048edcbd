//! Calendar arithmetic on plain dates: strict parsing, ISO weekdays,
//! Monday-to-Sunday week windows and inclusive date ranges.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::{AttendanceError, AttendanceResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest accepted [`DateRange`], in days (both ends included).
pub const MAX_RANGE_DAYS: i64 = 366;

/// Parses a strict `YYYY-MM-DD` date.
///
/// `chrono` alone accepts single-digit months and days, so the shape is
/// checked first.
pub fn parse_date(s: &str) -> AttendanceResult<NaiveDate> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shaped {
        return Err(AttendanceError::InvalidDateFormat(s.to_string()));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| AttendanceError::InvalidDateFormat(s.to_string()))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// ISO weekday number: Monday = 1 ... Sunday = 7.
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// The Monday-to-Sunday week containing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl WeekWindow {
    /// Iterates the seven dates of the window in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.from.iter_days().take(7)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            from: self.from,
            to: self.to,
        }
    }
}

/// Returns the week window containing `date`.
///
/// The day arithmetic runs on a noon-anchored date-time. Being a naive
/// date-time it cannot cross a daylight-saving boundary, and noon keeps the
/// result on the same calendar date whichever way it is rounded.
pub fn week_window(date: NaiveDate) -> WeekWindow {
    let anchor = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    let back = u64::from(iso_weekday(date) - 1);

    let monday = anchor - Days::new(back);
    let sunday = monday + Days::new(6);

    WeekWindow {
        from: monday.date(),
        to: sunday.date(),
    }
}

/// An inclusive, non-empty range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Fails with [`AttendanceError::InvalidDateRange`] when `from > to` or
    /// when the range spans more than [`MAX_RANGE_DAYS`] days.
    pub fn new(from: NaiveDate, to: NaiveDate) -> AttendanceResult<Self> {
        let reason = if from > to {
            "start is after end"
        } else if (to - from).num_days() >= MAX_RANGE_DAYS {
            "range is longer than a year"
        } else {
            return Ok(Self { from, to });
        };

        Err(AttendanceError::InvalidDateRange {
            from: format_date(from),
            to: format_date(to),
            reason,
        })
    }

    /// Parses both ends with [`parse_date`].
    pub fn parse(from: &str, to: &str) -> AttendanceResult<Self> {
        Self::new(parse_date(from)?, parse_date(to)?)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}
