//! Week and range summaries: one row per calendar date plus totals.
//!
//! `total_diff` only sums days that have net time, while `total_required`
//! sums every date of the range. A day without any record therefore counts
//! towards the required total but not towards the diff total.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::attendance::accounting::Accounting;
use crate::attendance::record::DayRecord;
use crate::time::calendar::{DateRange, WeekWindow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub work_date: NaiveDate,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub net_work_minutes: Option<i64>,
    pub required_minutes: i64,
    pub diff_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub rows: Vec<SummaryRow>,
    pub total_net: i64,
    pub total_required: i64,
    pub total_diff: i64,
}

impl RangeSummary {
    /// Pretty-printed JSON, as handed to clients and exports.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Summarizes `records` over every date of `range`.
///
/// Records outside the range are ignored. An Active day only gets net time
/// when `now_if_active` is given and falls on that day; an Active record
/// left over from an earlier day yields `None`.
pub fn summarize_range(
    accounting: &Accounting,
    range: DateRange,
    records: &[DayRecord],
    now_if_active: Option<DateTime<Utc>>,
) -> RangeSummary {
    let mut by_date: HashMap<NaiveDate, &DayRecord> = HashMap::new();
    for record in records.iter().filter(|r| range.contains(r.date)) {
        by_date.entry(record.date).or_insert(record);
    }

    let today = now_if_active.map(|now| accounting.date_of(now));

    let rows: Vec<SummaryRow> = range
        .dates()
        .map(|date| {
            let record = by_date.get(&date).copied();
            let live = now_if_active.filter(|_| today == Some(date));
            SummaryRow {
                work_date: date,
                clock_in: record.and_then(DayRecord::clock_in),
                clock_out: record.and_then(DayRecord::clock_out),
                net_work_minutes: accounting.net_minutes(record, live),
                required_minutes: accounting.required_minutes(date),
                diff_minutes: accounting.diff_minutes(record, date, live),
            }
        })
        .collect();

    let total_net = rows.iter().filter_map(|r| r.net_work_minutes).sum();
    let total_required = rows.iter().map(|r| r.required_minutes).sum();
    let total_diff = rows.iter().filter_map(|r| r.diff_minutes).sum();

    RangeSummary {
        from: range.from,
        to: range.to,
        rows,
        total_net,
        total_required,
        total_diff,
    }
}

pub fn summarize_week(
    accounting: &Accounting,
    window: WeekWindow,
    records: &[DayRecord],
    now_if_active: Option<DateTime<Utc>>,
) -> RangeSummary {
    summarize_range(accounting, window.range(), records, now_if_active)
}
