//! Working-time policy: how many minutes each weekday requires and how long
//! the fixed daily break is.

use std::str::FromStr;

use anyhow::{Context, bail};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Minutes deducted from every worked day, regardless of its length.
pub const BREAK_MINUTES: i64 = 60;

/// Required minutes per weekday, indexed Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredMinutesPolicy {
    minutes: [i64; 7],
}

impl Default for RequiredMinutesPolicy {
    /// Monday to Thursday 8h, Friday 7h, weekend off.
    fn default() -> Self {
        Self {
            minutes: [480, 480, 480, 480, 420, 0, 0],
        }
    }
}

impl RequiredMinutesPolicy {
    pub fn new(minutes: [i64; 7]) -> Self {
        Self { minutes }
    }

    pub fn for_weekday(&self, weekday: Weekday) -> i64 {
        self.minutes[weekday.num_days_from_monday() as usize]
    }

    pub fn for_date(&self, date: NaiveDate) -> i64 {
        self.for_weekday(date.weekday())
    }

    /// Sum over all seven days.
    pub fn weekly_total(&self) -> i64 {
        self.minutes.iter().sum()
    }
}

/// Parses seven comma-separated, non-negative minute counts (Mon..Sun),
/// e.g. `"480,480,480,480,420,0,0"`.
impl FromStr for RequiredMinutesPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 7 {
            bail!("expected 7 comma-separated values, got {}", parts.len());
        }

        let mut minutes = [0i64; 7];
        for (slot, part) in minutes.iter_mut().zip(parts) {
            let v: i64 = part
                .parse()
                .with_context(|| format!("`{part}` is not a minute count"))?;
            if v < 0 {
                bail!("required minutes must not be negative: {v}");
            }
            *slot = v;
        }
        Ok(Self { minutes })
    }
}
