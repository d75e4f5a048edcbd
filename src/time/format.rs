//! Human-readable rendering of minute counts and clock times.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::time::local::to_local;

/// Formats a minute count as `[-]H:MM`.
///
/// Hours are not padded, minutes always have two digits. The sign appears
/// only for negative values, so zero renders as `0:00`.
///
/// ```
/// use timeclock::time::format::format_signed_duration;
///
/// assert_eq!(format_signed_duration(-95), "-1:35");
/// assert_eq!(format_signed_duration(0), "0:00");
/// assert_eq!(format_signed_duration(480), "8:00");
/// ```
pub fn format_signed_duration(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let abs = minutes.unsigned_abs();
    format!("{sign}{}:{:02}", abs / 60, abs % 60)
}

/// Formats an instant as `HH:MM` in `tz`; empty when absent.
pub fn format_clock_time(instant: Option<DateTime<Utc>>, tz: Tz) -> String {
    match instant {
        Some(at) => to_local(at, tz).format("%H:%M").to_string(),
        None => String::new(),
    }
}
