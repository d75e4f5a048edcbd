//! Local time utilities based on `chrono` and `chrono-tz`.
//!
//! All functions take the instant explicitly; none of them reads the system
//! clock. Conversions go through the IANA database, so daylight-saving
//! transitions are honoured when a timestamp is mapped onto a calendar date.
//!
//! # Provided Functions
//! - [`parse_time_zone`]: Resolves an IANA name such as `"Europe/Berlin"`.
//! - [`canonical_date`]: Calendar date of an instant as observed in a zone.
//! - [`to_local`]: The instant as a zoned date-time.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{AttendanceError, AttendanceResult};

/// The zone every date is resolved in unless configured otherwise.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Berlin;

/// # parse_time_zone
///
/// Resolves an IANA time zone name.
///
/// ## Errors
/// [`AttendanceError::InvalidTimeZone`] if the name is unknown.
///
/// ## Example
/// ```
/// use timeclock::time::local::parse_time_zone;
///
/// let tz = parse_time_zone("Europe/Berlin").unwrap();
/// assert_eq!(tz.name(), "Europe/Berlin");
/// ```
pub fn parse_time_zone(name: &str) -> AttendanceResult<Tz> {
    Tz::from_str(name.trim()).map_err(|_| AttendanceError::InvalidTimeZone(name.to_string()))
}

/// # canonical_date
///
/// Returns the calendar date of `instant` as observed in `tz`.
///
/// ## Example
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use timeclock::time::local::{canonical_date, DEFAULT_TIME_ZONE};
///
/// let late = Utc.with_ymd_and_hms(2024, 6, 10, 22, 15, 0).unwrap();
/// assert_eq!(
///     canonical_date(late, DEFAULT_TIME_ZONE),
///     NaiveDate::from_ymd_opt(2024, 6, 11).unwrap()
/// );
/// ```
pub fn canonical_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    to_local(instant, tz).date_naive()
}

/// Returns `instant` as a date-time in `tz`.
pub fn to_local(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_known_zone_names() {
        assert_eq!(parse_time_zone("Europe/Berlin").unwrap(), DEFAULT_TIME_ZONE);
        assert_eq!(parse_time_zone(" Asia/Tokyo ").unwrap().name(), "Asia/Tokyo");
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = parse_time_zone("Invalid/Timezone").unwrap_err();
        assert!(matches!(err, AttendanceError::InvalidTimeZone(name) if name == "Invalid/Timezone"));
    }

    #[test]
    fn canonical_date_follows_winter_offset() {
        // Berlin is UTC+1 in winter.
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 23, 30, 0).unwrap();
        assert_eq!(canonical_date(instant, DEFAULT_TIME_ZONE), date(2025, 1, 1));

        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 22, 59, 0).unwrap();
        assert_eq!(canonical_date(instant, DEFAULT_TIME_ZONE), date(2024, 12, 31));
    }

    #[test]
    fn canonical_date_follows_summer_offset() {
        // Berlin is UTC+2 in summer, so 22:30 UTC is already the next day.
        let instant = Utc.with_ymd_and_hms(2024, 7, 1, 22, 30, 0).unwrap();
        assert_eq!(canonical_date(instant, DEFAULT_TIME_ZONE), date(2024, 7, 2));
    }

    #[test]
    fn canonical_date_across_spring_forward() {
        // 2024-03-31 01:00 UTC is the moment Berlin jumps from 02:00 to 03:00.
        let before = Utc.with_ymd_and_hms(2024, 3, 30, 22, 30, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 3, 31, 22, 30, 0).unwrap();

        assert_eq!(canonical_date(before, DEFAULT_TIME_ZONE), date(2024, 3, 30));
        assert_eq!(canonical_date(after, DEFAULT_TIME_ZONE), date(2024, 4, 1));
    }

    #[test]
    fn to_local_applies_offset() {
        let fixed = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let tokyo = parse_time_zone("Asia/Tokyo").unwrap();

        assert_eq!(to_local(fixed, tokyo).hour(), 9);
    }
}
