//! The per-day attendance record and its three states.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{AttendanceError, AttendanceResult};

/// Where a day stands. Each variant carries only the timestamps valid for it,
/// so a clock-out without a clock-in cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayState {
    /// Nothing recorded yet.
    Open,
    /// Clocked in, still working.
    Active { clock_in: DateTime<Utc> },
    /// Clocked in and out; `clock_out >= clock_in`.
    Closed {
        clock_in: DateTime<Utc>,
        clock_out: DateTime<Utc>,
    },
}

impl DayState {
    /// Builds a closed state, rejecting a clock-out before the clock-in.
    pub fn closed(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> AttendanceResult<Self> {
        if clock_out < clock_in {
            return Err(AttendanceError::InvalidInterval);
        }
        Ok(DayState::Closed {
            clock_in,
            clock_out,
        })
    }

    /// Rebuilds a state from nullable storage columns.
    pub fn from_parts(
        clock_in: Option<DateTime<Utc>>,
        clock_out: Option<DateTime<Utc>>,
    ) -> AttendanceResult<Self> {
        match (clock_in, clock_out) {
            (None, None) => Ok(DayState::Open),
            (Some(clock_in), None) => Ok(DayState::Active { clock_in }),
            (Some(clock_in), Some(clock_out)) => Self::closed(clock_in, clock_out),
            (None, Some(_)) => Err(AttendanceError::CorruptRecord(
                "clock_out is set but clock_in is not".into(),
            )),
        }
    }

    pub fn clock_in(&self) -> Option<DateTime<Utc>> {
        match *self {
            DayState::Open => None,
            DayState::Active { clock_in } | DayState::Closed { clock_in, .. } => Some(clock_in),
        }
    }

    pub fn clock_out(&self) -> Option<DateTime<Utc>> {
        match *self {
            DayState::Closed { clock_out, .. } => Some(clock_out),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DayState::Active { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DayState::Closed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayState::Open => "open",
            DayState::Active { .. } => "active",
            DayState::Closed { .. } => "closed",
        }
    }
}

/// One row per (user, date). The owning user is the store's key, not part of
/// the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub state: DayState,
    pub note: Option<String>,
}

impl DayRecord {
    pub fn open(date: NaiveDate) -> Self {
        Self {
            date,
            state: DayState::Open,
            note: None,
        }
    }

    pub fn from_parts(
        date: NaiveDate,
        clock_in: Option<DateTime<Utc>>,
        clock_out: Option<DateTime<Utc>>,
        note: Option<String>,
    ) -> AttendanceResult<Self> {
        Ok(Self {
            date,
            state: DayState::from_parts(clock_in, clock_out)?,
            note,
        })
    }

    pub fn clock_in(&self) -> Option<DateTime<Utc>> {
        self.state.clock_in()
    }

    pub fn clock_out(&self) -> Option<DateTime<Utc>> {
        self.state.clock_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 11, h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 11).unwrap()
    }

    #[test]
    fn from_parts_maps_each_state() {
        assert_eq!(DayState::from_parts(None, None).unwrap(), DayState::Open);
        assert_eq!(
            DayState::from_parts(Some(at(7, 0)), None).unwrap(),
            DayState::Active { clock_in: at(7, 0) }
        );
        assert_eq!(
            DayState::from_parts(Some(at(7, 0)), Some(at(15, 0))).unwrap(),
            DayState::Closed {
                clock_in: at(7, 0),
                clock_out: at(15, 0)
            }
        );
    }

    #[test]
    fn from_parts_rejects_invalid_combinations() {
        assert!(matches!(
            DayState::from_parts(None, Some(at(15, 0))),
            Err(AttendanceError::CorruptRecord(_))
        ));
        assert!(matches!(
            DayState::from_parts(Some(at(15, 0)), Some(at(7, 0))),
            Err(AttendanceError::InvalidInterval)
        ));
    }

    #[test]
    fn zero_length_interval_is_allowed() {
        let s = DayState::closed(at(9, 0), at(9, 0)).unwrap();
        assert!(s.is_closed());
    }

    #[test]
    fn accessors_follow_state() {
        let r = DayRecord::from_parts(date(), Some(at(7, 0)), None, Some("remote".into())).unwrap();

        assert_eq!(r.clock_in(), Some(at(7, 0)));
        assert_eq!(r.clock_out(), None);
        assert!(r.state.is_active());
        assert_eq!(r.state.label(), "active");
        assert_eq!(DayRecord::open(date()).state.label(), "open");
    }

    #[test]
    fn serializes_flat_with_status_tag() {
        let r = DayRecord::from_parts(date(), Some(at(7, 0)), Some(at(15, 30)), None).unwrap();
        let json = serde_json::to_value(&r).unwrap();

        assert_eq!(json["date"], "2024-06-11");
        assert_eq!(json["status"], "closed");
        assert_eq!(json["clock_in"], "2024-06-11T07:00:00Z");
        assert_eq!(json["clock_out"], "2024-06-11T15:30:00Z");
        assert!(json["note"].is_null());
    }
}
