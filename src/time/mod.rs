//! Calendar and time utilities: the clock port, zone-aware date resolution,
//! week windows and duration formatting.

pub mod calendar;
pub mod clock;
pub mod format;
pub mod local;
pub mod system_clock;

pub use calendar::{DateRange, WeekWindow, parse_date, week_window};
pub use clock::{Clock, FixedClock};
pub use format::{format_clock_time, format_signed_duration};
pub use local::{DEFAULT_TIME_ZONE, canonical_date, parse_time_zone};
pub use system_clock::SystemClock;
