//! Attendance tracking: per-day records, the clock-in/clock-out state
//! machine, net/required/diff accounting and summaries.

pub mod accounting;
pub mod mysql_store;
pub mod policy;
pub mod record;
pub mod service;
pub mod store;
pub mod summary;

pub use accounting::Accounting;
pub use mysql_store::MySqlDayRecordStore;
pub use policy::{BREAK_MINUTES, RequiredMinutesPolicy};
pub use record::{DayRecord, DayState};
pub use service::{AttendanceService, TodayView};
pub use store::{DayRecordStore, InMemoryDayRecordStore};
pub use summary::{RangeSummary, SummaryRow, summarize_range, summarize_week};
