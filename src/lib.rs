//! # timeclock
//!
//! Attendance tracking core: clock in, clock out and see how the week adds
//! up against the required hours.
//!
//! This crate provides:
//! - Zone-aware calendar utilities (`time`)
//! - The per-day state machine, accounting and summaries (`attendance`)
//! - Admin role management (`profile`)
//! - MySQL persistence behind small ports (`db`), JWT identity (`auth`)
//!   and environment-driven configuration (`config`)
//!
//! ## Example usage
//!
//! ```rust
//! use timeclock::attendance::{AttendanceService, InMemoryDayRecordStore};
//! use timeclock::auth::{CurrentUser, UserId};
//! use timeclock::config::accounting::AccountingConfig;
//! use timeclock::time::{FixedClock, format_signed_duration};
//! use timeclock::chrono::{TimeZone, Utc};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 11, 7, 0, 0).unwrap());
//! let svc = AttendanceService::new(InMemoryDayRecordStore::new(), clock, AccountingConfig::default());
//! let me = CurrentUser::new(UserId::random().to_string());
//!
//! svc.clock_in(Some(&me), None).unwrap();
//! let today = svc.today(Some(&me)).unwrap();
//! assert_eq!(format_signed_duration(today.required_minutes), "8:00");
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use chrono;
pub use chrono_tz;
pub use dotenvy;
pub use jsonwebtoken;
pub use mysql;
pub use serde;
pub use serde_json;
pub use uuid;

// ===============================
// Public modules
// ===============================
pub mod attendance;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod profile;
pub mod time;
