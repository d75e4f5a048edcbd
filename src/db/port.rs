//! # Database Port (Synchronous)
//!
//! Abstract database interface (`Db`) used by the MySQL-backed stores.
//!
//! - [`Param`]: SQL parameters (borrowed strings, dates, timestamps).
//! - [`Value`] / [`Row`]: owned column values for row mapping.
//! - [`Db`]: the minimal operations a store needs.
//!
//! Timestamps cross this boundary as UTC [`NaiveDateTime`]s; attaching and
//! stripping the zone is the store's job.
//!
//! # Example
//! ```rust,ignore
//! use timeclock::db::port::{Db, Param};
//! use timeclock::params;
//!
//! let ps = params!["a3c1…", date, Some(clock_in)];
//! let n = db.exec("UPDATE workdays SET clock_in = ? WHERE ...", &ps)?;
//! ```
use std::collections::HashMap;

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// SQL parameter types passed to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Param<'a> {
    I64(i64),
    Str(&'a str),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

/// Owned database value used for row mapping.
///
/// `DATE` columns arrive as [`Value::DateTime`] at midnight.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I64(i64),
    U64(u64),
    Str(String),
    DateTime(NaiveDateTime),
    Bin(Vec<u8>),
    Null,
}

/// A single database row (column name → value).
#[derive(Debug, Clone, Default)]
pub struct Row {
    cols: HashMap<String, Value>,
}

impl From<i64> for Param<'_> {
    fn from(x: i64) -> Self {
        Param::I64(x)
    }
}

impl<'a> From<&'a str> for Param<'a> {
    fn from(x: &'a str) -> Self {
        Param::Str(x)
    }
}

impl<'a> From<Option<&'a str>> for Param<'a> {
    fn from(x: Option<&'a str>) -> Self {
        x.map_or(Param::Null, Param::Str)
    }
}

impl From<NaiveDate> for Param<'_> {
    fn from(x: NaiveDate) -> Self {
        Param::Date(x)
    }
}

impl From<NaiveDateTime> for Param<'_> {
    fn from(x: NaiveDateTime) -> Self {
        Param::DateTime(x)
    }
}

impl From<Option<NaiveDateTime>> for Param<'_> {
    fn from(x: Option<NaiveDateTime>) -> Self {
        x.map_or(Param::Null, Param::DateTime)
    }
}

/// Builds a `Vec<Param>` from heterogeneous values.
///
/// ```rust
/// use timeclock::db::port::Param;
/// use timeclock::params;
///
/// let note: Option<&str> = None;
/// let ps = params![7i64, "abc", note];
/// assert_eq!(ps, vec![Param::I64(7), Param::Str("abc"), Param::Null]);
/// ```
#[macro_export]
macro_rules! params {
    ($($x:expr),* $(,)?) => {{
        let mut v = Vec::<$crate::db::port::Param>::new();
        $( v.push($crate::db::port::Param::from($x)); )*
        v
    }};
}

impl Row {
    /// Inserts a column (used by adapters and fakes).
    pub fn insert(&mut self, key: impl Into<String>, val: Value) {
        self.cols.insert(key.into(), val);
    }

    pub fn get_i64(&self, key: &str) -> Result<i64> {
        match self.cols.get(key) {
            Some(Value::I64(v)) => Ok(*v),
            Some(Value::U64(v)) if *v <= i64::MAX as u64 => Ok(*v as i64),
            _ => bail!("column `{key}` is not I64"),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(s.clone()),
            _ => bail!("column `{key}` is not String"),
        }
    }

    /// Returns an optional `String` (`NULL` → `None`).
    pub fn get_string_opt(&self, key: &str) -> Result<Option<String>> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(Value::Null) => Ok(None),
            Some(_) => bail!("column `{key}` is not String/NULL"),
            None => bail!("column `{key}` not found"),
        }
    }

    pub fn get_datetime(&self, key: &str) -> Result<NaiveDateTime> {
        match self.cols.get(key) {
            Some(Value::DateTime(dt)) => Ok(*dt),
            _ => bail!("column `{key}` is not DateTime"),
        }
    }

    /// Returns an optional [`NaiveDateTime`] (`NULL` → `None`).
    pub fn get_datetime_opt(&self, key: &str) -> Result<Option<NaiveDateTime>> {
        match self.cols.get(key) {
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(Value::Null) => Ok(None),
            Some(_) => bail!("column `{key}` is not DateTime/NULL"),
            None => bail!("column `{key}` not found"),
        }
    }

    /// Returns the date part of a `DATE`/`DATETIME` column.
    pub fn get_date(&self, key: &str) -> Result<NaiveDate> {
        self.get_datetime(key)
            .map(|dt| dt.date())
            .map_err(|_| anyhow::anyhow!("column `{key}` is not Date"))
    }

    /// Returns a [`Uuid`] stored as `CHAR(36)` text or `BINARY(16)`.
    pub fn get_uuid(&self, key: &str) -> Result<Uuid> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Uuid::parse_str(s)
                .map_err(|_| anyhow::anyhow!("column `{key}` is not a valid UUID")),
            Some(Value::Bin(b)) => Uuid::from_slice(b)
                .map_err(|_| anyhow::anyhow!("column `{key}` is not valid UUID bytes")),
            _ => bail!("column `{key}` is not UUID"),
        }
    }
}

/// Database abstraction (synchronous).
pub trait Db: Send + Sync + 'static {
    fn fetch_one(&self, sql: &str, params: &[Param]) -> Result<Option<Row>>;

    fn fetch_all(&self, sql: &str, params: &[Param]) -> Result<Vec<Row>>;

    /// Execute a write operation (`INSERT`, `UPDATE`, `DELETE`, DDL).
    ///
    /// Returns the affected row count.
    fn exec(&self, sql: &str, params: &[Param]) -> Result<u64>;
}
