//! # MySQL Database Adapter
//!
//! An implementation of the [`Db`] port using the [`mysql`] driver crate.
//!
//! ## Responsibilities
//! - Convert generic [`Param`] values into [`mysql::Value`]
//! - Convert [`mysql::Row`] into a generic [`Row`]
//! - Implement `fetch_one`, `fetch_all` and `exec` on top of `mysql::Pool`
//!
//! ## Logging
//! Failures are logged with `tracing::warn!`. `SQL_DEBUG=1` additionally
//! logs every statement and its parameters at debug level.
//!
//! ## Testing Policy
//! Unit tests cover the pure conversion functions only. Query execution
//! needs a live server and is exercised by the store tests through fakes.

use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use mysql::{Error as MyError, Params, Pool, Value as My, prelude::*};
use tracing::{debug, warn};

use crate::config::env::read_flag;
use crate::db::port::{Db, Param, Row as GRow, Value};

static SQL_DEBUG: OnceLock<bool> = OnceLock::new();

#[inline]
fn sql_debug() -> bool {
    *SQL_DEBUG.get_or_init(|| read_flag("SQL_DEBUG", false))
}

fn trace_statement(op: &str, sql: &str, params_in: &[Param]) {
    if sql_debug() {
        debug!(op, sql, params = ?params_in, "executing statement");
    }
}

fn mysql_err_summary(e: &MyError) -> String {
    match e {
        MyError::MySqlError(me) => format!(
            "code={}, state={}, message={}",
            me.code, me.state, me.message
        ),
        MyError::DriverError(de) => format!("driver={de:?}"),
        MyError::UrlError(ue) => format!("url={ue:?}"),
        MyError::IoError(ioe) => format!("io={ioe}"),
        MyError::CodecError(ce) => format!("codec={ce:?}"),
        MyError::FromValueError(fve) => format!("from_value={fve:?}"),
        MyError::FromRowError(fre) => format!("from_row={fre:?}"),
        #[allow(unreachable_patterns)]
        other => format!("other={other}"),
    }
}

/// MySQL implementation of the [`Db`] port.
#[derive(Clone)]
pub struct MySqlDb {
    pool: Arc<Pool>,
}

impl MySqlDb {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Converts a single [`Param`] into a [`mysql::Value`].
    ///
    /// - `Str` → `Bytes`
    /// - `Date` → `Value::Date` at midnight
    /// - `DateTime` → `Value::Date` with microseconds
    fn to_mysql_value(p: &Param) -> My {
        match p {
            Param::I64(x) => My::Int(*x),
            Param::Str(s) => My::Bytes(s.as_bytes().to_vec()),
            Param::Date(d) => My::Date(d.year() as u16, d.month() as u8, d.day() as u8, 0, 0, 0, 0),
            Param::DateTime(dt) => {
                let d = dt.date();
                let t = dt.time();
                My::Date(
                    d.year() as u16,
                    d.month() as u8,
                    d.day() as u8,
                    t.hour() as u8,
                    t.minute() as u8,
                    t.second() as u8,
                    t.nanosecond() / 1_000,
                )
            }
            Param::Null => My::NULL,
        }
    }

    fn to_mysql_params(params_in: &[Param]) -> Params {
        Params::Positional(params_in.iter().map(Self::to_mysql_value).collect())
    }

    /// Converts a driver value into a generic [`Value`].
    ///
    /// Non-UTF-8 byte columns stay binary; floating point values are
    /// stringified since no store reads them.
    fn value_from_mysql(v: My) -> Value {
        match v {
            My::NULL => Value::Null,
            My::Int(i) => Value::I64(i),
            My::UInt(u) => Value::U64(u),
            My::Float(f) => Value::Str(f.to_string()),
            My::Double(f) => Value::Str(f.to_string()),
            My::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => Value::Str(s),
                Err(e) => Value::Bin(e.into_bytes()),
            },
            My::Date(y, m, d, hh, mm, ss, micro) => {
                let date = NaiveDate::from_ymd_opt(y as i32, m as u32, d as u32);
                let time = NaiveTime::from_hms_micro_opt(hh as u32, mm as u32, ss as u32, micro);
                match (date, time) {
                    (Some(date), Some(time)) => Value::DateTime(NaiveDateTime::new(date, time)),
                    // zero dates such as 0000-00-00
                    _ => Value::Null,
                }
            }
            My::Time(neg, days, hh, mm, ss, micro) => {
                let sign = if neg { "-" } else { "" };
                Value::Str(format!("{sign}{days:03} {hh:02}:{mm:02}:{ss:02}.{micro:06}"))
            }
        }
    }

    fn row_from_mysql(mut r: mysql::Row) -> GRow {
        let names: Vec<String> = r
            .columns_ref()
            .iter()
            .map(|c| c.name_str().to_string())
            .collect();

        let mut out = GRow::default();
        for (idx, name) in names.into_iter().enumerate() {
            let v = r
                .take_opt::<My, _>(idx)
                .unwrap_or(Ok(My::NULL))
                .unwrap_or(My::NULL);
            out.insert(name, Self::value_from_mysql(v));
        }
        out
    }

    fn conn(&self) -> Result<mysql::PooledConn> {
        self.pool.get_conn().context("get_conn failed")
    }
}

impl Db for MySqlDb {
    fn fetch_one(&self, sql: &str, params_in: &[Param]) -> Result<Option<GRow>> {
        trace_statement("fetch_one", sql, params_in);
        let mut conn = self.conn()?;

        let res: std::result::Result<Option<mysql::Row>, MyError> =
            conn.exec_first(sql, Self::to_mysql_params(params_in));
        if let Err(ref e) = res {
            warn!(error = %mysql_err_summary(e), "exec_first failed");
        }
        let row = res.context("exec_first failed")?;

        Ok(row.map(Self::row_from_mysql))
    }

    fn fetch_all(&self, sql: &str, params_in: &[Param]) -> Result<Vec<GRow>> {
        trace_statement("fetch_all", sql, params_in);
        let mut conn = self.conn()?;

        let res: std::result::Result<Vec<mysql::Row>, MyError> =
            conn.exec(sql, Self::to_mysql_params(params_in));
        if let Err(ref e) = res {
            warn!(error = %mysql_err_summary(e), "exec (fetch_all) failed");
        }
        let rows = res.context("exec (fetch_all) failed")?;
        if sql_debug() {
            debug!(rows = rows.len(), "fetch_all done");
        }

        Ok(rows.into_iter().map(Self::row_from_mysql).collect())
    }

    fn exec(&self, sql: &str, params_in: &[Param]) -> Result<u64> {
        trace_statement("exec", sql, params_in);
        let mut conn = self.conn()?;

        let res: std::result::Result<(), MyError> =
            conn.exec_drop(sql, Self::to_mysql_params(params_in));
        if let Err(ref e) = res {
            warn!(error = %mysql_err_summary(e), "exec_drop failed");
        }
        res.context("exec_drop failed")?;

        let n = conn.affected_rows();
        if sql_debug() {
            debug!(affected_rows = n, "exec done");
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_mysql_value_maps_primitive_params() {
        assert_eq!(MySqlDb::to_mysql_value(&Param::I64(-7)), My::Int(-7));
        assert_eq!(
            MySqlDb::to_mysql_value(&Param::Str("abc")),
            My::Bytes(b"abc".to_vec())
        );
        assert_eq!(MySqlDb::to_mysql_value(&Param::Null), My::NULL);
    }

    #[test]
    fn to_mysql_value_maps_date_and_datetime() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();
        assert_eq!(
            MySqlDb::to_mysql_value(&Param::Date(date)),
            My::Date(2024, 6, 11, 0, 0, 0, 0)
        );

        let dt = date.and_hms_micro_opt(15, 12, 34, 987_654).unwrap();
        assert_eq!(
            MySqlDb::to_mysql_value(&Param::DateTime(dt)),
            My::Date(2024, 6, 11, 15, 12, 34, 987_654)
        );
    }

    #[test]
    fn to_mysql_params_is_positional_and_ordered() {
        let ps = [Param::Str("x"), Param::I64(2), Param::Null];

        match MySqlDb::to_mysql_params(&ps) {
            Params::Positional(v) => {
                assert_eq!(v, vec![My::Bytes(b"x".to_vec()), My::Int(2), My::NULL]);
            }
            _ => panic!("expected Params::Positional"),
        }
    }

    #[test]
    fn value_from_mysql_keeps_microseconds() {
        let v = MySqlDb::value_from_mysql(My::Date(2024, 6, 11, 7, 0, 5, 250_000));
        let expected = NaiveDate::from_ymd_opt(2024, 6, 11)
            .unwrap()
            .and_hms_micro_opt(7, 0, 5, 250_000)
            .unwrap();
        assert_eq!(v, Value::DateTime(expected));
    }

    #[test]
    fn value_from_mysql_maps_zero_date_to_null() {
        assert_eq!(MySqlDb::value_from_mysql(My::Date(0, 0, 0, 0, 0, 0, 0)), Value::Null);
    }

    #[test]
    fn value_from_mysql_keeps_binary_bytes() {
        let raw = vec![0xff, 0x00, 0xfe];
        assert_eq!(
            MySqlDb::value_from_mysql(My::Bytes(raw.clone())),
            Value::Bin(raw)
        );
        assert_eq!(
            MySqlDb::value_from_mysql(My::Bytes(b"text".to_vec())),
            Value::Str("text".into())
        );
    }
}
