//! # Accounting Configuration
//!
//! The values that used to be embedded constants of the time accounting:
//! the time zone dates are resolved in, the fixed break and the weekday
//! schedule.
//!
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `TIMECLOCK_TIME_ZONE` | IANA zone for date resolution | `Europe/Berlin` |
//! | `TIMECLOCK_BREAK_MINUTES` | Break deducted from each worked day | `60` |
//! | `TIMECLOCK_REQUIRED_MINUTES` | Seven values, Monday first | `480,480,480,480,420,0,0` |

use anyhow::Context;
use chrono_tz::Tz;

use crate::attendance::policy::{BREAK_MINUTES, RequiredMinutesPolicy};
use crate::config::env::{process_env, read_string_from};
use crate::time::local::{DEFAULT_TIME_ZONE, parse_time_zone};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountingConfig {
    pub time_zone: Tz,
    pub break_minutes: i64,
    pub required: RequiredMinutesPolicy,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE,
            break_minutes: BREAK_MINUTES,
            required: RequiredMinutesPolicy::default(),
        }
    }
}

impl AccountingConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_with(process_env)
    }

    /// Loads the configuration from an arbitrary provider.
    ///
    /// Missing variables fall back to the defaults. Present but invalid
    /// values are configuration errors and are reported, not ignored.
    pub fn from_env_with<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let time_zone = match read_string_from(&get, "TIMECLOCK_TIME_ZONE") {
            Some(name) => parse_time_zone(&name).context("TIMECLOCK_TIME_ZONE")?,
            None => defaults.time_zone,
        };

        let break_minutes = match read_string_from(&get, "TIMECLOCK_BREAK_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("TIMECLOCK_BREAK_MINUTES: `{raw}` is not a minute count"))?,
            None => defaults.break_minutes,
        };
        if break_minutes < 0 {
            anyhow::bail!("TIMECLOCK_BREAK_MINUTES must not be negative: {break_minutes}");
        }

        let required = match read_string_from(&get, "TIMECLOCK_REQUIRED_MINUTES") {
            Some(table) => table
                .parse::<RequiredMinutesPolicy>()
                .context("TIMECLOCK_REQUIRED_MINUTES")?,
            None => defaults.required,
        };

        Ok(Self {
            time_zone,
            break_minutes,
            required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn provider(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AccountingConfig::from_env_with(|_| None).unwrap();

        assert_eq!(cfg, AccountingConfig::default());
        assert_eq!(cfg.time_zone.name(), "Europe/Berlin");
        assert_eq!(cfg.break_minutes, 60);
    }

    #[test]
    fn reads_all_overrides() {
        let cfg = AccountingConfig::from_env_with(provider(&[
            ("TIMECLOCK_TIME_ZONE", "Europe/Vienna"),
            ("TIMECLOCK_BREAK_MINUTES", "30"),
            ("TIMECLOCK_REQUIRED_MINUTES", "450,450,450,450,450,0,0"),
        ]))
        .unwrap();

        assert_eq!(cfg.time_zone.name(), "Europe/Vienna");
        assert_eq!(cfg.break_minutes, 30);
        assert_eq!(cfg.required.weekly_total(), 2_250);
    }

    #[test]
    fn invalid_zone_is_an_error() {
        let err = AccountingConfig::from_env_with(provider(&[("TIMECLOCK_TIME_ZONE", "Mars/Base")]))
            .unwrap_err();
        assert!(format!("{err:#}").contains("Mars/Base"));
    }

    #[test]
    fn negative_break_is_an_error() {
        let err = AccountingConfig::from_env_with(provider(&[("TIMECLOCK_BREAK_MINUTES", "-5")]))
            .unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn invalid_break_is_an_error() {
        let err =
            AccountingConfig::from_env_with(provider(&[("TIMECLOCK_BREAK_MINUTES", "sixty")]))
                .unwrap_err();
        assert!(err.to_string().contains("TIMECLOCK_BREAK_MINUTES"));
        assert!(err.to_string().contains("sixty"));
    }

    #[test]
    fn invalid_table_is_an_error() {
        let err =
            AccountingConfig::from_env_with(provider(&[("TIMECLOCK_REQUIRED_MINUTES", "480")]))
                .unwrap_err();
        assert!(err.to_string().contains("TIMECLOCK_REQUIRED_MINUTES"));
    }

    #[test]
    fn from_env_reads_process_environment() {
        temp_env::with_vars(
            vec![
                ("TIMECLOCK_TIME_ZONE", Some("UTC")),
                ("TIMECLOCK_BREAK_MINUTES", None::<&str>),
                ("TIMECLOCK_REQUIRED_MINUTES", None::<&str>),
            ],
            || {
                let cfg = AccountingConfig::from_env().unwrap();
                assert_eq!(cfg.time_zone, Tz::UTC);
                assert_eq!(cfg.break_minutes, 60);
            },
        );
    }
}
