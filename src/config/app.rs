//! # Application Configuration Loader
//!
//! Unified loader for database, authentication and accounting settings.
//!
//! Automatically loads `.env` files for non-production environments.
//! It checks for a custom `DOTENV_FILE` path first, then falls back to
//! `.env.{APP_ENV}` or `.env`.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `APP_ENV` | Current environment (`development`, `production`, etc.) | `"development"` |
//! | `DOTENV_FILE` | Optional path to a custom dotenv file | *none* |
//! | `DATABASE_URL` | MySQL connection URL | *none* |
//! | `DATABASE_MAX_CONN` | Maximum pool size | *none* |
//! | `JWT_SECRET` | Token signing secret | *none* |
//! | `JWT_TTL_HOURS` | Token lifetime | `48` |
//! | `TIMECLOCK_TIME_ZONE` | Zone dates are resolved in | `Europe/Berlin` |
//! | `TIMECLOCK_BREAK_MINUTES` | Fixed daily break | `60` |
//! | `TIMECLOCK_REQUIRED_MINUTES` | Weekday schedule, Monday first | `480,480,480,480,420,0,0` |
//!
//! # Example
//! ```rust,no_run
//! use timeclock::config::app::AppConfig;
//!
//! let cfg = AppConfig::from_env().expect("invalid configuration");
//! println!("dates resolve in {}", cfg.accounting.time_zone);
//! ```

use std::env;

use tracing::debug;

use crate::config::{accounting::AccountingConfig, auth::AuthConfig, db::DbConfig};

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub accounting: AccountingConfig,
}

impl AppConfig {
    /// Loads application configuration from environment variables.
    ///
    /// ## Behavior
    /// - Reads `APP_ENV` (defaults to `"development"`).
    /// - Loads `.env` or `.env.{APP_ENV}` for non-production environments.
    /// - Fails only on present-but-invalid accounting settings.
    pub fn from_env() -> anyhow::Result<Self> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        if app_env != "production" {
            if let Ok(path) = env::var("DOTENV_FILE") {
                if let Err(e) = dotenvy::from_filename(&path) {
                    debug!(path = %path, error = %e, "dotenv file not loaded");
                }
            } else {
                let candidate = format!(".env.{}", app_env);
                dotenvy::from_filename(&candidate)
                    .or_else(|_| dotenvy::dotenv())
                    .ok();
            }
        }

        Ok(AppConfig {
            db: DbConfig::from_env(),
            auth: AuthConfig::from_env(),
            accounting: AccountingConfig::from_env()?,
        })
    }
}
