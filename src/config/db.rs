//! # Database Configuration and Pool Factory
//!
//! Connection settings for the MySQL-backed stores and a helper that builds
//! the shared connection pool.
//!
//! Reads `DATABASE_URL` and the optional `DATABASE_MAX_CONN`.
//!
//! # Examples
//! ```rust,no_run
//! use timeclock::config::db::{DbConfig, create_pool};
//!
//! let cfg = DbConfig::from_env();
//! if cfg.is_valid() {
//!     let pool = create_pool(&cfg).expect("failed to create pool");
//!     // hand the pool to MySqlDb::new(...)
//! }
//! ```

use std::sync::Arc;

use anyhow::Context;
use mysql::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts};

use crate::config::env::{process_env, read_string_from, read_u32_opt_from};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbConfig {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

impl DbConfig {
    pub fn from_env() -> Self {
        Self::from_env_with(process_env)
    }

    pub fn from_env_with<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            url: read_string_from(&get, "DATABASE_URL"),
            max_connections: read_u32_opt_from(&get, "DATABASE_MAX_CONN"),
        }
    }

    /// Returns `true` if `DATABASE_URL` is present.
    pub fn is_valid(&self) -> bool {
        self.url.is_some()
    }
}

/// Shared database pool type alias (`Arc<mysql::Pool>`).
pub type DbPool = Arc<Pool>;

/// Creates a new [`DbPool`] using the given configuration.
///
/// # Errors
/// Returns an error if `DATABASE_URL` is missing or invalid, if
/// `DATABASE_MAX_CONN` is zero, or if the pool cannot be created.
pub fn create_pool(cfg: &DbConfig) -> anyhow::Result<DbPool> {
    let url = cfg
        .url
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let mut opts = OptsBuilder::from_opts(Opts::from_url(url).context("invalid DATABASE_URL")?);

    if let Some(max) = cfg.max_connections {
        if max == 0 {
            anyhow::bail!("DATABASE_MAX_CONN must be at least 1");
        }
        let constraints = PoolConstraints::new(1, max as usize)
            .ok_or_else(|| anyhow::anyhow!("invalid DATABASE_MAX_CONN: {max}"))?;
        opts = opts.pool_opts(PoolOpts::default().with_constraints(constraints));
    }

    let pool = Pool::new(opts).context("failed to create MySQL pool")?;
    Ok(Arc::new(pool))
}
