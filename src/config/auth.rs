//! Authentication settings: the JWT signing secret and token lifetime.
//!
//! Reads:
//! - `JWT_SECRET`: HMAC secret; authentication is disabled when missing
//! - `JWT_TTL_HOURS`: token lifetime in hours (default `48`)

use chrono::Duration;
use tracing::warn;

use crate::config::env::{process_env, read_i64_from, read_string_from};

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 48;

fn default_ttl() -> Duration {
    Duration::hours(DEFAULT_TOKEN_TTL_HOURS)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl: default_ttl(),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self::from_env_with(process_env)
    }

    /// Non-positive or out-of-range lifetimes fall back to the default.
    pub fn from_env_with<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let hours = read_i64_from(&get, "JWT_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS);
        let token_ttl = match Duration::try_hours(hours) {
            Some(ttl) if hours > 0 => ttl,
            _ => {
                warn!(hours, "JWT_TTL_HOURS out of range, using default");
                default_ttl()
            }
        };

        Self {
            jwt_secret: read_string_from(&get, "JWT_SECRET"),
            token_ttl,
        }
    }

    /// Returns `true` if a signing secret is configured.
    pub fn is_enabled(&self) -> bool {
        self.jwt_secret.is_some()
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}
