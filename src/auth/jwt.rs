//! # Authentication tokens (JWT)
//!
//! Pure JWT creation and validation. The secret, the issue time and the
//! lifetime are supplied by the caller; nothing here reads the environment.
//!
//! ## Provided functions
//! - [`create_jwt`]: sign a token for a user
//! - [`decode_jwt`]: validate a token and return its claims
//! - [`authenticate`]: turn an optional bearer token into a [`CurrentUser`]

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::identity::UserId;
use crate::auth::principal::CurrentUser;
use crate::error::{AttendanceError, AttendanceResult};

/// JWT claims stored inside the token payload.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject, the user id.
    pub sub: String,
    /// Issued-at, seconds since the UNIX epoch.
    pub iat: i64,
    /// Expiration, seconds since the UNIX epoch.
    pub exp: i64,
}

/// Creates a signed token for `user`, valid for `ttl` from `issued_at`.
///
/// ## Example
/// ```
/// use chrono::{Duration, Utc};
/// use timeclock::auth::identity::UserId;
/// use timeclock::auth::jwt::{create_jwt, decode_jwt};
///
/// let user = UserId::random();
/// let token = create_jwt(&user, "test-secret", Utc::now(), Duration::hours(1)).unwrap();
/// assert_eq!(decode_jwt(&token, "test-secret").unwrap().sub, user.to_string());
/// ```
pub fn create_jwt(
    user: &UserId,
    secret: &str,
    issued_at: DateTime<Utc>,
    ttl: Duration,
) -> anyhow::Result<String> {
    let expires_at = issued_at
        .checked_add_signed(ttl)
        .ok_or_else(|| anyhow::anyhow!("token expiration out of range"))?;

    let claims = Claims {
        sub: user.to_string(),
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validates signature and expiry and returns the claims.
pub fn decode_jwt(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(decoded.claims)
}

/// Resolves the caller from an optional bearer token.
///
/// Any failure (no secret configured, no token, bad signature, expired
/// token) is reported as [`AttendanceError::Unauthenticated`]; the reason
/// is only logged.
pub fn authenticate(token: Option<&str>, secret: Option<&str>) -> AttendanceResult<CurrentUser> {
    let (Some(token), Some(secret)) = (token, secret) else {
        return Err(AttendanceError::Unauthenticated);
    };

    match decode_jwt(token.trim(), secret) {
        Ok(claims) => Ok(CurrentUser::new(claims.sub)),
        Err(e) => {
            debug!(error = %e, "token rejected");
            Err(AttendanceError::Unauthenticated)
        }
    }
}
