//! User identifiers and the "must be signed in" check shared by all services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::principal::CurrentUser;
use crate::error::{AttendanceError, AttendanceResult};

/// Identifier of a user account (a UUID issued by the identity provider).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// A fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Resolves the caller of an operation.
///
/// Fails with [`AttendanceError::Unauthenticated`] when there is no
/// principal or its subject is not a user id.
pub fn require_user(user: Option<&CurrentUser>) -> AttendanceResult<UserId> {
    user.ok_or(AttendanceError::Unauthenticated)?.user_id()
}
