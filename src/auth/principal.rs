/// An authenticated principal, the result of validating a token.
///
/// `CurrentUser` deliberately carries only the token subject. Whether the
/// subject names a valid user, and what that user may do, is decided by the
/// services (see [`crate::auth::identity::require_user`] and
/// [`crate::profile::service::AdminService`]).
///
/// ```rust
/// use timeclock::auth::CurrentUser;
///
/// let user = CurrentUser::new("0b9f5c52-3c55-4ad0-a1f8-3bd0e2c1f0aa");
/// assert!(user.user_id().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    /// The JWT `sub` claim.
    pub subject: String,
}

impl CurrentUser {
    /// Creates a principal from a subject without validating it.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Interprets the subject as a [`UserId`](crate::auth::identity::UserId).
    pub fn user_id(&self) -> crate::error::AttendanceResult<crate::auth::identity::UserId> {
        self.subject
            .parse()
            .map_err(|_| crate::error::AttendanceError::Unauthenticated)
    }
}
