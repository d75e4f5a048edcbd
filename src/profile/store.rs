//! # Profile Store (port)

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::auth::identity::UserId;
use crate::error::{AttendanceError, AttendanceResult};
use crate::profile::model::{Profile, Role};

pub trait ProfileStore: Send + Sync {
    fn find(&self, user: UserId) -> AttendanceResult<Option<Profile>>;

    /// All profiles, newest first.
    fn list(&self) -> AttendanceResult<Vec<Profile>>;

    /// Inserts `profile` unless one exists for its user. Returns whether a
    /// row was created.
    fn create(&self, profile: &Profile) -> AttendanceResult<bool>;

    /// Returns `false` when no profile exists for `user`.
    fn update_role(&self, user: UserId, role: Role) -> AttendanceResult<bool>;
}

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let map = profiles.into_iter().map(|p| (p.user_id, p)).collect();
        Self {
            profiles: Mutex::new(map),
        }
    }

    fn lock(&self) -> AttendanceResult<MutexGuard<'_, HashMap<UserId, Profile>>> {
        self.profiles
            .lock()
            .map_err(|_| AttendanceError::Store(anyhow::anyhow!("profile store lock poisoned")))
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn find(&self, user: UserId) -> AttendanceResult<Option<Profile>> {
        Ok(self.lock()?.get(&user).cloned())
    }

    fn list(&self) -> AttendanceResult<Vec<Profile>> {
        let mut out: Vec<Profile> = self.lock()?.values().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.user_id.cmp(&b.user_id)));
        Ok(out)
    }

    fn create(&self, profile: &Profile) -> AttendanceResult<bool> {
        let mut profiles = self.lock()?;
        if profiles.contains_key(&profile.user_id) {
            return Ok(false);
        }
        profiles.insert(profile.user_id, profile.clone());
        Ok(true)
    }

    fn update_role(&self, user: UserId, role: Role) -> AttendanceResult<bool> {
        match self.lock()?.get_mut(&user) {
            Some(p) => {
                p.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
