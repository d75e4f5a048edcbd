//! Role management for administrators.

use tracing::info;

use crate::auth::identity::{UserId, require_user};
use crate::auth::principal::CurrentUser;
use crate::error::{AttendanceError, AttendanceResult};
use crate::profile::model::{Profile, Role};
use crate::profile::store::ProfileStore;

pub struct AdminService<P> {
    profiles: P,
}

impl<P: ProfileStore> AdminService<P> {
    pub fn new(profiles: P) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &P {
        &self.profiles
    }

    /// The caller's own profile, if any.
    pub fn me(&self, caller: Option<&CurrentUser>) -> AttendanceResult<Option<Profile>> {
        let user_id = require_user(caller)?;
        self.profiles.find(user_id)
    }

    /// Every profile, newest first.
    pub fn list_profiles(&self, caller: Option<&CurrentUser>) -> AttendanceResult<Vec<Profile>> {
        self.require_admin(caller)?;
        self.profiles.list()
    }

    pub fn set_role(
        &self,
        caller: Option<&CurrentUser>,
        target: UserId,
        role: Role,
    ) -> AttendanceResult<()> {
        let admin = self.require_admin(caller)?;
        if !self.profiles.update_role(target, role)? {
            return Err(AttendanceError::NotFound("Profile"));
        }
        info!(admin = %admin, target = %target, role = %role, "role updated");
        Ok(())
    }

    fn require_admin(&self, caller: Option<&CurrentUser>) -> AttendanceResult<UserId> {
        let user_id = require_user(caller)?;
        match self.profiles.find(user_id)? {
            Some(p) if p.is_admin() => Ok(user_id),
            _ => Err(AttendanceError::Forbidden),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::store::InMemoryProfileStore;
    use chrono::{TimeZone, Utc};

    fn profile(role: Role, day: u32) -> Profile {
        Profile {
            role,
            ..Profile::member(
                UserId::random(),
                Utc.with_ymd_and_hms(2024, 6, day, 8, 0, 0).unwrap(),
            )
        }
    }

    fn caller(p: &Profile) -> CurrentUser {
        CurrentUser::new(p.user_id.to_string())
    }

    #[test]
    fn admin_lists_and_promotes() {
        let admin = profile(Role::Admin, 1);
        let member = profile(Role::Member, 2);
        let svc = AdminService::new(InMemoryProfileStore::with_profiles([
            admin.clone(),
            member.clone(),
        ]));

        let listed = svc.list_profiles(Some(&caller(&admin))).unwrap();
        assert_eq!(listed[0].user_id, member.user_id);

        svc.set_role(Some(&caller(&admin)), member.user_id, Role::Admin)
            .unwrap();
        assert!(svc.me(Some(&caller(&member))).unwrap().unwrap().is_admin());
    }

    #[test]
    fn members_are_forbidden() {
        let admin = profile(Role::Admin, 1);
        let member = profile(Role::Member, 2);
        let svc = AdminService::new(InMemoryProfileStore::with_profiles([
            admin.clone(),
            member.clone(),
        ]));

        assert!(matches!(
            svc.list_profiles(Some(&caller(&member))),
            Err(AttendanceError::Forbidden)
        ));
        assert!(matches!(
            svc.set_role(Some(&caller(&member)), member.user_id, Role::Admin),
            Err(AttendanceError::Forbidden)
        ));
        assert!(!svc.me(Some(&caller(&member))).unwrap().unwrap().is_admin());
    }

    #[test]
    fn caller_without_profile_is_forbidden() {
        let svc = AdminService::new(InMemoryProfileStore::new());
        let stranger = CurrentUser::new(UserId::random().to_string());

        assert!(matches!(
            svc.list_profiles(Some(&stranger)),
            Err(AttendanceError::Forbidden)
        ));
    }

    #[test]
    fn anonymous_caller_is_unauthenticated() {
        let svc = AdminService::new(InMemoryProfileStore::new());

        assert!(matches!(
            svc.list_profiles(None),
            Err(AttendanceError::Unauthenticated)
        ));
        assert!(matches!(svc.me(None), Err(AttendanceError::Unauthenticated)));
    }

    #[test]
    fn unknown_target_is_not_found() {
        let admin = profile(Role::Admin, 1);
        let svc = AdminService::new(InMemoryProfileStore::with_profiles([admin.clone()]));

        let err = svc
            .set_role(Some(&caller(&admin)), UserId::random(), Role::Member)
            .unwrap_err();
        assert!(matches!(err, AttendanceError::NotFound("Profile")));
        assert_eq!(err.to_string(), "Profile not found");
    }
}
