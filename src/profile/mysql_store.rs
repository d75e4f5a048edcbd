//! [`ProfileStore`] on top of the [`Db`] port.

use crate::auth::identity::UserId;
use crate::db::port::{Db, Row};
use crate::error::{AttendanceError, AttendanceResult};
use crate::params;
use crate::profile::model::{Profile, Role};
use crate::profile::store::ProfileStore;

pub const PROFILES_DDL: &str = "CREATE TABLE IF NOT EXISTS profiles (
    user_id    CHAR(36)     NOT NULL PRIMARY KEY,
    email      VARCHAR(320) NULL,
    full_name  VARCHAR(255) NULL,
    role       VARCHAR(16)  NOT NULL DEFAULT 'member',
    created_at DATETIME(6)  NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    CONSTRAINT profiles_role CHECK (role IN ('admin', 'member'))
)";

const COLUMNS: &str = "user_id, email, full_name, role, created_at";

fn select_one() -> String {
    format!("SELECT {COLUMNS} FROM profiles WHERE user_id = ?")
}

fn select_all() -> String {
    format!("SELECT {COLUMNS} FROM profiles ORDER BY created_at DESC, user_id")
}

const INSERT_IF_ABSENT: &str = "INSERT INTO profiles (user_id, email, full_name, role, created_at) \
     VALUES (?, ?, ?, ?, ?) ON DUPLICATE KEY UPDATE user_id = user_id";

const UPDATE_ROLE: &str = "UPDATE profiles SET role = ? WHERE user_id = ?";

fn profile_from_row(row: &Row) -> AttendanceResult<Profile> {
    let role = row.get_string("role")?;
    Ok(Profile {
        user_id: UserId::new(row.get_uuid("user_id")?),
        email: row.get_string_opt("email")?,
        full_name: row.get_string_opt("full_name")?,
        role: role
            .parse()
            .map_err(|_| AttendanceError::CorruptRecord(format!("unknown role `{role}`")))?,
        created_at: row.get_datetime("created_at")?.and_utc(),
    })
}

pub struct MySqlProfileStore<D: Db> {
    db: D,
}

impl<D: Db> MySqlProfileStore<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }

    pub fn ensure_schema(&self) -> AttendanceResult<()> {
        self.db.exec(PROFILES_DDL, &[])?;
        Ok(())
    }
}

impl<D: Db> ProfileStore for MySqlProfileStore<D> {
    fn find(&self, user: UserId) -> AttendanceResult<Option<Profile>> {
        let uid = user.to_string();
        self.db
            .fetch_one(&select_one(), &params![uid.as_str()])?
            .as_ref()
            .map(profile_from_row)
            .transpose()
    }

    fn list(&self) -> AttendanceResult<Vec<Profile>> {
        self.db
            .fetch_all(&select_all(), &[])?
            .iter()
            .map(profile_from_row)
            .collect()
    }

    fn create(&self, profile: &Profile) -> AttendanceResult<bool> {
        let uid = profile.user_id.to_string();
        let affected = self.db.exec(
            INSERT_IF_ABSENT,
            &params![
                uid.as_str(),
                profile.email.as_deref(),
                profile.full_name.as_deref(),
                profile.role.as_str(),
                profile.created_at.naive_utc(),
            ],
        )?;
        Ok(affected == 1)
    }

    fn update_role(&self, user: UserId, role: Role) -> AttendanceResult<bool> {
        let uid = user.to_string();
        let affected = self
            .db
            .exec(UPDATE_ROLE, &params![role.as_str(), uid.as_str()])?;
        if affected > 0 {
            return Ok(true);
        }
        // MySQL counts changed rows only, so an unchanged role reports 0.
        Ok(self.find(user)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::port::{Param, Value};
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeDb {
        sql: Mutex<Vec<String>>,
        rows: Vec<Row>,
        affected: u64,
    }

    impl FakeDb {
        fn statements(&self) -> Vec<String> {
            self.sql.lock().unwrap().clone()
        }
    }

    impl Db for FakeDb {
        fn fetch_one(&self, sql: &str, _: &[Param]) -> Result<Option<Row>> {
            self.sql.lock().unwrap().push(sql.to_string());
            Ok(self.rows.first().cloned())
        }

        fn fetch_all(&self, sql: &str, _: &[Param]) -> Result<Vec<Row>> {
            self.sql.lock().unwrap().push(sql.to_string());
            Ok(self.rows.clone())
        }

        fn exec(&self, sql: &str, _: &[Param]) -> Result<u64> {
            self.sql.lock().unwrap().push(sql.to_string());
            Ok(self.affected)
        }
    }

    fn row(id: UserId, role: &str) -> Row {
        let mut r = Row::default();
        r.insert("user_id", Value::Str(id.to_string()));
        r.insert("email", Value::Str("jo@example.com".into()));
        r.insert("full_name", Value::Null);
        r.insert("role", Value::Str(role.into()));
        r.insert(
            "created_at",
            Value::DateTime(
                Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0)
                    .unwrap()
                    .naive_utc(),
            ),
        );
        r
    }

    #[test]
    fn find_maps_row() {
        let id = UserId::random();
        let store = MySqlProfileStore::new(FakeDb {
            rows: vec![row(id, "admin")],
            ..FakeDb::default()
        });

        let p = store.find(id).unwrap().unwrap();
        assert_eq!(p.user_id, id);
        assert_eq!(p.role, Role::Admin);
        assert_eq!(p.full_name, None);
        assert_eq!(store.db.statements()[0], select_one());
    }

    #[test]
    fn unknown_role_is_corrupt() {
        let store = MySqlProfileStore::new(FakeDb {
            rows: vec![row(UserId::random(), "owner")],
            ..FakeDb::default()
        });

        assert!(matches!(
            store.list(),
            Err(AttendanceError::CorruptRecord(_))
        ));
    }

    #[test]
    fn unchanged_role_still_counts_as_found() {
        let id = UserId::random();
        let store = MySqlProfileStore::new(FakeDb {
            rows: vec![row(id, "member")],
            affected: 0,
            ..FakeDb::default()
        });

        assert!(store.update_role(id, Role::Member).unwrap());
        assert_eq!(store.db.statements(), vec![UPDATE_ROLE.to_string(), select_one()]);
    }

    #[test]
    fn update_role_on_missing_user() {
        let store = MySqlProfileStore::new(FakeDb::default());
        assert!(!store.update_role(UserId::random(), Role::Admin).unwrap());
    }

    #[test]
    fn create_uses_conditional_insert() {
        let store = MySqlProfileStore::new(FakeDb {
            affected: 1,
            ..FakeDb::default()
        });
        let p = Profile::member(UserId::random(), Utc::now());

        assert!(store.create(&p).unwrap());
        assert_eq!(store.db.statements()[0], INSERT_IF_ABSENT);
    }
}
