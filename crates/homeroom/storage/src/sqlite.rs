//! SQLite storage implementation.

use std::collections::HashSet;

use color_eyre::eyre::WrapErr as _;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;

use crate::models::*;
use crate::schema::*;
use crate::traits::*;
use homeroom_core::{
    DeviceRegistration, DeviceRegistrationRequest, Guardian, NewGuardian, NewStudent,
    RecipientCriterion, Student, StudentRef, Teacher, names_match,
};

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-based storage.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SQLite storage from a database URL.
    pub fn new(database_url: &str) -> color_eyre::eyre::Result<Self> {
        Self::with_pool_size(database_url, 10)
    }

    /// Private in-memory database on a single pooled connection.
    pub fn in_memory() -> color_eyre::eyre::Result<Self> {
        Self::with_pool_size(":memory:", 1)
    }

    fn with_pool_size(database_url: &str, max_size: u32) -> color_eyre::eyre::Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .wrap_err("failed to create connection pool")?;

        Ok(Self { pool })
    }

    /// Run migrations.
    pub fn run_migrations(&self) -> color_eyre::eyre::Result<()> {
        use diesel_migrations::MigrationHarness as _;

        let mut conn = self
            .pool
            .get()
            .wrap_err("failed to get connection for migrations")?;

        conn.run_pending_migrations(crate::MIGRATIONS)
            .map_err(|e| color_eyre::eyre::eyre!("migration failed: {}", e))?;

        Ok(())
    }

    fn conn(&self) -> color_eyre::eyre::Result<Conn> {
        self.pool
            .get()
            .wrap_err("failed to get database connection")
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

/// Guardians linked to any of the given students.
fn guardians_of(conn: &mut Conn, student_ids: &[i32]) -> color_eyre::eyre::Result<Vec<GuardianRow>> {
    if student_ids.is_empty() {
        return Ok(Vec::new());
    }

    guardians::table
        .filter(guardians::student_id.eq_any(student_ids.to_vec()))
        .order(guardians::id.asc())
        .select(GuardianRow::as_select())
        .load(conn)
        .wrap_err("failed to load guardians by student")
}

/// Guardians whose linked student or recorded student name matches `name`.
fn guardians_by_name(conn: &mut Conn, name: &str) -> color_eyre::eyre::Result<Vec<GuardianRow>> {
    let student_ids: Vec<i32> = students::table
        .select((students::id, students::name))
        .load::<(i32, String)>(conn)
        .wrap_err("failed to load student names")?
        .into_iter()
        .filter(|(_, stored)| names_match(stored, name))
        .map(|(id, _)| id)
        .collect();

    let mut rows = guardians_of(conn, &student_ids)?;

    let by_recorded_name = guardians::table
        .filter(guardians::student_name.ne(""))
        .order(guardians::id.asc())
        .select(GuardianRow::as_select())
        .load(conn)
        .wrap_err("failed to load guardian student names")?
        .into_iter()
        .filter(|row| names_match(&row.student_name, name));

    rows.extend(by_recorded_name);

    Ok(rows)
}

impl DirectoryStore for SqliteStorage {
    fn guardians_matching(
        &self,
        criterion: &RecipientCriterion,
    ) -> color_eyre::eyre::Result<Vec<Guardian>> {
        let mut conn = self.conn()?;

        let mut rows = match criterion {
            RecipientCriterion::ByStudentId(StudentRef::Lrn(lrn)) => {
                let ids: Vec<i32> = students::table
                    .filter(students::lrn.eq(lrn.as_str()))
                    .select(students::id)
                    .load(&mut conn)
                    .wrap_err("failed to look up student by LRN")?;
                guardians_of(&mut conn, &ids)?
            }
            RecipientCriterion::ByStudentId(StudentRef::Key(id)) => {
                guardians_of(&mut conn, &[*id])?
            }
            RecipientCriterion::ByNameFuzzy(name) => guardians_by_name(&mut conn, name)?,
            RecipientCriterion::BySection {
                section,
                teacher_id,
            } => {
                let ids: Vec<i32> = students::table
                    .filter(students::section.eq(section.as_str()))
                    .filter(students::teacher_id.eq(*teacher_id))
                    .select(students::id)
                    .load(&mut conn)
                    .wrap_err("failed to look up section students")?;
                guardians_of(&mut conn, &ids)?
            }
            RecipientCriterion::ByTeacher(teacher_id) => {
                let ids: Vec<i32> = students::table
                    .filter(students::teacher_id.eq(*teacher_id))
                    .select(students::id)
                    .load(&mut conn)
                    .wrap_err("failed to look up teacher students")?;
                guardians_of(&mut conn, &ids)?
            }
        };

        let mut seen = HashSet::new();
        rows.retain(|row| seen.insert(row.id));

        tracing::debug!(
            criterion = criterion.kind(),
            guardians = rows.len(),
            "resolved guardians"
        );

        Ok(rows.into_iter().map(Guardian::from).collect())
    }

    fn add_teacher(&self, name: &str) -> color_eyre::eyre::Result<Teacher> {
        let mut conn = self.conn()?;

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::insert_into(teachers::table)
                    .values(&NewTeacherRow { name })
                    .execute(conn)?;

                teachers::table
                    .order(teachers::id.desc())
                    .select(TeacherRow::as_select())
                    .first(conn)
            })
            .wrap_err("failed to insert teacher")?;

        Ok(row.into())
    }

    fn add_student(&self, student: &NewStudent) -> color_eyre::eyre::Result<Student> {
        let mut conn = self.conn()?;

        let new_student = NewStudentRow {
            lrn: &student.lrn,
            name: &student.name,
            section: student.section.as_deref(),
            teacher_id: student.teacher_id,
        };

        diesel::insert_into(students::table)
            .values(&new_student)
            .execute(&mut conn)
            .wrap_err_with(|| format!("failed to insert student {}", student.lrn))?;

        let row: StudentRow = students::table
            .filter(students::lrn.eq(&student.lrn))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .wrap_err("failed to reload student")?;

        Ok(row.into())
    }

    fn add_guardian(&self, guardian: &NewGuardian) -> color_eyre::eyre::Result<Guardian> {
        let mut conn = self.conn()?;

        let new_guardian = NewGuardianRow {
            name: &guardian.name,
            student_id: guardian.student_id,
            student_name: &guardian.student_name,
            user_id: guardian.user_id,
            relationship: guardian.relationship.as_deref(),
        };

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::insert_into(guardians::table)
                    .values(&new_guardian)
                    .execute(conn)?;

                guardians::table
                    .order(guardians::id.desc())
                    .select(GuardianRow::as_select())
                    .first(conn)
            })
            .wrap_err("failed to insert guardian")?;

        Ok(row.into())
    }
}

impl DeviceStore for SqliteStorage {
    fn upsert_device(
        &self,
        request: &DeviceRegistrationRequest,
    ) -> color_eyre::eyre::Result<DeviceRegistration> {
        if request.token.trim().is_empty() {
            color_eyre::eyre::bail!("device token must not be empty");
        }

        let mut conn = self.conn()?;
        let now = chrono::Utc::now().naive_utc();

        let new_device = NewDeviceRow {
            token: &request.token,
            owner_id: request.owner_id,
            platform: request.platform.as_deref(),
            label: request.label.as_deref(),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(device_registrations::table)
            .values(&new_device)
            .on_conflict(device_registrations::token)
            .do_update()
            .set((
                device_registrations::owner_id.eq(request.owner_id),
                device_registrations::platform.eq(request.platform.as_deref()),
                device_registrations::label.eq(request.label.as_deref()),
                device_registrations::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .wrap_err("failed to upsert device registration")?;

        let row: DeviceRow = device_registrations::table
            .filter(device_registrations::token.eq(&request.token))
            .select(DeviceRow::as_select())
            .first(&mut conn)
            .wrap_err("failed to reload device registration")?;

        Ok(row.into())
    }

    fn tokens_for_owners(&self, owner_ids: &[i32]) -> color_eyre::eyre::Result<Vec<String>> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;

        device_registrations::table
            .filter(device_registrations::owner_id.eq_any(owner_ids.to_vec()))
            .order(device_registrations::id.asc())
            .select(device_registrations::token)
            .load(&mut conn)
            .wrap_err("failed to load device tokens")
    }

    fn all_tokens(&self) -> color_eyre::eyre::Result<Vec<String>> {
        let mut conn = self.conn()?;

        device_registrations::table
            .order(device_registrations::id.asc())
            .select(device_registrations::token)
            .load(&mut conn)
            .wrap_err("failed to load device tokens")
    }
}
