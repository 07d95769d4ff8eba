//! Database models.

use diesel::prelude::*;

use crate::schema::{device_registrations, guardians, students, teachers};

/// Teacher record.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = teachers)]
pub struct TeacherRow {
    pub id: i32,
    pub name: String,
}

/// New teacher for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teachers)]
pub struct NewTeacherRow<'a> {
    pub name: &'a str,
}

/// Student record.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = students)]
pub struct StudentRow {
    pub id: i32,
    pub lrn: String,
    pub name: String,
    pub section: Option<String>,
    pub teacher_id: Option<i32>,
}

/// New student for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudentRow<'a> {
    pub lrn: &'a str,
    pub name: &'a str,
    pub section: Option<&'a str>,
    pub teacher_id: Option<i32>,
}

/// Guardian record.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = guardians)]
pub struct GuardianRow {
    pub id: i32,
    pub name: String,
    pub student_id: Option<i32>,
    pub student_name: String,
    pub user_id: Option<i32>,
    pub relationship: Option<String>,
}

/// New guardian for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guardians)]
pub struct NewGuardianRow<'a> {
    pub name: &'a str,
    pub student_id: Option<i32>,
    pub student_name: &'a str,
    pub user_id: Option<i32>,
    pub relationship: Option<&'a str>,
}

/// Device registration record.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = device_registrations)]
pub struct DeviceRow {
    pub id: i32,
    pub token: String,
    pub owner_id: Option<i32>,
    pub platform: Option<String>,
    pub label: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// New device registration for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = device_registrations)]
pub struct NewDeviceRow<'a> {
    pub token: &'a str,
    pub owner_id: Option<i32>,
    pub platform: Option<&'a str>,
    pub label: Option<&'a str>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<TeacherRow> for homeroom_core::Teacher {
    fn from(row: TeacherRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<StudentRow> for homeroom_core::Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            lrn: row.lrn,
            name: row.name,
            section: row.section,
            teacher_id: row.teacher_id,
        }
    }
}

impl From<GuardianRow> for homeroom_core::Guardian {
    fn from(row: GuardianRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            student_id: row.student_id,
            student_name: row.student_name,
            user_id: row.user_id,
            relationship: row.relationship,
        }
    }
}

impl From<DeviceRow> for homeroom_core::DeviceRegistration {
    fn from(row: DeviceRow) -> Self {
        Self {
            id: row.id,
            token: row.token,
            owner_id: row.owner_id,
            platform: row.platform,
            label: row.label,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
