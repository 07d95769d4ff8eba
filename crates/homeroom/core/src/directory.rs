//! Directory records read by the recipient resolver.

/// Teacher account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Teacher {
    pub id: i32,
    pub name: String,
}

/// Enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Student {
    pub id: i32,
    /// Learner reference number, unique per student.
    pub lrn: String,
    /// Display name, frequently entered as "Last, First".
    pub name: String,
    pub section: Option<String>,
    pub teacher_id: Option<i32>,
}

/// Parent or guardian record, the addressable unit for notifications.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Guardian {
    pub id: i32,
    pub name: String,
    /// Strict link to the student, when one was recorded.
    pub student_id: Option<i32>,
    /// Free-text student name captured at registration.
    pub student_name: String,
    /// Account that owns this guardian's devices.
    pub user_id: Option<i32>,
    pub relationship: Option<String>,
}

/// Push-capable device tied (optionally) to an account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceRegistration {
    pub id: i32,
    pub token: String,
    pub owner_id: Option<i32>,
    pub platform: Option<String>,
    pub label: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Registration request, upserted by token.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceRegistrationRequest {
    pub token: String,
    #[serde(default)]
    pub owner_id: Option<i32>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// New student for insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NewStudent {
    pub lrn: String,
    pub name: String,
    pub section: Option<String>,
    pub teacher_id: Option<i32>,
}

/// New guardian for insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NewGuardian {
    pub name: String,
    pub student_id: Option<i32>,
    pub student_name: String,
    pub user_id: Option<i32>,
    pub relationship: Option<String>,
}
