//! Domain events handed to the notification orchestrators.

use crate::RecipientCriterion;

/// Maximum characters of an announcement description sent as a push body.
pub const EVENT_BODY_LIMIT: usize = 200;

/// Attendance entry recorded for a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub student_lrn: Option<String>,
    pub student_name: String,
    /// Free-form status such as "Present", "Late" or "Absent".
    pub status: String,
    #[serde(default)]
    pub date: Option<chrono::NaiveDate>,
}

impl AttendanceRecord {
    pub fn criterion(&self) -> Option<RecipientCriterion> {
        RecipientCriterion::for_student(self.student_lrn.as_deref(), &self.student_name)
    }
}

/// Announcement or event posted by a teacher.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub id: Option<i32>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub teacher_id: i32,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub student_id: Option<i32>,
}

impl Announcement {
    /// Section audience first, then a single student, then the whole class.
    pub fn criterion(&self) -> RecipientCriterion {
        if let Some(section) = self.section.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return RecipientCriterion::BySection {
                section: section.to_string(),
                teacher_id: self.teacher_id,
            };
        }

        if let Some(student_id) = self.student_id {
            return RecipientCriterion::ByStudentId(crate::StudentRef::Key(student_id));
        }

        RecipientCriterion::ByTeacher(self.teacher_id)
    }

    /// Description cut to [`EVENT_BODY_LIMIT`] characters.
    pub fn summary(&self) -> String {
        self.description.chars().take(EVENT_BODY_LIMIT).collect()
    }
}

/// Pending request from a person asking to be approved as a student's guardian.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuardianRequest {
    #[serde(default)]
    pub id: Option<i32>,
    pub requester_name: String,
    /// Guardian record created for the requester, if any. Excluded from recipients.
    #[serde(default)]
    pub requester_guardian_id: Option<i32>,
    #[serde(default)]
    pub student_lrn: Option<String>,
    pub student_name: String,
    #[serde(default)]
    pub relationship: Option<String>,
}

impl GuardianRequest {
    pub fn criterion(&self) -> Option<RecipientCriterion> {
        RecipientCriterion::for_student(self.student_lrn.as_deref(), &self.student_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StudentRef;

    #[test]
    fn test_announcement_criterion_precedence() {
        let mut announcement = Announcement {
            title: "Field trip".into(),
            teacher_id: 3,
            section: Some("7-A".into()),
            student_id: Some(9),
            ..Default::default()
        };
        assert_eq!(
            announcement.criterion(),
            RecipientCriterion::BySection {
                section: "7-A".into(),
                teacher_id: 3
            }
        );

        announcement.section = None;
        assert_eq!(
            announcement.criterion(),
            RecipientCriterion::ByStudentId(StudentRef::Key(9))
        );

        announcement.student_id = None;
        assert_eq!(announcement.criterion(), RecipientCriterion::ByTeacher(3));
    }

    #[test]
    fn test_summary_truncates_by_characters() {
        let announcement = Announcement {
            description: "ñ".repeat(250),
            ..Default::default()
        };
        let summary = announcement.summary();
        assert_eq!(summary.chars().count(), EVENT_BODY_LIMIT);

        let short = Announcement {
            description: "Bring a packed lunch.".into(),
            ..Default::default()
        };
        assert_eq!(short.summary(), "Bring a packed lunch.");
    }
}
