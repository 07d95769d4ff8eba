//! Recipient criteria built from domain events.

/// Strict reference to a student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StudentRef {
    /// Learner reference number.
    Lrn(String),
    /// Primary key.
    Key(i32),
}

/// Query describing which guardians an event is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RecipientCriterion {
    /// Guardians linked to one student.
    ByStudentId(StudentRef),
    /// Guardians whose student name matches a free-text name.
    ///
    /// See [`crate::name_variants`] for the matching policy.
    ByNameFuzzy(String),
    /// Guardians of every student in a teacher's section.
    BySection { section: String, teacher_id: i32 },
    /// Guardians of every student assigned to a teacher.
    ByTeacher(i32),
}

impl RecipientCriterion {
    /// Strict LRN lookup when one is available, otherwise fuzzy name matching.
    ///
    /// Returns `None` when both the LRN and the name are blank.
    pub fn for_student(lrn: Option<&str>, name: &str) -> Option<Self> {
        if let Some(lrn) = lrn.map(str::trim).filter(|l| !l.is_empty()) {
            return Some(Self::ByStudentId(StudentRef::Lrn(lrn.to_string())));
        }

        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self::ByNameFuzzy(name.to_string()))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ByStudentId(_) => "student",
            Self::ByNameFuzzy(_) => "name",
            Self::BySection { .. } => "section",
            Self::ByTeacher(_) => "teacher",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lrn_preferred_over_name() {
        let criterion = RecipientCriterion::for_student(Some("100001"), "Dela Cruz, Juan");
        assert_eq!(
            criterion,
            Some(RecipientCriterion::ByStudentId(StudentRef::Lrn(
                "100001".into()
            )))
        );
    }

    #[test]
    fn test_blank_lrn_falls_back_to_name() {
        let criterion = RecipientCriterion::for_student(Some("  "), " Juan Dela Cruz ");
        assert_eq!(
            criterion,
            Some(RecipientCriterion::ByNameFuzzy("Juan Dela Cruz".into()))
        );
    }

    #[test]
    fn test_nothing_to_match() {
        assert_eq!(RecipientCriterion::for_student(None, "   "), None);
    }
}
