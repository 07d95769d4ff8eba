//! Storage traits.

use homeroom_core::{
    DeviceRegistration, DeviceRegistrationRequest, Guardian, NewGuardian, NewStudent,
    RecipientCriterion, Student, Teacher,
};

/// Guardian directory operations.
pub trait DirectoryStore: Send + Sync {
    /// Guardians addressed by a recipient criterion, without duplicates.
    fn guardians_matching(
        &self,
        criterion: &RecipientCriterion,
    ) -> color_eyre::eyre::Result<Vec<Guardian>>;

    /// Insert a teacher.
    fn add_teacher(&self, name: &str) -> color_eyre::eyre::Result<Teacher>;

    /// Insert a student.
    fn add_student(&self, student: &NewStudent) -> color_eyre::eyre::Result<Student>;

    /// Insert a guardian.
    fn add_guardian(&self, guardian: &NewGuardian) -> color_eyre::eyre::Result<Guardian>;
}

/// Device registration operations.
pub trait DeviceStore: Send + Sync {
    /// Create or overwrite the registration for a token.
    fn upsert_device(
        &self,
        request: &DeviceRegistrationRequest,
    ) -> color_eyre::eyre::Result<DeviceRegistration>;

    /// Tokens of every device owned by one of the given accounts.
    fn tokens_for_owners(&self, owner_ids: &[i32]) -> color_eyre::eyre::Result<Vec<String>>;

    /// Every registered token.
    fn all_tokens(&self) -> color_eyre::eyre::Result<Vec<String>>;
}

/// Combined storage trait.
pub trait AllStorage: DirectoryStore + DeviceStore {}

impl<T> AllStorage for T where T: DirectoryStore + DeviceStore {}
