//! Notification service traits.

use homeroom_core::{Announcement, AttendanceRecord, GuardianRequest, NotifyOutcome};

/// Entry points for domain events that notify guardians.
///
/// Implementations never fail: every problem is reported through the
/// returned [`NotifyOutcome`].
#[trait_variant::make(Send)]
pub trait Notify: Send + Sync {
    /// An attendance entry was recorded.
    async fn notify_attendance(&self, record: &AttendanceRecord) -> NotifyOutcome;

    /// An announcement or event was posted.
    async fn notify_announcement(&self, announcement: &Announcement) -> NotifyOutcome;

    /// Someone asked to be approved as a student's guardian.
    async fn notify_guardian_request(&self, request: &GuardianRequest) -> NotifyOutcome;
}
