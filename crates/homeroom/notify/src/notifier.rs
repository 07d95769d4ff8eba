//! Notification orchestrators.

use homeroom_core::{
    Announcement, AttendanceRecord, DispatchResult, GuardianRequest, Notice, NotifyOutcome,
    Priority, RecipientCriterion,
};
use homeroom_push::{ChunkedDispatcher, FixedDelay, Pacer, Pusher};
use homeroom_storage::AllStorage;
use serde_json::{Map, Value};
use tracing::Instrument as _;

use crate::{NotificationError, Notify, TokenResolver};

/// Notification service over a guardian directory and a push dispatcher.
#[derive(Debug, Clone)]
pub struct Notifier<S, P, C = FixedDelay> {
    store: S,
    dispatcher: ChunkedDispatcher<P, C>,
}

impl<S, P, C> Notifier<S, P, C> {
    /// Create a new notifier.
    pub fn new(store: S, dispatcher: ChunkedDispatcher<P, C>) -> Self {
        Self { store, dispatcher }
    }
}

impl<S, P, C> Notifier<S, P, C>
where
    S: AllStorage,
    P: Pusher,
    C: Pacer,
{
    /// Resolve recipients for `criterion` and send `notice` to their devices.
    async fn deliver(
        &self,
        criterion: Option<RecipientCriterion>,
        exclude_guardian: Option<i32>,
        notice: Notice,
    ) -> Result<Vec<DispatchResult>, NotificationError> {
        let criterion = criterion.ok_or(NotificationError::NoRecipients)?;
        let resolver = TokenResolver::new(&self.store);

        let mut guardians = resolver.guardians(&criterion)?;
        if let Some(excluded) = exclude_guardian {
            guardians.retain(|g| g.id != excluded);
        }
        if guardians.is_empty() {
            return Err(NotificationError::NoRecipients);
        }

        let tokens = resolver.tokens(&guardians)?;
        if tokens.is_empty() {
            return Err(NotificationError::NoTokens);
        }

        tracing::info!(
            criterion = criterion.kind(),
            guardians = guardians.len(),
            tokens = tokens.len(),
            "dispatching notification"
        );

        Ok(self.dispatcher.dispatch(&tokens, &notice).await)
    }
}

impl<S, P, C> Notify for Notifier<S, P, C>
where
    S: AllStorage,
    P: Pusher,
    C: Pacer,
{
    async fn notify_attendance(&self, record: &AttendanceRecord) -> NotifyOutcome {
        let span = notify_span("attendance");
        let result = self
            .deliver(record.criterion(), None, attendance_notice(record))
            .instrument(span.clone())
            .await;
        span.in_scope(|| outcome(result))
    }

    async fn notify_announcement(&self, announcement: &Announcement) -> NotifyOutcome {
        let span = notify_span("announcement");
        let result = self
            .deliver(
                Some(announcement.criterion()),
                None,
                announcement_notice(announcement),
            )
            .instrument(span.clone())
            .await;
        span.in_scope(|| outcome(result))
    }

    async fn notify_guardian_request(&self, request: &GuardianRequest) -> NotifyOutcome {
        let span = notify_span("guardian_request");
        let result = self
            .deliver(
                request.criterion(),
                request.requester_guardian_id,
                guardian_request_notice(request),
            )
            .instrument(span.clone())
            .await;
        span.in_scope(|| outcome(result))
    }
}

fn notify_span(event: &'static str) -> tracing::Span {
    tracing::info_span!("notify", event, notification_id = %uuid::Uuid::new_v4())
}

/// Convert the internal result at the service boundary.
fn outcome(result: Result<Vec<DispatchResult>, NotificationError>) -> NotifyOutcome {
    match result {
        Ok(results) => {
            let failed = results.iter().filter(|r| !r.is_delivered()).count();
            tracing::info!(batches = results.len(), failed, "notification dispatched");
            NotifyOutcome::Dispatched(results)
        }
        Err(e) if e.is_info() => {
            tracing::info!(reason = %e, "nothing to send");
            NotifyOutcome::info(e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "notification failed");
            NotifyOutcome::error(e.to_string())
        }
    }
}

fn attendance_notice(record: &AttendanceRecord) -> Notice {
    let mut data = Map::new();
    data.insert("type".into(), Value::from("attendance"));
    data.insert("student_name".into(), Value::from(record.student_name.as_str()));
    data.insert("status".into(), Value::from(record.status.as_str()));
    if let Some(lrn) = &record.student_lrn {
        data.insert("student_lrn".into(), Value::from(lrn.as_str()));
    }
    if let Some(date) = record.date {
        data.insert("date".into(), Value::from(date.to_string()));
    }

    Notice::new(
        "Attendance Update",
        format!("{} - {}", record.student_name, record.status),
    )
    .with_priority(Priority::High)
    .with_data(data)
}

fn announcement_notice(announcement: &Announcement) -> Notice {
    let mut data = Map::new();
    data.insert("type".into(), Value::from("event"));
    data.insert("title".into(), Value::from(announcement.title.as_str()));
    if let Some(id) = announcement.id {
        data.insert("announcement_id".into(), Value::from(id));
    }

    Notice::new(announcement.title.as_str(), announcement.summary()).with_data(data)
}

fn guardian_request_notice(request: &GuardianRequest) -> Notice {
    let mut data = Map::new();
    data.insert("type".into(), Value::from("guardian_request"));
    data.insert("requester_name".into(), Value::from(request.requester_name.as_str()));
    data.insert("student_name".into(), Value::from(request.student_name.as_str()));
    if let Some(id) = request.id {
        data.insert("request_id".into(), Value::from(id));
    }

    Notice::new(
        "Guardian Approval Request",
        format!(
            "{} is requesting approval as guardian of {}",
            request.requester_name, request.student_name
        ),
    )
    .with_priority(Priority::High)
    .with_data(data)
}
