//! Notification HTTP handlers.
//!
//! Every endpoint answers 200 with the notifier's outcome; telling an
//! `{"error": ...}` outcome apart is left to the caller.

use axum::Json;
use axum::extract::State;

use homeroom_core::{Announcement, AttendanceRecord, GuardianRequest, NotifyOutcome};
use homeroom_notify::Notify;

/// Notify guardians about an attendance entry.
pub async fn attendance_handler<N>(
    State(service): State<N>,
    Json(record): Json<AttendanceRecord>,
) -> Json<NotifyOutcome>
where
    N: Notify,
{
    Json(service.notify_attendance(&record).await)
}

/// Notify guardians about an announcement.
pub async fn announcement_handler<N>(
    State(service): State<N>,
    Json(announcement): Json<Announcement>,
) -> Json<NotifyOutcome>
where
    N: Notify,
{
    Json(service.notify_announcement(&announcement).await)
}

/// Ask a student's guardians to approve a new guardian.
pub async fn guardian_request_handler<N>(
    State(service): State<N>,
    Json(request): Json<GuardianRequest>,
) -> Json<NotifyOutcome>
where
    N: Notify,
{
    Json(service.notify_guardian_request(&request).await)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use homeroom_core::{DispatchFailure, DispatchResult};
    use serde_json::{Value, json};
    use tower::ServiceExt as _;

    use super::*;

    #[derive(Clone, Default)]
    struct FakeNotifier {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Notify for FakeNotifier {
        async fn notify_attendance(&self, record: &AttendanceRecord) -> NotifyOutcome {
            self.calls
                .lock()
                .unwrap()
                .push(format!("attendance {}", record.status));
            NotifyOutcome::info("no parents found")
        }

        async fn notify_announcement(&self, announcement: &Announcement) -> NotifyOutcome {
            self.calls
                .lock()
                .unwrap()
                .push(format!("announcement {}", announcement.title));
            NotifyOutcome::Dispatched(vec![
                DispatchResult::Delivered(json!({"data": [{"status": "ok"}]})),
                DispatchFailure::Transport("connection refused".into()).into(),
            ])
        }

        async fn notify_guardian_request(&self, request: &GuardianRequest) -> NotifyOutcome {
            self.calls
                .lock()
                .unwrap()
                .push(format!("guardian_request {}", request.requester_name));
            NotifyOutcome::error("failed to resolve recipients: database is locked")
        }
    }

    async fn post(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_outcomes_are_returned_verbatim() {
        let notifier = FakeNotifier::default();
        let router = crate::notify_router(notifier.clone());

        let (status, body) = post(
            router.clone(),
            "/api/notifications/attendance",
            json!({"student_lrn": "100001", "student_name": "Dela Cruz, Juan", "status": "Late"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"info": "no parents found"}));

        let (status, body) = post(
            router.clone(),
            "/api/notifications/announcement",
            json!({"title": "Field trip", "description": "Bring lunch", "teacher_id": 1, "section": "7-A"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"data": [{"status": "ok"}]},
                {"error": "Connection error: connection refused"}
            ])
        );

        let (status, body) = post(
            router,
            "/api/notifications/guardian-request",
            json!({"requester_name": "Tita Rosa", "student_name": "Juan Dela Cruz"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"error": "failed to resolve recipients: database is locked"})
        );

        assert_eq!(
            *notifier.calls.lock().unwrap(),
            vec![
                "attendance Late",
                "announcement Field trip",
                "guardian_request Tita Rosa"
            ]
        );
    }
}
