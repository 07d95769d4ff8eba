//! Homeroom HTTP Layer
//!
//! Axum handlers for device registration and guardian notifications.

mod api;
mod handlers;
mod middleware;

pub use api::*;
pub use handlers::*;
pub use middleware::*;

use axum::Router;

/// Create the notification router.
pub fn notify_router<N>(service: N) -> Router
where
    N: homeroom_notify::Notify + Clone + 'static,
{
    use axum::routing::post;

    Router::new()
        .route(
            "/api/notifications/attendance",
            post(handlers::attendance_handler::<N>),
        )
        .route(
            "/api/notifications/announcement",
            post(handlers::announcement_handler::<N>),
        )
        .route(
            "/api/notifications/guardian-request",
            post(handlers::guardian_request_handler::<N>),
        )
        .with_state(service)
}

/// Create the device registration router.
pub fn device_router<St>(store: St) -> Router
where
    St: homeroom_storage::DeviceStore + Clone + 'static,
{
    use axum::routing::post;

    Router::new()
        .route("/api/devices", post(api::register_device::<St>))
        .with_state(store)
}
