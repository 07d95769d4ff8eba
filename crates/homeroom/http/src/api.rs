//! Device registration API.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre::WrapErr as _;
use serde::Serialize;

use homeroom_core::{DeviceRegistration, DeviceRegistrationRequest};
use homeroom_storage::DeviceStore;

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(status: StatusCode, error: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                error: error.into(),
            }),
        )
            .into_response()
    }
}

/// Register a device, overwriting any existing registration for its token.
pub async fn register_device<S>(
    State(store): State<S>,
    Json(request): Json<DeviceRegistrationRequest>,
) -> Response
where
    S: DeviceStore,
{
    if request.token.trim().is_empty() {
        return ErrorResponse::new(StatusCode::BAD_REQUEST, "token is required");
    }

    match register_device_inner(&store, &request) {
        Ok(device) => (StatusCode::OK, Json(device)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to register device");
            ErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to register device",
            )
        }
    }
}

fn register_device_inner<S: DeviceStore>(
    store: &S,
    request: &DeviceRegistrationRequest,
) -> color_eyre::eyre::Result<DeviceRegistration> {
    let device = store
        .upsert_device(request)
        .wrap_err("failed to upsert device")?;

    tracing::info!(
        device_id = device.id,
        owner_id = ?device.owner_id,
        platform = ?device.platform,
        "device registered"
    );

    Ok(device)
}
