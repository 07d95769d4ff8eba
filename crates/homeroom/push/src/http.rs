//! HTTP push gateway client.

use color_eyre::eyre::WrapErr as _;
use homeroom_core::{DispatchFailure, DispatchResult, PushMessage};

use crate::{PushConfig, Pusher};

/// Pusher posting JSON batches to the configured gateway endpoint.
#[derive(Debug, Clone)]
pub struct HttpPusher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPusher {
    /// Create a new pusher with the configured endpoint and request timeout.
    pub fn new(config: &PushConfig) -> color_eyre::eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .wrap_err("failed to build push HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    async fn post(&self, messages: &[PushMessage]) -> Result<serde_json::Value, DispatchFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(messages)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let reason = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            return Err(DispatchFailure::Protocol {
                status: status.as_u16(),
                reason,
            });
        }

        // Reading the body can still fail at the connection level.
        let bytes = response.bytes().await.map_err(classify)?;
        let body: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            DispatchFailure::Unknown(format!("error decoding response body: {e}"))
        })?;

        // Request-level rejection inside a 2xx envelope.
        if let Some(reason) = gateway_error(&body) {
            return Err(DispatchFailure::Protocol {
                status: status.as_u16(),
                reason,
            });
        }

        Ok(body)
    }
}

impl Pusher for HttpPusher {
    async fn push(&self, messages: &[PushMessage]) -> DispatchResult {
        match self.post(messages).await {
            Ok(body) => {
                tracing::debug!(messages = messages.len(), "push batch accepted");
                DispatchResult::Delivered(body)
            }
            Err(failure) => {
                tracing::warn!(
                    messages = messages.len(),
                    error = %failure,
                    "push batch failed"
                );
                DispatchResult::Failed(failure)
            }
        }
    }
}

/// Map a client error onto the dispatch failure taxonomy.
fn classify(error: reqwest::Error) -> DispatchFailure {
    if let Some(status) = error.status() {
        return DispatchFailure::Protocol {
            status: status.as_u16(),
            reason: error.to_string(),
        };
    }

    if error.is_connect() || error.is_timeout() || error.is_request() || is_body_read(&error) {
        return DispatchFailure::Transport(error_chain(&error));
    }

    DispatchFailure::Unknown(error_chain(&error))
}

/// Whether the connection failed while the body was being read.
///
/// reqwest reports these as decode errors wrapping the underlying body error.
fn is_body_read(error: &reqwest::Error) -> bool {
    if error.is_body() {
        return true;
    }

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        if let Some(inner) = cause.downcast_ref::<reqwest::Error>() {
            if inner.is_body() || inner.is_timeout() {
                return true;
            }
        }
        if cause.is::<std::io::Error>() {
            return true;
        }
        source = cause.source();
    }
    false
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// First message of a top-level `errors` array, if the gateway sent one.
fn gateway_error(body: &serde_json::Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    let first = errors.first()?;

    Some(
        first
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| first.to_string()),
    )
}
