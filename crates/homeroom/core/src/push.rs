//! Push notification types.

use serde::ser::SerializeMap as _;

/// Delivery priority understood by the push gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Default,
    High,
}

/// One message to one device, in the gateway's wire shape.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PushMessage {
    /// Device push token.
    #[serde(rename = "to")]
    pub recipient_token: String,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    /// Extra payload delivered to the app; omitted from the wire when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Content shared by every message of one notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            priority: Priority::Default,
            data: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_data(mut self, data: serde_json::Map<String, serde_json::Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Address this notice to one device.
    pub fn to_message(&self, token: &str) -> PushMessage {
        PushMessage {
            recipient_token: token.to_string(),
            title: self.title.clone(),
            body: self.body.clone(),
            priority: self.priority,
            data: self.data.clone(),
        }
    }
}

/// Why a batch could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchFailure {
    /// The gateway answered with a non-2xx status or a request-level error.
    #[error("HTTP error: {status} {reason}")]
    Protocol { status: u16, reason: String },

    /// The request never got an answer (DNS, refused, reset, timeout).
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

/// Outcome of sending one batch.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// Gateway response body, passed through untouched.
    Delivered(serde_json::Value),
    Failed(DispatchFailure),
}

impl DispatchResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    pub fn failure(&self) -> Option<&DispatchFailure> {
        match self {
            Self::Delivered(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

impl From<DispatchFailure> for DispatchResult {
    fn from(failure: DispatchFailure) -> Self {
        Self::Failed(failure)
    }
}

impl serde::Serialize for DispatchResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Delivered(body) => body.serialize(serializer),
            Self::Failed(failure) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &failure.to_string())?;
                map.end()
            }
        }
    }
}

/// Result of one orchestrator call, discriminated by shape.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum NotifyOutcome {
    /// Nothing to send, e.g. no guardians matched.
    Info { info: String },
    /// Recipient resolution failed before anything was sent.
    Error { error: String },
    /// One result per batch, in dispatch order.
    Dispatched(Vec<DispatchResult>),
}

impl NotifyOutcome {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Info {
            info: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Batch results, if anything was dispatched.
    pub fn batches(&self) -> Option<&[DispatchResult]> {
        match self {
            Self::Dispatched(results) => Some(results),
            _ => None,
        }
    }
}

/// Distinct non-empty tokens in first-seen order.
pub fn dedup_tokens<I, T>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<T>>,
    T: Into<String>,
{
    let mut seen = std::collections::HashSet::new();
    tokens
        .into_iter()
        .flatten()
        .map(Into::into)
        .filter(|token: &String| !token.trim().is_empty())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
