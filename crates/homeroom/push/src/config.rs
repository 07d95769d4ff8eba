//! Push gateway settings.

use std::num::{NonZeroU64, NonZeroUsize};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Expo push gateway.
pub const DEFAULT_ENDPOINT: &str = "https://exp.host/--/api/v2/push/send";

/// Push gateway settings, passed to the pusher and dispatcher at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Messages per gateway request.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: NonZeroUsize,
    /// Per-request timeout; zero would fail every request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
    /// Pause between consecutive batches.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_chunk_size() -> NonZeroUsize {
    NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN)
}

fn default_timeout_secs() -> NonZeroU64 {
    NonZeroU64::new(10).unwrap_or(NonZeroU64::MIN)
}

fn default_pacing_ms() -> u64 {
    200
}

impl PushConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.get())
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Same settings against another endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            chunk_size: default_chunk_size(),
            timeout_secs: default_timeout_secs(),
            pacing_ms: default_pacing_ms(),
        }
    }
}
