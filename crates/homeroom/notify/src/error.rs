//! Notification error types.

use thiserror::Error;

/// Reasons an orchestrator stops before dispatching.
///
/// Delivery failures are not errors here; they travel as
/// [`homeroom_core::DispatchResult::Failed`] values.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The event addressed nobody.
    #[error("no parents found")]
    NoRecipients,

    /// Matching guardians have no registered devices.
    #[error("no device tokens found")]
    NoTokens,

    /// Looking up guardians or devices failed.
    #[error("failed to resolve recipients: {0}")]
    Resolution(String),
}

impl NotificationError {
    pub(crate) fn resolution(report: color_eyre::eyre::Report) -> Self {
        let chain: Vec<String> = report.chain().map(ToString::to_string).collect();
        Self::Resolution(chain.join(": "))
    }

    /// Informational outcomes are not failures.
    pub fn is_info(&self) -> bool {
        matches!(self, Self::NoRecipients | Self::NoTokens)
    }
}
