//! Push delivery traits.

use homeroom_core::{DispatchResult, PushMessage};

/// Sends one batch of messages to the push gateway.
///
/// Never fails: transport and gateway errors come back as
/// [`DispatchResult::Failed`].
#[trait_variant::make(Send)]
pub trait Pusher: Send + Sync {
    /// Deliver one batch in a single gateway request.
    async fn push(&self, messages: &[PushMessage]) -> DispatchResult;
}
