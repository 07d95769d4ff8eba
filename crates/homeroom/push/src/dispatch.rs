//! Chunked, paced dispatch of a notice to many devices.

use homeroom_core::{DispatchResult, Notice, PushMessage};

use crate::{Batcher, FixedDelay, Pacer, PushConfig, Pusher};

/// Sends a notice to a token list one batch at a time.
///
/// Batches go out serially in token order; the pacer runs between
/// consecutive batches. Each batch gets exactly one attempt.
#[derive(Debug, Clone)]
pub struct ChunkedDispatcher<P, C = FixedDelay> {
    pusher: P,
    pacer: C,
    batcher: Batcher,
}

impl<P: Pusher> ChunkedDispatcher<P, FixedDelay> {
    /// Dispatcher using the configured batch size and fixed pacing delay.
    pub fn from_config(pusher: P, config: &PushConfig) -> Self {
        Self::new(
            pusher,
            FixedDelay::new(config.pacing()),
            Batcher::new(config.chunk_size),
        )
    }
}

impl<P, C> ChunkedDispatcher<P, C>
where
    P: Pusher,
    C: Pacer,
{
    pub fn new(pusher: P, pacer: C, batcher: Batcher) -> Self {
        Self {
            pusher,
            pacer,
            batcher,
        }
    }

    /// Send `notice` to every token, returning one result per batch.
    ///
    /// Tokens are expected to be distinct already.
    pub async fn dispatch(&self, tokens: &[String], notice: &Notice) -> Vec<DispatchResult> {
        let messages: Vec<PushMessage> = tokens.iter().map(|t| notice.to_message(t)).collect();
        let total = messages.len().div_ceil(self.batcher.size());
        let mut results = Vec::with_capacity(total);

        for (index, batch) in self.batcher.batches(&messages).enumerate() {
            if index > 0 {
                self.pacer.pause().await;
            }

            tracing::info!(
                batch = index + 1,
                of = total,
                messages = batch.len(),
                "sending push batch"
            );

            results.push(self.pusher.push(batch).await);
        }

        results
    }
}
