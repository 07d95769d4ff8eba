//! Pacing between batches.

use std::time::Duration;

/// Waits between consecutive gateway requests.
#[trait_variant::make(Send)]
pub trait Pacer: Send + Sync {
    /// Pause before the next batch is sent.
    async fn pause(&self);
}

/// Fixed delay between batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Pacer for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_delay_waits() {
        let pacer = FixedDelay::new(Duration::from_millis(30));
        let started = tokio::time::Instant::now();
        pacer.pause().await;
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
