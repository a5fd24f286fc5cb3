//! Injectable pauses between crawl steps
//!
//! The index crawler pauses after clicking "Next Page" so the new page can settle, and the
//! feed crawler pauses after each detail visit to throttle its request rate.

use async_trait::async_trait;
use std::time::Duration;

/// A pause applied between crawl steps
#[async_trait]
pub trait WaitPolicy: Send + Sync {
    async fn wait(&self);
}

/// Sleeps for a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl WaitPolicy for FixedDelay {
    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

#[async_trait]
impl WaitPolicy for NoDelay {
    async fn wait(&self) {}
}
