//! The "advance after delay" primitive behind the timed checkout steps.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends a simulated gateway round-trip.
///
/// Cancellation is the caller's business: dropping the future abandons the
/// wait.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn delay(&self, duration: Duration);
}

/// Real time on the tokio timer. Under a paused test runtime this
/// fast-forwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_waits_the_full_duration() {
        let start = Instant::now();
        TokioScheduler.delay(Duration::from_secs(5)).await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
