//! Sleep abstraction so the polling loop can be driven without real delays.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Trait for suspending the current task.
///
/// This abstraction allows tests to observe and skip the loop's delays.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl<T: Sleeper + ?Sized> Sleeper for Arc<T> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokio_sleeper_waits_for_duration() {
        let start = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_arc_sleeper_delegates() {
        let mut mock = MockSleeper::new();
        mock.expect_sleep()
            .with(mockall::predicate::eq(Duration::from_secs(2)))
            .times(1)
            .returning(|_| ());

        let shared = Arc::new(mock);
        shared.sleep(Duration::from_secs(2)).await;
    }
}
