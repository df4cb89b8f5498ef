use crate::error::SourceError;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Explicit retry policy applied at every outbound call site. Transient
/// failures (5xx, transport errors) are retried with exponential backoff;
/// everything else fails immediately.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// Same attempt count with no backoff. Keeps tests fast.
    pub fn immediate() -> Self {
        Self {
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Backoff before the attempt after `failures` failed attempts:
    /// base, base*2, base*4, ... capped at max_delay.
    pub fn delay_after(&self, failures: u32) -> Duration {
        let factor = 2u32.saturating_pow(failures.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, SourceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let mut failures = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && failures + 1 < self.max_attempts => {
                    failures += 1;
                    let delay = self.delay_after(failures);
                    debug!(failures, ?delay, error = %err, "transient failure, backing off");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> SourceError {
        SourceError::Upstream {
            endpoint: "/test".to_string(),
            status: 503,
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(500));
        assert_eq!(policy.delay_after(2), Duration::from_secs(1));
        assert_eq!(policy.delay_after(3), Duration::from_secs(2));
        assert_eq!(policy.delay_after(4), Duration::from_secs(4));
        assert_eq!(policy.delay_after(5), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_succeeds_after_two_transient_failures() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result = RetryPolicy::immediate()
            .run(|| async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(transient())
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_one_error() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result: Result<(), _> = RetryPolicy::immediate()
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;

        assert!(matches!(
            result,
            Err(SourceError::Upstream { status: 503, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_transient_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result: Result<(), _> = RetryPolicy::immediate()
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(SourceError::Upstream {
                    endpoint: "/test".to_string(),
                    status: 404,
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
