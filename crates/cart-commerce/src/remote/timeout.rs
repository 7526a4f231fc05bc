//! Timeout configuration for remote calls.

use std::future::Future;
use std::time::Duration;

use crate::remote::ServiceError;

/// Upper bound on a single remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Total operation timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self { total }
    }

    /// Run a remote call, failing with [`ServiceError::Timeout`] once the
    /// bound is exceeded.
    pub async fn run<T, F>(&self, call: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        match tokio::time::timeout(self.total, call).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.total)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_passes_result_through() {
        let timeout = TimeoutConfig::from_total(Duration::from_secs(1));
        let value = timeout.run(async { Ok::<_, ServiceError>(5) }).await.unwrap();
        assert_eq!(value, 5);

        let err = timeout
            .run(async { Err::<u8, _>(ServiceError::Unavailable("down".into())) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out() {
        let timeout = TimeoutConfig::from_total(Duration::from_millis(50));
        let err = timeout
            .run(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, ServiceError>(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Timeout(d) if d == Duration::from_millis(50)));
    }
}
