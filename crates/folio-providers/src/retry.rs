//! Retry wrapper with exponential backoff

use async_trait::async_trait;
use folio_domain::{FieldExtractor, PartialResult};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Default number of attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Retries a wrapped extractor with exponential backoff
///
/// Delays double after each failed attempt: `base`, `2 * base`, `4 * base`, ...
/// The last error is returned once all attempts are used.
#[derive(Debug, Clone)]
pub struct RetryingExtractor<E> {
    inner: E,
    max_attempts: u32,
    base_delay: Duration,
}

impl<E> RetryingExtractor<E> {
    /// Wrap an extractor with the default retry policy
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Set the maximum number of attempts (at least one attempt is always made)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the delay before the first retry
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Get the wrapped extractor
    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E> FieldExtractor for RetryingExtractor<E>
where
    E: FieldExtractor,
{
    type Error = E::Error;

    async fn extract_fields(&self, text: &str, schema: &Value) -> Result<PartialResult, Self::Error> {
        let mut attempt = 1;
        loop {
            match self.inner.extract_fields(text, schema).await {
                Ok(result) => return Ok(result),
                Err(e) if attempt < self.max_attempts => {
                    let delay = self.base_delay * 2u32.saturating_pow(attempt - 1);
                    warn!(
                        "Extraction attempt {}/{} failed: {}; retrying in {:?}",
                        attempt, self.max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
