//! Folio Extraction Providers
//!
//! In-process implementations of the `FieldExtractor` trait from `folio-domain`.
//!
//! # Architecture
//!
//! Real extraction backends (prompting a model and parsing its JSON) live
//! outside this workspace. This crate supplies the pieces every caller needs
//! around them.
//!
//! # Providers
//!
//! - `MockExtractor`: Deterministic, scriptable extractor for testing
//! - `FnExtractor`: Adapts a plain function or closure
//! - `RetryingExtractor`: Retries a wrapped extractor with exponential backoff
//!
//! # Examples
//!
//! ```
//! use folio_domain::{FieldExtractor, PartialResult};
//! use folio_providers::MockExtractor;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let extractor = MockExtractor::new(
//!     PartialResult::new().with_field("patient_name", json!("Jane Doe"), 0.9),
//! );
//! let partial = extractor.extract_fields("any text", &json!({})).await.unwrap();
//! assert_eq!(partial.fields["patient_name"], json!("Jane Doe"));
//! # });
//! ```

#![warn(missing_docs)]

pub mod func;
pub mod retry;

use async_trait::async_trait;
use folio_domain::{FieldExtractor, PartialResult};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use func::FnExtractor;
pub use retry::RetryingExtractor;

/// Errors that can occur during extraction calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Backend could not be reached
    #[error("Communication error: {0}")]
    Communication(String),

    /// Backend answered with something that is not a usable result
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Generic error
    #[error("Extraction error: {0}")]
    Other(String),
}

/// Scripted behavior for texts matching a marker
#[derive(Debug, Clone)]
enum Script {
    Respond(PartialResult),
    Fail(ProviderError),
}

/// Mock extractor for deterministic testing
///
/// Returns pre-configured partial results without any I/O. Scripts are keyed
/// by a marker substring; the first registered marker found in the text wins,
/// otherwise the default result is returned.
///
/// # Examples
///
/// ```
/// use folio_domain::{FieldExtractor, PartialResult};
/// use folio_providers::MockExtractor;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let mut extractor = MockExtractor::default();
/// extractor.add_response(
///     "DIAGNOSIS",
///     PartialResult::new().with_field("diagnosis", json!("asthma"), 0.8),
/// );
/// extractor.add_error("CORRUPTED");
///
/// let partial = extractor.extract_fields("DIAGNOSIS: asthma", &json!({})).await.unwrap();
/// assert_eq!(partial.fields["diagnosis"], json!("asthma"));
/// assert!(extractor.extract_fields("CORRUPTED page", &json!({})).await.is_err());
/// assert_eq!(extractor.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockExtractor {
    default_result: PartialResult,
    scripts: Arc<Mutex<Vec<(String, Script)>>>,
    calls: Arc<Mutex<Vec<String>>>,
    latency: Option<Duration>,
}

impl MockExtractor {
    /// Create a MockExtractor returning `result` for every text
    pub fn new(result: PartialResult) -> Self {
        Self {
            default_result: result,
            scripts: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            latency: None,
        }
    }

    /// Delay every call by `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Return `result` for texts containing `marker`
    pub fn add_response(&mut self, marker: impl Into<String>, result: PartialResult) {
        lock(&self.scripts).push((marker.into(), Script::Respond(result)));
    }

    /// Fail calls for texts containing `marker`
    pub fn add_error(&mut self, marker: impl Into<String>) {
        self.add_failure(marker, ProviderError::Other("Mock error".to_string()));
    }

    /// Fail calls for texts containing `marker` with a specific error
    pub fn add_failure(&mut self, marker: impl Into<String>, error: ProviderError) {
        lock(&self.scripts).push((marker.into(), Script::Fail(error)));
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Texts received, in call order
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }

    fn script_for(&self, text: &str) -> Option<Script> {
        lock(&self.scripts)
            .iter()
            .find(|(marker, _)| text.contains(marker.as_str()))
            .map(|(_, script)| script.clone())
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new(PartialResult::new())
    }
}

#[async_trait]
impl FieldExtractor for MockExtractor {
    type Error = ProviderError;

    async fn extract_fields(&self, text: &str, _schema: &Value) -> Result<PartialResult, Self::Error> {
        lock(&self.calls).push(text.to_string());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.script_for(text) {
            Some(Script::Respond(result)) => Ok(result),
            Some(Script::Fail(error)) => Err(error),
            None => Ok(self.default_result.clone()),
        }
    }
}

/// Lock a mutex, recovering the data if a panicking test poisoned it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
