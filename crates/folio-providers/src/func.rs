//! Closure-backed extractor

use async_trait::async_trait;
use folio_domain::{FieldExtractor, PartialResult};
use serde_json::Value;
use std::fmt;

/// Adapts a synchronous function `(text, schema) -> Result<PartialResult, E>`
///
/// # Examples
///
/// ```
/// use folio_domain::{FieldExtractor, PartialResult};
/// use folio_providers::FnExtractor;
/// use serde_json::json;
///
/// let extractor = FnExtractor::new(|text: &str, _schema: &serde_json::Value| {
///     if text.contains("MRN") {
///         Ok(PartialResult::new().with_field("has_mrn", json!(true), 1.0))
///     } else {
///         Err("no MRN".to_string())
///     }
/// });
///
/// # tokio_test::block_on(async {
/// assert!(extractor.extract_fields("MRN 123", &json!({})).await.is_ok());
/// assert!(extractor.extract_fields("nothing", &json!({})).await.is_err());
/// # });
/// ```
pub struct FnExtractor<F> {
    func: F,
}

impl<F> FnExtractor<F> {
    /// Wrap a function
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> fmt::Debug for FnExtractor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnExtractor").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, E> FieldExtractor for FnExtractor<F>
where
    F: Fn(&str, &Value) -> Result<PartialResult, E> + Send + Sync,
    E: fmt::Display + Send,
{
    type Error = E;

    async fn extract_fields(&self, text: &str, schema: &Value) -> Result<PartialResult, Self::Error> {
        (self.func)(text, schema)
    }
}
