//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction core and the
//! collaborators it drives. Implementations live in other crates.

use crate::PartialResult;
use async_trait::async_trait;
use serde_json::Value;

/// Extraction collaborator: turns one piece of text into field values
///
/// Prompt construction, model invocation and response parsing all happen
/// behind this trait. A call may fail; the caller decides whether a failure
/// is fatal.
///
/// Implemented by the infrastructure layer (folio-providers)
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Error type for extraction calls
    type Error: std::fmt::Display + Send;

    /// Extract the fields described by `schema` from `text`
    async fn extract_fields(&self, text: &str, schema: &Value) -> Result<PartialResult, Self::Error>;
}

#[async_trait]
impl<T> FieldExtractor for std::sync::Arc<T>
where
    T: FieldExtractor + ?Sized,
{
    type Error = T::Error;

    async fn extract_fields(&self, text: &str, schema: &Value) -> Result<PartialResult, Self::Error> {
        (**self).extract_fields(text, schema).await
    }
}
