//! Per-segment extraction calls

use crate::error::ExtractorError;
use crate::types::SegmentFailure;
use folio_domain::{FieldExtractor, PartialResult, Segment};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Partial results of the segments that succeeded, plus the ones that did not
#[derive(Debug, Clone, Default)]
pub struct InvocationOutcome {
    /// Normalized partial results in segment order
    pub partials: Vec<PartialResult>,

    /// Dropped segments in segment order
    pub failures: Vec<SegmentFailure>,
}

/// Sends segments to an extraction collaborator with bounded concurrency
#[derive(Debug, Clone, Copy)]
pub struct SegmentInvoker {
    max_concurrency: usize,
    call_timeout: Duration,
}

impl SegmentInvoker {
    /// Create an invoker; a concurrency of 0 is treated as 1
    pub fn new(max_concurrency: usize, call_timeout: Duration) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            call_timeout,
        }
    }

    /// Extract every segment
    ///
    /// A segment whose call errors, exceeds the call timeout, or returns
    /// confidence outside [0.0, 1.0] is dropped and recorded as a failure.
    /// Fails with [`ExtractorError::AllSegmentsFailed`] when nothing
    /// succeeded.
    pub async fn invoke<E>(
        &self,
        extractor: &E,
        segments: &[Segment],
        schema: &Value,
    ) -> Result<InvocationOutcome, ExtractorError>
    where
        E: FieldExtractor + ?Sized,
    {
        let mut results: Vec<(usize, Result<PartialResult, String>)> = stream::iter(segments)
            .map(|segment| async move {
                debug!(
                    "Extracting segment {}/{} ({} chars)",
                    segment.index + 1,
                    segment.total_count,
                    segment.len()
                );
                (segment.index, self.call(extractor, segment, schema).await)
            })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        results.sort_by_key(|(index, _)| *index);

        let mut outcome = InvocationOutcome::default();
        for (index, result) in results {
            match result {
                Ok(partial) => outcome.partials.push(partial),
                Err(reason) => {
                    warn!("Skipping segment {}: {}", index, reason);
                    outcome.failures.push(SegmentFailure { index, reason });
                }
            }
        }

        if outcome.partials.is_empty() {
            return Err(ExtractorError::AllSegmentsFailed {
                failures: outcome.failures,
            });
        }

        Ok(outcome)
    }

    async fn call<E>(
        &self,
        extractor: &E,
        segment: &Segment,
        schema: &Value,
    ) -> Result<PartialResult, String>
    where
        E: FieldExtractor + ?Sized,
    {
        let partial = timeout(
            self.call_timeout,
            extractor.extract_fields(&segment.content, schema),
        )
        .await
        .map_err(|_| format!("timed out after {:?}", self.call_timeout))?
        .map_err(|e| e.to_string())?
        .normalized();

        partial
            .validate()
            .map_err(|e| format!("malformed result: {}", e))?;
        Ok(partial)
    }
}
