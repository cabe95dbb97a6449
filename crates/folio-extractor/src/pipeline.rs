//! Document extraction pipeline

use crate::config::{ProcessingConfig, ProcessingMode};
use crate::decider::ProcessingDecider;
use crate::error::ExtractorError;
use crate::invoker::SegmentInvoker;
use crate::merge::merge;
use crate::types::{ExtractionMetadata, ExtractionRequest, ExtractionResult};
use folio_domain::FieldExtractor;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::info;

/// Decides how to process a document, extracts every segment and merges
/// the partial results
///
/// Dropping the future returned by [`Pipeline::extract`] cancels every
/// in-flight extraction call; nothing is merged from a cancelled run.
pub struct Pipeline<E>
where
    E: FieldExtractor,
{
    extractor: E,
    decider: ProcessingDecider,
    invoker: SegmentInvoker,
    config: ProcessingConfig,
}

impl<E> Pipeline<E>
where
    E: FieldExtractor,
{
    /// Create a new Pipeline, rejecting invalid configuration
    pub fn new(extractor: E, config: ProcessingConfig) -> Result<Self, ExtractorError> {
        let decider = ProcessingDecider::new(&config)?;
        let invoker = SegmentInvoker::new(config.max_concurrency, config.extraction_timeout());
        Ok(Self {
            extractor,
            decider,
            invoker,
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// The extraction collaborator
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Extract fields from a document
    ///
    /// Fails with [`ExtractorError::Timeout`] when the whole document takes
    /// longer than `document_timeout_secs`.
    pub async fn extract(
        &self,
        request: ExtractionRequest,
    ) -> Result<ExtractionResult, ExtractorError> {
        info!(
            "Starting extraction, text length {} chars",
            request.text.chars().count()
        );

        timeout(self.config.document_timeout(), self.run(&request))
            .await
            .map_err(|_| ExtractorError::Timeout)?
    }

    /// Extract fields from `text` without document metadata
    pub async fn decide_and_extract(
        &self,
        text: &str,
        schema: &Value,
    ) -> Result<ExtractionResult, ExtractorError> {
        self.extract(ExtractionRequest::new(text, schema.clone()))
            .await
    }

    async fn run(&self, request: &ExtractionRequest) -> Result<ExtractionResult, ExtractorError> {
        let start_time = Instant::now();

        let plan = self.decider.plan(&request.text, request.metadata.as_ref())?;
        let outcome = self
            .invoker
            .invoke(&self.extractor, &plan.segments, &request.schema)
            .await?;
        let merged = merge(outcome.partials)?;

        let metadata = ExtractionMetadata {
            mode: plan.mode,
            strategy: match plan.mode {
                ProcessingMode::Full => None,
                _ => Some(self.decider.chunker().strategy()),
            },
            segments_produced: plan.segments_produced,
            segments_processed: plan.segments.len(),
            truncated: plan.truncated,
            failures: outcome.failures,
            segments: plan.segments.iter().map(|segment| segment.summary()).collect(),
            processing_time_ms: millis(start_time.elapsed()),
        };

        info!(
            "Extraction complete: {} fields from {} of {} segments, {} failed",
            merged.fields.len(),
            merged.sources_merged,
            metadata.segments_processed,
            metadata.failures.len()
        );

        Ok(ExtractionResult { merged, metadata })
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Decide, extract and merge in one call
///
/// Builds a [`Pipeline`] for `config` and runs it once on `text`.
pub async fn decide_and_extract<E>(
    text: &str,
    config: &ProcessingConfig,
    extractor: E,
    schema: &Value,
) -> Result<ExtractionResult, ExtractorError>
where
    E: FieldExtractor,
{
    Pipeline::new(extractor, config.clone())?
        .decide_and_extract(text, schema)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::PartialResult;
    use folio_providers::MockExtractor;
    use serde_json::json;

    fn create_test_pipeline(chunk_size: usize) -> Pipeline<MockExtractor> {
        let extractor =
            MockExtractor::new(PartialResult::new().with_field("age", json!(42), 0.9));
        let config = ProcessingConfig {
            chunking_strategy: "fixed_size".to_string(),
            chunk_size,
            chunk_overlap: 0,
            ..ProcessingConfig::default()
        };
        Pipeline::new(extractor, config).unwrap()
    }

    #[tokio::test]
    async fn test_extract_short_text() {
        let pipeline = create_test_pipeline(1_000);

        let result = pipeline
            .decide_and_extract("Patient is 42 years old.", &json!({}))
            .await
            .unwrap();

        assert_eq!(result.merged.get("age"), Some(&json!(42)));
        assert_eq!(result.sources_merged(), 1);
        assert_eq!(result.metadata.mode, ProcessingMode::Full);
        assert_eq!(result.metadata.strategy, None);
        assert_eq!(pipeline.extractor().call_count(), 1);
    }

    #[tokio::test]
    async fn test_extract_empty_text() {
        let pipeline = create_test_pipeline(1_000);

        let result = pipeline.decide_and_extract("   ", &json!({})).await;
        assert!(matches!(result, Err(ExtractorError::EmptyDocument)));
        assert_eq!(pipeline.extractor().call_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProcessingConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..ProcessingConfig::default()
        };
        let result = Pipeline::new(MockExtractor::default(), config);
        assert!(matches!(result, Err(ExtractorError::InvalidOverlap(100, 100))));
    }

    #[tokio::test]
    async fn test_segment_summaries_recorded() {
        let pipeline = create_test_pipeline(1_000);
        let schema = json!({"age": {"type": "integer"}});

        let request = ExtractionRequest::new("Patient is 42.", schema);
        let result = pipeline.extract(request).await.unwrap();
        assert_eq!(result.metadata.segments_processed, 1);
        assert_eq!(result.metadata.segments[0].length, 14);
    }

    #[test]
    fn test_processing_time_saturates() {
        assert_eq!(millis(Duration::from_millis(1_500)), 1_500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
