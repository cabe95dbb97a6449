//! Request and response types for extraction

use crate::config::{ChunkStrategy, ProcessingMode};
use folio_domain::{MergedResult, SegmentMetadata, SegmentSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Request to extract fields from a document
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Document text
    pub text: String,

    /// Extraction schema passed through to the collaborator unchanged
    pub schema: Value,

    /// Document metadata copied onto every segment
    pub metadata: Option<SegmentMetadata>,
}

impl ExtractionRequest {
    /// Create a request without document metadata
    pub fn new(text: impl Into<String>, schema: Value) -> Self {
        Self {
            text: text.into(),
            schema,
            metadata: None,
        }
    }

    /// Attach document metadata
    pub fn with_metadata(mut self, metadata: SegmentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Result of extracting fields from a document
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Fields reconciled across all successful segments
    pub merged: MergedResult,

    /// How the document was processed
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Number of partial results that contributed to the merge
    pub fn sources_merged(&self) -> usize {
        self.merged.sources_merged
    }
}

/// A segment whose extraction was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentFailure {
    /// Index of the failed segment
    pub index: usize,

    /// Why the segment was dropped
    pub reason: String,
}

impl fmt::Display for SegmentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment {}: {}", self.index, self.reason)
    }
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMetadata {
    /// Mode actually used (hybrid resolves to full or chunked)
    pub mode: ProcessingMode,

    /// Chunking strategy; `None` when the whole text went in one call
    pub strategy: Option<ChunkStrategy>,

    /// Segments produced by chunking, before any cap
    pub segments_produced: usize,

    /// Segments sent to extraction
    pub segments_processed: usize,

    /// Whether the segment cap dropped trailing segments
    pub truncated: bool,

    /// Segments dropped during extraction
    pub failures: Vec<SegmentFailure>,

    /// Position of every processed segment
    pub segments: Vec<SegmentSummary>,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
