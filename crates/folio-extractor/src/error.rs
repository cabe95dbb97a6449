//! Error types for the Extractor

use crate::types::SegmentFailure;
use thiserror::Error;

/// Errors that can occur during chunking and extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Chunk size must be positive
    #[error("Invalid chunk size: {0} (must be greater than 0)")]
    InvalidChunkSize(usize),

    /// Overlap must be smaller than the chunk size
    #[error("Invalid chunk overlap: {0} (must be less than chunk size {1})")]
    InvalidOverlap(usize, usize),

    /// Sliding window stride must advance
    #[error("Invalid sliding window stride: {0} (must be at least 1)")]
    InvalidStride(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document has no non-whitespace content
    #[error("Document is empty")]
    EmptyDocument,

    /// Chunking produced nothing for a non-empty document
    #[error("Chunking produced no segments for a {0}-character document")]
    NoSegments(usize),

    /// Every segment failed extraction
    #[error("All {} segments failed extraction", failures.len())]
    AllSegmentsFailed {
        /// Failure recorded for each attempted segment
        failures: Vec<SegmentFailure>,
    },

    /// Merge was called without partial results
    #[error("No partial results to merge")]
    NothingToMerge,

    /// Document processing exceeded its time budget
    #[error("Extraction timeout")]
    Timeout,
}

impl From<regex::Error> for ExtractorError {
    fn from(e: regex::Error) -> Self {
        ExtractorError::Config(format!("invalid boundary pattern: {}", e))
    }
}
