//! Configuration for the extraction pipeline

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Text chunking strategy for large documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Fixed-size windows pulled back to word boundaries
    FixedSize,
    /// Greedy packing of whole sentences
    #[default]
    SentenceAware,
    /// Packing of structural sections (headers, numbered sections, rules)
    Semantic,
    /// Uniform windows advanced by a fixed stride
    SlidingWindow,
}

impl ChunkStrategy {
    /// Every strategy, in declaration order
    pub const ALL: [ChunkStrategy; 4] = [
        ChunkStrategy::FixedSize,
        ChunkStrategy::SentenceAware,
        ChunkStrategy::Semantic,
        ChunkStrategy::SlidingWindow,
    ];

    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStrategy::FixedSize => "fixed_size",
            ChunkStrategy::SentenceAware => "sentence_aware",
            ChunkStrategy::Semantic => "semantic",
            ChunkStrategy::SlidingWindow => "sliding_window",
        }
    }

    /// Parse a strategy name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "fixed_size" => Some(ChunkStrategy::FixedSize),
            "sentence_aware" => Some(ChunkStrategy::SentenceAware),
            "semantic" => Some(ChunkStrategy::Semantic),
            "sliding_window" => Some(ChunkStrategy::SlidingWindow),
            _ => None,
        }
    }

    /// Resolve a strategy name, falling back to sentence-aware for unknown names
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            warn!("Unknown chunking strategy '{}', using sentence_aware", name);
            ChunkStrategy::SentenceAware
        })
    }
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a document is dispatched to the extraction collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// One extraction call on the whole text
    #[serde(alias = "full_document")]
    Full,
    /// Always split into segments
    Chunked,
    /// Whole text if it fits in one chunk, otherwise chunked
    #[default]
    Hybrid,
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessingMode::Full => "full",
            ProcessingMode::Chunked => "chunked",
            ProcessingMode::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

/// Size parameters shared by all chunking strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    /// Soft upper bound on segment length (characters)
    pub chunk_size: usize,
    /// Characters repeated between consecutive segments
    pub overlap: usize,
    /// Sliding window advance; `chunk_size - overlap` when unset
    pub stride: Option<usize>,
}

impl ChunkParams {
    /// Create parameters without an explicit stride
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            stride: None,
        }
    }

    /// Set the sliding window stride
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }

    /// Effective sliding window stride
    pub fn effective_stride(&self) -> usize {
        self.stride
            .unwrap_or_else(|| self.chunk_size.saturating_sub(self.overlap))
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.chunk_size == 0 {
            return Err(ExtractorError::InvalidChunkSize(self.chunk_size));
        }
        if self.overlap >= self.chunk_size {
            return Err(ExtractorError::InvalidOverlap(self.overlap, self.chunk_size));
        }
        if self.stride == Some(0) {
            return Err(ExtractorError::InvalidStride(0));
        }
        Ok(())
    }
}

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Chunking strategy name; unknown names fall back to sentence_aware
    pub chunking_strategy: String,

    /// Target segment size (characters)
    pub chunk_size: usize,

    /// Overlap between consecutive segments (characters)
    pub chunk_overlap: usize,

    /// Explicit stride for the sliding window strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sliding_window_stride: Option<usize>,

    /// Dispatch mode
    pub processing_strategy: ProcessingMode,

    /// Maximum number of segments sent to extraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_segments: Option<usize>,

    /// Maximum concurrent extraction calls
    pub max_concurrency: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Maximum time for a whole document (seconds)
    pub document_timeout_secs: u64,
}

impl ProcessingConfig {
    /// Get the per-call extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Get the per-document timeout as a Duration
    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_secs)
    }

    /// Resolve the configured chunking strategy
    pub fn chunk_strategy(&self) -> ChunkStrategy {
        ChunkStrategy::from_name(&self.chunking_strategy)
    }

    /// Chunk size parameters
    pub fn chunk_params(&self) -> ChunkParams {
        ChunkParams {
            chunk_size: self.chunk_size,
            overlap: self.chunk_overlap,
            stride: self.sliding_window_stride,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        self.chunk_params().validate()?;
        if self.max_segments == Some(0) {
            return Err(ExtractorError::Config(
                "max_segments must be greater than 0".to_string(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(ExtractorError::Config(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }
        if self.extraction_timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "extraction_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.document_timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "document_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ProcessingConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            chunking_strategy: ChunkStrategy::Semantic.as_str().to_string(),
            chunk_size: 4_000,
            chunk_overlap: 200,
            sliding_window_stride: None,
            processing_strategy: ProcessingMode::Hybrid,
            max_segments: None,
            max_concurrency: 4,
            extraction_timeout_secs: 120,
            document_timeout_secs: 600,
        }
    }
}

impl ProcessingConfig {
    /// Aggressive preset: small segments, capped segment count, short timeouts
    pub fn aggressive() -> Self {
        Self {
            chunking_strategy: ChunkStrategy::SentenceAware.as_str().to_string(),
            chunk_size: 2_000,
            chunk_overlap: 100,
            sliding_window_stride: None,
            processing_strategy: ProcessingMode::Hybrid,
            max_segments: Some(20),
            max_concurrency: 8,
            extraction_timeout_secs: 60,
            document_timeout_secs: 300,
        }
    }

    /// Lenient preset: large segments, no cap, long timeouts
    pub fn lenient() -> Self {
        Self {
            chunking_strategy: ChunkStrategy::Semantic.as_str().to_string(),
            chunk_size: 8_000,
            chunk_overlap: 400,
            sliding_window_stride: None,
            processing_strategy: ProcessingMode::Hybrid,
            max_segments: None,
            max_concurrency: 2,
            extraction_timeout_secs: 300,
            document_timeout_secs: 1_800,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
