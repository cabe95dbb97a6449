//! Processing mode decision and segment planning

use crate::chunking::TextChunker;
use crate::config::{ProcessingConfig, ProcessingMode};
use crate::error::ExtractorError;
use folio_domain::{Segment, SegmentMetadata};
use tracing::{info, warn};

/// Segments to send to extraction for one document
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingPlan {
    /// Effective mode, `Full` or `Chunked`
    pub mode: ProcessingMode,

    /// Segments to process, in order
    pub segments: Vec<Segment>,

    /// Segments chunking produced before the cap was applied
    pub segments_produced: usize,

    /// Whether trailing segments were dropped by `max_segments`
    pub truncated: bool,
}

/// Decides between whole-document and segmented extraction
#[derive(Debug, Clone)]
pub struct ProcessingDecider {
    mode: ProcessingMode,
    chunker: TextChunker,
    max_segments: Option<usize>,
}

impl ProcessingDecider {
    /// Create a decider from a configuration
    pub fn new(config: &ProcessingConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self {
            mode: config.processing_strategy,
            chunker: TextChunker::new(config.chunk_strategy(), config.chunk_params())?,
            max_segments: config.max_segments,
        })
    }

    /// The chunker used for segmented extraction
    pub fn chunker(&self) -> &TextChunker {
        &self.chunker
    }

    /// Resolve the configured mode for a document of `length` characters
    pub fn decide(&self, length: usize) -> ProcessingMode {
        match self.mode {
            ProcessingMode::Hybrid if length <= self.chunker.params().chunk_size => {
                ProcessingMode::Full
            }
            ProcessingMode::Hybrid => ProcessingMode::Chunked,
            mode => mode,
        }
    }

    /// Build the segment plan for `text`
    pub fn plan(
        &self,
        text: &str,
        metadata: Option<&SegmentMetadata>,
    ) -> Result<ProcessingPlan, ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyDocument);
        }

        let length = text.chars().count();
        let mode = self.decide(length);

        let mut segments = match mode {
            ProcessingMode::Full => vec![Segment::whole(text, metadata.cloned())],
            _ => self.chunker.chunk(text, metadata),
        };

        if segments.is_empty() {
            return Err(ExtractorError::NoSegments(length));
        }

        let segments_produced = segments.len();
        let truncated = match self.max_segments {
            Some(max) if segments_produced > max => {
                warn!(
                    "Document produced {} segments, processing only the first {}",
                    segments_produced, max
                );
                segments.truncate(max);
                true
            }
            _ => false,
        };

        info!(
            "Processing {} chars in {} mode: {} segments ({})",
            length,
            mode,
            segments.len(),
            self.chunker.strategy()
        );

        Ok(ProcessingPlan {
            mode,
            segments,
            segments_produced,
            truncated,
        })
    }
}
