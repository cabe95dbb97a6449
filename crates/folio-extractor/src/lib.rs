//! Folio Extractor
//!
//! Adaptive chunking and multi-segment extraction merge for long documents.
//!
//! # Overview
//!
//! Extraction collaborators work best on text that fits their context. The
//! extractor decides whether a document can go in one call, splits it into
//! ordered segments when it cannot, sends each segment to the collaborator,
//! and reconciles the per-segment results into one merged result, keeping the
//! most confident value for every field.
//!
//! # Architecture
//!
//! ```text
//! Text → Decider → Chunker → Segments → Invoker → Partials → Merge → Result
//! ```
//!
//! # Key Features
//!
//! - **Chunking strategies**: fixed size, sentence-aware, semantic (section
//!   headers) and sliding window, with overlap between segments
//! - **Hybrid processing**: whole document when it fits, segments otherwise
//! - **Bounded concurrency**: segments are extracted in parallel up to a cap
//! - **Partial failure tolerance**: failing segments are skipped and reported
//! - **Confidence merge**: highest confidence wins, ties keep the earliest segment
//!
//! # Example Usage
//!
//! ```
//! use folio_domain::PartialResult;
//! use folio_extractor::{decide_and_extract, ProcessingConfig};
//! use folio_providers::MockExtractor;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let extractor = MockExtractor::new(
//!     PartialResult::new().with_field("blood_type", json!("O+"), 0.8),
//! );
//! let config = ProcessingConfig::default();
//! let schema = json!({"blood_type": "string"});
//!
//! let result = decide_and_extract("Blood type O+.", &config, extractor, &schema)
//!     .await
//!     .unwrap();
//!
//! assert_eq!(result.merged.get("blood_type"), Some(&json!("O+")));
//! assert_eq!(result.merged.sources_merged, 1);
//! # });
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod decider;
mod error;
mod invoker;
mod merge;
mod pipeline;
mod types;


pub use chunking::{chunk, TextChunker};
pub use config::{ChunkParams, ChunkStrategy, ProcessingConfig, ProcessingMode};
pub use decider::{ProcessingDecider, ProcessingPlan};
pub use error::ExtractorError;
pub use invoker::{InvocationOutcome, SegmentInvoker};
pub use merge::merge;
pub use pipeline::{decide_and_extract, Pipeline};
pub use types::{ExtractionMetadata, ExtractionRequest, ExtractionResult, SegmentFailure};
