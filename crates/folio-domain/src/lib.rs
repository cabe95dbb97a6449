//! Folio Domain Layer
//!
//! This crate contains the data model shared by every other Folio crate. It
//! defines the values that flow through a document extraction run and the
//! trait boundary to the external extraction collaborator.
//!
//! ## Key Concepts
//!
//! - **Segment**: An immutable slice of source text with its position in the batch
//! - **Partial Result**: Field values and per-field confidence from one extraction call
//! - **Merged Result**: The reconciled output for a whole document
//! - **Field Extractor**: The collaborator that turns `(text, schema)` into a partial result
//!
//! ## Architecture
//!
//! - No I/O and no model calls
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extraction;
pub mod segment;
pub mod traits;

// Re-exports for convenience
pub use extraction::{MergedResult, PartialResult};
pub use segment::{Segment, SegmentMetadata, SegmentSummary};
pub use traits::FieldExtractor;
