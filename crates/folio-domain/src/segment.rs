//! Segment module - one slice of a source document

use serde::{Deserialize, Serialize};

/// Opaque caller metadata attached to every segment of a run
pub type SegmentMetadata = serde_json::Map<String, serde_json::Value>;

/// A contiguous slice of source text produced by a chunking strategy
///
/// Offsets are measured in characters (Unicode scalar values), not bytes.
/// Consecutive segments may share characters when the strategy was
/// configured with an overlap.
///
/// # Examples
///
/// ```
/// use folio_domain::Segment;
///
/// let segment = Segment::whole("  Patient: Jane Doe  ", None);
/// assert_eq!(segment.content, "Patient: Jane Doe");
/// assert_eq!(segment.index, 0);
/// assert_eq!(segment.total_count, 1);
/// assert!(segment.is_first() && segment.is_last());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment text, never blank
    pub content: String,

    /// Position among the segments of the same run
    pub index: usize,

    /// Number of segments in the run
    pub total_count: usize,

    /// Character offset where the segment starts in the source text
    pub start_offset: usize,

    /// Character offset where the segment ends in the source text (exclusive)
    pub end_offset: usize,

    /// Caller metadata, propagated unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SegmentMetadata>,
}

impl Segment {
    /// Build the single segment that stands for an entire document
    pub fn whole(text: &str, metadata: Option<SegmentMetadata>) -> Self {
        Self {
            content: text.trim().to_string(),
            index: 0,
            total_count: 1,
            start_offset: 0,
            end_offset: text.chars().count(),
            metadata,
        }
    }

    /// Length of the content in characters
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// True if the content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True for the first segment of a run
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// True for the last segment of a run
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total_count
    }

    /// Positional summary without the content, for result metadata
    pub fn summary(&self) -> SegmentSummary {
        SegmentSummary {
            index: self.index,
            total_count: self.total_count,
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            length: self.len(),
        }
    }
}

/// Positional description of a processed segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Segment index
    pub index: usize,
    /// Number of segments in the run
    pub total_count: usize,
    /// Start offset in characters
    pub start_offset: usize,
    /// End offset in characters (exclusive)
    pub end_offset: usize,
    /// Content length in characters
    pub length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_counts_characters() {
        let segment = Segment::whole("Größe: 1,80 m", None);
        assert_eq!(segment.end_offset, 13);
        assert_eq!(segment.len(), 13);
    }

    #[test]
    fn test_whole_keeps_metadata() {
        let mut metadata = SegmentMetadata::new();
        metadata.insert("page_count".to_string(), json!(3));

        let segment = Segment::whole("text", Some(metadata.clone()));
        assert_eq!(segment.metadata, Some(metadata));
    }

    #[test]
    fn test_first_and_last() {
        let segment = Segment {
            content: "middle".to_string(),
            index: 1,
            total_count: 3,
            start_offset: 10,
            end_offset: 16,
            metadata: None,
        };
        assert!(!segment.is_first());
        assert!(!segment.is_last());
    }

    #[test]
    fn test_summary() {
        let segment = Segment {
            content: "last part".to_string(),
            index: 2,
            total_count: 3,
            start_offset: 40,
            end_offset: 52,
            metadata: None,
        };
        let summary = segment.summary();
        assert_eq!(summary.index, 2);
        assert_eq!(summary.length, 9);
        assert_eq!(summary.end_offset, 52);
    }

    #[test]
    fn test_serialization_omits_missing_metadata() {
        let segment = Segment::whole("abc", None);
        let value = serde_json::to_value(&segment).unwrap();
        assert!(value.get("metadata").is_none());
        assert_eq!(value["total_count"], json!(1));
    }
}
