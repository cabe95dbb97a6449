//! Text chunking strategies for large documents
//!
//! Every strategy maps text to an ordered sequence of [`Segment`]s whose
//! offsets are character positions in the source. Strategies compose by
//! plain function calls: structural sections that are too large are split by
//! sentence, and sentences that are too large are split into fixed windows.
//! Each step works on a strictly smaller range, so recursion is bounded.

mod fixed;
mod semantic;
mod sentence;
mod sliding;
mod text;

use crate::config::{ChunkParams, ChunkStrategy};
use crate::error::ExtractorError;
use folio_domain::{Segment, SegmentMetadata};
use semantic::SectionDetector;
use text::{finalize, CharText, Span};
use tracing::debug;

/// Chunks text according to the specified strategy
///
/// Parameters are validated at construction, so [`TextChunker::chunk`]
/// cannot fail.
///
/// # Examples
///
/// ```
/// use folio_extractor::{ChunkParams, ChunkStrategy, TextChunker};
///
/// let chunker = TextChunker::new(ChunkStrategy::SentenceAware, ChunkParams::new(40, 0)).unwrap();
/// let segments = chunker.chunk(
///     "The patient reports chest pain. Onset was two days ago. No fever.",
///     None,
/// );
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].content, "The patient reports chest pain.");
/// assert!(segments.iter().all(|s| s.total_count == 2));
/// ```
#[derive(Debug, Clone)]
pub struct TextChunker {
    strategy: ChunkStrategy,
    params: ChunkParams,
    sections: SectionDetector,
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(strategy: ChunkStrategy, params: ChunkParams) -> Result<Self, ExtractorError> {
        params.validate()?;
        Ok(Self {
            strategy,
            params,
            sections: SectionDetector::new()?,
        })
    }

    /// Create a chunker from a strategy name; unknown names use sentence-aware
    pub fn from_name(name: &str, params: ChunkParams) -> Result<Self, ExtractorError> {
        Self::new(ChunkStrategy::from_name(name), params)
    }

    /// The strategy in use
    pub fn strategy(&self) -> ChunkStrategy {
        self.strategy
    }

    /// The size parameters in use
    pub fn params(&self) -> ChunkParams {
        self.params
    }

    /// Chunk the given text
    ///
    /// Blank text yields no segments. Text no longer than the chunk size
    /// yields exactly one segment covering all of it.
    pub fn chunk(&self, text: &str, metadata: Option<&SegmentMetadata>) -> Vec<Segment> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chars = CharText::new(text);
        if chars.len() <= self.params.chunk_size {
            return vec![Segment::whole(text, metadata.cloned())];
        }

        let size = self.params.chunk_size;
        let overlap = self.params.overlap;
        let whole = Span::new(0, chars.len());

        let spans = match self.strategy {
            ChunkStrategy::FixedSize => fixed::split(&chars, whole, size, overlap),
            ChunkStrategy::SentenceAware => sentence::split(&chars, whole, size, overlap),
            ChunkStrategy::Semantic => semantic::split(&chars, &self.sections, size, overlap),
            ChunkStrategy::SlidingWindow => {
                sliding::split(chars.len(), size, self.params.effective_stride())
            }
        };

        let mut segments = finalize(&chars, spans, metadata);
        if segments.is_empty() {
            segments.push(Segment::whole(text, metadata.cloned()));
        }

        debug!(
            "Chunked {} chars into {} segments ({})",
            chars.len(),
            segments.len(),
            self.strategy
        );
        segments
    }
}

/// Chunk `text` with a named strategy
///
/// Convenience wrapper around [`TextChunker::from_name`] and
/// [`TextChunker::chunk`].
pub fn chunk(
    text: &str,
    strategy_name: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<Segment>, ExtractorError> {
    let chunker = TextChunker::from_name(strategy_name, ChunkParams::new(chunk_size, overlap))?;
    Ok(chunker.chunk(text, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunker(strategy: ChunkStrategy, size: usize, overlap: usize) -> TextChunker {
        TextChunker::new(strategy, ChunkParams::new(size, overlap)).unwrap()
    }

    fn prose(sentences: usize) -> String {
        (0..sentences)
            .map(|i| format!("Sentence number {} describes the visit.", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_no_chunking_needed_for_small_text() {
        for strategy in ChunkStrategy::ALL {
            let segments = chunker(strategy, 100, 10).chunk("  Short text here.  ", None);
            assert_eq!(segments.len(), 1);
            assert_eq!(segments[0].content, "Short text here.");
            assert_eq!(segments[0].index, 0);
            assert_eq!(segments[0].total_count, 1);
            assert_eq!(segments[0].start_offset, 0);
            assert_eq!(segments[0].end_offset, 20);
        }
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        for strategy in ChunkStrategy::ALL {
            assert!(chunker(strategy, 10, 0).chunk("", None).is_empty());
            assert!(chunker(strategy, 10, 0).chunk(&" ".repeat(50), None).is_empty());
        }
    }

    #[test]
    fn test_invalid_params_rejected_at_construction() {
        let zero = TextChunker::new(ChunkStrategy::FixedSize, ChunkParams::new(0, 0));
        assert!(matches!(zero, Err(ExtractorError::InvalidChunkSize(0))));

        let overlap = TextChunker::new(ChunkStrategy::SentenceAware, ChunkParams::new(100, 100));
        assert!(matches!(overlap, Err(ExtractorError::InvalidOverlap(100, 100))));

        let stride = TextChunker::new(
            ChunkStrategy::SlidingWindow,
            ChunkParams::new(100, 10).with_stride(0),
        );
        assert!(matches!(stride, Err(ExtractorError::InvalidStride(0))));
    }

    #[test]
    fn test_unknown_name_falls_back_to_sentence_aware() {
        let chunker = TextChunker::from_name("by_paragraph", ChunkParams::new(100, 0)).unwrap();
        assert_eq!(chunker.strategy(), ChunkStrategy::SentenceAware);

        let chunker = TextChunker::from_name("Sliding_Window", ChunkParams::new(100, 0)).unwrap();
        assert_eq!(chunker.strategy(), ChunkStrategy::SlidingWindow);
    }

    #[test]
    fn test_fixed_size_chunks() {
        let text = "word ".repeat(100);
        let segments = chunker(ChunkStrategy::FixedSize, 50, 10).chunk(&text, None);

        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(segment.len() <= 50);
            assert!(!segment.content.starts_with("ord"), "cut inside a word");
        }
    }

    #[test]
    fn test_sentence_aware_keeps_sentences_whole() {
        let text = prose(20);
        let segments = chunker(ChunkStrategy::SentenceAware, 200, 0).chunk(&text, None);

        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(segment.len() <= 200);
            assert!(segment.content.starts_with("Sentence number"));
            assert!(segment.content.ends_with("the visit."));
        }
    }

    #[test]
    fn test_sentence_aware_overlap_repeats_last_sentence() {
        let text = prose(12);
        let segments = chunker(ChunkStrategy::SentenceAware, 200, 60).chunk(&text, None);

        for pair in segments.windows(2) {
            let tail = pair[0]
                .content
                .rsplit(". ")
                .next()
                .unwrap_or_default();
            assert!(pair[1].content.starts_with(tail.trim_end_matches('.')));
            assert!(pair[1].start_offset < pair[0].end_offset);
        }
    }

    #[test]
    fn test_semantic_groups_sections() {
        let text = "HISTORY:\nAsthma since childhood.\n\nMEDICATIONS:\nAlbuterol as needed.\n\nALLERGIES:\nPenicillin causes rash.\n";
        let segments = chunker(ChunkStrategy::Semantic, 60, 0).chunk(text, None);

        assert_eq!(segments.len(), 3);
        assert!(segments[0].content.starts_with("HISTORY:"));
        assert!(segments[1].content.starts_with("MEDICATIONS:"));
        assert!(segments[2].content.starts_with("ALLERGIES:"));
    }

    #[test]
    fn test_semantic_packs_small_sections_together() {
        let text = "# A\nOne.\n# B\nTwo.\n# C\nThree.\n# D\nFour.\n";
        let segments = chunker(ChunkStrategy::Semantic, 22, 0).chunk(text, None);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].content, "# A\nOne.\n# B\nTwo.");
        assert_eq!(segments[1].content, "# C\nThree.\n# D\nFour.");
    }

    #[test]
    fn test_semantic_splits_oversized_section_by_sentence() {
        let text = format!("# Notes\n{}\n# Plan\nRest.", prose(10));
        let segments = chunker(ChunkStrategy::Semantic, 120, 0).chunk(&text, None);

        assert!(segments.len() > 2);
        assert!(segments.iter().all(|s| s.len() <= 120));
        assert_eq!(segments.last().map(|s| s.content.as_str()), Some("# Plan\nRest."));
    }

    #[test]
    fn test_semantic_without_structure_matches_sentence_aware() {
        let text = prose(10);
        let semantic = chunker(ChunkStrategy::Semantic, 150, 40).chunk(&text, None);
        let sentence = chunker(ChunkStrategy::SentenceAware, 150, 40).chunk(&text, None);
        assert_eq!(semantic, sentence);
    }

    #[test]
    fn test_sliding_window_chunks() {
        let text = "abcdefghij".repeat(5);
        let chunker = TextChunker::new(
            ChunkStrategy::SlidingWindow,
            ChunkParams::new(20, 0).with_stride(15),
        )
        .unwrap();
        let segments = chunker.chunk(&text, None);

        let offsets: Vec<_> = segments.iter().map(|s| (s.start_offset, s.end_offset)).collect();
        assert_eq!(offsets, vec![(0, 20), (15, 35), (30, 50)]);
        assert_eq!(segments[1].content, &text[15..35]);
    }

    #[test]
    fn test_metadata_propagated_to_every_segment() {
        let mut metadata = SegmentMetadata::new();
        metadata.insert("source".to_string(), json!("scan_001.pdf"));

        let text = prose(10);
        let segments = chunker(ChunkStrategy::FixedSize, 100, 0).chunk(&text, Some(&metadata));
        assert!(segments.len() > 1);
        assert!(segments.iter().all(|s| s.metadata.as_ref() == Some(&metadata)));
    }

    #[test]
    fn test_offsets_are_characters() {
        let text = "Fièvre élevée. ".repeat(10);
        let segments = chunker(ChunkStrategy::SentenceAware, 40, 0).chunk(&text, None);

        let total_chars = text.chars().count();
        assert_eq!(segments.last().map(|s| s.end_offset), Some(total_chars));
        for segment in &segments {
            let slice: String = text
                .chars()
                .skip(segment.start_offset)
                .take(segment.end_offset - segment.start_offset)
                .collect();
            assert_eq!(slice.trim(), segment.content);
        }
    }

    #[test]
    fn test_chunk_convenience() {
        let segments = chunk(&prose(10), "fixed_size", 100, 20).unwrap();
        assert!(segments.len() > 1);
        assert!(chunk("text", "fixed_size", 10, 10).is_err());
    }
}
