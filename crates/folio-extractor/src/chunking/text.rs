//! Character-indexed view of source text and segment assembly

use folio_domain::{Segment, SegmentMetadata};

/// Half-open range of character positions `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Source text addressable by character position
pub(crate) struct CharText<'a> {
    text: &'a str,
    chars: Vec<char>,
    // byte offset of every character, plus text.len() as a sentinel
    bounds: Vec<usize>,
}

impl<'a> CharText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut bounds = Vec::with_capacity(text.len() + 1);
        for (offset, c) in text.char_indices() {
            chars.push(c);
            bounds.push(offset);
        }
        bounds.push(text.len());
        Self {
            text,
            chars,
            bounds,
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn char_at(&self, position: usize) -> char {
        self.chars[position]
    }

    pub fn slice(&self, span: Span) -> &'a str {
        &self.text[self.bounds[span.start]..self.bounds[span.end]]
    }

    /// Character position of a byte offset that lies on a char boundary
    pub fn position_of_byte(&self, byte_offset: usize) -> usize {
        self.bounds
            .binary_search(&byte_offset)
            .unwrap_or_else(|insert_at| insert_at)
    }
}

/// Turn raw spans into stamped segments
///
/// Blank spans are dropped before indices are assigned, then every segment
/// receives the final batch size.
pub(crate) fn finalize(
    text: &CharText<'_>,
    spans: Vec<Span>,
    metadata: Option<&SegmentMetadata>,
) -> Vec<Segment> {
    let drafts: Vec<(Span, &str)> = spans
        .into_iter()
        .filter_map(|span| {
            let content = text.slice(span).trim();
            (!content.is_empty()).then_some((span, content))
        })
        .collect();

    let total_count = drafts.len();
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, (span, content))| Segment {
            content: content.to_string(),
            index,
            total_count,
            start_offset: span.start,
            end_offset: span.end,
            metadata: metadata.cloned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_multibyte() {
        let text = CharText::new("héllo wörld");
        assert_eq!(text.len(), 11);
        assert_eq!(text.slice(Span::new(0, 5)), "héllo");
        assert_eq!(text.slice(Span::new(6, 11)), "wörld");
        assert_eq!(text.char_at(7), 'ö');
    }

    #[test]
    fn test_position_of_byte() {
        let text = CharText::new("aé b");
        // 'a' = 0, 'é' = 1..3, ' ' = 3, 'b' = 4
        assert_eq!(text.position_of_byte(0), 0);
        assert_eq!(text.position_of_byte(3), 2);
        assert_eq!(text.position_of_byte(5), 4);
    }

    #[test]
    fn test_finalize_drops_blank_spans_and_stamps_total() {
        let text = CharText::new("alpha     beta");
        let spans = vec![Span::new(0, 5), Span::new(5, 10), Span::new(10, 14)];
        let segments = finalize(&text, spans, None);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].content, "alpha");
        assert_eq!(segments[1].content, "beta");
        assert_eq!(segments[1].index, 1);
        assert!(segments.iter().all(|s| s.total_count == 2));
        assert_eq!(segments[1].start_offset, 10);
    }
}
