//! Sentence-aware packing

use super::fixed;
use super::text::{CharText, Span};

/// Split `range` into sentences
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace and an uppercase
/// letter. Each sentence keeps its trailing whitespace, so the returned spans
/// tile `range` without gaps.
pub(crate) fn sentences(text: &CharText<'_>, range: Span) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = range.start;
    let mut i = range.start;

    while i < range.end {
        if matches!(text.char_at(i), '.' | '!' | '?') {
            let mut next = i + 1;
            while next < range.end && text.char_at(next).is_whitespace() {
                next += 1;
            }
            if next > i + 1 && next < range.end && text.char_at(next).is_uppercase() {
                spans.push(Span::new(start, next));
                start = next;
                i = next;
                continue;
            }
        }
        i += 1;
    }

    if start < range.end {
        spans.push(Span::new(start, range.end));
    }
    spans
}

/// Sentence-aware split of `range`, falling back to fixed-size windows for
/// sentences longer than `size`
pub(crate) fn split(text: &CharText<'_>, range: Span, size: usize, overlap: usize) -> Vec<Span> {
    let units = sentences(text, range);
    pack(&units, size, overlap, |sentence| {
        fixed::split(text, sentence, size, overlap)
    })
}

/// Greedily pack contiguous units into spans of at most `size` characters
///
/// When the next unit does not fit, the current buffer is emitted and the new
/// buffer is seeded with whole trailing units spanning at most `overlap`
/// characters. The first unit of a buffer is never reused as seed, so every
/// emitted span ends further right than the previous one. Units longer than
/// `size` flush the buffer and are handed to `split_oversized`.
pub(crate) fn pack<F>(units: &[Span], size: usize, overlap: usize, split_oversized: F) -> Vec<Span>
where
    F: Fn(Span) -> Vec<Span>,
{
    let mut spans = Vec::new();
    let mut buffer: Vec<Span> = Vec::new();

    for &unit in units {
        if unit.len() > size {
            if let Some(span) = covering(&buffer) {
                spans.push(span);
            }
            buffer.clear();
            spans.extend(split_oversized(unit));
            continue;
        }

        let overflows = buffer
            .first()
            .is_some_and(|first| unit.end - first.start > size);

        if overflows {
            if let Some(span) = covering(&buffer) {
                spans.push(span);
            }
            buffer = overlap_seed(&buffer, overlap);
            while buffer
                .first()
                .is_some_and(|first| unit.end - first.start > size)
            {
                buffer.remove(0);
            }
        }

        buffer.push(unit);
    }

    if let Some(span) = covering(&buffer) {
        spans.push(span);
    }
    spans
}

fn covering(buffer: &[Span]) -> Option<Span> {
    match (buffer.first(), buffer.last()) {
        (Some(first), Some(last)) => Some(Span::new(first.start, last.end)),
        _ => None,
    }
}

fn overlap_seed(buffer: &[Span], overlap: usize) -> Vec<Span> {
    let Some(end) = buffer.last().map(|unit| unit.end) else {
        return Vec::new();
    };

    let mut keep_from = buffer.len();
    while keep_from > 1 && end - buffer[keep_from - 1].start <= overlap {
        keep_from -= 1;
    }
    buffer[keep_from..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence_texts(text: &str) -> Vec<String> {
        let chars = CharText::new(text);
        sentences(&chars, Span::new(0, chars.len()))
            .into_iter()
            .map(|span| chars.slice(span).to_string())
            .collect()
    }

    #[test]
    fn test_sentence_boundaries() {
        let parts = sentence_texts("First one. Second one! Third one? fourth stays. Fifth.");
        assert_eq!(
            parts,
            vec!["First one. ", "Second one! ", "Third one? fourth stays. ", "Fifth."]
        );
    }

    #[test]
    fn test_abbreviation_without_capital_is_not_boundary() {
        let parts = sentence_texts("Take 5 mg. daily with food. Then rest.");
        assert_eq!(parts, vec!["Take 5 mg. daily with food. ", "Then rest."]);
    }

    #[test]
    fn test_punctuation_needs_whitespace() {
        let parts = sentence_texts("Version 2.Final release. Done.");
        assert_eq!(parts, vec!["Version 2.Final release. ", "Done."]);
    }

    #[test]
    fn test_pack_respects_size() {
        let units: Vec<Span> = (0..10).map(|i| Span::new(i * 10, i * 10 + 10)).collect();
        let spans = pack(&units, 35, 0, |unit| vec![unit]);

        assert_eq!(spans, vec![Span::new(0, 30), Span::new(30, 60), Span::new(60, 90), Span::new(90, 100)]);
    }

    #[test]
    fn test_pack_seeds_overlap_with_whole_units() {
        let units: Vec<Span> = (0..6).map(|i| Span::new(i * 10, i * 10 + 10)).collect();
        let spans = pack(&units, 30, 15, |unit| vec![unit]);

        // One trailing unit (10 chars) fits in the overlap budget, two do not.
        assert_eq!(spans, vec![Span::new(0, 30), Span::new(20, 50), Span::new(40, 60)]);
    }

    #[test]
    fn test_pack_never_reuses_whole_buffer() {
        let units = vec![Span::new(0, 5), Span::new(5, 40)];
        let spans = pack(&units, 38, 30, |unit| vec![unit]);

        assert_eq!(spans, vec![Span::new(0, 5), Span::new(5, 40)]);
    }

    #[test]
    fn test_pack_hands_off_oversized_units() {
        let units = vec![Span::new(0, 10), Span::new(10, 100), Span::new(100, 110)];
        let spans = pack(&units, 50, 0, |unit| {
            vec![Span::new(unit.start, unit.start + 45), Span::new(unit.start + 45, unit.end)]
        });

        assert_eq!(
            spans,
            vec![Span::new(0, 10), Span::new(10, 55), Span::new(55, 100), Span::new(100, 110)]
        );
    }

    #[test]
    fn test_long_sentence_falls_back_to_fixed() {
        let long = format!("Start {}. Short end.", "word ".repeat(30));
        let chars = CharText::new(&long);
        let spans = split(&chars, Span::new(0, chars.len()), 40, 0);

        assert!(spans.len() > 3);
        assert!(spans.iter().all(|span| span.len() <= 40));
        assert_eq!(spans.last().map(|s| s.end), Some(chars.len()));
    }
}
