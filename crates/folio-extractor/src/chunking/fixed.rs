//! Fixed-size windows with word boundary avoidance

use super::text::{CharText, Span};

/// Split `range` into windows of at most `size` characters
///
/// A window whose right edge falls mid-text is pulled back to just after the
/// last space inside it, provided that space is past the window start. The
/// next window starts `overlap` characters before the previous end, or at the
/// previous end when pull-back left no room for overlap.
pub(crate) fn split(text: &CharText<'_>, range: Span, size: usize, overlap: usize) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = range.start;

    while start < range.end {
        let mut end = (start + size).min(range.end);

        if end < range.end {
            if let Some(space) = (start + 1..end).rev().find(|&i| text.char_at(i) == ' ') {
                end = space + 1;
            }
        }

        spans.push(Span::new(start, end));

        if end >= range.end {
            break;
        }

        let next = end.saturating_sub(overlap);
        start = if next > start { next } else { end };
    }

    spans
}
