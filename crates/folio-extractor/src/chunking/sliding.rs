//! Uniform sliding windows

use super::text::Span;

/// Windows of `size` characters over `[0, len)` advanced by `stride`
///
/// Stops once a window reaches the end of the text. A stride larger than
/// `size` leaves gaps between windows.
pub(crate) fn split(len: usize, size: usize, stride: usize) -> Vec<Span> {
    debug_assert!(stride > 0, "stride is validated at construction");

    let mut spans = Vec::new();
    let mut start = 0;
    while start < len {
        let end = (start + size).min(len);
        spans.push(Span::new(start, end));
        if end == len {
            break;
        }
        start += stride;
    }
    spans
}
