//! Structural ("semantic") chunking on section boundaries

use super::sentence;
use super::text::{CharText, Span};
use regex::Regex;
use std::collections::BTreeSet;

/// Line patterns that open a new section
const SECTION_PATTERNS: [&str; 4] = [
    // Markdown headers
    r"(?mR)^#+\s+(.+)$",
    // ALL CAPS headers ending in a colon
    r"(?mR)^[A-Z][A-Z\s]+:$",
    // Numbered sections
    r"(?mR)^\d+\.\s+[A-Z]",
    // Horizontal rules
    r"(?mR)^-{3,}$",
];

/// Compiled section boundary detectors
#[derive(Debug, Clone)]
pub(crate) struct SectionDetector {
    patterns: Vec<Regex>,
}

impl SectionDetector {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = SECTION_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Sorted, deduplicated character positions where a section starts
    pub fn boundaries(&self, text: &CharText<'_>) -> Vec<usize> {
        let mut positions = BTreeSet::new();
        for pattern in &self.patterns {
            for hit in pattern.find_iter(text.as_str()) {
                positions.insert(text.position_of_byte(hit.start()));
            }
        }
        positions.into_iter().collect()
    }

    /// Sections of `text`, or `None` when no boundary was found
    pub fn sections(&self, text: &CharText<'_>) -> Option<Vec<Span>> {
        let boundaries = self.boundaries(text);
        if boundaries.is_empty() {
            return None;
        }

        let mut starts = Vec::with_capacity(boundaries.len() + 1);
        if boundaries[0] > 0 {
            starts.push(0);
        }
        starts.extend(boundaries);

        let sections = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(text.len());
                Span::new(start, end)
            })
            .collect();
        Some(sections)
    }
}

/// Pack sections into spans, splitting oversized sections by sentence
///
/// Falls back to sentence-aware chunking of the whole text when the text has
/// no section boundaries.
pub(crate) fn split(
    text: &CharText<'_>,
    detector: &SectionDetector,
    size: usize,
    overlap: usize,
) -> Vec<Span> {
    let whole = Span::new(0, text.len());
    match detector.sections(text) {
        Some(sections) => sentence::pack(&sections, size, overlap, |section| {
            sentence::split(text, section, size, overlap)
        }),
        None => sentence::split(text, whole, size, overlap),
    }
}
