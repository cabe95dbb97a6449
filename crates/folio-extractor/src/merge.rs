//! Reconciliation of per-segment partial results

use crate::error::ExtractorError;
use folio_domain::extraction::DEFAULT_CONFIDENCE;
use folio_domain::{MergedResult, PartialResult};
use tracing::debug;

/// Merge ordered partial results into one result
///
/// A single partial passes through unchanged. Otherwise partials are visited
/// in order and a field value is replaced only when a later partial reports a
/// strictly greater confidence for it, so ties keep the earliest segment.
/// Fields that no partial reports are absent from the result. When several
/// partials are merged, each is normalized first, so every merged field has
/// a confidence entry and no confidence entry lacks a field.
///
/// # Examples
///
/// ```
/// use folio_domain::PartialResult;
/// use folio_extractor::merge;
/// use serde_json::json;
///
/// let first = PartialResult::new().with_field("age", json!(42), 0.6);
/// let second = PartialResult::new()
///     .with_field("age", json!(43), 0.9)
///     .with_field("sex", json!("F"), 0.8);
///
/// let merged = merge(vec![first, second]).unwrap();
/// assert_eq!(merged.get("age"), Some(&json!(43)));
/// assert_eq!(merged.get("sex"), Some(&json!("F")));
/// assert_eq!(merged.sources_merged, 2);
/// ```
pub fn merge(partials: Vec<PartialResult>) -> Result<MergedResult, ExtractorError> {
    let sources = partials.len();
    let mut iter = partials.into_iter();

    let Some(first) = iter.next() else {
        return Err(ExtractorError::NothingToMerge);
    };
    if sources == 1 {
        return Ok(MergedResult::from(first));
    }
    let mut merged = MergedResult::from(first.normalized());

    for (position, partial) in iter.enumerate() {
        let PartialResult { fields, confidence } = partial.normalized();
        for (name, value) in fields {
            let incoming = confidence
                .get(&name)
                .copied()
                .unwrap_or(DEFAULT_CONFIDENCE);

            let replace =
                !merged.fields.contains_key(&name) || incoming > merged.confidence_of(&name);

            if replace {
                debug!(
                    "Field '{}' taken from partial {} (confidence {:.2})",
                    name,
                    position + 1,
                    incoming
                );
                merged.confidence.insert(name.clone(), incoming);
                merged.fields.insert(name, value);
            }
        }
    }

    merged.sources_merged = sources;
    Ok(merged)
}
