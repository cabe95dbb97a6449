//! Extraction results - per-segment partials and the merged document result

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Confidence assigned to a field that carries no explicit score
pub const DEFAULT_CONFIDENCE: f64 = 0.0;

/// Field values and confidence produced by one extraction call
///
/// # Examples
///
/// ```
/// use folio_domain::PartialResult;
/// use serde_json::json;
///
/// let partial = PartialResult::new()
///     .with_field("patient_name", json!("Jane Doe"), 0.92)
///     .with_field("blood_type", json!("O+"), 0.75);
///
/// assert_eq!(partial.confidence_of("patient_name"), 0.92);
/// assert_eq!(partial.confidence_of("allergies"), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialResult {
    /// Extracted field values keyed by field name
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,

    /// Confidence per field in [0.0, 1.0]
    #[serde(default)]
    pub confidence: BTreeMap<String, f64>,
}

impl PartialResult {
    /// Create an empty partial result
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its confidence
    pub fn with_field(mut self, name: impl Into<String>, value: Value, confidence: f64) -> Self {
        let name = name.into();
        self.fields.insert(name.clone(), value);
        self.confidence.insert(name, confidence);
        self
    }

    /// Confidence for a field, 0.0 when none was reported
    pub fn confidence_of(&self, field: &str) -> f64 {
        self.confidence
            .get(field)
            .copied()
            .unwrap_or(DEFAULT_CONFIDENCE)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field was extracted
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Give every field a confidence entry and drop scores for absent fields
    pub fn normalized(mut self) -> Self {
        let fields = &self.fields;
        self.confidence.retain(|name, _| fields.contains_key(name));
        for name in self.fields.keys() {
            self.confidence
                .entry(name.clone())
                .or_insert(DEFAULT_CONFIDENCE);
        }
        self
    }

    /// Check that every confidence is a finite number in [0.0, 1.0]
    pub fn validate(&self) -> Result<(), String> {
        for (name, score) in &self.confidence {
            if !score.is_finite() || *score < 0.0 || *score > 1.0 {
                return Err(format!(
                    "confidence {} for field '{}' out of range [0.0, 1.0]",
                    score, name
                ));
            }
        }
        Ok(())
    }
}

/// Reconciled extraction output for a whole document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergedResult {
    /// Winning value per field
    pub fields: BTreeMap<String, Value>,

    /// Confidence of each winning value
    pub confidence: BTreeMap<String, f64>,

    /// Number of partial results that were combined
    pub sources_merged: usize,
}

impl MergedResult {
    /// Value of a field, if any partial supplied it
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Confidence for a field, 0.0 when absent
    pub fn confidence_of(&self, field: &str) -> f64 {
        self.confidence
            .get(field)
            .copied()
            .unwrap_or(DEFAULT_CONFIDENCE)
    }

    /// Strip the merge bookkeeping and return the partial-result shape
    pub fn into_partial(self) -> PartialResult {
        PartialResult {
            fields: self.fields,
            confidence: self.confidence,
        }
    }
}

impl From<PartialResult> for MergedResult {
    fn from(partial: PartialResult) -> Self {
        Self {
            fields: partial.fields,
            confidence: partial.confidence,
            sources_merged: 1,
        }
    }
}
