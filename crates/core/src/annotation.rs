//! Append-only annotation log.

use serde::Serialize;

use crate::error::CoreError;

/// CSV export header for the annotation log, in column order.
pub const EXPORT_HEADER: [&str; 6] = ["BriquetteID", "briq_idx", "Signal", "t_sec", "Value", "Note"];

/// One user-authored note tied to a clicked point and its resolved
/// briquette. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub briquette_id: String,
    pub briq_idx: usize,
    pub signal: String,
    /// Elapsed seconds of the click, not necessarily an exact row value.
    pub t_sec: f64,
    /// Signal value at the clicked point.
    pub value: f64,
    /// Free text; may be empty.
    pub note: String,
}

/// Ordered, append-only record store for one session's annotations.
#[derive(Debug, Clone, Default)]
pub struct AnnotationLog {
    entries: Vec<Annotation>,
}

impl AnnotationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    ///
    /// The only rejection is malformed input: an empty identifier or
    /// an empty signal name. Records are never mutated or removed.
    pub fn append(&mut self, annotation: Annotation) -> Result<(), CoreError> {
        if annotation.briquette_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "Annotation is missing a briquette identifier".to_string(),
            ));
        }
        if annotation.signal.trim().is_empty() {
            return Err(CoreError::Validation(
                "Annotation is missing a signal name".to_string(),
            ));
        }
        self.entries.push(annotation);
        Ok(())
    }

    /// All records in creation order.
    pub fn all(&self) -> &[Annotation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the full log as UTF-8 CSV: the export header plus
    /// one line per record in creation order. Deterministic: two
    /// calls with no intervening append produce identical bytes.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(EXPORT_HEADER)
            .map_err(|e| CoreError::Internal(format!("CSV write failed: {e}")))?;
        for a in &self.entries {
            writer
                .write_record([
                    a.briquette_id.as_str(),
                    &a.briq_idx.to_string(),
                    a.signal.as_str(),
                    &a.t_sec.to_string(),
                    &a.value.to_string(),
                    a.note.as_str(),
                ])
                .map_err(|e| CoreError::Internal(format!("CSV write failed: {e}")))?;
        }
        writer
            .into_inner()
            .map_err(|e| CoreError::Internal(format!("CSV flush failed: {e}")))
    }
}
