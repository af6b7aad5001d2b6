//! Full-data CSV export.
//!
//! The annotations export lives on [`crate::annotation::AnnotationLog`];
//! this module serializes the whole dataset: every original column,
//! then the derived `t_sec` and `briq_idx`, then the stamped
//! `BriquetteID` and `Note` columns.

use crate::dataset::Dataset;
use crate::error::CoreError;

/// Serialize the dataset as UTF-8 CSV, one line per input row in
/// stored (time-sorted) order.
///
/// Cells for undefined elapsed seconds and unstamped identifier/note
/// columns are left empty. Deterministic for a given dataset state.
pub fn dataset_to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = dataset.columns().iter().map(|c| c.name.as_str()).collect();
    header.extend(["t_sec", "briq_idx", "BriquetteID", "Note"]);
    writer
        .write_record(&header)
        .map_err(|e| CoreError::Internal(format!("CSV write failed: {e}")))?;

    for row in dataset.rows() {
        let mut record: Vec<String> = row.raw.clone();
        record.push(row.t_sec.map(|t| t.to_string()).unwrap_or_default());
        record.push(row.briq_idx.to_string());
        record.push(row.briquette_id.clone().unwrap_or_default());
        record.push(row.note.clone().unwrap_or_default());
        writer
            .write_record(&record)
            .map_err(|e| CoreError::Internal(format!("CSV write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV flush failed: {e}")))
}
