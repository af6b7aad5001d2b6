//! Column schema inference for uploaded sensor files.
//!
//! The upload is an untyped table; segmentation and plotting need to
//! know which columns are numeric signals before anything else runs.
//! Inference happens exactly once, at ingest, producing a typed
//! column list that the rest of the core consumes.

use serde::Serialize;

use crate::error::CoreError;

/// Name of the required timestamp column (after header trimming).
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Inferred role of one input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// The required `timestamp` column (raw text, normalized separately).
    Timestamp,
    /// Every non-empty value parses as `f64`; plottable signal.
    Numeric,
    /// Anything else.
    Text,
}

/// One column of the uploaded table with its inferred kind.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Infer the column schema from trimmed headers and raw records.
///
/// A column named `timestamp` must be present; its absence halts
/// ingest before any segmentation or plotting. A non-timestamp
/// column is `Numeric` when it has at least one non-empty value and
/// every non-empty value parses as `f64`.
pub fn infer_schema(headers: &[String], records: &[Vec<String>]) -> Result<Vec<Column>, CoreError> {
    if !headers.iter().any(|h| h == TIMESTAMP_COLUMN) {
        return Err(CoreError::Validation(format!(
            "Input file must contain a column named '{TIMESTAMP_COLUMN}'"
        )));
    }

    let columns = headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let kind = if name == TIMESTAMP_COLUMN {
                ColumnKind::Timestamp
            } else if is_numeric_column(i, records) {
                ColumnKind::Numeric
            } else {
                ColumnKind::Text
            };
            Column {
                name: name.clone(),
                kind,
            }
        })
        .collect();

    Ok(columns)
}

/// A column is numeric when at least one value is non-empty and all
/// non-empty values parse as `f64`.
fn is_numeric_column(index: usize, records: &[Vec<String>]) -> bool {
    let mut seen_value = false;
    for record in records {
        let cell = record.get(index).map(String::as_str).unwrap_or("");
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        if cell.parse::<f64>().is_err() {
            return false;
        }
        seen_value = true;
    }
    seen_value
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn missing_timestamp_column_rejected() {
        let err = infer_schema(&headers(&["time", "Power"]), &rows(&[&["0:01", "1.0"]]));
        assert_matches!(err, Err(CoreError::Validation(msg)) if msg.contains("timestamp"));
    }

    #[test]
    fn numeric_and_text_columns_detected() {
        let schema = infer_schema(
            &headers(&["timestamp", "Power", "Operator"]),
            &rows(&[&["0:01", "1.5", "alice"], &["0:02", "2.0", "bob"]]),
        )
        .unwrap();

        assert_eq!(schema[0].kind, ColumnKind::Timestamp);
        assert_eq!(schema[1].kind, ColumnKind::Numeric);
        assert_eq!(schema[2].kind, ColumnKind::Text);
    }

    #[test]
    fn empty_cells_do_not_break_numeric_detection() {
        let schema = infer_schema(
            &headers(&["timestamp", "Power"]),
            &rows(&[&["0:01", ""], &["0:02", "2.0"]]),
        )
        .unwrap();
        assert_eq!(schema[1].kind, ColumnKind::Numeric);
    }

    #[test]
    fn all_empty_column_is_text() {
        let schema = infer_schema(
            &headers(&["timestamp", "Power"]),
            &rows(&[&["0:01", ""], &["0:02", ""]]),
        )
        .unwrap();
        assert_eq!(schema[1].kind, ColumnKind::Text);
    }

    #[test]
    fn mixed_column_is_text() {
        let schema = infer_schema(
            &headers(&["timestamp", "Power"]),
            &rows(&[&["0:01", "1.0"], &["0:02", "n/a"]]),
        )
        .unwrap();
        assert_eq!(schema[1].kind, ColumnKind::Text);
    }
}
