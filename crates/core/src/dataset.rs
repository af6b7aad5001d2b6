//! In-memory representation of one uploaded sensor file.
//!
//! A [`Dataset`] keeps every original cell (all columns survive to
//! export), the derived elapsed seconds per row, and the mutable
//! per-row annotation stamps (`briq_idx`, `BriquetteID`, `Note`).
//!
//! Undefined-timestamp policy: rows whose timestamp fails to parse
//! are KEPT. They sort to the end of the dataset (preserving their
//! relative input order) and are excluded from range-filtered views,
//! but they always appear in the full-data export.

use crate::error::CoreError;
use crate::schema::{infer_schema, Column, ColumnKind};
use crate::timestamp::to_seconds;

/// One input record plus its derived and stamped fields.
#[derive(Debug, Clone)]
pub struct Row {
    /// Original cells, aligned with [`Dataset::columns`].
    pub raw: Vec<String>,
    /// Elapsed seconds derived from the timestamp cell; `None` when
    /// the timestamp did not parse.
    pub t_sec: Option<f64>,
    /// Parsed values for numeric columns, aligned with
    /// [`Dataset::signal_names`]. `None` for empty cells.
    pub signals: Vec<Option<f64>>,
    /// Segment index assigned by the segmenter.
    pub briq_idx: usize,
    /// Identifier stamped by the first annotation on this segment.
    pub briquette_id: Option<String>,
    /// Note stamped by the most recent annotation with a non-empty note.
    pub note: Option<String>,
}

/// One uploaded sensor file, parsed, typed, and sorted by elapsed time.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    /// Names of numeric columns, in schema order.
    signal_names: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Parse a comma-separated, UTF-8, header-required byte buffer.
    ///
    /// Header names are whitespace-trimmed. A `timestamp` column is
    /// required. Rows are sorted ascending by elapsed seconds with
    /// undefined-timestamp rows at the end.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| CoreError::Validation(format!("Malformed CSV header: {e}")))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(CoreError::Validation(
                "Input file has no header row".to_string(),
            ));
        }

        let mut records: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| CoreError::Validation(format!("Malformed CSV record: {e}")))?;
            let mut cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
            // Short or long records align to the header width.
            cells.resize(headers.len(), String::new());
            records.push(cells);
        }

        let columns = infer_schema(&headers, &records)?;

        let timestamp_idx = columns
            .iter()
            .position(|c| c.kind == ColumnKind::Timestamp)
            .ok_or_else(|| CoreError::Internal("schema lost the timestamp column".to_string()))?;

        let signal_names: Vec<String> = columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.name.clone())
            .collect();

        let signal_indices: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ColumnKind::Numeric)
            .map(|(i, _)| i)
            .collect();

        let mut rows: Vec<Row> = records
            .into_iter()
            .map(|raw| {
                let t_sec = to_seconds(&raw[timestamp_idx]);
                let signals = signal_indices
                    .iter()
                    .map(|&i| raw[i].trim().parse::<f64>().ok())
                    .collect();
                Row {
                    raw,
                    t_sec,
                    signals,
                    briq_idx: 0,
                    briquette_id: None,
                    note: None,
                }
            })
            .collect();

        // Stable sort: equal times and undefined-time rows keep their
        // relative input order; undefined times go last.
        rows.sort_by(|a, b| match (a.t_sec, b.t_sec) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        Ok(Self {
            columns,
            signal_names,
            rows,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Names of the plottable numeric signal columns.
    pub fn signal_names(&self) -> &[String] {
        &self.signal_names
    }

    /// Position of a signal in each row's `signals` vector.
    pub fn signal_index(&self, name: &str) -> Option<usize> {
        self.signal_names.iter().position(|n| n == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Min and max defined elapsed seconds, or `None` when no row has
    /// a defined timestamp.
    pub fn t_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for t in self.rows.iter().filter_map(|r| r.t_sec) {
            bounds = Some(match bounds {
                None => (t, t),
                Some((lo, hi)) => (lo.min(t), hi.max(t)),
            });
        }
        bounds
    }

    /// Indices of rows whose elapsed seconds fall in `[t_min, t_max]`
    /// (inclusive both ends), in stored order.
    ///
    /// Rows with undefined elapsed seconds cannot satisfy a numeric
    /// bound and are excluded from every view; they remain in storage
    /// and in the full-data export.
    pub fn view_indices(&self, t_min: f64, t_max: f64) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.t_sec.is_some_and(|t| t >= t_min && t <= t_max))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SAMPLE: &str = "timestamp, Power ,Operator\n\
                          0:10,2.0,alice\n\
                          0:05,1.0,bob\n\
                          bogus,9.9,carol\n\
                          0:20,3.0,dora\n";

    fn sample() -> Dataset {
        Dataset::from_csv_bytes(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn headers_are_trimmed() {
        let names: Vec<_> = sample().columns().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["timestamp", "Power", "Operator"]);
    }

    #[test]
    fn missing_timestamp_column_halts_ingest() {
        let err = Dataset::from_csv_bytes(b"time,Power\n0:01,1.0\n");
        assert_matches!(err, Err(CoreError::Validation(msg)) if msg.contains("timestamp"));
    }

    #[test]
    fn rows_sort_ascending_by_elapsed_seconds() {
        let times: Vec<Option<f64>> = sample().rows().iter().map(|r| r.t_sec).collect();
        assert_eq!(times, vec![Some(5.0), Some(10.0), Some(20.0), None]);
    }

    #[test]
    fn unparseable_timestamp_row_is_kept_at_the_end() {
        let ds = sample();
        let last = ds.rows().last().unwrap();
        assert_eq!(last.t_sec, None);
        assert_eq!(last.raw[0], "bogus");
        assert_eq!(ds.row_count(), 4);
    }

    #[test]
    fn signal_names_are_numeric_columns_only() {
        assert_eq!(sample().signal_names(), &["Power".to_string()]);
    }

    #[test]
    fn view_is_inclusive_and_skips_undefined_rows() {
        let ds = sample();
        let view = ds.view_indices(5.0, 10.0);
        let times: Vec<_> = view.iter().map(|&i| ds.rows()[i].t_sec.unwrap()).collect();
        assert_eq!(times, vec![5.0, 10.0]);

        // The undefined-time row never enters a view, even full-range.
        let full = ds.view_indices(f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(full.len(), 3);
    }

    #[test]
    fn t_bounds_span_defined_times() {
        assert_eq!(sample().t_bounds(), Some((5.0, 20.0)));
    }

    #[test]
    fn t_bounds_none_when_no_timestamps_parse() {
        let ds = Dataset::from_csv_bytes(b"timestamp,Power\nxx,1.0\n").unwrap();
        assert_eq!(ds.t_bounds(), None);
    }

    #[test]
    fn short_records_pad_to_header_width() {
        let ds = Dataset::from_csv_bytes(b"timestamp,Power,Operator\n0:01,1.0\n").unwrap();
        assert_eq!(ds.rows()[0].raw.len(), 3);
        assert_eq!(ds.rows()[0].raw[2], "");
    }

    #[test]
    fn empty_input_rejected() {
        assert!(Dataset::from_csv_bytes(b"").is_err());
    }
}
