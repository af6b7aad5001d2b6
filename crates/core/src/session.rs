//! Per-session state and the click-to-annotation pipeline.
//!
//! One [`SessionState`] is created when a sensor file is uploaded and
//! dropped when the session ends. It owns the dataset, the identifier
//! registry, and the annotation log; nothing here is process-global,
//! and concurrent sessions are fully independent.

use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, AnnotationLog};
use crate::dataset::Dataset;
use crate::error::CoreError;
use crate::identifier::IdentifierRegistry;
use crate::resolve::nearest_row;
use crate::segment::assign_segments;

/// One chart click plus its note, as submitted by the user.
///
/// `t_min`/`t_max` are the range-filter bounds the chart was rendered
/// under; resolution must run over exactly that view. Absent bounds
/// mean the full data range.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotateRequest {
    pub signal: String,
    /// Clicked x in elapsed seconds.
    pub t_sec: f64,
    /// Clicked y, the signal value at the point.
    pub value: f64,
    /// Free-text note; may be empty.
    #[serde(default)]
    pub note: String,
    pub t_min: Option<f64>,
    pub t_max: Option<f64>,
}

/// One plottable trace: a signal name and its `(t_sec, value)` pairs
/// over the filtered view.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesTrace {
    pub signal: String,
    pub points: Vec<(f64, f64)>,
}

/// All state owned by one interactive session.
#[derive(Debug, Clone)]
pub struct SessionState {
    dataset: Dataset,
    group_size: usize,
    registry: IdentifierRegistry,
    log: AnnotationLog,
}

impl SessionState {
    /// Build session state from a parsed dataset, running the initial
    /// segmentation. Fails if `group_size` is zero.
    pub fn new(
        dataset: Dataset,
        group_size: usize,
        registry: IdentifierRegistry,
    ) -> Result<Self, CoreError> {
        let mut dataset = dataset;
        assign_segments(&mut dataset, group_size)?;
        Ok(Self {
            dataset,
            group_size,
            registry,
            log: AnnotationLog::new(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn log(&self) -> &AnnotationLog {
        &self.log
    }

    /// Re-segment the dataset with a new group size.
    ///
    /// Previously stamped identifier and note columns are cleared
    /// (the old indices no longer name the same row groups); the
    /// annotation log keeps every record it already accepted.
    pub fn set_group_size(&mut self, group_size: usize) -> Result<(), CoreError> {
        assign_segments(&mut self.dataset, group_size)?;
        self.group_size = group_size;
        Ok(())
    }

    /// Resolve the effective view bounds for a request: explicit
    /// bounds win, otherwise the full data range.
    fn effective_bounds(&self, t_min: Option<f64>, t_max: Option<f64>) -> Result<(f64, f64), CoreError> {
        let full = self.dataset.t_bounds().ok_or_else(|| {
            CoreError::Validation(
                "No rows have a parseable timestamp; nothing to resolve against".to_string(),
            )
        })?;
        Ok((t_min.unwrap_or(full.0), t_max.unwrap_or(full.1)))
    }

    /// Plot data for the selected signals over the filtered view.
    ///
    /// At least one signal must be selected, and every name must be a
    /// known numeric column. Rows with an empty cell for a signal are
    /// skipped in that trace only.
    pub fn series(
        &self,
        signals: &[String],
        t_min: Option<f64>,
        t_max: Option<f64>,
    ) -> Result<Vec<SeriesTrace>, CoreError> {
        if signals.is_empty() {
            return Err(CoreError::Validation(
                "Select at least one signal to plot".to_string(),
            ));
        }

        let (lo, hi) = self.effective_bounds(t_min, t_max)?;
        let view = self.dataset.view_indices(lo, hi);

        signals
            .iter()
            .map(|name| {
                let sig_idx = self.dataset.signal_index(name).ok_or_else(|| {
                    CoreError::Validation(format!("'{name}' is not a numeric signal column"))
                })?;
                let points = view
                    .iter()
                    .filter_map(|&row_idx| {
                        let row = &self.dataset.rows()[row_idx];
                        match (row.t_sec, row.signals[sig_idx]) {
                            (Some(t), Some(v)) => Some((t, v)),
                            _ => None,
                        }
                    })
                    .collect();
                Ok(SeriesTrace {
                    signal: name.clone(),
                    points,
                })
            })
            .collect()
    }

    /// The full click-to-annotation pipeline: resolve the nearest row
    /// in the rendered view, get or create the segment's identifier,
    /// append to the log, and stamp every row of the segment.
    ///
    /// Stamping is last-write-wins when a segment receives multiple
    /// annotations; the note is only stamped when non-empty. Each
    /// append is a single atomic push, so a retried click can at
    /// worst add a duplicate record, never corrupt state.
    pub fn annotate(&mut self, request: AnnotateRequest) -> Result<Annotation, CoreError> {
        if self.dataset.signal_index(&request.signal).is_none() {
            return Err(CoreError::Validation(format!(
                "'{}' is not a numeric signal column",
                request.signal
            )));
        }

        let (lo, hi) = self.effective_bounds(request.t_min, request.t_max)?;
        let view = self.dataset.view_indices(lo, hi);

        let row_idx = nearest_row(&self.dataset, &view, request.t_sec).ok_or_else(|| {
            CoreError::Validation(
                "No data points in the current view to annotate".to_string(),
            )
        })?;
        let briq_idx = self.dataset.rows()[row_idx].briq_idx;

        let briquette_id = self.registry.get_or_create(briq_idx).to_string();

        let annotation = Annotation {
            briquette_id: briquette_id.clone(),
            briq_idx,
            signal: request.signal,
            t_sec: request.t_sec,
            value: request.value,
            note: request.note.clone(),
        };
        self.log.append(annotation.clone())?;

        // Bulk stamp: every row of the segment carries the identifier;
        // the note only when non-empty.
        for row in self
            .dataset
            .rows_mut()
            .iter_mut()
            .filter(|r| r.briq_idx == briq_idx)
        {
            row.briquette_id = Some(briquette_id.clone());
            if !request.note.is_empty() {
                row.note = Some(request.note.clone());
            }
        }

        Ok(annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::IdentifierConfig;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    const CSV: &str = "timestamp,Power,Temp,Operator\n\
                       0:00,1.0,20.0,alice\n\
                       0:10,2.0,21.0,alice\n\
                       0:20,3.0,22.0,bob\n\
                       0:30,4.0,23.0,bob\n";

    fn session() -> SessionState {
        let dataset = Dataset::from_csv_bytes(CSV.as_bytes()).unwrap();
        let registry = IdentifierRegistry::new(
            IdentifierConfig::default(),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        );
        SessionState::new(dataset, 2, registry).unwrap()
    }

    fn click(signal: &str, t_sec: f64, note: &str) -> AnnotateRequest {
        AnnotateRequest {
            signal: signal.to_string(),
            t_sec,
            value: 9.9,
            note: note.to_string(),
            t_min: None,
            t_max: None,
        }
    }

    #[test]
    fn annotate_resolves_segment_and_stamps_rows() {
        let mut s = session();
        let a = s.annotate(click("Power", 26.0, "defect")).unwrap();

        assert_eq!(a.briq_idx, 1);
        assert_eq!(a.briquette_id, "DWC20250701001");

        for row in s.dataset().rows() {
            if row.briq_idx == 1 {
                assert_eq!(row.briquette_id.as_deref(), Some("DWC20250701001"));
                assert_eq!(row.note.as_deref(), Some("defect"));
            } else {
                assert_eq!(row.briquette_id, None);
                assert_eq!(row.note, None);
            }
        }
    }

    #[test]
    fn second_annotation_on_same_segment_reuses_identifier() {
        let mut s = session();
        let a = s.annotate(click("Power", 26.0, "first")).unwrap();
        let b = s.annotate(click("Temp", 30.0, "second")).unwrap();

        assert_eq!(a.briquette_id, b.briquette_id);
        assert_eq!(s.log().len(), 2);
    }

    #[test]
    fn later_note_wins_on_the_stamped_rows() {
        let mut s = session();
        s.annotate(click("Power", 26.0, "first")).unwrap();
        s.annotate(click("Power", 30.0, "second")).unwrap();

        let row = s.dataset().rows().iter().find(|r| r.briq_idx == 1).unwrap();
        assert_eq!(row.note.as_deref(), Some("second"));

        // The log keeps both records untouched.
        let notes: Vec<_> = s.log().all().iter().map(|a| a.note.as_str()).collect();
        assert_eq!(notes, vec!["first", "second"]);
    }

    #[test]
    fn empty_note_stamps_identifier_but_not_note() {
        let mut s = session();
        s.annotate(click("Power", 0.0, "")).unwrap();

        let row = &s.dataset().rows()[0];
        assert!(row.briquette_id.is_some());
        assert_eq!(row.note, None);
    }

    #[test]
    fn annotation_respects_view_bounds() {
        let mut s = session();
        let mut req = click("Power", 5.0, "edge");
        req.t_min = Some(20.0);
        req.t_max = Some(30.0);
        // Nearest row inside the rendered view is t=20 (segment 1),
        // even though t=0/t=10 are closer in the full dataset.
        let a = s.annotate(req).unwrap();
        assert_eq!(a.briq_idx, 1);
    }

    #[test]
    fn unknown_signal_rejected() {
        let mut s = session();
        let err = s.annotate(click("Operator", 10.0, "x"));
        assert_matches!(err, Err(CoreError::Validation(_)));
        assert!(s.log().is_empty());
    }

    #[test]
    fn series_requires_at_least_one_signal() {
        let s = session();
        assert_matches!(s.series(&[], None, None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn series_returns_points_over_the_view() {
        let s = session();
        let traces = s
            .series(&["Power".to_string()], Some(10.0), Some(20.0))
            .unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].points, vec![(10.0, 2.0), (20.0, 3.0)]);
    }

    #[test]
    fn regrouping_changes_resolution() {
        let mut s = session();
        s.set_group_size(1).unwrap();
        let a = s.annotate(click("Power", 30.0, "x")).unwrap();
        assert_eq!(a.briq_idx, 3);
    }
}
