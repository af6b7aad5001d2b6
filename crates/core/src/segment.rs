//! Fixed-size segmentation of sorted rows into briquettes.

use crate::dataset::Dataset;
use crate::error::CoreError;

/// Partition the dataset's rows (in stored, time-sorted order) into
/// contiguous groups of `group_size`, writing each row's `briq_idx`.
///
/// `group_size` must be at least 1. A group size at or above the row
/// count yields a single segment with index 0. Re-running with a new
/// group size reassigns every index and clears previously stamped
/// identifier and note columns, since the old indices no longer name
/// the same row groups; the annotation log itself is untouched.
pub fn assign_segments(dataset: &mut Dataset, group_size: usize) -> Result<(), CoreError> {
    if group_size < 1 {
        return Err(CoreError::Validation(
            "Rows per briquette must be at least 1".to_string(),
        ));
    }

    for (position, row) in dataset.rows_mut().iter_mut().enumerate() {
        row.briq_idx = position / group_size;
        row.briquette_id = None;
        row.note = None;
    }

    Ok(())
}
