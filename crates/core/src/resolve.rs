//! Click-to-row resolution.
//!
//! A chart click arrives as an x position in elapsed seconds. The
//! clicked point must map back to the row the user visually hit, so
//! resolution runs over exactly the range-filtered view that was
//! rendered, never the full dataset.

use crate::dataset::Dataset;

/// Return the index (into `dataset.rows()`) of the view row nearest
/// to `x` by absolute elapsed-time distance.
///
/// Ties break toward the earlier row in view order. Returns `None`
/// for an empty view. Linear in the view size, which is fine at
/// dashboard scale; the view is time-sorted, so a binary search
/// would preserve this contract exactly if it ever matters.
pub fn nearest_row(dataset: &Dataset, view: &[usize], x: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &row_idx in view {
        let Some(t) = dataset.rows()[row_idx].t_sec else {
            continue;
        };
        let dist = (t - x).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((row_idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}
