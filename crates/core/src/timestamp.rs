//! Textual timestamp normalization.
//!
//! Sensor files carry timestamps as `mm:ss` or `hh:mm:ss` strings.
//! Everything downstream (sorting, range filtering, plotting, click
//! resolution) works on elapsed seconds, so this is the only place
//! that ever looks at the raw text.

/// Convert an `mm:ss` or `hh:mm:ss` string into elapsed seconds.
///
/// Returns `None` for any other part count or any non-numeric part.
/// This function never panics; malformed input is the caller's
/// signal to leave the row's elapsed time undefined.
pub fn to_seconds(raw: &str) -> Option<f64> {
    let parts: Vec<f64> = raw
        .split(':')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    match parts.as_slice() {
        [m, s] => Some(m * 60.0 + s),
        [h, m, s] => Some(h * 3600.0 + m * 60.0 + s),
        _ => None,
    }
}
