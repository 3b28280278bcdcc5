//! Robust statistics helpers.

/// Median of a slice: the central order statistic, or the mean of the two
/// central order statistics for even lengths.
///
/// Callers must pass a non-empty slice; chunk pruning guarantees this at
/// every call site in the fit loop.
pub(crate) fn median(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty(), "median of an empty slice");
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}
