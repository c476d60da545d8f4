//! Reductions over trajectory matrices.
//!
//! A trajectory matrix is laid out with one simulation per row and one
//! point in time per column. Every reduction here takes an explicit
//! [`Axis`] naming the axis that gets reduced away:
//!
//! - `Axis(1)` collapses each row (one value per simulation).
//! - `Axis(0)` collapses each column (one value per point in time).
//!
//! Percentiles use linear interpolation between the two closest ranks,
//! the same default numpy uses.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Percentile `q` (0 to 100) of values that are already sorted ascending.
///
/// Returns `NaN` for an empty slice.
pub fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Compute several percentiles of the same values, sorting only once.
pub fn percentiles(values: ArrayView1<'_, f64>, qs: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().collect();
    sorted.sort_unstable_by(f64::total_cmp);
    qs.iter()
        .map(|&q| percentile_of_sorted(&sorted, q))
        .collect()
}

/// Percentile `q` (0 to 100) of unsorted values.
pub fn percentile(values: ArrayView1<'_, f64>, q: f64) -> f64 {
    percentiles(values, &[q])[0]
}

/// The 50th percentile.
pub fn median(values: ArrayView1<'_, f64>) -> f64 {
    percentile(values, 50.0)
}

/// Percentiles of every lane along `axis`.
///
/// The result has one row per requested percentile and one column per
/// lane. So for a `(sims, steps)` matrix reduced along `Axis(0)` the
/// result is `(qs.len(), steps)`.
pub fn percentiles_along(matrix: ArrayView2<'_, f64>, axis: Axis, qs: &[f64]) -> Array2<f64> {
    debug_assert!(axis.index() < 2, "Trajectory matrices are two dimensional");
    let kept = Axis(1 - axis.index());
    let mut out = Array2::from_elem((qs.len(), matrix.len_of(kept)), f64::NAN);

    // Reuse one scratch buffer for every lane.
    let mut scratch: Vec<f64> = Vec::with_capacity(matrix.len_of(axis));
    for (lane_idx, lane) in matrix.lanes(axis).into_iter().enumerate() {
        scratch.clear();
        scratch.extend(lane.iter().copied());
        scratch.sort_unstable_by(f64::total_cmp);
        for (q_idx, &q) in qs.iter().enumerate() {
            out[[q_idx, lane_idx]] = percentile_of_sorted(&scratch, q);
        }
    }
    out
}

/// Smallest value of every lane along `axis`.
pub fn min_along(matrix: ArrayView2<'_, f64>, axis: Axis) -> Array1<f64> {
    matrix.fold_axis(axis, f64::INFINITY, |&acc, &v| acc.min(v))
}

/// Largest value of every lane along `axis`.
pub fn max_along(matrix: ArrayView2<'_, f64>, axis: Axis) -> Array1<f64> {
    matrix.fold_axis(axis, f64::NEG_INFINITY, |&acc, &v| acc.max(v))
}

/// The largest drop from a running peak to a later value.
///
/// The peak includes the current point so the result is never negative.
pub fn max_drawdown(path: ArrayView1<'_, f64>) -> f64 {
    path.iter()
        .fold((f64::NEG_INFINITY, 0.0_f64), |(peak, worst), &value| {
            let peak = peak.max(value);
            (peak, worst.max(peak - value))
        })
        .1
}

/// Maximum drawdown of every lane along `axis`.
///
/// This is a fold per lane, so no second matrix of running peaks is
/// ever allocated.
pub fn max_drawdown_along(matrix: ArrayView2<'_, f64>, axis: Axis) -> Array1<f64> {
    matrix.map_axis(axis, max_drawdown)
}

/// Fraction of values that satisfy `predicate`. Zero for empty input.
pub fn fraction_where<F>(values: ArrayView1<'_, f64>, predicate: F) -> f64
where
    F: Fn(f64) -> bool,
{
    if values.is_empty() {
        return 0.0;
    }
    let hits = values.iter().filter(|&&v| predicate(v)).count();
    hits as f64 / values.len() as f64
}
