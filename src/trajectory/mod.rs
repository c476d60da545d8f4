//! Views of a simulation made for charting.
//!
//! Drawing every one of thousands of trajectories is slow and unreadable.
//! [`sample_trajectories`] picks a subset that still spans the worst to
//! the best outcome, and [`percentile_trajectories`] reduces the whole
//! matrix to confidence bands over time.
use ndarray::{Array1, Array2, Axis};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::stats;
use crate::simulation::SimulationResult;

/// Band percentiles, in the order the bands are stored.
const BAND_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Confidence bands over time. Every array has `hand_count + 1` points
/// and is computed per point in time across all simulations.
///
/// These are not paths any single simulation took. The median band at
/// the last hand is the median final bankroll, but the median band as a
/// whole is stitched together from many different trajectories.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PercentileBands {
    pub p5: Array1<f64>,
    pub p25: Array1<f64>,
    pub p50: Array1<f64>,
    pub p75: Array1<f64>,
    pub p95: Array1<f64>,
    pub mean: Array1<f64>,
}

impl PercentileBands {
    /// Number of points in time.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

/// Row indices of the trajectories [`sample_trajectories`] would return,
/// ordered from worst to best final bankroll.
pub fn sample_indices(result: &SimulationResult, n_samples: usize) -> Vec<usize> {
    let sims = result.simulation_count();
    if n_samples >= sims {
        return (0..sims).collect();
    }

    let finals = result.final_bankrolls();
    let mut by_final: Vec<usize> = (0..sims).collect();
    by_final.sort_by(|&a, &b| finals[a].total_cmp(&finals[b]));

    // Evenly spaced positions from the first to the last of the sorted
    // order, both ends included.
    match n_samples {
        0 => vec![],
        1 => vec![by_final[0]],
        _ => (0..n_samples)
            .map(|i| by_final[i * (sims - 1) / (n_samples - 1)])
            .collect(),
    }
}

/// A representative subset of the simulated trajectories.
///
/// With `n_samples >= simulation_count` every row is returned unchanged
/// and in the original order. Otherwise rows are ranked by final
/// bankroll and `n_samples` of them are picked at evenly spaced ranks, so
/// the subset always includes the worst and the best run. Rows are copied
/// as is, nothing is interpolated.
///
/// ```
/// use rs_poker_bankroll::simulation::{SimulationParameters, simulate_seeded};
/// use rs_poker_bankroll::trajectory::sample_trajectories;
///
/// let params = SimulationParameters {
///     hand_count: 500,
///     simulation_count: 100,
///     ..SimulationParameters::new(200.0, 3.0)
/// };
/// let result = simulate_seeded(&params, 7).unwrap();
/// let sampled = sample_trajectories(&result, 10);
/// assert_eq!(sampled.dim(), (10, 501));
/// ```
pub fn sample_trajectories(result: &SimulationResult, n_samples: usize) -> Array2<f64> {
    if n_samples >= result.simulation_count() {
        return result.trajectories().to_owned();
    }
    let indices = sample_indices(result, n_samples);
    result.trajectories().select(Axis(0), &indices)
}

/// Percentile and mean bands of the trajectories over time.
pub fn percentile_trajectories(result: &SimulationResult) -> PercentileBands {
    let trajectories = result.trajectories();
    let bands = stats::percentiles_along(trajectories, Axis(0), &BAND_PERCENTILES);
    let mean = trajectories
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::from_elem(trajectories.ncols(), f64::NAN));

    PercentileBands {
        p5: bands.row(0).to_owned(),
        p25: bands.row(1).to_owned(),
        p50: bands.row(2).to_owned(),
        p75: bands.row(3).to_owned(),
        p95: bands.row(4).to_owned(),
        mean,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::simulation::{SimulationParameters, simulate_seeded};

    use super::*;

    fn result(simulation_count: usize) -> SimulationResult {
        let params = SimulationParameters {
            starting_bankroll: 100.0,
            winrate_bb_per_100: 2.0,
            stddev_bb_per_100: 90.0,
            hand_count: 400,
            simulation_count,
            target_bankroll: None,
            big_blind_size: 0.25,
        };
        simulate_seeded(&params, 31).unwrap()
    }

    fn is_original_row(result: &SimulationResult, row: ndarray::ArrayView1<'_, f64>) -> bool {
        result.trajectories().rows().into_iter().any(|r| r == row)
    }

    #[test]
    fn test_sample_subset_size_and_rows() {
        let result = result(200);
        let sampled = sample_trajectories(&result, 17);

        assert_eq!(sampled.dim(), (17, 401));
        for row in sampled.rows() {
            assert!(is_original_row(&result, row));
        }
    }

    #[test]
    fn test_sample_spans_worst_to_best() {
        let result = result(200);
        let sampled = sample_trajectories(&result, 5);
        let finals = result.final_bankrolls();

        let worst = finals.iter().copied().fold(f64::INFINITY, f64::min);
        let best = finals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let sampled_finals = sampled.column(400);

        assert_eq!(sampled_finals[0], worst);
        assert_eq!(sampled_finals[4], best);
        for pair in sampled_finals.to_vec().windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_sample_indices_are_distinct_when_sparse() {
        let result = result(100);
        let mut indices = sample_indices(&result, 10);
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 10);
    }

    #[test]
    fn test_sample_identity_when_asking_for_all() {
        let result = result(20);
        assert_eq!(sample_trajectories(&result, 20), result.trajectories());
        assert_eq!(sample_trajectories(&result, 500), result.trajectories());
    }

    #[test]
    fn test_sample_edge_counts() {
        let result = result(20);
        assert_eq!(sample_trajectories(&result, 0).dim(), (0, 401));

        let single = sample_trajectories(&result, 1);
        let worst = result
            .final_bankrolls()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(single[[0, 400]], worst);
    }

    #[test]
    fn test_percentile_bands_ordered() {
        let result = result(300);
        let bands = percentile_trajectories(&result);

        assert_eq!(bands.len(), 401);
        for t in 0..bands.len() {
            assert!(bands.p5[t] <= bands.p25[t]);
            assert!(bands.p25[t] <= bands.p50[t]);
            assert!(bands.p50[t] <= bands.p75[t]);
            assert!(bands.p75[t] <= bands.p95[t]);
        }
    }

    #[test]
    fn test_percentile_bands_start_and_end() {
        let result = result(300);
        let bands = percentile_trajectories(&result);

        assert_relative_eq!(bands.p5[0], 100.0);
        assert_relative_eq!(bands.p95[0], 100.0);
        assert_relative_eq!(bands.mean[0], 100.0);

        let summary = result.summary();
        assert_relative_eq!(bands.p50[400], summary.median_final_bankroll);
        assert_relative_eq!(bands.p5[400], summary.percentile_5);
        assert_relative_eq!(bands.p95[400], summary.percentile_95);
        assert_relative_eq!(
            bands.mean[400],
            summary.expected_final_bankroll,
            max_relative = 1e-12
        );
    }
}
