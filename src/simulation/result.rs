use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::core::BankrollError;

/// The scalar statistics of a simulation, without the trajectories.
///
/// This is what a dashboard shows in a table and what is cheap to keep
/// around after the trajectories are dropped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationSummary {
    /// Fraction of trajectories that touched zero or below at any point.
    pub risk_of_ruin: f64,
    /// Mean final bankroll.
    pub expected_final_bankroll: f64,
    pub median_final_bankroll: f64,
    /// 5th percentile final bankroll (a bad run).
    pub percentile_5: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    /// 95th percentile final bankroll (a good run).
    pub percentile_95: f64,
    /// Fraction of trajectories whose peak reached the target.
    ///
    /// 1.0 when the target is not above the starting bankroll, 0.0 when
    /// no target was given.
    pub probability_reach_target: f64,
    /// Median over trajectories of the largest peak to trough drop.
    pub median_max_drawdown: f64,
    pub hand_count: usize,
    pub simulation_count: usize,
}

#[cfg(feature = "serde")]
impl SimulationSummary {
    /// Serialize for display or for caching between page loads.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The output of one bankroll simulation.
///
/// It is never changed after construction. The trajectory matrix has one
/// row per simulation and `hand_count + 1` columns, column zero being the
/// starting bankroll. Values below zero are kept as is so that ruin is
/// visible in the paths.
///
/// Deserializing checks the matrix shape against the summary's counts and
/// fails with [`BankrollError::TrajectoryShape`] when they disagree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ResultParts"))]
pub struct SimulationResult {
    trajectories: Array2<f64>,
    summary: SimulationSummary,
}

/// Unchecked wire form of a [`SimulationResult`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ResultParts {
    trajectories: Array2<f64>,
    summary: SimulationSummary,
}

#[cfg(feature = "serde")]
impl TryFrom<ResultParts> for SimulationResult {
    type Error = BankrollError;

    fn try_from(parts: ResultParts) -> Result<Self, Self::Error> {
        let expected = (
            parts.summary.simulation_count,
            parts.summary.hand_count.saturating_add(1),
        );
        let found = parts.trajectories.dim();
        if found != expected {
            return Err(BankrollError::TrajectoryShape { found, expected });
        }
        Ok(Self::new(parts.trajectories, parts.summary))
    }
}

impl SimulationResult {
    pub(crate) fn new(trajectories: Array2<f64>, summary: SimulationSummary) -> Self {
        debug_assert_eq!(
            trajectories.dim(),
            (summary.simulation_count, summary.hand_count + 1),
            "Trajectory matrix must be simulations x (hands + 1)"
        );
        Self {
            trajectories,
            summary,
        }
    }

    /// The full `(simulation_count, hand_count + 1)` matrix.
    pub fn trajectories(&self) -> ArrayView2<'_, f64> {
        self.trajectories.view()
    }

    /// One simulated path.
    pub fn trajectory(&self, idx: usize) -> Option<ArrayView1<'_, f64>> {
        (idx < self.simulation_count()).then(|| self.trajectories.row(idx))
    }

    /// The last column: where every simulation ended.
    pub fn final_bankrolls(&self) -> ArrayView1<'_, f64> {
        self.trajectories.index_axis(Axis(1), self.summary.hand_count)
    }

    pub fn summary(&self) -> &SimulationSummary {
        &self.summary
    }

    pub fn into_summary(self) -> SimulationSummary {
        self.summary
    }

    pub fn risk_of_ruin(&self) -> f64 {
        self.summary.risk_of_ruin
    }

    pub fn expected_final_bankroll(&self) -> f64 {
        self.summary.expected_final_bankroll
    }

    pub fn median_final_bankroll(&self) -> f64 {
        self.summary.median_final_bankroll
    }

    pub fn probability_reach_target(&self) -> f64 {
        self.summary.probability_reach_target
    }

    pub fn median_max_drawdown(&self) -> f64 {
        self.summary.median_max_drawdown
    }

    pub fn hand_count(&self) -> usize {
        self.summary.hand_count
    }

    pub fn simulation_count(&self) -> usize {
        self.summary.simulation_count
    }
}
