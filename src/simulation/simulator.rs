use ndarray::{Array2, Axis};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use tracing::event;

use crate::core::{BankrollError, stats};

use super::{SimulationParameters, SimulationResult, SimulationSummary};

/// The final bankroll percentiles reported in the summary.
const FINAL_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// # BankrollSimulator
///
/// Projects a bankroll forward as a random walk. Each hand's result is
/// an independent draw from a normal distribution with the per hand mean
/// and standard deviation implied by the winrate and standard deviation
/// in BB/100.
///
/// Real poker results are fat tailed (all in pots) and not normal at the
/// single hand level. At this level of aggregation the normal model is
/// the standard approximation for bankroll projections and all of the
/// statistics here are defined against it.
///
/// Parameters are validated when the simulator is created, so a
/// simulator that exists can always run.
///
/// ## Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use rs_poker_bankroll::simulation::{BankrollSimulator, SimulationParameters};
///
/// let params = SimulationParameters {
///     hand_count: 1_000,
///     simulation_count: 100,
///     ..SimulationParameters::new(500.0, 5.0)
/// };
/// let sim = BankrollSimulator::new(params).unwrap();
/// let mut rng = StdRng::seed_from_u64(420);
/// let result = sim.run(&mut rng);
///
/// assert_eq!(result.trajectories().dim(), (100, 1_001));
/// ```
#[derive(Debug, Clone)]
pub struct BankrollSimulator {
    params: SimulationParameters,
    hand_outcome: Normal<f64>,
}

impl BankrollSimulator {
    pub fn new(params: SimulationParameters) -> Result<Self, BankrollError> {
        params.validate()?;
        // Validation keeps both per hand values finite, which is all
        // `Normal` asks for.
        let hand_outcome = Normal::new(params.mean_per_hand(), params.stddev_per_hand())
            .map_err(|_| BankrollError::DegenerateVariance(params.stddev_bb_per_100))?;
        Ok(Self {
            params,
            hand_outcome,
        })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Run every trajectory drawing from `rng`.
    ///
    /// All randomness comes from the passed in rng so a seeded rng gives
    /// a repeatable result.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationResult {
        let start = self.params.starting_bankroll;
        let hands = self.params.hand_count;
        let sims = self.params.simulation_count;

        event!(
            tracing::Level::DEBUG,
            starting_bankroll = start,
            winrate = self.params.winrate_bb_per_100,
            stddev = self.params.stddev_bb_per_100,
            hands,
            sims,
            matrix_bytes = self.params.matrix_len() * std::mem::size_of::<f64>(),
            "Starting bankroll simulation"
        );

        // Column zero is the starting bankroll, every other cell is one
        // hand's result. Each cell gets its own draw so rows never share
        // noise.
        let mut trajectories = Array2::from_shape_fn((sims, hands + 1), |(_, hand)| {
            if hand == 0 {
                start
            } else {
                self.hand_outcome.sample(&mut *rng)
            }
        });
        // Running sum along the hand axis turns results into bankrolls.
        trajectories.accumulate_axis_inplace(Axis(1), |&prev, curr| *curr += prev);

        let summary = summarize(&trajectories, &self.params);

        event!(
            tracing::Level::DEBUG,
            risk_of_ruin = summary.risk_of_ruin,
            median_final = summary.median_final_bankroll,
            median_max_drawdown = summary.median_max_drawdown,
            "Finished bankroll simulation"
        );

        SimulationResult::new(trajectories, summary)
    }
}

/// Reduce a `(sims, hands + 1)` trajectory matrix to its statistics.
fn summarize(trajectories: &Array2<f64>, params: &SimulationParameters) -> SimulationSummary {
    let view = trajectories.view();
    let start = params.starting_bankroll;

    // Ruin is judged on the raw path, which may dip below zero.
    let lows = stats::min_along(view, Axis(1));
    let risk_of_ruin = stats::fraction_where(lows.view(), |v| v <= 0.0);

    let finals = view.index_axis(Axis(1), params.hand_count);
    let expected_final_bankroll = finals.mean().unwrap_or(start);
    let final_percentiles = stats::percentiles(finals, &FINAL_PERCENTILES);

    let probability_reach_target = match params.target_bankroll {
        Some(target) if target > start => {
            let peaks = stats::max_along(view, Axis(1));
            stats::fraction_where(peaks.view(), |v| v >= target)
        }
        // Already there before the first hand.
        Some(target) if target <= start => 1.0,
        _ => 0.0,
    };

    let drawdowns = stats::max_drawdown_along(view, Axis(1));
    let median_max_drawdown = stats::median(drawdowns.view());

    SimulationSummary {
        risk_of_ruin,
        expected_final_bankroll,
        median_final_bankroll: final_percentiles[2],
        percentile_5: final_percentiles[0],
        percentile_25: final_percentiles[1],
        percentile_75: final_percentiles[3],
        percentile_95: final_percentiles[4],
        probability_reach_target,
        median_max_drawdown,
        hand_count: params.hand_count,
        simulation_count: params.simulation_count,
    }
}

/// Validate `params` and run a simulation with the thread local rng.
pub fn simulate(params: &SimulationParameters) -> Result<SimulationResult, BankrollError> {
    simulate_with_rng(params, &mut rand::rng())
}

/// Validate `params` and run a repeatable simulation from `seed`.
pub fn simulate_seeded(
    params: &SimulationParameters,
    seed: u64,
) -> Result<SimulationResult, BankrollError> {
    simulate_with_rng(params, &mut StdRng::seed_from_u64(seed))
}

/// Validate `params` and run a simulation drawing from `rng`.
///
/// Nothing is drawn from `rng` when validation fails.
pub fn simulate_with_rng<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<SimulationResult, BankrollError> {
    let sim = BankrollSimulator::new(params.clone())?;
    Ok(sim.run(rng))
}
