#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::event;

use crate::core::{BankrollError, is_positive};

/// The fewest hands a simulation may project forward.
pub const MIN_HANDS: usize = 100;
/// The fewest independent trajectories a simulation may run.
pub const MIN_SIMULATIONS: usize = 10;

/// Standard deviation typical of 6-max no limit holdem, in BB/100.
pub const DEFAULT_STDDEV_BB_PER_100: f64 = 80.0;
/// Hands projected forward when not given.
pub const DEFAULT_HAND_COUNT: usize = 50_000;
/// Trajectories run when not given.
pub const DEFAULT_SIMULATION_COUNT: usize = 1_000;
/// 5NL/10NL style micro stakes.
pub const DEFAULT_BIG_BLIND: f64 = 0.10;

/// Standard deviations per hand a path is allowed to move without
/// overflowing when summed over the whole horizon.
const OVERFLOW_SIGMAS: f64 = 10.0;

/// Everything needed to run one bankroll simulation.
///
/// Money values (`starting_bankroll`, `target_bankroll`,
/// `big_blind_size`) share one unit, usually dollars. Rates are in big
/// blinds per 100 hands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationParameters {
    pub starting_bankroll: f64,
    /// Expected return. May be negative, zero or positive.
    pub winrate_bb_per_100: f64,
    /// Standard deviation of the result of a 100 hand block.
    pub stddev_bb_per_100: f64,
    /// Number of hands projected forward.
    pub hand_count: usize,
    /// Number of independent trajectories.
    pub simulation_count: usize,
    /// If set, the probability of ever touching this bankroll is computed.
    pub target_bankroll: Option<f64>,
    /// Converts big blinds into money.
    pub big_blind_size: f64,
}

impl SimulationParameters {
    /// Create parameters with the default horizon, simulation count, standard
    /// deviation and stakes.
    pub fn new(starting_bankroll: f64, winrate_bb_per_100: f64) -> Self {
        Self {
            starting_bankroll,
            winrate_bb_per_100,
            ..Self::default()
        }
    }

    /// Check every precondition of a simulation.
    ///
    /// The first failing check wins. The order is bankroll, horizon,
    /// simulation count, variance, big blind and finally winrate. Last of
    /// all the per hand mean and standard deviation, scaled by the big
    /// blind and summed over the horizon, must stay finite. Otherwise the
    /// trajectories would overflow into `inf` and `NaN`.
    pub fn validate(&self) -> Result<(), BankrollError> {
        let hands = self.hand_count as f64;
        let result = if !is_positive(self.starting_bankroll) {
            Err(BankrollError::InvalidBankroll(self.starting_bankroll))
        } else if self.hand_count < MIN_HANDS {
            Err(BankrollError::InsufficientHorizon(self.hand_count))
        } else if self.simulation_count < MIN_SIMULATIONS {
            Err(BankrollError::InsufficientSimulations(self.simulation_count))
        } else if !is_positive(self.stddev_bb_per_100) {
            Err(BankrollError::DegenerateVariance(self.stddev_bb_per_100))
        } else if !is_positive(self.big_blind_size) {
            Err(BankrollError::InvalidBigBlind(self.big_blind_size))
        } else if !self.winrate_bb_per_100.is_finite() {
            Err(BankrollError::NonFiniteWinrate(self.winrate_bb_per_100))
        } else if !(self.stddev_per_hand() * OVERFLOW_SIGMAS * hands).is_finite() {
            Err(BankrollError::DegenerateVariance(self.stddev_bb_per_100))
        } else if !(self.mean_per_hand() * hands).is_finite() {
            Err(BankrollError::NonFiniteWinrate(self.winrate_bb_per_100))
        } else {
            Ok(())
        };

        if let Err(ref e) = result {
            event!(tracing::Level::WARN, error = %e, "Rejected simulation parameters");
        }
        result
    }

    /// Expected money won per hand.
    pub fn mean_per_hand(&self) -> f64 {
        (self.winrate_bb_per_100 / 100.0) * self.big_blind_size
    }

    /// Standard deviation of a single hand in money.
    ///
    /// Variance grows linearly with the number of hands so the standard
    /// deviation grows with the square root. sqrt(100) is 10.
    pub fn stddev_per_hand(&self) -> f64 {
        (self.stddev_bb_per_100 / 10.0) * self.big_blind_size
    }

    /// The number of floats the trajectory matrix will hold.
    pub fn matrix_len(&self) -> usize {
        self.simulation_count.saturating_mul(self.hand_count.saturating_add(1))
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            starting_bankroll: 0.0,
            winrate_bb_per_100: 0.0,
            stddev_bb_per_100: DEFAULT_STDDEV_BB_PER_100,
            hand_count: DEFAULT_HAND_COUNT,
            simulation_count: DEFAULT_SIMULATION_COUNT,
            target_bankroll: None,
            big_blind_size: DEFAULT_BIG_BLIND,
        }
    }
}

/// # SimulationParametersBuilder
///
/// Builder for [`SimulationParameters`]. Only the starting bankroll is
/// required. A missing winrate means break even and every other field
/// falls back to the defaults.
///
/// ## Examples
///
/// ```
/// use rs_poker_bankroll::simulation::SimulationParametersBuilder;
///
/// let params = SimulationParametersBuilder::default()
///     .starting_bankroll(500.0)
///     .winrate_bb_per_100(5.0)
///     .hand_count(10_000)
///     .simulation_count(200)
///     .target_bankroll(1_000.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.hand_count, 10_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationParametersBuilder {
    starting_bankroll: Option<f64>,
    winrate_bb_per_100: Option<f64>,
    stddev_bb_per_100: Option<f64>,
    hand_count: Option<usize>,
    simulation_count: Option<usize>,
    target_bankroll: Option<f64>,
    big_blind_size: Option<f64>,
}

impl SimulationParametersBuilder {
    pub fn starting_bankroll(mut self, starting_bankroll: f64) -> Self {
        self.starting_bankroll = Some(starting_bankroll);
        self
    }

    pub fn winrate_bb_per_100(mut self, winrate: f64) -> Self {
        self.winrate_bb_per_100 = Some(winrate);
        self
    }

    pub fn stddev_bb_per_100(mut self, stddev: f64) -> Self {
        self.stddev_bb_per_100 = Some(stddev);
        self
    }

    pub fn hand_count(mut self, hand_count: usize) -> Self {
        self.hand_count = Some(hand_count);
        self
    }

    pub fn simulation_count(mut self, simulation_count: usize) -> Self {
        self.simulation_count = Some(simulation_count);
        self
    }

    pub fn target_bankroll(mut self, target: f64) -> Self {
        self.target_bankroll = Some(target);
        self
    }

    pub fn big_blind_size(mut self, big_blind: f64) -> Self {
        self.big_blind_size = Some(big_blind);
        self
    }

    /// Fill in defaults and validate.
    ///
    /// A missing starting bankroll is reported as an invalid bankroll of
    /// zero. A missing winrate is treated as break even.
    pub fn build(self) -> Result<SimulationParameters, BankrollError> {
        let defaults = SimulationParameters::default();
        let params = SimulationParameters {
            starting_bankroll: self.starting_bankroll.unwrap_or(defaults.starting_bankroll),
            winrate_bb_per_100: self
                .winrate_bb_per_100
                .unwrap_or(defaults.winrate_bb_per_100),
            stddev_bb_per_100: self
                .stddev_bb_per_100
                .unwrap_or(defaults.stddev_bb_per_100),
            hand_count: self.hand_count.unwrap_or(defaults.hand_count),
            simulation_count: self.simulation_count.unwrap_or(defaults.simulation_count),
            target_bankroll: self.target_bankroll,
            big_blind_size: self.big_blind_size.unwrap_or(defaults.big_blind_size),
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn valid() -> SimulationParameters {
        SimulationParameters {
            starting_bankroll: 500.0,
            winrate_bb_per_100: 5.0,
            stddev_bb_per_100: 80.0,
            hand_count: 1_000,
            simulation_count: 50,
            target_bankroll: None,
            big_blind_size: 0.10,
        }
    }

    #[test]
    fn test_valid_parameters_pass() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_per_hand_conversion() {
        let p = valid();
        // 5 BB/100 at $0.10 is half a cent per hand.
        assert_relative_eq!(p.mean_per_hand(), 0.005);
        // 80 BB/100 is 8 BB per hand, $0.80.
        assert_relative_eq!(p.stddev_per_hand(), 0.8);
    }

    #[test]
    fn test_rejects_zero_bankroll() {
        let p = SimulationParameters {
            starting_bankroll: 0.0,
            ..valid()
        };
        assert_eq!(p.validate(), Err(BankrollError::InvalidBankroll(0.0)));
    }

    #[test]
    fn test_rejects_short_horizon() {
        let p = SimulationParameters {
            hand_count: 50,
            ..valid()
        };
        assert_eq!(p.validate(), Err(BankrollError::InsufficientHorizon(50)));
    }

    #[test]
    fn test_rejects_few_simulations() {
        let p = SimulationParameters {
            simulation_count: 5,
            ..valid()
        };
        assert_eq!(p.validate(), Err(BankrollError::InsufficientSimulations(5)));
    }

    #[test]
    fn test_rejects_zero_stddev() {
        let p = SimulationParameters {
            stddev_bb_per_100: 0.0,
            ..valid()
        };
        assert_eq!(p.validate(), Err(BankrollError::DegenerateVariance(0.0)));
    }

    #[test]
    fn test_rejects_bad_big_blind() {
        let p = SimulationParameters {
            big_blind_size: -1.0,
            ..valid()
        };
        assert_eq!(p.validate(), Err(BankrollError::InvalidBigBlind(-1.0)));
    }

    #[test]
    fn test_rejects_nan_winrate() {
        let p = SimulationParameters {
            winrate_bb_per_100: f64::NAN,
            ..valid()
        };
        assert!(matches!(
            p.validate(),
            Err(BankrollError::NonFiniteWinrate(_))
        ));
    }

    #[test]
    fn test_rejects_mean_that_overflows_at_stakes() {
        // Both inputs are finite but the per hand mean is not.
        let p = SimulationParameters {
            winrate_bb_per_100: 1e300,
            big_blind_size: 1e11,
            ..valid()
        };
        assert!(p.mean_per_hand().is_infinite());
        assert_eq!(p.validate(), Err(BankrollError::NonFiniteWinrate(1e300)));
    }

    #[test]
    fn test_rejects_mean_that_overflows_over_horizon() {
        // 1e308 per hand is finite, a hundred hands of it is not.
        let p = SimulationParameters {
            winrate_bb_per_100: 1e300,
            big_blind_size: 1e10,
            hand_count: 100,
            simulation_count: 10,
            ..valid()
        };
        assert!(p.mean_per_hand().is_finite());
        assert_eq!(p.validate(), Err(BankrollError::NonFiniteWinrate(1e300)));
    }

    #[test]
    fn test_rejects_stddev_that_overflows_at_stakes() {
        let p = SimulationParameters {
            stddev_bb_per_100: 1e300,
            big_blind_size: 1e10,
            ..valid()
        };
        assert_eq!(p.validate(), Err(BankrollError::DegenerateVariance(1e300)));
    }

    #[test]
    fn test_bankroll_checked_first() {
        let p = SimulationParameters {
            starting_bankroll: -5.0,
            hand_count: 1,
            simulation_count: 1,
            ..valid()
        };
        assert_eq!(p.validate(), Err(BankrollError::InvalidBankroll(-5.0)));
    }

    #[test]
    fn test_builder_defaults() {
        let p = SimulationParametersBuilder::default()
            .starting_bankroll(350.0)
            .winrate_bb_per_100(2.5)
            .build()
            .unwrap();

        assert_eq!(p.hand_count, DEFAULT_HAND_COUNT);
        assert_eq!(p.simulation_count, DEFAULT_SIMULATION_COUNT);
        assert_eq!(p.target_bankroll, None);
        assert_relative_eq!(p.stddev_bb_per_100, DEFAULT_STDDEV_BB_PER_100);
        assert_relative_eq!(p.big_blind_size, DEFAULT_BIG_BLIND);
    }

    #[test]
    fn test_builder_requires_bankroll() {
        let result = SimulationParametersBuilder::default()
            .winrate_bb_per_100(2.5)
            .build();
        assert_eq!(result, Err(BankrollError::InvalidBankroll(0.0)));
    }

    #[test]
    fn test_builder_missing_winrate_is_break_even() {
        let p = SimulationParametersBuilder::default()
            .starting_bankroll(100.0)
            .build()
            .unwrap();
        assert_eq!(p.winrate_bb_per_100, 0.0);
    }

    #[test]
    fn test_matrix_len() {
        assert_eq!(valid().matrix_len(), 50 * 1_001);
    }
}
