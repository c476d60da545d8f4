use thiserror::Error;

/// This is the core error type for the
/// bankroll library. It uses `thiserror` to provide
/// readable error messages that can be shown to a user as is.
///
/// Every variant is an input validation failure. They are all raised
/// before any random sampling happens so there is never a partial result.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BankrollError {
    #[error("Starting bankroll must be positive (got {0})")]
    InvalidBankroll(f64),
    #[error("Must simulate at least 100 hands (got {0})")]
    InsufficientHorizon(usize),
    #[error("Must run at least 10 simulations (got {0})")]
    InsufficientSimulations(usize),
    #[error("Standard deviation must be positive and finite (got {0})")]
    DegenerateVariance(f64),
    #[error("Big blind size must be positive (got {0})")]
    InvalidBigBlind(f64),
    #[error("Winrate must be finite at the chosen stakes (got {0})")]
    NonFiniteWinrate(f64),
    #[error("Hands per hour must be positive (got {0})")]
    InvalidHandsPerHour(f64),
    #[error("Bankroll amounts must be finite (got {0})")]
    NonFiniteAmount(f64),
    #[error("Target margin must be positive (got {0})")]
    InvalidMargin(f64),
    #[error("Trajectory matrix is {found:?} but the summary expects {expected:?}")]
    TrajectoryShape {
        found: (usize, usize),
        expected: (usize, usize),
    },
}
