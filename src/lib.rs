//! RS-Poker Bankroll is a library for poker bankroll management.
//!
//! It projects a player's bankroll forward with a Monte Carlo random walk
//! and turns the result into the numbers a player needs to pick stakes:
//! risk of ruin, the chance of reaching a target, drawdowns, percentile
//! bands and Kelly based buy-in counts.
//!
//! ```
//! use rs_poker_bankroll::simulation::{SimulationParameters, simulate_seeded};
//! use rs_poker_bankroll::sizing::{RiskProfile, kelly_criterion};
//! use rs_poker_bankroll::trajectory::{percentile_trajectories, sample_trajectories};
//!
//! let params = SimulationParameters {
//!     hand_count: 2_000,
//!     simulation_count: 100,
//!     ..SimulationParameters::new(500.0, 5.0)
//! };
//! let result = simulate_seeded(&params, 1).unwrap();
//! let bands = percentile_trajectories(&result);
//! let lines = sample_trajectories(&result, 20);
//! let sizing = kelly_criterion(5.0, 80.0).unwrap();
//!
//! assert_eq!(bands.len(), 2_001);
//! assert_eq!(lines.nrows(), 20);
//! assert!(sizing.buyins(RiskProfile::Moderate) >= 30);
//! ```

/// Error type and the axis aware statistics shared by everything else.
pub mod core;

/// The Monte Carlo bankroll simulator.
pub mod simulation;

/// Kelly sizing and time to target estimates.
pub mod sizing;

/// Sampled trajectories and percentile bands for charts.
pub mod trajectory;

/// Confidence intervals for an observed winrate.
pub mod winrate;

pub use crate::core::BankrollError;
