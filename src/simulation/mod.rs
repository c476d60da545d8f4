//! Monte Carlo projection of a poker bankroll.
//!
//! Given a starting bankroll, a winrate and a standard deviation (both in
//! big blinds per 100 hands) this module projects thousands of possible
//! futures and reports how often the bankroll goes broke, how often it
//! reaches a target, how deep the drawdowns get and how the final
//! bankroll is distributed.
//!
//! ## Simulation Example
//!
//! ```
//! use rs_poker_bankroll::simulation::{SimulationParameters, simulate_seeded};
//!
//! let params = SimulationParameters {
//!     hand_count: 5_000,
//!     simulation_count: 200,
//!     target_bankroll: Some(750.0),
//!     ..SimulationParameters::new(500.0, 5.0)
//! };
//! let result = simulate_seeded(&params, 42).unwrap();
//!
//! println!("risk of ruin {:.2}%", result.risk_of_ruin() * 100.0);
//! println!("reach $750 {:.2}%", result.probability_reach_target() * 100.0);
//! ```
//!
//! The trajectory matrix has `simulation_count * (hand_count + 1)` floats.
//! 1 000 simulations of 50 000 hands is roughly 400MB, so size requests
//! accordingly.

mod params;
mod result;
mod simulator;

pub use self::params::{
    DEFAULT_BIG_BLIND, DEFAULT_HAND_COUNT, DEFAULT_SIMULATION_COUNT, DEFAULT_STDDEV_BB_PER_100,
    MIN_HANDS, MIN_SIMULATIONS, SimulationParameters, SimulationParametersBuilder,
};
pub use self::result::{SimulationResult, SimulationSummary};
pub use self::simulator::{BankrollSimulator, simulate, simulate_seeded, simulate_with_rng};
