#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::event;

use crate::core::{BankrollError, is_positive};

/// A typical online full ring / 6-max pace.
pub const DEFAULT_HANDS_PER_HOUR: f64 = 60.0;
/// Sessions are assumed to be this many hours long.
pub const SESSION_HOURS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TargetStatus {
    /// The current bankroll is already at or above the target.
    AlreadyReached,
    /// The winrate is zero or negative so the expected bankroll never
    /// gets there.
    Unreachable,
    Reachable,
}

/// Expected time to grow a bankroll to a target at a fixed winrate.
///
/// These are expectations only. Variance means any real run will take
/// more or less time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeEstimate {
    pub status: TargetStatus,
    /// Infinite when unreachable.
    pub hands_needed: f64,
    /// Infinite when unreachable.
    pub hours_needed: f64,
    /// Whole sessions of [`SESSION_HOURS`], rounded up. Infinite when
    /// unreachable.
    pub sessions_needed: f64,
    /// Expected money won per hour. Only set when the target is reachable.
    pub dollars_per_hour: Option<f64>,
}

impl TimeEstimate {
    fn already_reached() -> Self {
        Self {
            status: TargetStatus::AlreadyReached,
            hands_needed: 0.0,
            hours_needed: 0.0,
            sessions_needed: 0.0,
            dollars_per_hour: None,
        }
    }

    fn unreachable() -> Self {
        Self {
            status: TargetStatus::Unreachable,
            hands_needed: f64::INFINITY,
            hours_needed: f64::INFINITY,
            sessions_needed: f64::INFINITY,
            dollars_per_hour: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.status != TargetStatus::Unreachable
    }

    /// A short sentence suitable for showing next to the numbers.
    pub fn message(&self) -> String {
        match self.status {
            TargetStatus::AlreadyReached => "Target already reached!".to_string(),
            TargetStatus::Unreachable => {
                "Cannot reach target with non-positive winrate".to_string()
            }
            TargetStatus::Reachable => {
                format!("~{} hours at current winrate", self.hours_needed.floor())
            }
        }
    }
}

/// Estimate how long it takes to grow `current` into `target`.
///
/// Both amounts must be finite. Either may be zero or negative.
///
/// - `target <= current` gives zero hands, hours and sessions.
/// - A zero or negative winrate gives an infinite, unreachable estimate.
///   That is an answer, not an error.
/// - Otherwise `hands = (target - current) / ((winrate / 100) * big_blind)`,
///   hours divide by `hands_per_hour` and sessions are two hours each,
///   rounded up.
///
/// ```
/// use rs_poker_bankroll::sizing::estimate_time_to_target;
///
/// let estimate = estimate_time_to_target(100.0, 400.0, 50.0, 60.0, 1.0).unwrap();
/// assert_eq!(estimate.hands_needed, 600.0);
/// assert_eq!(estimate.hours_needed, 10.0);
/// assert_eq!(estimate.sessions_needed, 5.0);
/// ```
pub fn estimate_time_to_target(
    current: f64,
    target: f64,
    winrate_bb_per_100: f64,
    hands_per_hour: f64,
    big_blind: f64,
) -> Result<TimeEstimate, BankrollError> {
    if let Some(&amount) = [current, target].iter().find(|v| !v.is_finite()) {
        return Err(BankrollError::NonFiniteAmount(amount));
    }
    if !is_positive(hands_per_hour) {
        return Err(BankrollError::InvalidHandsPerHour(hands_per_hour));
    }
    if !is_positive(big_blind) {
        return Err(BankrollError::InvalidBigBlind(big_blind));
    }
    if !winrate_bb_per_100.is_finite() {
        return Err(BankrollError::NonFiniteWinrate(winrate_bb_per_100));
    }

    if target <= current {
        return Ok(TimeEstimate::already_reached());
    }
    if winrate_bb_per_100 <= 0.0 {
        event!(
            tracing::Level::DEBUG,
            winrate = winrate_bb_per_100,
            "Target unreachable without a positive winrate"
        );
        return Ok(TimeEstimate::unreachable());
    }

    let dollars_needed = target - current;
    let dollars_per_hand = (winrate_bb_per_100 / 100.0) * big_blind;
    let hands_needed = dollars_needed / dollars_per_hand;
    let hours_needed = hands_needed / hands_per_hour;

    Ok(TimeEstimate {
        status: TargetStatus::Reachable,
        hands_needed,
        hours_needed,
        sessions_needed: (hours_needed / SESSION_HOURS).ceil(),
        dollars_per_hour: Some(dollars_per_hand * hands_per_hour),
    })
}
