#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::event;

use crate::core::{BankrollError, is_positive};

/// Buy-ins recommended at every risk level when there is no edge to size.
pub const NON_POSITIVE_EDGE_BUYINS: u32 = 100;

/// How much risk of ruin a player is willing to live with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];

    /// The targeted probability of going broke.
    pub fn target_risk_of_ruin(self) -> f64 {
        match self {
            RiskProfile::Conservative => 0.02,
            RiskProfile::Moderate => 0.05,
            RiskProfile::Aggressive => 0.10,
        }
    }

    /// Never recommend fewer buy-ins than this, whatever the edge.
    pub fn min_buyins(self) -> u32 {
        match self {
            RiskProfile::Conservative => 50,
            RiskProfile::Moderate => 30,
            RiskProfile::Aggressive => 20,
        }
    }

    /// Buy-ins needed for this profile given a per hand mean and variance
    /// in big blinds.
    ///
    /// Uses `variance / (risk * mean)`, truncated, then raised to the
    /// profile's floor.
    fn buyins(self, mean: f64, variance: f64) -> u32 {
        if mean <= 0.0 {
            return NON_POSITIVE_EDGE_BUYINS;
        }
        let raw = variance / (self.target_risk_of_ruin() * mean);
        // `as` saturates, so a tiny edge gives u32::MAX rather than wrapping.
        (raw as u32).max(self.min_buyins())
    }
}

/// Kelly based bankroll sizing for one winrate and standard deviation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizingRecommendation {
    /// `mean / variance` per hand. Reference only; negative for a losing
    /// player.
    pub full_kelly_fraction: f64,
    pub conservative_buyins: u32,
    pub moderate_buyins: u32,
    pub aggressive_buyins: u32,
    pub winrate_bb_per_100: f64,
    pub stddev_bb_per_100: f64,
}

impl SizingRecommendation {
    pub fn buyins(&self, profile: RiskProfile) -> u32 {
        match profile {
            RiskProfile::Conservative => self.conservative_buyins,
            RiskProfile::Moderate => self.moderate_buyins,
            RiskProfile::Aggressive => self.aggressive_buyins,
        }
    }

    /// The bankroll needed for `profile` when a single buy-in costs `buy_in`.
    pub fn bankroll_for(&self, profile: RiskProfile, buy_in: f64) -> f64 {
        f64::from(self.buyins(profile)) * buy_in
    }

    /// True when the player has a positive edge and the recommendations
    /// come from the formula rather than the fixed default.
    pub fn has_edge(&self) -> bool {
        self.winrate_bb_per_100 > 0.0
    }
}

/// Kelly criterion bankroll sizing.
///
/// Rates are turned into per hand big blinds (`winrate / 100` and
/// `stddev / 10`). The full Kelly fraction `mean / variance` is reported
/// for reference. Buy-in counts for each [`RiskProfile`] come from
/// `variance / (risk * mean)` with a per profile floor.
///
/// A player without a positive edge has no finite Kelly size, so every
/// profile gets [`NON_POSITIVE_EDGE_BUYINS`].
///
/// ```
/// use rs_poker_bankroll::sizing::{RiskProfile, kelly_criterion};
///
/// let rec = kelly_criterion(5.0, 80.0).unwrap();
/// assert!(rec.buyins(RiskProfile::Conservative) > rec.buyins(RiskProfile::Aggressive));
/// ```
pub fn kelly_criterion(
    winrate_bb_per_100: f64,
    stddev_bb_per_100: f64,
) -> Result<SizingRecommendation, BankrollError> {
    if !is_positive(stddev_bb_per_100) {
        return Err(BankrollError::DegenerateVariance(stddev_bb_per_100));
    }
    if !winrate_bb_per_100.is_finite() {
        return Err(BankrollError::NonFiniteWinrate(winrate_bb_per_100));
    }

    let mean = winrate_bb_per_100 / 100.0;
    let sigma = stddev_bb_per_100 / 10.0;
    let variance = sigma * sigma;

    if mean <= 0.0 {
        event!(
            tracing::Level::DEBUG,
            winrate = winrate_bb_per_100,
            "No positive edge, using the default buy-in count"
        );
    }

    Ok(SizingRecommendation {
        full_kelly_fraction: mean / variance,
        conservative_buyins: RiskProfile::Conservative.buyins(mean, variance),
        moderate_buyins: RiskProfile::Moderate.buyins(mean, variance),
        aggressive_buyins: RiskProfile::Aggressive.buyins(mean, variance),
        winrate_bb_per_100,
        stddev_bb_per_100,
    })
}
