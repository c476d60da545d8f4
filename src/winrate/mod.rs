//! How much to trust an observed winrate.
//!
//! The simulator takes a winrate as given. In practice that winrate comes
//! from a player's own results, and over a few thousand hands it is mostly
//! noise. This module puts a confidence interval around an observed
//! winrate so the caller can pick a sensible value to simulate with (the
//! lower bound is a common conservative choice).
use ndarray::ArrayView1;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::{BankrollError, is_positive};

/// Per hand variance in BB^2 typical of 6-max no limit holdem.
pub const DEFAULT_VARIANCE_BB2: f64 = 68.0;
pub const DEFAULT_CONFIDENCE: f64 = 0.95;
/// Below this many hands no interval is computed.
pub const MIN_HANDS_FOR_INTERVAL: usize = 10;
/// An hourly interval needs at least this many hours.
pub const MIN_HOURS_FOR_HOURLY: f64 = 1.0;
/// An hourly interval needs at least this many sessions.
pub const MIN_SESSIONS_FOR_HOURLY: usize = 3;

/// Z score for a two sided confidence level. Only 90, 95 and 99% are
/// known; anything else is treated as 95%.
pub fn z_score(confidence: f64) -> f64 {
    const KNOWN: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];
    KNOWN
        .iter()
        .find(|(level, _)| (level - confidence).abs() < 1e-9)
        .map_or(1.96, |&(_, z)| z)
}

/// How big a sample is relative to what is needed to say anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleAdequacy {
    Insufficient,
    Marginal,
    Adequate,
    Good,
    Excellent,
}

impl SampleAdequacy {
    pub fn from_hands(hands: usize) -> Self {
        match hands {
            0..5_000 => SampleAdequacy::Insufficient,
            5_000..10_000 => SampleAdequacy::Marginal,
            10_000..50_000 => SampleAdequacy::Adequate,
            50_000..100_000 => SampleAdequacy::Good,
            _ => SampleAdequacy::Excellent,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SampleAdequacy::Insufficient => {
                "Need 5,000+ hands for meaningful confidence intervals."
            }
            SampleAdequacy::Marginal => "Sample size is marginal. 10,000+ hands recommended.",
            SampleAdequacy::Adequate => {
                "Sample size is adequate for basic statistical confidence."
            }
            SampleAdequacy::Good => "Good sample size. Results are becoming reliable.",
            SampleAdequacy::Excellent => "Excellent sample size. High statistical confidence.",
        }
    }
}

/// What the interval says about the player's true winrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WinrateVerdict {
    /// The whole interval is above zero.
    Winner,
    /// The whole interval is below zero.
    Loser,
    /// Break even is inside the interval.
    Inconclusive,
}

/// A confidence interval around an observed winrate, all in BB/100.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WinrateInterval {
    pub winrate: f64,
    pub lower: f64,
    pub upper: f64,
    pub margin_of_error: f64,
    pub std_error: f64,
    pub hands_played: usize,
    pub confidence: f64,
    pub sample_adequacy: SampleAdequacy,
}

impl WinrateInterval {
    pub fn verdict(&self) -> WinrateVerdict {
        if self.lower > 0.0 {
            WinrateVerdict::Winner
        } else if self.upper < 0.0 {
            WinrateVerdict::Loser
        } else {
            WinrateVerdict::Inconclusive
        }
    }

    /// Whether there were enough hands to compute anything at all.
    pub fn has_data(&self) -> bool {
        self.hands_played >= MIN_HANDS_FOR_INTERVAL
    }

    /// A plain language reading of the interval.
    pub fn interpretation(&self) -> String {
        if !self.has_data() {
            return format!(
                "Insufficient data. Need at least {MIN_HANDS_FOR_INTERVAL} hands."
            );
        }
        let hands = with_thousands(self.hands_played);
        let (winrate, lower, upper) = (self.winrate, self.lower, self.upper);

        match self.verdict() {
            WinrateVerdict::Inconclusive if winrate > 2.0 => format!(
                "Your observed winrate of {winrate:+.1} BB/100 is positive, but with \
                 {hands} hands, we cannot rule out variance. Need more hands for \
                 statistical significance."
            ),
            WinrateVerdict::Inconclusive if winrate < -2.0 => format!(
                "Your observed winrate of {winrate:.1} BB/100 is negative, but variance \
                 could explain these results. The confidence interval includes breakeven."
            ),
            WinrateVerdict::Inconclusive => format!(
                "Results are close to breakeven ({winrate:+.1} BB/100). With {hands} \
                 hands, no clear edge is detectable yet."
            ),
            WinrateVerdict::Winner if lower > 5.0 => format!(
                "Strong winning player! Your true winrate is likely between {lower:+.1} \
                 and {upper:+.1} BB/100. This is statistically significant over {hands} \
                 hands."
            ),
            WinrateVerdict::Winner => format!(
                "Statistically significant winner. True winrate likely between \
                 {lower:+.1} and {upper:+.1} BB/100. Based on {hands} hands."
            ),
            WinrateVerdict::Loser => format!(
                "Results indicate a losing winrate. True winrate likely between \
                 {lower:.1} and {upper:.1} BB/100. Consider reviewing strategy or moving \
                 down in stakes."
            ),
        }
    }
}

/// `12345` as `"12,345"`.
fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Confidence interval of the winrate behind `total_bb_won` over
/// `hands_played` hands.
///
/// `variance` is per hand, in BB^2, and must be positive. With fewer than
/// [`MIN_HANDS_FOR_INTERVAL`] hands a zeroed interval is returned.
///
/// ```
/// use rs_poker_bankroll::winrate::{WinrateVerdict, winrate_confidence_interval};
///
/// // +4 BB/100 over 200k hands.
/// let ci = winrate_confidence_interval(8_000.0, 200_000, 68.0, 0.95).unwrap();
/// assert_eq!(ci.verdict(), WinrateVerdict::Winner);
/// ```
pub fn winrate_confidence_interval(
    total_bb_won: f64,
    hands_played: usize,
    variance: f64,
    confidence: f64,
) -> Result<WinrateInterval, BankrollError> {
    if !total_bb_won.is_finite() {
        return Err(BankrollError::NonFiniteAmount(total_bb_won));
    }
    if !is_positive(variance) {
        return Err(BankrollError::DegenerateVariance(variance));
    }

    let sample_adequacy = SampleAdequacy::from_hands(hands_played);
    if hands_played < MIN_HANDS_FOR_INTERVAL {
        return Ok(WinrateInterval {
            winrate: 0.0,
            lower: 0.0,
            upper: 0.0,
            margin_of_error: 0.0,
            std_error: 0.0,
            hands_played,
            confidence,
            sample_adequacy,
        });
    }

    let hands = hands_played as f64;
    let winrate = total_bb_won / hands * 100.0;
    let std_error = (variance / hands).sqrt() * 100.0;
    let margin_of_error = z_score(confidence) * std_error;

    Ok(WinrateInterval {
        winrate,
        lower: winrate - margin_of_error,
        upper: winrate + margin_of_error,
        margin_of_error,
        std_error,
        hands_played,
        confidence,
        sample_adequacy,
    })
}

/// Hands needed before the interval is `target_margin` BB/100 either side.
///
/// Both `target_margin` and `variance` must be positive. Answers too large
/// for a `u64` saturate at `u64::MAX`.
pub fn hands_needed_for_confidence(
    target_margin: f64,
    variance: f64,
    confidence: f64,
) -> Result<u64, BankrollError> {
    if !is_positive(target_margin) {
        return Err(BankrollError::InvalidMargin(target_margin));
    }
    if !is_positive(variance) {
        return Err(BankrollError::DegenerateVariance(variance));
    }
    let z = z_score(confidence);
    Ok(((z * 100.0).powi(2) * variance / target_margin.powi(2)).ceil() as u64)
}

/// A confidence interval around an observed hourly rate, in money per
/// hour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HourlyRateInterval {
    pub hourly_rate: f64,
    pub lower: f64,
    pub upper: f64,
    pub margin_of_error: f64,
    pub sessions: usize,
    pub hours: f64,
}

/// Confidence interval of the hourly rate behind `total_profit` over
/// `hours_played`, using the spread of `session_profits`.
///
/// The spread is the population standard deviation of the session
/// results. Its standard error is converted to an hourly margin with the
/// average session length.
///
/// `None` with less than [`MIN_HOURS_FOR_HOURLY`] hours, fewer than
/// [`MIN_SESSIONS_FOR_HOURLY`] sessions, or any non-finite input.
pub fn hourly_rate_confidence_interval(
    total_profit: f64,
    hours_played: f64,
    session_profits: &[f64],
    confidence: f64,
) -> Option<HourlyRateInterval> {
    let sessions = ArrayView1::from(session_profits);
    if !total_profit.is_finite()
        || !hours_played.is_finite()
        || hours_played < MIN_HOURS_FOR_HOURLY
        || sessions.len() < MIN_SESSIONS_FOR_HOURLY
        || sessions.iter().any(|p| !p.is_finite())
    {
        return None;
    }

    let count = sessions.len() as f64;
    let hourly_rate = total_profit / hours_played;
    let std_error = sessions.std(0.0) / count.sqrt();
    let hours_per_session = hours_played / count;
    let margin_of_error = z_score(confidence) * std_error / hours_per_session;

    Some(HourlyRateInterval {
        hourly_rate,
        lower: hourly_rate - margin_of_error,
        upper: hourly_rate + margin_of_error,
        margin_of_error,
        sessions: sessions.len(),
        hours: hours_played,
    })
}
