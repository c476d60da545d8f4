//! Bankroll sizing from a winrate and standard deviation.
//!
//! [`kelly_criterion`] turns an edge into buy-in counts at a few levels of
//! risk. [`estimate_time_to_target`] turns an edge into the expected time
//! to move up to a target bankroll.

mod kelly;
mod time_to_target;

pub use self::kelly::{
    NON_POSITIVE_EDGE_BUYINS, RiskProfile, SizingRecommendation, kelly_criterion,
};
pub use self::time_to_target::{
    DEFAULT_HANDS_PER_HOUR, SESSION_HOURS, TargetStatus, TimeEstimate, estimate_time_to_target,
};
