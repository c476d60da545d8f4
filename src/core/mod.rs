//! This is the core module. It holds the pieces shared by
//! every other part of the crate: the error type and the
//! axis aware statistics over trajectory matrices.

/// Input validation errors.
mod error;
/// Export the error.
pub use self::error::BankrollError;

/// Axis aware reductions (percentiles, medians, drawdowns).
pub mod stats;

/// True for a finite value strictly above zero.
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
