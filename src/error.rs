//! Error type for graph construction and backward accumulation.

use thiserror::Error;

/// Errors raised by elementary operations and by the rules replayed during
/// backward accumulation.
///
/// Overflow and NaN are not errors: they propagate through IEEE arithmetic
/// and show up as unusual values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DiffError {
    /// `pow` called with a negative or non-integer exponent.
    #[error("invalid exponent {exponent}: only non-negative integer powers are supported")]
    InvalidExponent { exponent: f64 },

    /// Division by a node whose value is exactly zero.
    #[error("division by zero (numerator {numerator})")]
    DivisionByZero { numerator: f64 },
}

/// Crate-wide result alias.
pub type Result<T, E = DiffError> = std::result::Result<T, E>;
