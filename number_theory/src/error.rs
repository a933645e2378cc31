//! This module defines the errors that may occur
//! during the execution of the library.

use std::fmt::Display;

use thiserror::Error;

/// Errors that may occur.
///
/// Every failure is raised synchronously and signals either a caller
/// programming error or a genuine mathematical impossibility. Nothing is
/// retried or recovered internally, and no operation returns a partially
/// computed result alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberTheoryError {
    /// Error that occurs when the modulus is outside the range the
    /// operation requires.
    #[error("modulus {modulus} is out of range, the operation requires a modulus >= {min}")]
    InvalidModulus {
        /// The offending modulus.
        modulus: String,
        /// The smallest modulus the operation accepts.
        min: u8,
    },
    /// Error that occurs when the given value has no inverse element with
    /// the given modulus.
    #[error("value {value} has no inverse element with the modulus {modulus}")]
    UndefinedInverse {
        /// The value being inverted.
        value: String,
        /// The modulus.
        modulus: String,
    },
    /// Error that occurs when two congruences disagree modulo the shared
    /// factor of their moduli.
    #[error("congruences disagree modulo the shared factor {shared}: {left} != {right}")]
    IncompatibleCongruences {
        /// The gcd of the two moduli.
        shared: String,
        /// The first residue, reduced modulo the shared factor.
        left: String,
        /// The second residue, reduced modulo the shared factor.
        right: String,
    },
    /// Error that occurs when an argument violates an operation's
    /// precondition, e.g. a malformed search range.
    #[error("{reason}")]
    IllegalArgument {
        /// What was violated.
        reason: String,
    },
    /// Error that occurs when the true mathematical result is not
    /// representable in the fixed width.
    #[error("the exact result of {operation} is not representable in this integer width")]
    Overflow {
        /// The operation that overflowed.
        operation: &'static str,
    },
}

impl NumberTheoryError {
    /// An [`InvalidModulus`](Self::InvalidModulus) for `modulus`.
    pub(crate) fn invalid_modulus<T: Display>(modulus: T, min: u8) -> Self {
        Self::InvalidModulus {
            modulus: modulus.to_string(),
            min,
        }
    }

    /// An [`UndefinedInverse`](Self::UndefinedInverse) for `value` mod `modulus`.
    pub(crate) fn undefined_inverse<T: Display>(value: T, modulus: T) -> Self {
        Self::UndefinedInverse {
            value: value.to_string(),
            modulus: modulus.to_string(),
        }
    }

    /// An [`IllegalArgument`](Self::IllegalArgument) with `reason`.
    pub(crate) fn illegal_argument(reason: impl Into<String>) -> Self {
        Self::IllegalArgument {
            reason: reason.into(),
        }
    }
}
