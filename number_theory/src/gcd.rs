//! Greatest common divisor, extended Euclidean algorithm and least common
//! multiple over the signed fixed-width integers.
//!
//! The extended algorithm is kept iterative on purpose: the continued
//! fraction recurrence touches a constant amount of state per quotient, so
//! stack depth stays flat no matter how large the inputs are.

use serde::{Deserialize, Serialize};

use crate::integer::checked_abs;
use crate::{NumberTheoryError, SignedInteger};

/// The result of the extended Euclidean algorithm.
///
/// Satisfies `x * a + y * b == gcd == gcd(a, b)` with `gcd >= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedGcd<T> {
    /// Bézout coefficient of the first operand.
    pub x: T,
    /// Bézout coefficient of the second operand.
    pub y: T,
    /// The greatest common divisor, always non-negative.
    pub gcd: T,
}

/// Calculates the greatest common divisor of `a` and `b`.
///
/// The result is always non-negative; `gcd(0, 0) == 0` and
/// `gcd(a, 0) == |a|`.
///
/// # Errors
///
/// [`Overflow`](NumberTheoryError::Overflow) when the true result is
/// `|MIN|`, which has no positive counterpart in the width.
pub fn gcd<T: SignedInteger>(a: T, b: T) -> Result<T, NumberTheoryError> {
    let mut a = a;
    let mut b = b;
    while !b.is_zero() {
        // `checked_rem` only fails on `MIN % -1`, whose remainder is 0.
        let r = a.checked_rem(&b).unwrap_or_else(T::zero);
        a = b;
        b = r;
    }
    checked_abs(a, "gcd")
}

/// Calculates the greatest common divisor of `a` and `b` together with the
/// Bézout coefficients `x` and `y` such that `x * a + y * b == gcd(a, b)`.
///
/// Both operands being zero yields `(1, 0, 0)`; a single zero operand is
/// answered directly without entering the recurrence.
///
/// # Errors
///
/// [`IllegalArgument`](NumberTheoryError::IllegalArgument) when either
/// operand is negative. The cofactors of non-negative inputs are bounded by
/// half the opposite operand, so the recurrence itself cannot overflow.
pub fn extended_gcd<T: SignedInteger>(a: T, b: T) -> Result<ExtendedGcd<T>, NumberTheoryError> {
    if a.is_negative() || b.is_negative() {
        return Err(NumberTheoryError::illegal_argument(format!(
            "extended gcd requires non-negative operands, got ({a}, {b})"
        )));
    }

    if b.is_zero() {
        return Ok(ExtendedGcd {
            x: T::one(),
            y: T::zero(),
            gcd: a,
        });
    }
    if a.is_zero() {
        return Ok(ExtendedGcd {
            x: T::zero(),
            y: T::one(),
            gcd: b,
        });
    }

    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (T::one(), T::zero());
    let (mut old_y, mut y) = (T::zero(), T::one());

    while !r.is_zero() {
        let quotient = old_r / r;

        let next = old_r - quotient * r;
        old_r = r;
        r = next;

        let next = old_x - quotient * x;
        old_x = x;
        x = next;

        let next = old_y - quotient * y;
        old_y = y;
        y = next;
    }

    Ok(ExtendedGcd {
        x: old_x,
        y: old_y,
        gcd: old_r,
    })
}

/// Calculates the least common multiple `|a / gcd(a, b) * b|`.
///
/// Returns `0` if either operand is `0`.
///
/// # Errors
///
/// [`Overflow`](NumberTheoryError::Overflow) when the true result is not
/// representable in the width.
pub fn lcm<T: SignedInteger>(a: T, b: T) -> Result<T, NumberTheoryError> {
    if a.is_zero() || b.is_zero() {
        return Ok(T::zero());
    }
    let g = gcd(a, b)?;
    let scaled = (a / g)
        .checked_mul(&b)
        .ok_or(NumberTheoryError::Overflow { operation: "lcm" })?;
    checked_abs(scaled, "lcm")
}
