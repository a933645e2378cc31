//! Modular ring operations over the signed fixed-width integers.
//!
//! Residues come in two forms. The *canonical* form lives in `[0, m-1]`;
//! the *centered* form lives in `[-⌊m/2⌋, ⌊m/2⌋]` and is chosen to minimize
//! magnitude, which keeps intermediate values of chained operations inside
//! `[-m, m]` and therefore representable. Every operation documents which
//! form it returns.

use crate::gcd::extended_gcd;
use crate::{NumberTheoryError, SignedInteger};

/// Checks `m >= min` for an operation, `min` being 1 or 2.
#[inline]
fn check_modulus<T: SignedInteger>(m: T, min: u8) -> Result<(), NumberTheoryError> {
    let bound = if min == 2 { T::TWO } else { T::one() };
    if m < bound {
        return Err(NumberTheoryError::invalid_modulus(m, min));
    }
    Ok(())
}

/// Calculates the canonical residue `n mod m` in `[0, m-1]`.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
#[inline]
pub fn reduce<T: SignedInteger>(n: T, m: T) -> Result<T, NumberTheoryError> {
    check_modulus(m, 1)?;
    Ok(n.rem_euclid(&m))
}

/// Calculates the centered residue of `n mod m`, the congruent value of
/// minimal absolute value in `[-⌊m/2⌋, ⌊m/2⌋]`.
///
/// On an exact half-modulus tie (`m` even and `|n mod m| == m/2`) the
/// non-negative candidate `+m/2` wins. The asymmetry is a deliberate part
/// of the contract: downstream numeric results depend on it, so it must
/// not be replaced by a symmetric rule.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
#[inline]
pub fn reduce_centered<T: SignedInteger>(n: T, m: T) -> Result<T, NumberTheoryError> {
    let r = reduce(n, m)?;
    // `m - r < r` compares |r - m| against |r| without leaving `[0, m]`.
    if m - r < r {
        Ok(r - m)
    } else {
        Ok(r)
    }
}

/// Calculates `a + b (mod m)` in centered form.
///
/// Both operands are centered first, so the raw sum stays within
/// `[-m, m]`.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn add<T: SignedInteger>(a: T, b: T, m: T) -> Result<T, NumberTheoryError> {
    let a = reduce_centered(a, m)?;
    let b = reduce_centered(b, m)?;
    reduce_centered(a + b, m)
}

/// Calculates `a - b (mod m)` in centered form.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn sub<T: SignedInteger>(a: T, b: T, m: T) -> Result<T, NumberTheoryError> {
    let a = reduce_centered(a, m)?;
    let b = reduce_centered(b, m)?;
    reduce_centered(a - b, m)
}

/// Calculates `a * b (mod m)` in centered form.
///
/// The direct product of the centered operands is attempted first. When it
/// would overflow, the product is rebuilt by `O(log min(|a|, |b|))`
/// double-and-add steps over the smaller-magnitude operand; every
/// intermediate value of that walk stays within `[-m, m]`.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn mul<T: SignedInteger>(a: T, b: T, m: T) -> Result<T, NumberTheoryError> {
    let a = reduce_centered(a, m)?;
    let b = reduce_centered(b, m)?;

    if let Some(product) = a.checked_mul(&b) {
        return reduce_centered(product, m);
    }

    // Centered operands are bounded by m/2, so negation is safe.
    let (mut base, mut count) = if b.abs() <= a.abs() { (a, b) } else { (b, a) };
    let negate = count.is_negative();
    if negate {
        count = -count;
    }

    let mut acc = T::zero();
    while count.is_positive() {
        if !(count & T::one()).is_zero() {
            acc = reduce_centered(acc + base, m)?;
        }
        count = count >> 1;
        if count.is_positive() {
            base = reduce_centered(base + base, m)?;
        }
    }

    if negate {
        acc = reduce_centered(T::zero() - acc, m)?;
    }
    Ok(acc)
}

/// Calculates `n^p (mod m)` in canonical form by repeated squaring.
///
/// `n ≡ 0, 1, -1 (mod m)` are answered without entering the square-multiply
/// loop. A negative exponent is rewritten as `(n⁻¹)^|p|`; the most negative
/// representable exponent is handled by computing `(n⁻¹)^(|p| - 1)` and
/// multiplying one extra inverse, since `|p|` itself is not representable.
///
/// `0^0` is defined to be `0`. This deviates from the usual mathematical
/// convention and is preserved deliberately; callers rely on it.
///
/// # Errors
///
/// - [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
/// - [`UndefinedInverse`](NumberTheoryError::UndefinedInverse) for a
///   negative exponent when `gcd(n, m) != 1`, including `n ≡ 0`.
pub fn pow<T: SignedInteger>(n: T, p: T, m: T) -> Result<T, NumberTheoryError> {
    check_modulus(m, 1)?;
    if m.is_one() {
        return Ok(T::zero());
    }

    let r = reduce(n, m)?;
    if p.is_zero() {
        // 0^0 = 0, everything else to the zeroth power is 1.
        return Ok(if r.is_zero() { T::zero() } else { T::one() });
    }
    if r.is_zero() {
        return if p.is_positive() {
            Ok(T::zero())
        } else {
            Err(NumberTheoryError::undefined_inverse(r, m))
        };
    }
    if r.is_one() {
        return Ok(T::one());
    }
    if r == m - T::one() {
        let odd = !(p & T::one()).is_zero();
        return Ok(if odd { m - T::one() } else { T::one() });
    }

    if p.is_negative() {
        let inv = inverse(r, m)?;
        if p == T::min_value() {
            let partial = pow_positive(inv, T::zero() - (p + T::one()), m)?;
            return reduce(mul(partial, inv, m)?, m);
        }
        return pow_positive(inv, T::zero() - p, m);
    }
    pow_positive(r, p, m)
}

/// Square-and-multiply for `p >= 1`, returning canonical form.
fn pow_positive<T: SignedInteger>(n: T, p: T, m: T) -> Result<T, NumberTheoryError> {
    let mut base = reduce_centered(n, m)?;
    let mut acc = T::one();
    let mut p = p;
    while p.is_positive() {
        if !(p & T::one()).is_zero() {
            acc = mul(acc, base, m)?;
        }
        p = p >> 1;
        if p.is_positive() {
            base = mul(base, base, m)?;
        }
    }
    reduce(acc, m)
}

/// Calculates the multiplicative inverse of `n` modulo `m` in canonical
/// form, derived from the extended Euclidean algorithm.
///
/// # Errors
///
/// - [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 2`.
/// - [`UndefinedInverse`](NumberTheoryError::UndefinedInverse) if
///   `n ≡ 0 (mod m)` or `gcd(n, m) != 1`.
pub fn inverse<T: SignedInteger>(n: T, m: T) -> Result<T, NumberTheoryError> {
    check_modulus(m, 2)?;
    let r = reduce(n, m)?;
    if r.is_zero() {
        return Err(NumberTheoryError::undefined_inverse(n, m));
    }
    let bezout = extended_gcd(r, m)?;
    if !bezout.gcd.is_one() {
        return Err(NumberTheoryError::undefined_inverse(n, m));
    }
    reduce(bezout.x, m)
}
