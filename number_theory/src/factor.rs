//! Prime-power factorization by trial division and Pollard's p−1 search
//! for a non-trivial divisor.

use std::collections::BTreeMap;

use crate::gcd::gcd;
use crate::{modular, NumberTheoryError, SignedInteger};

/// Factors `n` into a map from prime to positive exponent.
///
/// The product of `base^exponent` over all entries reconstructs `n`
/// exactly. A negative `n` contributes the sentinel entry `-1 ↦ 1`; the
/// extreme negative value of the width, whose magnitude is one past the
/// positive range, decomposes as `-1 × 2^(BITS-1)`.
///
/// Factors of 2 and 3 are divided out first, then the 6k±1 wheel runs up
/// to the square root of what remains; any remainder above 1 is itself
/// prime and gets exponent 1.
///
/// # Errors
///
/// [`IllegalArgument`](NumberTheoryError::IllegalArgument) for `n == 0`,
/// which no product of prime powers can reconstruct.
pub fn factor<T: SignedInteger>(n: T) -> Result<BTreeMap<T, u32>, NumberTheoryError> {
    if n.is_zero() {
        return Err(NumberTheoryError::illegal_argument(
            "0 has no prime-power factorization",
        ));
    }

    let mut factors = BTreeMap::new();
    let mut remaining = n;

    if remaining.is_negative() {
        factors.insert(-T::one(), 1);
        if remaining == T::min_value() {
            // |MIN| is not representable; it is exactly 2^(BITS-1)
            factors.insert(T::TWO, T::BITS - 1);
            return Ok(factors);
        }
        remaining = -remaining;
    }

    for small in [T::TWO, T::THREE] {
        let mut exponent = 0u32;
        while (remaining % small).is_zero() {
            remaining = remaining / small;
            exponent += 1;
        }
        if exponent > 0 {
            factors.insert(small, exponent);
        }
    }

    let mut candidate = T::FIVE;
    while candidate <= remaining / candidate {
        for divisor in [candidate, candidate + T::TWO] {
            let mut exponent = 0u32;
            while (remaining % divisor).is_zero() {
                remaining = remaining / divisor;
                exponent += 1;
            }
            if exponent > 0 {
                factors.insert(divisor, exponent);
            }
        }
        candidate = candidate + T::SIX;
    }

    if remaining > T::one() {
        factors.insert(remaining, 1);
    }

    Ok(factors)
}

/// Searches for a non-trivial divisor of `n` with Pollard's p−1 method.
///
/// For `k` in `[begin, end)` the accumulator holds `base^(k!) (mod n)`,
/// advanced incrementally: each step raises the previous value to the
/// `k`-th power instead of recomputing the factorial power from scratch,
/// so the whole walk costs one modular exponentiation per `k`. After each
/// update `gcd(accumulator - 1, n)` is tested; the first result strictly
/// between 1 and `n` is returned. `Ok(None)` means the search range was
/// exhausted.
///
/// # Errors
///
/// [`IllegalArgument`](NumberTheoryError::IllegalArgument) when `n < 2`,
/// when the range is malformed (`end < begin` or `begin < 1`), when
/// `gcd(base, n) != 1`, or when `base ≡ 0, 1, -1 (mod n)` (those bases can
/// never expose a divisor).
pub fn pollard_p_minus_one<T: SignedInteger>(
    n: T,
    base: T,
    begin: T,
    end: T,
) -> Result<Option<T>, NumberTheoryError> {
    if n < T::TWO {
        return Err(NumberTheoryError::illegal_argument(format!(
            "cannot search for divisors of {n}"
        )));
    }
    if begin < T::one() || end < begin {
        return Err(NumberTheoryError::illegal_argument(format!(
            "malformed factorial power range [{begin}, {end})"
        )));
    }

    let reduced = modular::reduce(base, n)?;
    if reduced.is_zero() || reduced.is_one() || reduced == n - T::one() {
        return Err(NumberTheoryError::illegal_argument(format!(
            "base {base} is congruent to 0, 1 or -1 modulo {n}"
        )));
    }
    if !gcd(reduced, n)?.is_one() {
        return Err(NumberTheoryError::illegal_argument(format!(
            "base {base} shares a factor with {n}"
        )));
    }

    if begin == end {
        return Ok(None);
    }

    // bring the accumulator up to base^(begin!)
    let mut accumulator = reduced;
    let mut exponent = T::TWO;
    while exponent <= begin {
        accumulator = modular::pow(accumulator, exponent, n)?;
        exponent = exponent + T::one();
    }

    let mut k = begin;
    loop {
        let divisor = gcd(accumulator - T::one(), n)?;
        if divisor > T::one() && divisor < n {
            return Ok(Some(divisor));
        }
        k = k + T::one();
        if k >= end {
            return Ok(None);
        }
        accumulator = modular::pow(accumulator, k, n)?;
    }
}
