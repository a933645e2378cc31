//! Deterministic trial-division primality and safe-primality testing,
//! plus adjacent prime and safe-prime search.
//!
//! All tests walk a wheel: divisor candidates congruent to `±1 mod 6` for
//! primality, and the single admissible class `11 mod 12` for safe primes
//! above 7. The search functions step through the same classes in the
//! requested direction, so no valid candidate in the scanned range is ever
//! skipped.

use crate::{NumberTheoryError, SignedInteger};

/// Tests `n` for primality by trial division with a 6k±1 wheel.
///
/// After 2 and 3 only candidates congruent to 1 or 5 mod 6 are tested, up
/// to `⌊√n⌋`. Negative inputs, 0 and 1 are not prime.
pub fn is_prime<T: SignedInteger>(n: T) -> bool {
    if n < T::TWO {
        return false;
    }
    if n == T::TWO || n == T::THREE {
        return true;
    }
    if (n % T::TWO).is_zero() || (n % T::THREE).is_zero() {
        return false;
    }
    let mut candidate = T::FIVE;
    // `candidate <= n / candidate` bounds the walk by ⌊√n⌋ without overflow
    while candidate <= n / candidate {
        if (n % candidate).is_zero() || (n % (candidate + T::TWO)).is_zero() {
            return false;
        }
        candidate = candidate + T::SIX;
    }
    true
}

/// Tests whether `n` is a safe prime, i.e. `n` and `(n - 1) / 2` are both
/// prime.
///
/// Above 7 a safe prime must be congruent to 11 mod 12, so every other
/// residue class is rejected before any division happens. 5 and 7 are the
/// only safe primes outside that class.
pub fn is_safe_prime<T: SignedInteger>(n: T) -> bool {
    if n == T::FIVE || n == T::SEVEN {
        return true;
    }
    if n < T::ELEVEN || n % T::TWELVE != T::ELEVEN {
        return false;
    }
    is_prime(n) && is_prime((n - T::one()) / T::TWO)
}

/// Finds the smallest prime strictly greater than `n`.
///
/// # Errors
///
/// [`Overflow`](NumberTheoryError::Overflow) when no prime above `n` is
/// representable in the width.
pub fn prime_after<T: SignedInteger>(n: T) -> Result<T, NumberTheoryError> {
    const OP: &str = "prime_after";
    if n < T::TWO {
        return Ok(T::TWO);
    }
    if n == T::TWO {
        return Ok(T::THREE);
    }
    if n < T::FIVE {
        return Ok(T::FIVE);
    }

    let mut candidate = checked_add(n, T::one(), OP)?;
    loop {
        let r = candidate % T::SIX;
        if r == T::one() || r == T::FIVE {
            break;
        }
        candidate = checked_add(candidate, T::one(), OP)?;
    }
    loop {
        if is_prime(candidate) {
            return Ok(candidate);
        }
        let step = if candidate % T::SIX == T::one() {
            T::FOUR
        } else {
            T::TWO
        };
        candidate = checked_add(candidate, step, OP)?;
    }
}

/// Finds the largest prime strictly smaller than `n`.
///
/// # Errors
///
/// [`IllegalArgument`](NumberTheoryError::IllegalArgument) when `n <= 2`,
/// since no smaller prime exists.
pub fn prime_before<T: SignedInteger>(n: T) -> Result<T, NumberTheoryError> {
    if n <= T::TWO {
        return Err(NumberTheoryError::illegal_argument(format!(
            "there is no prime below {n}"
        )));
    }
    if n == T::THREE {
        return Ok(T::TWO);
    }
    if n <= T::FIVE {
        return Ok(T::THREE);
    }

    let mut candidate = n - T::one();
    loop {
        let r = candidate % T::SIX;
        if r == T::one() || r == T::FIVE {
            break;
        }
        candidate = candidate - T::one();
    }
    // the walk ends at 5 at the latest, which is prime
    loop {
        if is_prime(candidate) {
            return Ok(candidate);
        }
        let step = if candidate % T::SIX == T::one() {
            T::TWO
        } else {
            T::FOUR
        };
        candidate = candidate - step;
    }
}

/// Finds the smallest safe prime strictly greater than `n`.
///
/// # Errors
///
/// [`Overflow`](NumberTheoryError::Overflow) when no safe prime above `n`
/// is representable in the width.
pub fn safe_prime_after<T: SignedInteger>(n: T) -> Result<T, NumberTheoryError> {
    const OP: &str = "safe_prime_after";
    if n < T::FIVE {
        return Ok(T::FIVE);
    }
    if n < T::SEVEN {
        return Ok(T::SEVEN);
    }
    if n < T::ELEVEN {
        return Ok(T::ELEVEN);
    }

    // first value > n congruent to 11 mod 12
    let mut candidate = checked_add(n, T::one(), OP)?;
    let r = candidate % T::TWELVE;
    if r != T::ELEVEN {
        candidate = checked_add(candidate, T::ELEVEN - r, OP)?;
    }
    loop {
        if is_safe_prime(candidate) {
            return Ok(candidate);
        }
        candidate = checked_add(candidate, T::TWELVE, OP)?;
    }
}

/// Finds the largest safe prime strictly smaller than `n`.
///
/// # Errors
///
/// [`IllegalArgument`](NumberTheoryError::IllegalArgument) when `n <= 5`,
/// since no smaller safe prime exists.
pub fn safe_prime_before<T: SignedInteger>(n: T) -> Result<T, NumberTheoryError> {
    if n <= T::FIVE {
        return Err(NumberTheoryError::illegal_argument(format!(
            "there is no safe prime below {n}"
        )));
    }
    if n <= T::SEVEN {
        return Ok(T::FIVE);
    }
    if n <= T::ELEVEN {
        return Ok(T::SEVEN);
    }

    // largest value < n congruent to 11 mod 12
    let mut candidate = n - T::one();
    let r = candidate % T::TWELVE;
    if r != T::ELEVEN {
        let gap = if r > T::ELEVEN {
            r - T::ELEVEN
        } else {
            r + T::one()
        };
        candidate = candidate - gap;
    }
    loop {
        if is_safe_prime(candidate) {
            return Ok(candidate);
        }
        if candidate == T::ELEVEN {
            return Ok(T::SEVEN);
        }
        candidate = candidate - T::TWELVE;
    }
}

#[inline]
fn checked_add<T: SignedInteger>(
    a: T,
    b: T,
    operation: &'static str,
) -> Result<T, NumberTheoryError> {
    a.checked_add(&b)
        .ok_or(NumberTheoryError::Overflow { operation })
}
