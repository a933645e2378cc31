//! Discrete logarithm search: Shanks' baby-step/giant-step algorithm and
//! an exhaustive linear scan.
//!
//! Both solvers return `Ok(None)` when no exponent exists; errors are
//! reserved for violated preconditions. The baby-step table is a
//! function-local hash map that never escapes the call, keeping the engine
//! stateless.

use std::collections::HashMap;

use crate::{modular, NumberTheoryError, SignedInteger};

/// Finds the smallest `p >= 0` with `n^p ≡ target (mod m)` by Shanks'
/// baby-step/giant-step algorithm in `O(√m)` time and space.
///
/// A table of `n^i (mod m)` for `i` in `[0, bound)` with `bound = ⌈√m⌉` is
/// probed while a running guess is multiplied by `(n⁻¹)^bound` per giant
/// step. The degenerate bases `n ≡ 0, 1, -1` and the target `1` are
/// answered without building the table.
///
/// # Errors
///
/// - [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
/// - [`UndefinedInverse`](NumberTheoryError::UndefinedInverse) if
///   `gcd(n, m) != 1` past the degenerate screens.
pub fn baby_step_giant_step<T: SignedInteger>(
    n: T,
    target: T,
    m: T,
) -> Result<Option<T>, NumberTheoryError> {
    if m < T::one() {
        return Err(NumberTheoryError::invalid_modulus(m, 1));
    }
    if m.is_one() {
        // Everything is congruent mod 1, including n^0.
        return Ok(Some(T::zero()));
    }

    let base = modular::reduce(n, m)?;
    let target = modular::reduce(target, m)?;

    if base.is_zero() {
        // 0^0 = 0 makes p = 0 the smallest solution for target 0.
        return Ok(if target.is_zero() { Some(T::zero()) } else { None });
    }
    if target.is_one() {
        return Ok(Some(T::zero()));
    }
    if base.is_one() {
        return Ok(None);
    }
    if base == m - T::one() {
        return Ok(if target == base { Some(T::one()) } else { None });
    }

    let inverse = modular::inverse(base, m)?;
    let bound = ceil_sqrt(m);

    let mut table: HashMap<T, T> = HashMap::new();
    let mut value = T::one();
    let mut i = T::zero();
    while i < bound {
        // keep the first (smallest) exponent for each residue
        table.entry(value).or_insert(i);
        value = modular::reduce(modular::mul(value, base, m)?, m)?;
        i = i + T::one();
    }

    let factor = modular::pow(inverse, bound, m)?;
    let mut guess = target;
    let mut giant = T::zero();
    while giant < bound {
        if let Some(&baby) = table.get(&guess) {
            let p = giant
                .checked_mul(&bound)
                .and_then(|gb| gb.checked_add(&baby))
                .ok_or(NumberTheoryError::Overflow {
                    operation: "baby-step/giant-step exponent",
                })?;
            return Ok(Some(p));
        }
        guess = modular::reduce(modular::mul(guess, factor, m)?, m)?;
        giant = giant + T::one();
    }

    Ok(None)
}

/// Finds the smallest `p` in `[0, m)` with `n^p ≡ target (mod m)` by
/// exhaustive scan.
///
/// `O(m)` and entirely overflow-free, which makes it usable on small
/// moduli, as a correctness oracle for [`baby_step_giant_step`], and for
/// bases without an inverse.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn linear_search<T: SignedInteger>(
    n: T,
    target: T,
    m: T,
) -> Result<Option<T>, NumberTheoryError> {
    if m < T::one() {
        return Err(NumberTheoryError::invalid_modulus(m, 1));
    }
    let base = modular::reduce(n, m)?;
    let target = modular::reduce(target, m)?;

    // value starts at n^0, honoring the 0^0 = 0 convention.
    let mut value = modular::pow(base, T::zero(), m)?;
    let mut p = T::zero();
    while p < m {
        if value == target {
            return Ok(Some(p));
        }
        value = modular::reduce(modular::mul(value, base, m)?, m)?;
        p = p + T::one();
    }
    Ok(None)
}

/// `⌈√m⌉` for `m >= 1` without leaving the width.
fn ceil_sqrt<T: SignedInteger>(m: T) -> T {
    let mut root = T::from_f64(m.to_f64().unwrap_or(f64::MAX).sqrt())
        .unwrap_or_else(|| T::max_value())
        .max(T::one());
    // fix up the float estimate; `root <= m / root` is `root² <= m`
    while root > T::one() && root > m / root {
        root = root - T::one();
    }
    while {
        let next = root + T::one();
        next <= m / next
    } {
        root = root + T::one();
    }
    // root is now ⌊√m⌋; round up unless exact
    if root * root < m {
        root + T::one()
    } else {
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_sqrt_values() {
        assert_eq!(ceil_sqrt(1i64), 1);
        assert_eq!(ceil_sqrt(2i64), 2);
        assert_eq!(ceil_sqrt(4i64), 2);
        assert_eq!(ceil_sqrt(5i64), 3);
        assert_eq!(ceil_sqrt(9i64), 3);
        assert_eq!(ceil_sqrt(10i64), 4);
        assert_eq!(ceil_sqrt((1i64 << 40) + 1), (1 << 20) + 1);
    }

    #[test]
    fn ceil_sqrt_exhaustive_small() {
        for m in 1i32..5000 {
            let root = ceil_sqrt(m);
            assert!(root * root >= m);
            assert!((root - 1) * (root - 1) < m);
        }
    }

    #[test]
    fn finds_known_logarithms() {
        // 2^3 = 8 mod 11
        assert_eq!(baby_step_giant_step(2i64, 8, 11).unwrap(), Some(3));
        // 3^4 = 81 ≡ 13 (mod 17)
        assert_eq!(baby_step_giant_step(3i64, 13, 17).unwrap(), Some(4));
        assert_eq!(linear_search(3i64, 13, 17).unwrap(), Some(4));
    }

    #[test]
    fn degenerate_cases() {
        assert_eq!(baby_step_giant_step(5i32, 7, 1).unwrap(), Some(0));
        assert_eq!(baby_step_giant_step(0i32, 0, 7).unwrap(), Some(0));
        assert_eq!(baby_step_giant_step(0i32, 3, 7).unwrap(), None);
        assert_eq!(baby_step_giant_step(1i32, 1, 7).unwrap(), Some(0));
        assert_eq!(baby_step_giant_step(1i32, 3, 7).unwrap(), None);
        assert_eq!(baby_step_giant_step(6i32, 6, 7).unwrap(), Some(1));
        assert_eq!(baby_step_giant_step(6i32, 1, 7).unwrap(), Some(0));
        assert_eq!(baby_step_giant_step(6i32, 3, 7).unwrap(), None);
        assert_eq!(baby_step_giant_step(4i32, 1, 7).unwrap(), Some(0));
    }

    #[test]
    fn non_invertible_base() {
        assert!(matches!(
            baby_step_giant_step(6i32, 3, 9),
            Err(NumberTheoryError::UndefinedInverse { .. })
        ));
        // the linear scan still works without an inverse
        assert_eq!(linear_search(6i32, 0, 9).unwrap(), Some(2));
        assert_eq!(linear_search(6i32, 3, 9).unwrap(), None);
    }

    #[test]
    fn returned_exponent_reproduces_target() {
        for m in 2i64..60 {
            for n in 0..m {
                for target in 0..m {
                    if let Ok(Some(p)) = baby_step_giant_step(n, target, m) {
                        assert_eq!(
                            modular::pow(n, p, m).unwrap(),
                            target,
                            "bsgs({n}, {target}, {m}) = {p}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn agrees_with_linear_search_on_small_moduli() {
        for m in 1i64..40 {
            for n in 0..m {
                for target in 0..m {
                    let slow = linear_search(n, target, m).unwrap();
                    match baby_step_giant_step(n, target, m) {
                        Ok(fast) => {
                            assert_eq!(
                                fast, slow,
                                "disagreement for n={n}, target={target}, m={m}"
                            );
                        }
                        Err(NumberTheoryError::UndefinedInverse { .. }) => {
                            // fast path refuses non-invertible bases; the
                            // oracle may still find small answers there
                        }
                        Err(other) => panic!("unexpected error {other:?}"),
                    }
                }
            }
        }
    }
}
