//! Two-congruence Chinese Remainder solver.
//!
//! The solver generalizes past coprime moduli: a shared factor `g` of the
//! two moduli is tolerated as long as the residues agree modulo `g`, in
//! which case one modulus is divided by `g` before the classic two-term
//! formula with cross-inverses is applied. The combined modulus is always
//! `lcm(m1, m2)`.

use serde::{Deserialize, Serialize};

use crate::gcd::{extended_gcd, gcd};
use crate::{modular, NumberTheoryError, SignedInteger};

/// Knobs for the intermediate arithmetic of [`combine_with`].
///
/// Both options trade a few extra reductions for bounded intermediate
/// magnitude. They affect the numeric range of intermediate values only;
/// the final answer is identical either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrtOptions {
    /// Reduce each input residue modulo its own modulus before combining.
    pub pre_reduce_inputs: bool,
    /// Reduce every intermediate product modulo the combined modulus
    /// immediately instead of only at the end.
    pub reduce_each_step: bool,
}

impl Default for CrtOptions {
    fn default() -> Self {
        Self {
            pre_reduce_inputs: true,
            reduce_each_step: true,
        }
    }
}

/// A combined congruence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrtSolution<T> {
    /// The combined residue, canonical in `[0, modulus - 1]`, congruent to
    /// both inputs modulo their respective moduli.
    pub residue: T,
    /// The combined modulus `lcm(m1, m2)`.
    pub modulus: T,
    /// The gcd of the two input moduli.
    pub gcd: T,
    /// The two cross-inverses used by the combining formula, if the
    /// formula ran; `None` when one congruence absorbed the other.
    pub cross_inverses: Option<(T, T)>,
}

/// Combines `r ≡ n1 (mod m1)` and `r ≡ n2 (mod m2)` with default options.
///
/// See [`combine_with`].
#[inline]
pub fn combine<T: SignedInteger>(
    n1: T,
    m1: T,
    n2: T,
    m2: T,
) -> Result<CrtSolution<T>, NumberTheoryError> {
    combine_with(n1, m1, n2, m2, CrtOptions::default())
}

/// Combines the congruences `r ≡ n1 (mod m1)` and `r ≡ n2 (mod m2)` into a
/// single congruence modulo `lcm(m1, m2)`.
///
/// The gcd `g` of the moduli is obtained from the extended Euclidean
/// algorithm. For `g != 1` the residues must agree modulo `g`; one modulus
/// is then divided by `g` (whichever division leaves the pair coprime)
/// before the two-term formula with cross-inverses is applied.
///
/// # Errors
///
/// - [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m1 < 2` or
///   `m2 < 2`.
/// - [`IncompatibleCongruences`](NumberTheoryError::IncompatibleCongruences)
///   if `n1 ≢ n2 (mod g)`.
/// - [`UndefinedInverse`](NumberTheoryError::UndefinedInverse) when a
///   single division by `g` cannot make the moduli coprime (the shared
///   factor is spread over both remainders).
/// - [`Overflow`](NumberTheoryError::Overflow) when `lcm(m1, m2)` is not
///   representable.
pub fn combine_with<T: SignedInteger>(
    n1: T,
    m1: T,
    n2: T,
    m2: T,
    options: CrtOptions,
) -> Result<CrtSolution<T>, NumberTheoryError> {
    if m1 < T::TWO {
        return Err(NumberTheoryError::invalid_modulus(m1, 2));
    }
    if m2 < T::TWO {
        return Err(NumberTheoryError::invalid_modulus(m2, 2));
    }

    let (n1, n2) = if options.pre_reduce_inputs {
        (modular::reduce(n1, m1)?, modular::reduce(n2, m2)?)
    } else {
        (n1, n2)
    };

    let g = extended_gcd(m1, m2)?.gcd;
    if !g.is_one() {
        let left = modular::reduce(n1, g)?;
        let right = modular::reduce(n2, g)?;
        if left != right {
            return Err(NumberTheoryError::IncompatibleCongruences {
                shared: g.to_string(),
                left: left.to_string(),
                right: right.to_string(),
            });
        }
    }

    // Divide m1 by g; if that still shares a factor with m2, divide m2
    // instead. (Either way the product of the pair is lcm(m1, m2).)
    let (a, na, b, nb) = if gcd(m1 / g, m2)?.is_one() {
        (m1 / g, n1, m2, n2)
    } else {
        (m1, n1, m2 / g, n2)
    };

    let combined = a
        .checked_mul(&b)
        .ok_or(NumberTheoryError::Overflow { operation: "crt" })?;

    if a.is_one() {
        return Ok(CrtSolution {
            residue: modular::reduce(nb, b)?,
            modulus: combined,
            gcd: g,
            cross_inverses: None,
        });
    }
    if b.is_one() {
        return Ok(CrtSolution {
            residue: modular::reduce(na, a)?,
            modulus: combined,
            gcd: g,
            cross_inverses: None,
        });
    }

    let inverse_b = modular::inverse(b, a)?;
    let inverse_a = modular::inverse(a, b)?;

    let term_a = product(&[na, b, inverse_b], combined, options.reduce_each_step)?;
    let term_b = product(&[nb, a, inverse_a], combined, options.reduce_each_step)?;
    let residue = modular::reduce(modular::add(term_a, term_b, combined)?, combined)?;

    Ok(CrtSolution {
        residue,
        modulus: combined,
        gcd: g,
        cross_inverses: Some((inverse_b, inverse_a)),
    })
}

/// The product of `factors` modulo `m`, either reduced after every single
/// multiplication or, when `eager` is false, only once the raw product
/// no longer fits.
fn product<T: SignedInteger>(
    factors: &[T],
    m: T,
    eager: bool,
) -> Result<T, NumberTheoryError> {
    if !eager {
        let mut raw = Some(T::one());
        for &f in factors {
            raw = raw.and_then(|acc| acc.checked_mul(&f));
        }
        if let Some(raw) = raw {
            return modular::reduce_centered(raw, m);
        }
        // The direct product left the width; fall through to the eager
        // path, which yields the same residue.
    }
    let mut acc = T::one();
    for &f in factors {
        acc = modular::mul(acc, f, m)?;
    }
    Ok(acc)
}
