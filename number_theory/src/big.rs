//! Arbitrary-precision mirror of the fixed-width engines on
//! [`num_bigint::BigInt`], plus integer square roots and probable
//! safe-prime generation.
//!
//! The contracts match the fixed-width modules where both exist: the same
//! residue forms, the same `0^0 = 0` convention, the same centered
//! tie-break and the same error taxonomy. Overflow cannot happen here, so
//! the overflow-driven knobs and error paths have no counterpart.
//!
//! Probabilistic primality is delegated wholesale to `glass_pumpkin`;
//! nothing in this module judges a large number prime on its own.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};
use rand::{CryptoRng, RngCore};

use crate::crt::CrtSolution;
use crate::gcd::ExtendedGcd;
use crate::NumberTheoryError;

/// `⌊√n⌋` by Newton's method.
///
/// The iteration starts from a power of two just above the root and
/// descends monotonically once past it, so the first non-decreasing step
/// lands exactly on the floor.
///
/// # Errors
///
/// [`IllegalArgument`](NumberTheoryError::IllegalArgument) for negative `n`.
pub fn sqrt_floor(n: &BigInt) -> Result<BigInt, NumberTheoryError> {
    if n.is_negative() {
        return Err(NumberTheoryError::illegal_argument(format!(
            "square root of negative number {n}"
        )));
    }
    if n.is_zero() || n.is_one() {
        return Ok(n.clone());
    }
    let mut x: BigInt = BigInt::one() << (n.bits() / 2 + 1);
    loop {
        let y: BigInt = (&x + n / &x) >> 1;
        if y >= x {
            return Ok(x);
        }
        x = y;
    }
}

/// `⌈√n⌉`, i.e. [`sqrt_floor`] rounded up unless `n` is a perfect square.
///
/// # Errors
///
/// [`IllegalArgument`](NumberTheoryError::IllegalArgument) for negative `n`.
pub fn sqrt_ceil(n: &BigInt) -> Result<BigInt, NumberTheoryError> {
    let root = sqrt_floor(n)?;
    if &(&root * &root) < n {
        Ok(root + 1)
    } else {
        Ok(root)
    }
}

/// The non-negative greatest common divisor of `a` and `b`, any signs.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = std::mem::replace(&mut b, r);
    }
    a
}

/// Runs the iterative extended Euclidean algorithm on `a` and `b`.
///
/// Inputs of any sign are accepted: the algorithm runs on the magnitudes
/// and the Bézout coefficients are sign-flipped afterwards, so
/// `a·x + b·y = gcd` holds for the original arguments and `gcd >= 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> ExtendedGcd<BigInt> {
    let (mut old_r, mut r) = (a.abs(), b.abs());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_x = &old_x - &quotient * &x;
        old_x = std::mem::replace(&mut x, next_x);
        let next_y = &old_y - &quotient * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    if a.is_negative() {
        old_x = -old_x;
    }
    if b.is_negative() {
        old_y = -old_y;
    }
    ExtendedGcd {
        x: old_x,
        y: old_y,
        gcd: old_r,
    }
}

/// The non-negative least common multiple of `a` and `b`; zero when either
/// argument is zero.
pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    let g = gcd(a, b);
    ((a / g) * b).abs()
}

/// Reduces `n` to the canonical residue in `[0, m - 1]`.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn reduce(n: &BigInt, m: &BigInt) -> Result<BigInt, NumberTheoryError> {
    if !m.is_positive() {
        return Err(NumberTheoryError::invalid_modulus(m, 1));
    }
    let r = n % m;
    if r.is_negative() {
        Ok(r + m)
    } else {
        Ok(r)
    }
}

/// Reduces `n` to the centered residue in `[-⌊m/2⌋, ⌊m/2⌋]`.
///
/// For even `m` both `m/2` and `-m/2` represent the class halfway around
/// the ring; the non-negative candidate `m/2` wins the tie.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn reduce_centered(n: &BigInt, m: &BigInt) -> Result<BigInt, NumberTheoryError> {
    let r = reduce(n, m)?;
    if &(m - &r) < &r {
        Ok(r - m)
    } else {
        Ok(r)
    }
}

/// The centered residue of `a + b (mod m)`.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn add(a: &BigInt, b: &BigInt, m: &BigInt) -> Result<BigInt, NumberTheoryError> {
    reduce_centered(&(a + b), m)
}

/// The centered residue of `a - b (mod m)`.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn sub(a: &BigInt, b: &BigInt, m: &BigInt) -> Result<BigInt, NumberTheoryError> {
    reduce_centered(&(a - b), m)
}

/// The centered residue of `a * b (mod m)`.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn mul(a: &BigInt, b: &BigInt, m: &BigInt) -> Result<BigInt, NumberTheoryError> {
    reduce_centered(&(a * b), m)
}

/// The canonical residue of `n^p (mod m)`, with `0^0 = 0`.
///
/// Non-negative exponents delegate to [`BigInt::modpow`]; a negative
/// exponent is the `|p|`-th power of the modular inverse of `n`.
///
/// # Errors
///
/// - [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
/// - [`UndefinedInverse`](NumberTheoryError::UndefinedInverse) for a
///   negative exponent when `gcd(n, m) != 1`.
pub fn pow(n: &BigInt, p: &BigInt, m: &BigInt) -> Result<BigInt, NumberTheoryError> {
    if !m.is_positive() {
        return Err(NumberTheoryError::invalid_modulus(m, 1));
    }
    if m.is_one() {
        return Ok(BigInt::zero());
    }
    let r = reduce(n, m)?;
    if p.is_zero() {
        // 0^0 = 0; any other base to the zeroth power is 1
        return Ok(if r.is_zero() { r } else { BigInt::one() });
    }
    if p.is_negative() {
        let inv = inverse(&r, m)?;
        return Ok(inv.modpow(&-p, m));
    }
    Ok(r.modpow(p, m))
}

/// The canonical residue of the multiplicative inverse of `n` modulo `m`.
///
/// # Errors
///
/// - [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 2`.
/// - [`UndefinedInverse`](NumberTheoryError::UndefinedInverse) if
///   `gcd(n, m) != 1`.
pub fn inverse(n: &BigInt, m: &BigInt) -> Result<BigInt, NumberTheoryError> {
    if m < &BigInt::from(2) {
        return Err(NumberTheoryError::invalid_modulus(m, 2));
    }
    let r = reduce(n, m)?;
    let bezout = extended_gcd(&r, m);
    if !bezout.gcd.is_one() {
        return Err(NumberTheoryError::undefined_inverse(n, m));
    }
    reduce(&bezout.x, m)
}

/// Combines `r ≡ n1 (mod m1)` and `r ≡ n2 (mod m2)` into a congruence
/// modulo `lcm(m1, m2)`.
///
/// Identical contract to the fixed-width solver: a shared factor `g` of
/// the moduli is tolerated when the residues agree modulo `g`, and one
/// modulus is divided by `g` before the two-term cross-inverse formula.
/// Intermediates cannot overflow here, so there are no arithmetic knobs.
///
/// # Errors
///
/// - [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m1 < 2` or
///   `m2 < 2`.
/// - [`IncompatibleCongruences`](NumberTheoryError::IncompatibleCongruences)
///   if `n1 ≢ n2 (mod g)`.
/// - [`UndefinedInverse`](NumberTheoryError::UndefinedInverse) when a
///   single division by `g` cannot make the moduli coprime.
pub fn combine(
    n1: &BigInt,
    m1: &BigInt,
    n2: &BigInt,
    m2: &BigInt,
) -> Result<CrtSolution<BigInt>, NumberTheoryError> {
    let two = BigInt::from(2);
    if m1 < &two {
        return Err(NumberTheoryError::invalid_modulus(m1, 2));
    }
    if m2 < &two {
        return Err(NumberTheoryError::invalid_modulus(m2, 2));
    }

    let n1 = reduce(n1, m1)?;
    let n2 = reduce(n2, m2)?;

    let g = gcd(m1, m2);
    if !g.is_one() {
        let left = reduce(&n1, &g)?;
        let right = reduce(&n2, &g)?;
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
    let m1_divided = m1 / &g;
    let (a, na, b, nb) = if gcd(&m1_divided, m2).is_one() {
        (m1_divided, n1, m2.clone(), n2)
    } else {
        (m1.clone(), n1, m2 / &g, n2)
    };

    let combined = &a * &b;

    if a.is_one() {
        return Ok(CrtSolution {
            residue: reduce(&nb, &b)?,
            modulus: combined,
            gcd: g,
            cross_inverses: None,
        });
    }
    if b.is_one() {
        return Ok(CrtSolution {
            residue: reduce(&na, &a)?,
            modulus: combined,
            gcd: g,
            cross_inverses: None,
        });
    }

    let inverse_b = inverse(&b, &a)?;
    let inverse_a = inverse(&a, &b)?;

    let residue = reduce(
        &(&na * &b * &inverse_b + &nb * &a * &inverse_a),
        &combined,
    )?;

    Ok(CrtSolution {
        residue,
        modulus: combined,
        gcd: g,
        cross_inverses: Some((inverse_b, inverse_a)),
    })
}

/// The consecutive canonical powers `base^0 .. base^(count - 1) (mod m)`.
///
/// The leading entry follows the `0^0 = 0` convention.
///
/// # Errors
///
/// [`InvalidModulus`](NumberTheoryError::InvalidModulus) if `m < 1`.
pub fn mod_powers(
    base: &BigInt,
    count: usize,
    m: &BigInt,
) -> Result<Vec<BigInt>, NumberTheoryError> {
    if !m.is_positive() {
        return Err(NumberTheoryError::invalid_modulus(m, 1));
    }
    let base = reduce(base, m)?;
    let mut powers = Vec::with_capacity(count);
    if count == 0 {
        return Ok(powers);
    }
    powers.push(pow(&base, &BigInt::zero(), m)?);
    for _ in 1..count {
        let last = powers
            .last()
            .cloned()
            .unwrap_or_else(BigInt::zero);
        powers.push(reduce(&(last * &base), m)?);
    }
    Ok(powers)
}

/// Generates a probable safe prime of `bit_size` bits.
///
/// Candidates come from `glass_pumpkin`'s probable-prime generator; one is
/// accepted as soon as `(p - 1) / 2` also passes the oracle's
/// probable-prime check. The loop runs until a candidate sticks.
///
/// # Errors
///
/// [`IllegalArgument`](NumberTheoryError::IllegalArgument) when the oracle
/// rejects `bit_size` as too small to sample primes from.
pub fn probable_safe_prime<R: RngCore + CryptoRng>(
    bit_size: usize,
    rng: &mut R,
) -> Result<BigUint, NumberTheoryError> {
    loop {
        let candidate = glass_pumpkin::prime::from_rng(bit_size, rng)
            .map_err(|e| NumberTheoryError::illegal_argument(e.to_string()))?;
        if glass_pumpkin::prime::check(&(&candidate >> 1)) {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn sqrt_small_values() {
        for n in 0i64..2000 {
            let floor = sqrt_floor(&big(n)).unwrap();
            let ceil = sqrt_ceil(&big(n)).unwrap();
            assert!(&floor * &floor <= big(n));
            assert!(&(&floor + 1) * &(&floor + 1) > big(n));
            assert!(&ceil * &ceil >= big(n));
        }
        assert!(sqrt_floor(&big(-1)).is_err());
        assert!(sqrt_ceil(&big(-4)).is_err());
    }

    #[test]
    fn sqrt_huge_perfect_square() {
        let root = BigInt::from(3u8).pow(200u32);
        let square = &root * &root;
        assert_eq!(sqrt_floor(&square).unwrap(), root);
        assert_eq!(sqrt_ceil(&square).unwrap(), root);
        assert_eq!(sqrt_floor(&(&square - 1)).unwrap(), &root - 1);
        assert_eq!(sqrt_ceil(&(&square + 1)).unwrap(), &root + 1);
    }

    #[test]
    fn gcd_and_lcm() {
        assert_eq!(gcd(&big(1071), &big(462)), big(21));
        assert_eq!(gcd(&big(-1071), &big(462)), big(21));
        assert_eq!(gcd(&big(0), &big(0)), big(0));
        assert_eq!(lcm(&big(4), &big(6)), big(12));
        assert_eq!(lcm(&big(-4), &big(6)), big(12));
        assert_eq!(lcm(&big(0), &big(7)), big(0));
    }

    #[test]
    fn extended_gcd_bezout_any_sign() {
        let mut rng = thread_rng();
        for _ in 0..500 {
            let a = big(rng.gen_range(-(1i64 << 40)..1 << 40));
            let b = big(rng.gen_range(-(1i64 << 40)..1 << 40));
            let bezout = extended_gcd(&a, &b);
            assert!(!bezout.gcd.is_negative());
            assert_eq!(&a * &bezout.x + &b * &bezout.y, bezout.gcd);
        }
    }

    #[test]
    fn reduce_matches_fixed_width() {
        assert_eq!(reduce(&big(-7), &big(5)).unwrap(), big(3));
        assert_eq!(reduce_centered(&big(7), &big(10)).unwrap(), big(-3));
        // the tie at m/2 keeps the non-negative candidate
        assert_eq!(reduce_centered(&big(5), &big(10)).unwrap(), big(5));
        assert_eq!(reduce_centered(&big(-5), &big(10)).unwrap(), big(5));
        assert!(reduce(&big(3), &big(0)).is_err());
    }

    #[test]
    fn agrees_with_fixed_width_engine() {
        let mut rng = thread_rng();
        for _ in 0..500 {
            let m: i64 = rng.gen_range(1..1 << 30);
            let a: i64 = rng.gen_range(-(1 << 40)..1 << 40);
            let b: i64 = rng.gen_range(-(1 << 40)..1 << 40);
            assert_eq!(
                reduce(&big(a), &big(m)).unwrap(),
                big(crate::modular::reduce(a, m).unwrap())
            );
            assert_eq!(
                reduce_centered(&big(a), &big(m)).unwrap(),
                big(crate::modular::reduce_centered(a, m).unwrap())
            );
            assert_eq!(
                mul(&big(a), &big(b), &big(m)).unwrap(),
                big(crate::modular::mul(a, b, m).unwrap())
            );
        }
    }

    #[test]
    fn pow_conventions() {
        assert_eq!(pow(&big(3), &big(4), &big(5)).unwrap(), big(1));
        assert_eq!(pow(&big(0), &big(0), &big(7)).unwrap(), big(0));
        assert_eq!(pow(&big(5), &big(0), &big(7)).unwrap(), big(1));
        assert_eq!(pow(&big(9), &big(2), &big(1)).unwrap(), big(0));
        // 3^-1 ≡ 5 (mod 7), so 3^-2 ≡ 25 ≡ 4
        assert_eq!(pow(&big(3), &big(-2), &big(7)).unwrap(), big(4));
        assert!(pow(&big(2), &big(-1), &big(4)).is_err());
    }

    #[test]
    fn pow_large_operands() {
        let m = BigInt::from(2u8).pow(127u32) - 1;
        let n = BigInt::from(3u8).pow(100u32);
        let p = big(65537);
        let result = pow(&n, &p, &m).unwrap();
        assert_eq!(result, n.modpow(&p, &m));
        let inv = inverse(&n, &m).unwrap();
        assert_eq!(mul(&result, &pow(&inv, &p, &m).unwrap(), &m).unwrap(), big(1));
    }

    #[test]
    fn inverse_round_trip() {
        let m = big(97);
        for n in 1i64..97 {
            let inv = inverse(&big(n), &m).unwrap();
            assert_eq!(reduce(&(&inv * big(n)), &m).unwrap(), big(1));
        }
        assert!(inverse(&big(0), &m).is_err());
        assert!(inverse(&big(6), &big(9)).is_err());
    }

    #[test]
    fn combine_matches_fixed_width_solver() {
        let solution = combine(&big(2), &big(3), &big(3), &big(5)).unwrap();
        assert_eq!(solution.residue, big(8));
        assert_eq!(solution.modulus, big(15));

        let mut rng = thread_rng();
        for _ in 0..500 {
            let m1: i64 = rng.gen_range(2..1 << 16);
            let m2: i64 = rng.gen_range(2..1 << 16);
            let n1: i64 = rng.gen_range(0..m1);
            let n2: i64 = rng.gen_range(0..m2);
            let fixed = crate::crt::combine(n1, m1, n2, m2);
            let wide = combine(&big(n1), &big(m1), &big(n2), &big(m2));
            match (fixed, wide) {
                (Ok(lhs), Ok(rhs)) => {
                    assert_eq!(big(lhs.residue), rhs.residue);
                    assert_eq!(big(lhs.modulus), rhs.modulus);
                    assert_eq!(big(lhs.gcd), rhs.gcd);
                }
                (Err(lhs), Err(rhs)) => {
                    assert_eq!(std::mem::discriminant(&lhs), std::mem::discriminant(&rhs))
                }
                (lhs, rhs) => {
                    panic!("engines disagree for ({n1},{m1},{n2},{m2}): {lhs:?} vs {rhs:?}")
                }
            }
        }
    }

    #[test]
    fn mod_powers_sequence() {
        assert_eq!(
            mod_powers(&big(3), 5, &big(7)).unwrap(),
            vec![big(1), big(3), big(2), big(6), big(4)]
        );
        // leading entry honors 0^0 = 0
        assert_eq!(
            mod_powers(&big(0), 3, &big(7)).unwrap(),
            vec![big(0), big(0), big(0)]
        );
        assert_eq!(mod_powers(&big(3), 0, &big(7)).unwrap(), Vec::<BigInt>::new());
        assert!(mod_powers(&big(3), 4, &big(0)).is_err());
    }

    #[test]
    fn probable_safe_prime_is_safe() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let p = probable_safe_prime(32, &mut rng).unwrap();
        assert_eq!(p.bits(), 32);
        assert!(glass_pumpkin::prime::check(&p));
        assert!(glass_pumpkin::prime::check(&(&p >> 1)));
    }
}
