//! Defines the abstraction over the signed integer widths the engine
//! operates on.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_traits::{CheckedNeg, CheckedRem, Euclid, FromPrimitive, NumAssign, PrimInt, Signed};
use serde::{Deserialize, Serialize};

use crate::NumberTheoryError;

/// An abstraction over the signed primitive integer types.
///
/// Every algorithm in this crate is written once against this trait instead
/// of being repeated per width. The arithmetic bounds are overflow-checked
/// wherever the true result may leave the representable range; the small
/// associated constants feed the 6- and 12-based candidate wheels.
pub trait SignedInteger:
    'static
    + Send
    + Sync
    + Default
    + Hash
    + Debug
    + Display
    + PrimInt
    + Signed
    + NumAssign
    + Euclid
    + CheckedNeg
    + CheckedRem
    + FromPrimitive
    + Serialize
    + for<'de> Deserialize<'de>
{
    /// Bit width of the type.
    const BITS: u32;
    /// The constant `2`.
    const TWO: Self;
    /// The constant `3`.
    const THREE: Self;
    /// The constant `4`.
    const FOUR: Self;
    /// The constant `5`.
    const FIVE: Self;
    /// The constant `6`.
    const SIX: Self;
    /// The constant `7`.
    const SEVEN: Self;
    /// The constant `11`.
    const ELEVEN: Self;
    /// The constant `12`.
    const TWELVE: Self;
}

macro_rules! impl_signed_integer {
    ($($t:ty),*) => {$(
        impl SignedInteger for $t {
            const BITS: u32 = <$t>::BITS;
            const TWO: Self = 2;
            const THREE: Self = 3;
            const FOUR: Self = 4;
            const FIVE: Self = 5;
            const SIX: Self = 6;
            const SEVEN: Self = 7;
            const ELEVEN: Self = 11;
            const TWELVE: Self = 12;
        }
    )*};
}

impl_signed_integer!(i8, i16, i32, i64, i128, isize);

/// The absolute value of `n`, failing with [`Overflow`] when `n` is the
/// extreme negative value of the width.
///
/// [`Overflow`]: NumberTheoryError::Overflow
#[inline]
pub(crate) fn checked_abs<T: SignedInteger>(
    n: T,
    operation: &'static str,
) -> Result<T, NumberTheoryError> {
    if n.is_negative() {
        n.checked_neg()
            .ok_or(NumberTheoryError::Overflow { operation })
    } else {
        Ok(n)
    }
}
