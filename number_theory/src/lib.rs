#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! Number-theoretic building blocks for modular cryptographic arithmetic:
//! gcd and Bézout coefficients, modular rings with canonical and centered
//! residues, a Chinese Remainder solver that tolerates non-coprime moduli,
//! discrete logarithms, trial-division primality and safe-prime search,
//! prime-power factorization and Pollard's p−1, all generic over the
//! signed fixed-width integers, plus an arbitrary-precision mirror on
//! [`num_bigint::BigInt`].
//!
//! Every engine is a set of free functions without internal state; all
//! failures surface as [`NumberTheoryError`].

pub mod big;
pub mod crt;
pub mod discrete_log;
pub mod factor;
pub mod gcd;
pub mod modular;
pub mod primality;

pub mod error;

mod integer;

pub use crt::{CrtOptions, CrtSolution};
pub use error::NumberTheoryError;
pub use gcd::ExtendedGcd;
pub use integer::SignedInteger;
