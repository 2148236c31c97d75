//! Catalog of Mersenne prime exponents.
//!
//! Each entry `e` names the Mersenne prime `2^e - 1`. The field used by
//! [`SecretSharing`](crate::SecretSharing) is chosen by its index into this
//! table.

use num_bigint::BigUint;
use num_traits::One;

use crate::{Result, ShamirError};

/// Known Mersenne exponents, in increasing order.
///
/// The leading `0` is kept so indices stay stable for existing callers; it
/// produces the value `0`, which is not a usable modulus.
#[rustfmt::skip]
pub const EXPONENTS: [u32; 48] = [
    0, 2, 3, 5, 7, 13, 17, 19, 31, 61, 89, 107, 127, 521, 607, 1279, 2203, 2281,
    3217, 4253, 4423, 9689, 9941, 11213, 19937, 21701, 23209, 44497, 86243, 110503,
    132049, 216091, 756839, 859433, 1257787, 1398269, 2976221, 3021377, 6972593,
    13466917, 20996011, 24036586, 25964951, 30402457, 32582657, 37156667, 42643801,
    43112609,
];

/// Number of entries in the catalog.
pub const COUNT: usize = EXPONENTS.len();

/// Returns the exponent stored at `index`.
///
/// # Errors
/// Returns `ShamirError::InvalidIndex` if `index >= COUNT`.
pub fn exponent(index: usize) -> Result<u32> {
    EXPONENTS
        .get(index)
        .copied()
        .ok_or(ShamirError::InvalidIndex {
            index,
            count: COUNT,
        })
}

/// Returns the Mersenne number `2^EXPONENTS[index] - 1`.
///
/// Index 0 is accepted and yields zero.
///
/// # Errors
/// Returns `ShamirError::InvalidIndex` if `index >= COUNT`.
///
/// # Examples
/// ```
/// use mersenne_shamir::mersenne;
/// use num_bigint::BigUint;
///
/// assert_eq!(mersenne::prime(5).unwrap(), BigUint::from(8191u32));
/// assert!(mersenne::prime(48).is_err());
/// ```
pub fn prime(index: usize) -> Result<BigUint> {
    let e = exponent(index)?;
    Ok((BigUint::one() << e) - 1u32)
}
