//! Arithmetic in the prime field GF(p).
//!
//! Elements are plain [`BigUint`] values in `[0, p)`. A [`PrimeField`] owns
//! the modulus and performs every operation with reduction, so callers never
//! hold unreduced intermediates.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::{Result, ShamirError};

/// The field of integers modulo a prime `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
    byte_len: usize,
}

impl PrimeField {
    /// Creates the field for the given modulus.
    ///
    /// The modulus is not tested for primality; every entry of the
    /// [`mersenne`](crate::mersenne) catalog except index 0 is prime.
    pub fn new(modulus: BigUint) -> Self {
        let byte_len = modulus.bits().div_ceil(8) as usize;
        Self { modulus, byte_len }
    }

    /// Returns the modulus `p`.
    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Returns the length in bytes of the big-endian encoding of `p`.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Reduces `a` into `[0, p)`.
    #[inline]
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    /// Computes `(a + b) mod p`.
    #[inline]
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// Computes `(a - b) mod p`.
    ///
    /// Inputs need not be reduced; the subtraction is carried out as
    /// `a + (p - b mod p)` so it never underflows.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let b = self.reduce(b);
        self.add(a, &(&self.modulus - b))
    }

    /// Computes `(a * b) mod p`.
    #[inline]
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Computes the multiplicative inverse of `a` modulo `p`.
    ///
    /// # Errors
    /// Returns `ShamirError::ArithmeticFailure` if `a` shares a factor with
    /// `p`, which for a prime modulus means `a ≡ 0 (mod p)`.
    ///
    /// # Examples
    /// ```
    /// use mersenne_shamir::field::PrimeField;
    /// use num_bigint::BigUint;
    ///
    /// let field = PrimeField::new(BigUint::from(8191u32));
    /// let a = BigUint::from(1234u32);
    /// let inv = field.inverse(&a).unwrap();
    /// assert_eq!(field.mul(&a, &inv), BigUint::from(1u32));
    /// ```
    pub fn inverse(&self, a: &BigUint) -> Result<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(ShamirError::ArithmeticFailure(
                "zero has no multiplicative inverse".to_string(),
            ));
        }

        a.modinv(&self.modulus).ok_or_else(|| {
            ShamirError::ArithmeticFailure(format!(
                "value is not invertible modulo {}",
                self.modulus
            ))
        })
    }

    /// Samples a field element from `rng`.
    ///
    /// Exactly [`byte_len`](Self::byte_len) bytes are drawn, read as a
    /// big-endian integer and reduced modulo `p`. Unless `p` is a power of
    /// 256 the result carries a small modulo bias.
    pub fn random_element<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        let mut buf = Zeroizing::new(vec![0u8; self.byte_len]);
        rng.fill_bytes(&mut buf);
        self.reduce(&BigUint::from_bytes_be(&buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;
    use rand_chacha::rand_core::SeedableRng;

    fn field(p: u64) -> PrimeField {
        PrimeField::new(BigUint::from(p))
    }

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_byte_len() {
        assert_eq!(field(3).byte_len(), 1);
        assert_eq!(field(255).byte_len(), 1);
        assert_eq!(field(8191).byte_len(), 2);
        assert_eq!(field(131071).byte_len(), 3);

        let p127 = (BigUint::one() << 127u32) - 1u32;
        assert_eq!(PrimeField::new(p127).byte_len(), 16);
        let p521 = (BigUint::one() << 521u32) - 1u32;
        assert_eq!(PrimeField::new(p521).byte_len(), 66);
    }

    #[test]
    fn test_add_wraps() {
        let f = field(7);
        assert_eq!(f.add(&big(5), &big(4)), big(2));
        assert_eq!(f.add(&big(0), &big(0)), big(0));
    }

    #[test]
    fn test_sub_never_underflows() {
        let f = field(7);
        assert_eq!(f.sub(&big(2), &big(5)), big(4));
        assert_eq!(f.sub(&big(5), &big(5)), big(0));
        // Unreduced subtrahend
        assert_eq!(f.sub(&big(1), &big(15)), big(0));
    }

    #[test]
    fn test_mul() {
        let f = field(8191);
        assert_eq!(f.mul(&big(8190), &big(8190)), big(1));
        assert_eq!(f.mul(&big(100), &big(0)), big(0));
    }

    #[test]
    fn test_inverse_all_elements_small_field() {
        let f = field(131);
        for a in 1..131u64 {
            let inv = f.inverse(&big(a)).unwrap();
            assert_eq!(f.mul(&big(a), &inv), big(1), "a = {}", a);
            assert!(inv < big(131));
        }
    }

    #[test]
    fn test_inverse_of_zero_fails() {
        let f = field(8191);
        assert!(matches!(
            f.inverse(&big(0)),
            Err(ShamirError::ArithmeticFailure(_))
        ));
        assert!(matches!(
            f.inverse(&big(8191 * 3)),
            Err(ShamirError::ArithmeticFailure(_))
        ));
    }

    #[test]
    fn test_inverse_non_coprime_fails() {
        let f = field(15);
        assert!(f.inverse(&big(5)).is_err());
        assert_eq!(f.inverse(&big(7)).unwrap(), big(13));
    }

    #[test]
    fn test_inverse_matches_fermat() {
        // a^(p-2) is the inverse of a in a prime field
        let p = (BigUint::one() << 127u32) - 1u32;
        let f = PrimeField::new(p.clone());
        let exponent = &p - 2u32;
        for a in [big(1), big(2), big(0xdead_beef), &p - 1u32, &p + 3u32] {
            let expected = f.reduce(&a).modpow(&exponent, &p);
            assert_eq!(f.inverse(&a).unwrap(), expected);
        }
    }

    #[test]
    fn test_inverse_large_mersenne() {
        let p = (BigUint::one() << 521u32) - 1u32;
        let f = PrimeField::new(p.clone());
        let a = &p - 12345u32;
        let inv = f.inverse(&a).unwrap();
        assert!(f.mul(&a, &inv).is_one());
    }

    #[test]
    fn test_random_element_in_range() {
        let f = field(8191);
        let mut rng = rand_chacha::ChaCha8Rng::from_seed([7; 32]);
        for _ in 0..1000 {
            assert!(f.random_element(&mut rng) < big(8191));
        }
    }

    #[test]
    fn test_random_element_deterministic_with_seed() {
        let f = field(131071);
        let mut rng1 = rand_chacha::ChaCha8Rng::from_seed([1; 32]);
        let mut rng2 = rand_chacha::ChaCha8Rng::from_seed([1; 32]);
        for _ in 0..10 {
            assert_eq!(f.random_element(&mut rng1), f.random_element(&mut rng2));
        }
    }
}
