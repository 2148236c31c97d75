//! Shamir's Secret Sharing over Mersenne prime fields.
//!
//! A secret integer `s` is split into `n` shares so that any `k` of them
//! recover `s` exactly and fewer than `k` reveal nothing about it. All
//! arithmetic happens in GF(p) where `p = 2^e - 1` is picked from the
//! [`mersenne`] catalog.

pub mod field;
pub mod mersenne;
pub mod poly;
mod share;

use hashbrown::HashSet;
use log::debug;
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use field::PrimeField;
use poly::Polynomial;
pub use share::Share;

/// Errors that can occur during secret sharing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShamirError {
    /// Prime catalog index out of range
    #[error("Mersenne index {index} is out of range (catalog has {count} entries)")]
    InvalidIndex { index: usize, count: usize },

    /// The catalog entry does not describe a usable modulus
    #[error("Mersenne index {index} does not yield a usable modulus")]
    UnusableModulus { index: usize },

    /// Threshold must satisfy 1 <= k <= n
    #[error("Invalid threshold {threshold} for {shares} shares: need 1 <= k <= n")]
    InvalidThreshold { threshold: usize, shares: usize },

    /// Share x-coordinates 1..=n must all be distinct non-zero residues
    #[error("Cannot issue {shares} shares in a field of order {prime}")]
    TooManyShares { shares: usize, prime: BigUint },

    /// Not enough shares provided to recover the secret
    #[error("Need at least {required} shares, but only {provided} provided")]
    InsufficientShares { required: usize, provided: usize },

    /// Two shares have the same x-coordinate modulo p
    #[error("Duplicate share with x-coordinate: {0}")]
    DuplicateShares(BigUint),

    /// A modular inverse was undefined
    #[error("Arithmetic failure: {0}")]
    ArithmeticFailure(String),
}

pub type Result<T> = std::result::Result<T, ShamirError>;

/// Construction parameters for [`SecretSharing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Index into [`mersenne::EXPONENTS`]
    pub prime_index: usize,
    /// Minimum number of shares needed to reconstruct (k)
    pub threshold: usize,
    /// Number of shares issued (n)
    pub shares: usize,
}

impl Default for Params {
    /// The (3, 5) scheme over `2^521 - 1`.
    fn default() -> Self {
        Self {
            prime_index: 13,
            threshold: 3,
            shares: 5,
        }
    }
}

/// A (k, n) threshold scheme bound to one random polynomial.
///
/// The polynomial is drawn once at construction and never changes, so one
/// instance must be used for a single secret only: splitting two secrets
/// with the same instance lets anyone holding matching shares of both learn
/// their difference.
///
/// `split` and `reconstruct` take `&self`, so an instance can be shared
/// between threads freely.
#[derive(Debug)]
pub struct SecretSharing {
    prime_index: usize,
    field: PrimeField,
    threshold: usize,
    shares: usize,
    poly: Polynomial,
}

impl SecretSharing {
    /// Creates a scheme drawing its polynomial from the operating system RNG.
    ///
    /// # Arguments
    /// * `prime_index` - Index of the Mersenne prime defining the field (1..48)
    /// * `threshold` - Minimum number of shares required to reconstruct (k)
    /// * `shares` - Number of shares produced by `split` (n)
    ///
    /// # Errors
    /// See [`with_rng`](Self::with_rng).
    ///
    /// # Examples
    /// ```
    /// use mersenne_shamir::SecretSharing;
    ///
    /// let sss = SecretSharing::new(13, 3, 5).unwrap();
    /// assert_eq!(sss.threshold(), 3);
    /// assert_eq!(sss.shares(), 5);
    /// ```
    #[cfg(feature = "std")]
    pub fn new(prime_index: usize, threshold: usize, shares: usize) -> Result<Self> {
        let mut rng = rand::rngs::OsRng;
        Self::with_rng(prime_index, threshold, shares, &mut rng)
    }

    /// Creates a scheme from [`Params`] using the operating system RNG.
    #[cfg(feature = "std")]
    pub fn from_params(params: &Params) -> Result<Self> {
        Self::new(params.prime_index, params.threshold, params.shares)
    }

    /// Creates a scheme drawing its polynomial from `rng`.
    ///
    /// Exactly `(threshold - 1) * byte_len(p)` bytes are read from `rng`.
    ///
    /// # Errors
    /// * `ShamirError::InvalidIndex` - `prime_index` is outside the catalog
    /// * `ShamirError::UnusableModulus` - `prime_index` is 0, which yields p = 0
    /// * `ShamirError::InvalidThreshold` - threshold is 0 or exceeds `shares`
    /// * `ShamirError::TooManyShares` - `shares >= p`
    ///
    /// # Examples
    /// ```
    /// use mersenne_shamir::SecretSharing;
    /// use num_bigint::BigUint;
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::from_seed([0x90; 32]);
    /// let sss = SecretSharing::with_rng(5, 2, 3, &mut rng).unwrap();
    /// assert_eq!(sss.prime(), &BigUint::from(8191u32));
    /// ```
    pub fn with_rng<R: RngCore + CryptoRng>(
        prime_index: usize,
        threshold: usize,
        shares: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let prime = mersenne::prime(prime_index)?;
        if prime_index == 0 {
            return Err(ShamirError::UnusableModulus { index: prime_index });
        }

        if threshold == 0 || threshold > shares {
            return Err(ShamirError::InvalidThreshold { threshold, shares });
        }

        if BigUint::from(shares) >= prime {
            return Err(ShamirError::TooManyShares { shares, prime });
        }

        let field = PrimeField::new(prime);
        let poly = Polynomial::random(threshold - 1, &field, rng);

        debug!(
            "Created ({}, {}) scheme over 2^{} - 1 (index {})",
            threshold,
            shares,
            mersenne::EXPONENTS[prime_index],
            prime_index
        );

        Ok(Self {
            prime_index,
            field,
            threshold,
            shares,
            poly,
        })
    }

    /// Returns a human-readable description of the scheme.
    pub fn name(&self) -> String {
        format!(
            "Shamir's secret sharing - ({}, {}) threshold scheme",
            self.threshold, self.shares
        )
    }

    /// Returns the minimum number of shares required to reconstruct.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the number of shares produced by `split`.
    pub fn shares(&self) -> usize {
        self.shares
    }

    /// Returns the catalog index the field was built from.
    pub fn prime_index(&self) -> usize {
        self.prime_index
    }

    /// Returns the field modulus `p`.
    pub fn prime(&self) -> &BigUint {
        self.field.modulus()
    }

    /// Splits `secret` into `n` share values.
    ///
    /// Element `i` of the result is the share for `x = i + 1`. The secret is
    /// expected to lie in `[0, p)`; larger values are silently reduced and
    /// will not reconstruct to the original.
    ///
    /// # Examples
    /// ```
    /// use mersenne_shamir::SecretSharing;
    /// use num_bigint::BigUint;
    /// use std::collections::BTreeMap;
    ///
    /// let sss = SecretSharing::new(13, 3, 5).unwrap();
    /// let secret = BigUint::from(3141592u32);
    /// let ys = sss.split(&secret);
    /// assert_eq!(ys.len(), 5);
    ///
    /// let points: BTreeMap<BigUint, BigUint> = [1u32, 2, 3]
    ///     .iter()
    ///     .map(|&x| (BigUint::from(x), ys[x as usize - 1].clone()))
    ///     .collect();
    /// assert_eq!(sss.reconstruct(&points).unwrap(), secret);
    /// ```
    pub fn split(&self, secret: &BigUint) -> Vec<BigUint> {
        (1..=self.shares)
            .map(|i| {
                let x = BigUint::from(i);
                self.field.add(&self.poly.evaluate(&x, &self.field), secret)
            })
            .collect()
    }

    /// Splits `secret` and pairs each value with its x-coordinate.
    pub fn split_shares(&self, secret: &BigUint) -> Vec<Share> {
        self.split(secret)
            .into_iter()
            .enumerate()
            .map(|(i, y)| Share::new(BigUint::from(i + 1), y))
            .collect()
    }

    /// Recovers the secret from `(x, y)` points.
    ///
    /// All supplied points take part in the interpolation. A failed call
    /// leaves the scheme untouched, so it may be retried with more points.
    ///
    /// # Errors
    /// * `ShamirError::InsufficientShares` - fewer than `threshold` points
    /// * `ShamirError::DuplicateShares` - two x-coordinates congruent modulo p
    ///
    /// # Examples
    /// ```
    /// use mersenne_shamir::{SecretSharing, ShamirError};
    /// use num_bigint::BigUint;
    ///
    /// let sss = SecretSharing::new(7, 4, 7).unwrap();
    /// let secret = BigUint::from(12345u32);
    /// let shares = sss.split_shares(&secret);
    ///
    /// let recovered = sss.reconstruct(shares[2..6].iter().map(|s| s.as_point())).unwrap();
    /// assert_eq!(recovered, secret);
    ///
    /// let err = sss.reconstruct(shares[..3].iter().map(|s| s.as_point()));
    /// assert!(matches!(err, Err(ShamirError::InsufficientShares { .. })));
    /// ```
    pub fn reconstruct<'a, I>(&self, points: I) -> Result<BigUint>
    where
        I: IntoIterator<Item = (&'a BigUint, &'a BigUint)>,
    {
        let points: Vec<(BigUint, BigUint)> = points
            .into_iter()
            .map(|(x, y)| (x.clone(), y.clone()))
            .collect();

        if points.len() < self.threshold {
            return Err(ShamirError::InsufficientShares {
                required: self.threshold,
                provided: points.len(),
            });
        }

        let mut unique_x_coords = HashSet::with_capacity(points.len());
        for (x, _) in &points {
            if !unique_x_coords.insert(self.field.reduce(x)) {
                return Err(ShamirError::DuplicateShares(x.clone()));
            }
        }

        debug!(
            "Reconstructing from {} points (threshold {})",
            points.len(),
            self.threshold
        );

        poly::interpolate_at_zero(&points, &self.field)
    }
}
