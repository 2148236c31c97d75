//! Polynomial operations for Shamir's Secret Sharing.
//!
//! A sharing polynomial is stored without its constant term: the secret is
//! added to each evaluation instead. This module provides random generation
//! of such polynomials, their evaluation, and the matching Lagrange
//! interpolation at `x = 0`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::field::PrimeField;
use crate::Result;

/// The random part `f(x) = a_1*x + a_2*x^2 + ... + a_{k-1}*x^{k-1}` of a
/// sharing polynomial.
///
/// Coefficients are stored in ascending order of degree starting at `x^1`.
/// Together with any single share they reveal the secret, so the type is
/// not `Clone`, its `Debug` output omits the coefficients, and they are
/// cleared on drop.
pub struct Polynomial {
    coefficients: Vec<BigUint>,
}

impl Polynomial {
    /// Draws `degree` coefficients uniformly (up to modulo bias) from `field`.
    ///
    /// # Examples
    /// ```
    /// use mersenne_shamir::field::PrimeField;
    /// use mersenne_shamir::poly::Polynomial;
    /// use num_bigint::BigUint;
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let field = PrimeField::new(BigUint::from(8191u32));
    /// let mut rng = rand_chacha::ChaCha8Rng::from_seed([0; 32]);
    /// let poly = Polynomial::random(2, &field, &mut rng);
    /// assert_eq!(poly.degree(), 2);
    /// ```
    pub fn random<R: RngCore + CryptoRng>(
        degree: usize,
        field: &PrimeField,
        rng: &mut R,
    ) -> Self {
        let coefficients = (0..degree).map(|_| field.random_element(rng)).collect();
        Self { coefficients }
    }

    /// Builds a polynomial from explicit coefficients `[a_1, ..., a_{k-1}]`.
    pub fn from_coefficients(coefficients: Vec<BigUint>) -> Self {
        Self { coefficients }
    }

    /// Number of stored coefficients, which is also the degree of `f`.
    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    /// Evaluates `f(x) mod p`.
    ///
    /// The running power of `x` is advanced before each coefficient is
    /// applied, so the first coefficient multiplies `x^1`. With no
    /// coefficients the result is zero.
    pub fn evaluate(&self, x: &BigUint, field: &PrimeField) -> BigUint {
        let mut eval = BigUint::zero();
        let mut term = BigUint::one();

        for coefficient in &self.coefficients {
            term = field.mul(&term, x);
            eval += field.mul(coefficient, &term);
        }

        field.reduce(&eval)
    }
}

impl std::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polynomial")
            .field("degree", &self.degree())
            .finish_non_exhaustive()
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        // num-bigint gives no access to its limbs, so the best available is
        // releasing each value before the vector itself goes away.
        for coefficient in &mut self.coefficients {
            coefficient.set_zero();
        }
        self.coefficients.clear();
    }
}

/// Recovers `g(0)` from points on `g(x) = f(x) + secret`.
///
/// Uses the Lagrange basis at zero written as
///
/// L_j = Π_{m≠j} x_m / (x_m - x_j)
///
/// which equals the textbook `Π (0 - x_m) / (x_j - x_m)` since every factor
/// has both signs flipped. Terms are reduced as they are accumulated.
///
/// # Errors
/// Returns `ShamirError::ArithmeticFailure` if two x-coordinates are
/// congruent modulo `p`.
///
/// # Examples
/// ```
/// use mersenne_shamir::field::PrimeField;
/// use mersenne_shamir::poly::interpolate_at_zero;
/// use num_bigint::BigUint;
///
/// let field = PrimeField::new(BigUint::from(8191u32));
/// // g(x) = 3x + 42
/// let points = [
///     (BigUint::from(1u32), BigUint::from(45u32)),
///     (BigUint::from(2u32), BigUint::from(48u32)),
/// ];
/// let secret = interpolate_at_zero(&points, &field).unwrap();
/// assert_eq!(secret, BigUint::from(42u32));
/// ```
pub fn interpolate_at_zero(points: &[(BigUint, BigUint)], field: &PrimeField) -> Result<BigUint> {
    let mut secret = BigUint::zero();

    for (j, (x_j, y_j)) in points.iter().enumerate() {
        let basis = lagrange_basis_at_zero(points, j, x_j, field)?;
        secret = field.add(&secret, &field.mul(y_j, &basis));
    }

    Ok(secret)
}

fn lagrange_basis_at_zero(
    points: &[(BigUint, BigUint)],
    j: usize,
    x_j: &BigUint,
    field: &PrimeField,
) -> Result<BigUint> {
    let mut product = BigUint::one();

    for (m, (x_m, _)) in points.iter().enumerate() {
        if m == j {
            continue;
        }

        let denominator = field.inverse(&field.sub(x_m, x_j))?;
        let factor = field.mul(x_m, &denominator);
        product = field.mul(&product, &factor);
    }

    Ok(product)
}
