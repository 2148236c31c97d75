//! Share representation for Shamir's Secret Sharing.
use num_bigint::BigUint;

/// A single share: the point `(x, y)` on the sharing polynomial.
///
/// Shares issued by [`SecretSharing`](crate::SecretSharing) carry
/// `x = 1..=n` and `y` in `[0, p)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Share {
    /// The x-coordinate (evaluation point) for this share
    pub x: BigUint,
    /// The polynomial value at `x`
    pub y: BigUint,
}

impl Share {
    /// Creates a new share with the given coordinates.
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of this share.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Returns the y-coordinate of this share.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Borrows the share as an `(x, y)` pair, the form accepted by
    /// [`SecretSharing::reconstruct`](crate::SecretSharing::reconstruct).
    pub fn as_point(&self) -> (&BigUint, &BigUint) {
        (&self.x, &self.y)
    }
}

impl From<(BigUint, BigUint)> for Share {
    fn from((x, y): (BigUint, BigUint)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Share(x={}, y={:x})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_creation() {
        let share = Share::new(BigUint::from(5u32), BigUint::from(1000u32));

        assert_eq!(share.x(), &BigUint::from(5u32));
        assert_eq!(share.y(), &BigUint::from(1000u32));
        assert_eq!(
            share.as_point(),
            (&BigUint::from(5u32), &BigUint::from(1000u32))
        );
    }

    #[test]
    fn test_from_tuple() {
        let share: Share = (BigUint::from(1u32), BigUint::from(2u32)).into();
        assert_eq!(share, Share::new(BigUint::from(1u32), BigUint::from(2u32)));
    }

    #[test]
    fn test_display() {
        let share = Share::new(BigUint::from(3u32), BigUint::from(0xbeefu32));
        assert_eq!(format!("{}", share), "Share(x=3, y=beef)");
    }
}
