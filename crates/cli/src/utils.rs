//! Utility functions

use anyhow::Result;
use num_bigint::BigUint;
use num_traits::Num;

use crate::error::CliError;

/// Parse an integer written in decimal, or in hex with a `0x` prefix.
pub fn parse_biguint(s: &str) -> Result<BigUint, CliError> {
    let s = s.trim();
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };

    if digits.is_empty() {
        return Err(CliError::InvalidSecret("empty value".to_string()));
    }

    BigUint::from_str_radix(digits, radix)
        .map_err(|e| CliError::InvalidSecret(format!("'{}' is not a number: {}", s, e)))
}

/// Format an integer in decimal, or in `0x`-prefixed hex.
pub fn format_biguint(value: &BigUint, hex: bool) -> String {
    if hex {
        format!("{:#x}", value)
    } else {
        value.to_string()
    }
}

/// Number of decimal digits of `2^exponent - 1`.
pub fn mersenne_digits(exponent: u32) -> u64 {
    if exponent == 0 {
        return 1;
    }
    (exponent as f64 * std::f64::consts::LOG10_2).floor() as u64 + 1
}

/// Validate that a threshold and share count are reasonable
pub fn validate_sharing_params(threshold: usize, shares: usize) -> Result<()> {
    if threshold == 0 {
        anyhow::bail!("Threshold must be at least 1");
    }
    if shares < threshold {
        anyhow::bail!(
            "Number of shares ({}) must be at least the threshold ({})",
            shares,
            threshold
        );
    }
    Ok(())
}
