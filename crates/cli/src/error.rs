//! Error handling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Invalid secret: {0}")]
    InvalidSecret(String),

    #[error("Secret does not fit in the field: it must be smaller than 2^{exponent} - 1")]
    SecretOutOfRange { exponent: u32 },

    #[error("Shares disagree on {field}: found {first} and {second}")]
    MixedShares {
        field: &'static str,
        first: usize,
        second: usize,
    },

    #[error("Shares are inconsistent: different subsets recover different secrets")]
    InconsistentShares,
}
