//! Command implementations for the mersenne-sss CLI

mod primes;
mod recover;
mod split;

pub use primes::PrimesCommand;
pub use recover::RecoverCommand;
pub use split::SplitCommand;

use crate::config::Config;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Split a secret into shares
    Split(SplitCommand),

    /// Recover a secret from shares
    Recover(RecoverCommand),

    /// List the Mersenne primes available as field moduli
    Primes(PrimesCommand),
}

impl Commands {
    pub fn execute(&self, config: &Config) -> Result<()> {
        match self {
            Commands::Split(cmd) => cmd.execute(config),
            Commands::Recover(cmd) => cmd.execute(config),
            Commands::Primes(cmd) => cmd.execute(config),
        }
    }
}
