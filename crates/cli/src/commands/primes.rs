//! Primes command implementation

use anyhow::{Context, Result};
use clap::Args;
use mersenne_shamir::mersenne;

use crate::config::Config;
use crate::utils;

/// Values above this many bits are summarised instead of printed.
const MAX_PRINTED_BITS: u32 = 4096;

#[derive(Args)]
pub struct PrimesCommand {
    /// Print the prime at this index
    #[arg(long, value_name = "INDEX")]
    pub index: Option<usize>,

    /// Print values in hex
    #[arg(long)]
    pub hex: bool,

    /// Output format for the listing
    #[arg(long, value_enum, default_value = "table")]
    pub output_format: PrimesOutputFormat,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum PrimesOutputFormat {
    Table,
    Json,
}

#[derive(Debug, serde::Serialize)]
struct PrimeInfo {
    index: usize,
    exponent: u32,
    bits: u64,
    decimal_digits: u64,
    usable: bool,
    is_default: bool,
}

impl PrimeInfo {
    fn new(index: usize, exponent: u32, default_index: usize) -> Self {
        Self {
            index,
            exponent,
            // 2^e - 1 is e one-bits
            bits: u64::from(exponent),
            decimal_digits: utils::mersenne_digits(exponent),
            usable: index != 0,
            is_default: index == default_index,
        }
    }
}

impl PrimesCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        if let Some(index) = self.index {
            return self.print_prime(index);
        }

        let infos: Vec<PrimeInfo> = mersenne::EXPONENTS
            .iter()
            .enumerate()
            .map(|(index, &exponent)| {
                PrimeInfo::new(index, exponent, config.defaults.prime_index)
            })
            .collect();

        match self.output_format {
            PrimesOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
            PrimesOutputFormat::Table => output_table(&infos),
        }

        Ok(())
    }

    fn print_prime(&self, index: usize) -> Result<()> {
        let exponent = mersenne::exponent(index)?;
        if exponent > MAX_PRINTED_BITS {
            println!(
                "2^{} - 1 ({} decimal digits)",
                exponent,
                utils::mersenne_digits(exponent)
            );
            return Ok(());
        }

        let prime = mersenne::prime(index).context("Failed to build prime")?;
        println!("{}", utils::format_biguint(&prime, self.hex));
        Ok(())
    }
}

fn output_table(infos: &[PrimeInfo]) {
    println!("Mersenne Primes");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("┌───────┬────────────┬────────────┬────────────────┬──────────┐");
    println!("│ Index │ Exponent   │ Bits       │ Digits         │ Note     │");
    println!("├───────┼────────────┼────────────┼────────────────┼──────────┤");

    for info in infos {
        let note = if !info.usable {
            "unusable"
        } else if info.is_default {
            "default"
        } else {
            ""
        };
        println!(
            "│ {:<5} │ {:<10} │ {:<10} │ {:<14} │ {:<8} │",
            info.index, info.exponent, info.bits, info.decimal_digits, note
        );
    }
    println!("└───────┴────────────┴────────────┴────────────────┴──────────┘");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_info_matches_prime() {
        for index in 1..16 {
            let info = PrimeInfo::new(index, mersenne::EXPONENTS[index], 13);
            let prime = mersenne::prime(index).unwrap();
            assert_eq!(info.bits, prime.bits());
            assert_eq!(info.decimal_digits, prime.to_str_radix(10).len() as u64);
            assert!(info.usable);
            assert_eq!(info.is_default, index == 13);
        }
    }

    #[test]
    fn test_index_zero_is_unusable() {
        let info = PrimeInfo::new(0, 0, 13);
        assert!(!info.usable);
        assert_eq!(info.bits, 0);
        assert_eq!(info.decimal_digits, 1);
    }
}
