//! Recover command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use mersenne_shamir::{SecretSharing, Share};
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::CliError;
use crate::formats::{InputFormat, ShareData};
use crate::utils;

#[derive(Args)]
pub struct RecoverCommand {
    /// Share files or directories to read from
    #[arg(value_name = "SHARES", required_unless_present = "stdin")]
    pub inputs: Vec<PathBuf>,

    /// Input format (auto-detect if not specified)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<InputFormat>,

    /// Output file (use '-' for stdout)
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub output: String,

    /// Threshold (overrides share metadata)
    #[arg(short = 'k', long, value_name = "THRESHOLD")]
    pub threshold: Option<usize>,

    /// Mersenne prime index (overrides share metadata)
    #[arg(short = 'p', long, value_name = "INDEX")]
    pub prime_index: Option<usize>,

    /// Read shares from stdin (one per line)
    #[arg(long)]
    pub stdin: bool,

    /// Print the secret in hex instead of decimal
    #[arg(long)]
    pub hex: bool,

    /// Check that every threshold-sized window of the shares agrees
    #[arg(long)]
    pub verify: bool,
}

impl RecoverCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        let share_data = if self.stdin {
            self.read_shares_from_stdin()?
        } else {
            self.read_shares_from_files()?
        };

        if share_data.is_empty() {
            bail!("No shares provided");
        }

        let prime_index = match self.prime_index {
            Some(index) => index,
            None => agreed_value(&share_data, "prime index", |s| s.prime_index)?
                .unwrap_or(config.defaults.prime_index),
        };

        let threshold = match self.threshold {
            Some(t) => t,
            None => agreed_value(&share_data, "threshold", |s| s.threshold)?
                .unwrap_or(config.defaults.threshold),
        };

        let shares = share_data
            .iter()
            .map(ShareData::to_share)
            .collect::<Result<Vec<Share>>>()?;

        log::debug!(
            "Recovering with prime index {} and threshold {} from {} shares",
            prime_index,
            threshold,
            shares.len()
        );

        // Reconstruction only depends on p and k; n just has to admit k.
        let sss = SecretSharing::new(prime_index, threshold, threshold.max(shares.len()))
            .context("Failed to create secret sharing scheme")?;

        let secret = sss
            .reconstruct(shares.iter().map(Share::as_point))
            .context("Failed to recover secret from shares")?;

        if self.verify {
            verify_windows(&sss, &shares, &secret)?;
        }

        self.output_secret(&utils::format_biguint(&secret, self.hex))?;

        if self.output != "-" {
            println!(
                "✅ Secret successfully recovered from {} shares",
                shares.len()
            );
        }

        Ok(())
    }

    fn read_shares_from_stdin(&self) -> Result<Vec<ShareData>> {
        let stdin = io::stdin();
        let reader = BufReader::new(stdin.lock());
        let mut shares = Vec::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from stdin")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            shares.push(ShareData::parse(line, self.format)?);
        }

        Ok(shares)
    }

    fn read_shares_from_files(&self) -> Result<Vec<ShareData>> {
        let mut shares = Vec::new();

        for input in &self.inputs {
            if input.is_dir() {
                shares.extend(self.read_shares_from_directory(input)?);
            } else {
                shares.push(self.read_share_from_file(input)?);
            }
        }

        Ok(shares)
    }

    fn read_shares_from_directory(&self, dir: &Path) -> Result<Vec<ShareData>> {
        let mut paths = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        paths.sort();

        let mut shares = Vec::new();
        for path in paths.iter().filter(|p| p.is_file()) {
            match self.read_share_from_file(path) {
                Ok(share) => shares.push(share),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        Ok(shares)
    }

    fn read_share_from_file(&self, path: &Path) -> Result<ShareData> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        ShareData::parse(&content, self.format)
            .with_context(|| format!("Failed to parse share: {}", path.display()))
    }

    fn output_secret(&self, secret: &str) -> Result<()> {
        if self.output == "-" {
            writeln!(io::stdout(), "{}", secret).context("Failed to write to stdout")?;
        } else {
            fs::write(&self.output, secret)
                .with_context(|| format!("Failed to write to file: {}", self.output))?;
        }
        Ok(())
    }
}

/// Returns the value every share agrees on, `None` if no share carries one.
fn agreed_value(
    shares: &[ShareData],
    field: &'static str,
    get: impl Fn(&ShareData) -> Option<usize>,
) -> Result<Option<usize>> {
    let mut agreed = None;
    for value in shares.iter().filter_map(get) {
        match agreed {
            None => agreed = Some(value),
            Some(first) if first != value => {
                return Err(CliError::MixedShares {
                    field,
                    first,
                    second: value,
                }
                .into())
            }
            Some(_) => {}
        }
    }
    Ok(agreed)
}

fn verify_windows(
    sss: &SecretSharing,
    shares: &[Share],
    secret: &num_bigint::BigUint,
) -> Result<()> {
    log::info!("Verifying recovery...");

    for window in shares.windows(sss.threshold()) {
        let recovered = sss.reconstruct(window.iter().map(Share::as_point))?;
        if &recovered != secret {
            bail!(CliError::InconsistentShares);
        }
    }

    log::info!("✅ Verification successful");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(prime_index: Option<usize>, threshold: Option<usize>) -> ShareData {
        ShareData {
            x: 1,
            y: "01".to_string(),
            prime_index,
            threshold,
            total_shares: None,
            created_at: None,
        }
    }

    #[test]
    fn test_agreed_value() {
        let shares = vec![data(Some(13), None), data(None, None), data(Some(13), Some(3))];
        assert_eq!(agreed_value(&shares, "prime index", |s| s.prime_index).unwrap(), Some(13));
        assert_eq!(agreed_value(&shares, "threshold", |s| s.threshold).unwrap(), Some(3));

        let bare = vec![data(None, None)];
        assert_eq!(agreed_value(&bare, "threshold", |s| s.threshold).unwrap(), None);
    }

    #[test]
    fn test_agreed_value_rejects_mixed_shares() {
        let shares = vec![data(Some(13), None), data(Some(7), None)];
        let err = agreed_value(&shares, "prime index", |s| s.prime_index).unwrap_err();
        assert!(err.to_string().contains("found 13 and 7"));
    }

    #[test]
    fn test_verify_detects_tampering() {
        let sss = SecretSharing::new(5, 2, 4).unwrap();
        let secret = num_bigint::BigUint::from(42u32);
        let mut shares = sss.split_shares(&secret);
        assert!(verify_windows(&sss, &shares, &secret).is_ok());

        shares[3].y = (&shares[3].y + 1u32) % sss.prime();
        assert!(verify_windows(&sss, &shares, &secret).is_err());
    }
}
