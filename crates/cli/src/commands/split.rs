//! Split command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use mersenne_shamir::{mersenne, SecretSharing};
use num_bigint::BigUint;
use rand_chacha::rand_core::SeedableRng;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use zeroize::Zeroizing;

use crate::config::Config;
use crate::error::CliError;
use crate::formats::{OutputFormat, ShareData};
use crate::utils;

#[derive(Args)]
pub struct SplitCommand {
    /// Secret integer, decimal or 0x-prefixed hex (read from --input if omitted)
    #[arg(value_name = "SECRET")]
    pub secret: Option<String>,

    /// Number of shares to generate
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub shares: Option<usize>,

    /// Minimum threshold of shares required for recovery
    #[arg(short = 'k', long, value_name = "THRESHOLD")]
    pub threshold: Option<usize>,

    /// Index of the Mersenne prime defining the field (see `primes`)
    #[arg(short = 'p', long, value_name = "INDEX")]
    pub prime_index: Option<usize>,

    /// Input file holding the secret integer (use '-' for stdin)
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub input: String,

    /// Output directory for share files
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Base name for output files
    #[arg(long, value_name = "NAME", default_value = "share")]
    pub base_name: String,

    /// Print shares to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Read secret from environment variable
    #[arg(long, value_name = "VAR")]
    pub env_var: Option<String>,

    /// Prompt for secret interactively (hidden input)
    #[arg(long)]
    pub interactive: bool,

    /// Custom seed for deterministic share generation (hex encoded)
    #[arg(long, value_name = "HEX")]
    pub seed: Option<String>,

    /// Include metadata in output
    #[arg(long)]
    pub include_metadata: bool,
}

impl SplitCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        let prime_index = self.prime_index.unwrap_or(config.defaults.prime_index);
        let threshold = self.threshold.unwrap_or(config.defaults.threshold);
        let shares = self.shares.unwrap_or(config.defaults.shares);
        let format = match self.format {
            Some(f) => f,
            None => OutputFormat::from_name(&config.defaults.format)?,
        };

        self.validate(threshold, shares)?;

        let secret = self.read_secret()?;

        let sss = if let Some(seed_hex) = &self.seed {
            let seed_bytes = Zeroizing::new(hex::decode(seed_hex).context("Invalid hex seed")?);
            if seed_bytes.len() != 32 {
                bail!("Seed must be exactly 32 bytes (64 hex characters)");
            }
            let mut seed = Zeroizing::new([0u8; 32]);
            seed.copy_from_slice(&seed_bytes);
            let mut rng = rand_chacha::ChaCha20Rng::from_seed(*seed);

            SecretSharing::with_rng(prime_index, threshold, shares, &mut rng)
        } else {
            SecretSharing::new(prime_index, threshold, shares)
        }
        .context("Failed to create secret sharing scheme")?;

        if &secret >= sss.prime() {
            return Err(CliError::SecretOutOfRange {
                exponent: mersenne::EXPONENTS[prime_index],
            }
            .into());
        }

        log::info!("{}", sss.name());
        let issued = sss.split_shares(&secret);
        log::debug!("Issued {} shares", issued.len());

        let share_data = issued
            .iter()
            .map(|share| {
                ShareData::new(
                    share,
                    prime_index,
                    threshold,
                    shares,
                    self.include_metadata,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        if self.stdout {
            self.output_to_stdout(&share_data, format)?;
        } else {
            let dir = self.output_to_files(&share_data, format)?;
            println!(
                "✅ Successfully generated {} shares with threshold {}",
                shares, threshold
            );
            println!("Shares saved to: {}", dir.display());
        }

        Ok(())
    }

    fn validate(&self, threshold: usize, shares: usize) -> Result<()> {
        utils::validate_sharing_params(threshold, shares)?;

        let input_methods = [
            self.secret.is_some(),
            self.env_var.is_some(),
            self.interactive,
            self.input != "-",
        ];
        if input_methods.iter().filter(|&&x| x).count() > 1 {
            bail!("Only one input method can be specified");
        }

        Ok(())
    }

    fn read_secret(&self) -> Result<BigUint> {
        let text = if let Some(secret) = &self.secret {
            Zeroizing::new(secret.clone())
        } else if let Some(env_var) = &self.env_var {
            Zeroizing::new(
                std::env::var(env_var)
                    .with_context(|| format!("Environment variable '{}' not found", env_var))?,
            )
        } else if self.interactive {
            Zeroizing::new(
                rpassword::prompt_password("Enter secret: ")
                    .context("Failed to read secret from terminal")?,
            )
        } else if self.input == "-" {
            let mut buffer = Zeroizing::new(String::new());
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        } else {
            Zeroizing::new(
                fs::read_to_string(&self.input)
                    .with_context(|| format!("Failed to read file: {}", self.input))?,
            )
        };

        if text.trim().is_empty() {
            bail!(CliError::InvalidSecret("secret cannot be empty".to_string()));
        }

        Ok(utils::parse_biguint(&text)?)
    }

    fn output_to_stdout(&self, shares: &[ShareData], format: OutputFormat) -> Result<()> {
        for share in shares {
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string(share)?),
                OutputFormat::Hex => println!("{}", share.to_hex_line()),
            }
        }
        Ok(())
    }

    fn output_to_files(&self, shares: &[ShareData], format: OutputFormat) -> Result<PathBuf> {
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        if !output_dir.exists() {
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;
        }

        for share in shares {
            let filename = format!("{}-{:03}.{}", self.base_name, share.x, format.extension());
            let filepath = output_dir.join(filename);

            let content = match format {
                OutputFormat::Json => serde_json::to_string_pretty(share)?,
                OutputFormat::Hex => share.to_hex_line(),
            };
            fs::write(&filepath, content)
                .with_context(|| format!("Failed to write share: {}", filepath.display()))?;
            log::debug!("Wrote {}", filepath.display());
        }

        Ok(output_dir)
    }
}
