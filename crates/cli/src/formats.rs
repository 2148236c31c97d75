//! Input/Output format handling

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use mersenne_shamir::Share;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Hex,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Hex,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Hex => "hex",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_str(name, true)
            .map_err(|_| CliError::InvalidFormat(format!("unknown output format '{}'", name)).into())
    }
}

impl InputFormat {
    /// Guess the format of a single share from its text.
    pub fn detect(content: &str) -> Result<Self> {
        let content = content.trim();

        if content.starts_with('{') && content.ends_with('}') {
            Ok(Self::Json)
        } else if is_hex_line(content) {
            Ok(Self::Hex)
        } else {
            bail!(CliError::InvalidFormat(
                "cannot detect share format from content".to_string()
            ))
        }
    }
}

/// `<decimal x>-<hex y>`
fn is_hex_line(content: &str) -> bool {
    match content.split_once('-') {
        Some((x, y)) => {
            !x.is_empty()
                && !y.is_empty()
                && x.chars().all(|c| c.is_ascii_digit())
                && y.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// A share as written to disk.
///
/// `y` is the big-endian hex encoding of the share value. The prime index
/// and threshold travel with every JSON share so recovery needs no extra
/// flags.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ShareData {
    /// X-coordinate of the share
    pub x: u64,

    /// Y-coordinate, hex encoded
    pub y: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prime_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<usize>,

    /// Metadata (only included if requested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shares: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ShareData {
    pub fn new(
        share: &Share,
        prime_index: usize,
        threshold: usize,
        total_shares: usize,
        include_metadata: bool,
    ) -> Result<Self> {
        let x = u64::try_from(share.x()).context("Share x-coordinate does not fit in 64 bits")?;

        Ok(Self {
            x,
            y: hex::encode(share.y().to_bytes_be()),
            prime_index: Some(prime_index),
            threshold: Some(threshold),
            total_shares: include_metadata.then_some(total_shares),
            created_at: include_metadata.then(|| chrono::Utc::now().to_rfc3339()),
        })
    }

    pub fn to_share(&self) -> Result<Share> {
        let bytes = hex::decode(&self.y).context("Invalid hex encoding of share value")?;
        Ok(Share::new(
            BigUint::from(self.x),
            BigUint::from_bytes_be(&bytes),
        ))
    }

    /// `<x>-<y>` on a single line; carries no metadata.
    pub fn to_hex_line(&self) -> String {
        format!("{}-{}", self.x, self.y)
    }

    pub fn from_hex_line(line: &str) -> Result<Self> {
        let line = line.trim();
        if !is_hex_line(line) {
            bail!(CliError::InvalidFormat(format!(
                "expected '<x>-<hex>', got '{}'",
                line
            )));
        }

        let (x, y) = line.split_once('-').context("Missing separator")?;
        Ok(Self {
            x: x.parse().context("Invalid x-coordinate")?,
            y: y.to_ascii_lowercase(),
            prime_index: None,
            threshold: None,
            total_shares: None,
            created_at: None,
        })
    }

    pub fn parse(content: &str, format: Option<InputFormat>) -> Result<Self> {
        let content = content.trim();
        let format = match format {
            Some(f) => f,
            None => InputFormat::detect(content)?,
        };

        match format {
            InputFormat::Json => serde_json::from_str(content).context("Failed to parse JSON"),
            InputFormat::Hex => Self::from_hex_line(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_share() -> Share {
        Share::new(BigUint::from(2u32), BigUint::from(0x01abcdu32))
    }

    #[test]
    fn test_share_data_without_metadata() {
        let data = ShareData::new(&sample_share(), 13, 3, 5, false).unwrap();
        assert_eq!(data.x, 2);
        assert_eq!(data.y, "01abcd");
        assert_eq!(data.prime_index, Some(13));
        assert_eq!(data.threshold, Some(3));
        assert_eq!(data.total_shares, None);
        assert!(data.created_at.is_none());

        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("total_shares"));
        assert!(!json.contains("created_at"));
    }

    #[test]
    fn test_share_data_with_metadata() {
        let data = ShareData::new(&sample_share(), 7, 4, 7, true).unwrap();
        assert_eq!(data.total_shares, Some(7));
        assert!(data.created_at.is_some());
    }

    #[test]
    fn test_json_back_to_share() {
        let data = ShareData::new(&sample_share(), 13, 3, 5, false).unwrap();
        let json = serde_json::to_string_pretty(&data).unwrap();

        let parsed = ShareData::parse(&json, None).unwrap();
        assert_eq!(parsed, data);
        assert_eq!(parsed.to_share().unwrap(), sample_share());
    }

    #[test]
    fn test_hex_line() {
        let data = ShareData::new(&sample_share(), 13, 3, 5, false).unwrap();
        assert_eq!(data.to_hex_line(), "2-01abcd");

        let parsed = ShareData::parse("2-01ABCD\n", None).unwrap();
        assert_eq!(parsed.prime_index, None);
        assert_eq!(parsed.to_share().unwrap(), sample_share());
    }

    #[test]
    fn test_zero_value() {
        let share = Share::new(BigUint::from(1u32), BigUint::from(0u32));
        let data = ShareData::new(&share, 5, 2, 3, false).unwrap();
        assert_eq!(data.y, "00");
        assert_eq!(data.to_share().unwrap(), share);
    }

    #[test]
    fn test_detect() {
        assert_eq!(InputFormat::detect("{\"x\":1}").unwrap(), InputFormat::Json);
        assert_eq!(InputFormat::detect("12-ff00").unwrap(), InputFormat::Hex);
        assert!(InputFormat::detect("hello").is_err());
        assert!(InputFormat::detect("-ff").is_err());
        assert!(InputFormat::detect("1-xyz").is_err());
    }

    #[test]
    fn test_odd_length_hex_rejected() {
        let data = ShareData::from_hex_line("1-abc").unwrap();
        assert!(data.to_share().is_err());
    }

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("HEX").unwrap(), OutputFormat::Hex);
        assert!(OutputFormat::from_name("yaml").is_err());
        assert_eq!(OutputFormat::Hex.extension(), "hex");
    }
}
