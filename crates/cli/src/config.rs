//! Configuration management

use anyhow::{Context, Result};
use mersenne_shamir::Params;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Defaults {
    #[serde(default = "default_prime_index")]
    pub prime_index: usize,

    #[serde(default = "default_threshold")]
    pub threshold: usize,

    #[serde(default = "default_shares")]
    pub shares: usize,

    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            prime_index: default_prime_index(),
            threshold: default_threshold(),
            shares: default_shares(),
            format: default_format(),
        }
    }
}

fn default_prime_index() -> usize {
    Params::default().prime_index
}
fn default_threshold() -> usize {
    Params::default().threshold
}
fn default_shares() -> usize {
    Params::default().shares
}
fn default_format() -> String {
    "json".to_string()
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    fn load_default() -> Result<Self> {
        let config_paths = [
            dirs::config_dir().map(|d| d.join("mersenne-sss").join("config.toml")),
            Some(PathBuf::from("mersenne-sss.toml")),
            Some(PathBuf::from(".mersenne-sss.toml")),
        ];

        for config_path in config_paths.into_iter().flatten() {
            if config_path.exists() {
                log::debug!("Loading configuration from {}", config_path.display());
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library() {
        let config = Config::default();
        assert_eq!(config.defaults.prime_index, 13);
        assert_eq!(config.defaults.threshold, 3);
        assert_eq!(config.defaults.shares, 5);
        assert_eq!(config.defaults.format, "json");
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[defaults]\nthreshold = 4\n").unwrap();
        assert_eq!(config.defaults.threshold, 4);
        assert_eq!(config.defaults.shares, 5);
        assert_eq!(config.defaults.prime_index, 13);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.defaults.format, "json");
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nprime_index = 7\nformat = \"hex\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.defaults.prime_index, 7);
        assert_eq!(config.defaults.format, "hex");
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        assert!(Config::load(Some(Path::new("/nonexistent/mersenne-sss.toml"))).is_err());
    }
}
