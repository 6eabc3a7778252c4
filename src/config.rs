//! Analyzer configuration loaded from propscan.toml
//!
//! # Example propscan.toml
//!
//! ```toml
//! # Histogram resolution for the value distribution
//! histogram_bins = 40
//!
//! # Where chart files are written
//! output_dir = "charts"
//!
//! # Extra or replacement exchange rates from AUD
//! [currency_rates]
//! NZD = 1.08
//! ```

use crate::currency::CurrencyTable;
use crate::error::{AnalyzerError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "propscan.toml";

fn default_histogram_bins() -> usize {
    50
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Root configuration for propscan.toml
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Number of equal-width bins in the value distribution
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Directory for generated SVG charts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Rates from AUD that extend or replace the built-in table
    #[serde(default)]
    pub currency_rates: BTreeMap<String, f64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            histogram_bins: default_histogram_bins(),
            output_dir: default_output_dir(),
            currency_rates: BTreeMap::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AnalyzerError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default file if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            return Err(AnalyzerError::Config(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        for (code, rate) in &self.currency_rates {
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(AnalyzerError::Config(format!(
                    "currency rate for {} must be positive, got {}",
                    code, rate
                )));
            }
        }
        Ok(())
    }

    /// Built-in currency table with this config's overrides applied
    pub fn currency_table(&self) -> CurrencyTable {
        CurrencyTable::new().with_overrides(&self.currency_rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.histogram_bins, 50);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.currency_rates.is_empty());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AnalyzerConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            histogram_bins = 20
            output_dir = "charts"

            [currency_rates]
            NZD = 1.08
        "#;

        let config = AnalyzerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.currency_table().rate("nzd"), Some(1.08));
    }

    #[test]
    fn test_zero_bins_rejected() {
        let err = AnalyzerConfig::from_toml_str("histogram_bins = 0").unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let toml = "[currency_rates]\nUSD = -0.5\n";
        assert!(AnalyzerConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(AnalyzerConfig::from_toml_str("bins = 3").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "histogram_bins = 7").unwrap();

        let config = AnalyzerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.histogram_bins, 7);
    }

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let err = AnalyzerConfig::load(Some(Path::new("/no/such/propscan.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
