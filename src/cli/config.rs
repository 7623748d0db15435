//! TOML configuration file support.
//!
//! Every setting can also be given on the command line; flags win over the
//! file, and the file wins over built-in defaults.
//!
//! ```toml
//! # pepvar.toml
//! [input]
//! dir = "processed_files"
//! delimiter = ","
//! duplicates = "keep-first"
//!
//! [columns]
//! raw_file = "Raw file"
//! pep_ref = "PepRef"
//! pep_mut = "PepMut"
//!
//! [translation]
//! on_unknown = "abort"
//!
//! [output]
//! path = "output.csv"
//! format = "csv"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use pepvar::dedup::DuplicatePolicy;
use pepvar::emit::OutputFormat;
use pepvar::pipeline::ColumnNames;
use pepvar::translate::UnknownPolicy;

/// Root configuration structure for pepvar.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Input locations and parsing.
    #[serde(default)]
    pub input: InputConfig,

    /// Column name overrides.
    #[serde(default)]
    pub columns: ColumnNames,

    /// Accession translation settings.
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration for loading inputs.
#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    /// Directory holding the four standard input files.
    pub dir: Option<PathBuf>,

    /// Field delimiter, a single ASCII character or "tab".
    pub delimiter: Option<String>,

    /// Cell values read as null.
    pub null_values: Option<Vec<String>>,

    /// Duplicate row handling.
    pub duplicates: Option<DuplicatePolicy>,
}

/// Configuration for accession translation.
#[derive(Debug, Default, Deserialize)]
pub struct TranslationConfig {
    /// Handling of accessions missing from the conversion table.
    pub on_unknown: Option<UnknownPolicy>,
}

/// Configuration for the result file.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Output file path.
    pub path: Option<PathBuf>,

    /// Output format.
    pub format: Option<OutputFormat>,
}

impl InputConfig {
    /// Delimiter as a byte, if one was configured.
    pub fn delimiter_byte(&self) -> Result<Option<u8>> {
        match &self.delimiter {
            None => Ok(None),
            Some(value) => match super::parse_delimiter(value) {
                Ok(byte) => Ok(Some(byte)),
                Err(msg) => bail!("Invalid [input] delimiter: {}", msg),
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [input]
            dir = "data"
            delimiter = "tab"
            null_values = ["", "-"]
            duplicates = "drop-all"

            [columns]
            pep_ref = "Reference"
            pep_mut = "Mutant"

            [translation]
            on_unknown = "null"

            [output]
            path = "joined.parquet"
            format = "parquet"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.input.dir, Some(PathBuf::from("data")));
        assert_eq!(config.input.delimiter_byte().unwrap(), Some(b'\t'));
        assert_eq!(
            config.input.null_values,
            Some(vec!["".to_string(), "-".to_string()])
        );
        assert_eq!(config.input.duplicates, Some(DuplicatePolicy::DropAll));
        assert_eq!(config.columns.pep_ref, "Reference");
        assert_eq!(config.columns.raw_file, "Raw file");
        assert_eq!(config.translation.on_unknown, Some(UnknownPolicy::Null));
        assert_eq!(config.output.format, Some(OutputFormat::Parquet));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [translation]
            on_unknown = "abort"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.translation.on_unknown, Some(UnknownPolicy::Abort));
        assert_eq!(config.columns, ColumnNames::default());
        assert_eq!(config.output.path, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.input.delimiter_byte().unwrap(), None);
        assert_eq!(config.input.duplicates, None);
    }

    #[test]
    fn test_bad_delimiter_rejected() {
        let config = Config::from_str("[input]\ndelimiter = \";;\"\n").unwrap();
        assert!(config.input.delimiter_byte().is_err());
    }

    #[test]
    fn test_unknown_policy_value_rejected() {
        assert!(Config::from_str("[translation]\non_unknown = \"ignore\"\n").is_err());
    }
}
