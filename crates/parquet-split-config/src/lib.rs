// parquet-split-config - Worker configuration
//
// Supports configuration from multiple sources:
// 1. Command line flags (applied by the binary, highest priority)
// 2. Environment variables (PARQUET_SPLIT_* prefix)
// 3. Config file path passed explicitly or via PARQUET_SPLIT_CONFIG
// 4. Default config file location (./parquet-split.toml)
// 5. Built-in defaults (lowest priority)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{apply_env_overrides, EnvSource, ENV_PREFIX};
pub use sources::{load_config, load_config_with_env, StdEnvSource, DEFAULT_CONFIG_FILE};

pub use parquet_split_core::DEFAULT_TRAIN_RATIO;

/// Main worker configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub split: SplitConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub parquet: ParquetConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Destination directories for the two partitions.
///
/// Both are required; an empty value is rejected when the worker starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub train_dir: String,
    #[serde(default)]
    pub test_dir: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,
}

fn default_train_ratio() -> f64 {
    DEFAULT_TRAIN_RATIO
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_ratio: DEFAULT_TRAIN_RATIO,
        }
    }
}

/// Delimited input settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl InputConfig {
    /// Delimiter as a single byte, or `None` unless it is exactly one ASCII
    /// character.
    pub fn delimiter_byte(&self) -> Option<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Some(*byte),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParquetConfig {
    #[serde(default)]
    pub compression: Compression,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

fn default_row_group_size() -> usize {
    32 * 1024
}

impl Default for ParquetConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: default_row_group_size(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    None,
    Snappy,
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Snappy => write!(f, "snappy"),
        }
    }
}

impl std::str::FromStr for Compression {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "uncompressed" => Ok(Compression::None),
            "snappy" => Ok(Compression::Snappy),
            _ => anyhow::bail!("Unsupported compression: {}. Supported: none, snappy", s),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Unsupported log format: {}. Supported: text, json", s),
        }
    }
}

impl WorkerConfig {
    /// Default configuration writing partitions to the given directories.
    pub fn with_output_dirs(train_dir: impl Into<String>, test_dir: impl Into<String>) -> Self {
        Self {
            output: OutputConfig {
                train_dir: train_dir.into(),
                test_dir: test_dir.into(),
            },
            ..Self::default()
        }
    }

    /// Load configuration from the file (if any) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        sources::load_config(path)
    }

    /// Parse a TOML document. Missing sections fall back to defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_from_str() {
        assert_eq!("none".parse::<Compression>().unwrap(), Compression::None);
        assert_eq!(
            "uncompressed".parse::<Compression>().unwrap(),
            Compression::None
        );
        assert_eq!(
            "SNAPPY".parse::<Compression>().unwrap(),
            Compression::Snappy
        );
        assert!("zstd".parse::<Compression>().is_err());
    }

    #[test]
    fn test_delimiter_byte_requires_one_ascii_character() {
        let delimiter = |d: &str| {
            InputConfig {
                delimiter: d.to_string(),
            }
            .delimiter_byte()
        };
        assert_eq!(delimiter(";"), Some(b';'));
        assert_eq!(delimiter("\t"), Some(b'\t'));
        assert_eq!(delimiter(""), None);
        assert_eq!(delimiter("||"), None);
        assert_eq!(delimiter("é"), None);
    }

    #[test]
    fn test_default_configs() {
        let config = WorkerConfig::default();
        assert_eq!(config.split.train_ratio, 0.8);
        assert_eq!(
            config.split.train_ratio,
            parquet_split_core::DEFAULT_TRAIN_RATIO
        );
        assert_eq!(config.parquet.compression, Compression::None);
        assert_eq!(config.parquet.row_group_size, 32 * 1024);
        assert_eq!(config.input.delimiter_byte(), Some(b','));
        assert_eq!(config.log.format, LogFormat::Text);
        assert!(config.output.train_dir.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = WorkerConfig::from_toml(
            r#"
            [output]
            train_dir = "out/train"
            test_dir = "out/test"

            [parquet]
            compression = "snappy"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.train_dir, "out/train");
        assert_eq!(config.output.test_dir, "out/test");
        assert_eq!(config.parquet.compression, Compression::Snappy);
        assert_eq!(config.parquet.row_group_size, 32 * 1024);
        assert_eq!(config.split.train_ratio, DEFAULT_TRAIN_RATIO);
    }
}
