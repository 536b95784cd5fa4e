// Configuration validation
//
// Validates that values are sensible. Output directories are checked by the
// worker itself when it starts, since flags may still supply them.

use crate::*;
use anyhow::{bail, Result};
use tracing::warn;

pub fn validate_config(config: &WorkerConfig) -> Result<()> {
    validate_split_config(&config.split)?;
    validate_input_config(&config.input)?;
    validate_parquet_config(&config.parquet)?;
    Ok(())
}

fn validate_split_config(config: &SplitConfig) -> Result<()> {
    if !(0.0..=1.0).contains(&config.train_ratio) {
        bail!(
            "split.train_ratio must be between 0 and 1, got {}",
            config.train_ratio
        );
    }

    if config.train_ratio == 0.0 || config.train_ratio == 1.0 {
        warn!(
            train_ratio = config.train_ratio,
            "split.train_ratio leaves one partition empty for every input"
        );
    }

    Ok(())
}

fn validate_input_config(config: &InputConfig) -> Result<()> {
    if config.delimiter_byte().is_none() {
        bail!(
            "input.delimiter must be a single ASCII character, got {:?}",
            config.delimiter
        );
    }

    Ok(())
}

fn validate_parquet_config(config: &ParquetConfig) -> Result<()> {
    if config.row_group_size == 0 {
        bail!("parquet.row_group_size must be greater than 0");
    }

    if config.row_group_size > 10_000_000 {
        warn!(
            row_group_size = config.row_group_size,
            "parquet.row_group_size is very large; may cause memory issues"
        );
    }

    Ok(())
}
