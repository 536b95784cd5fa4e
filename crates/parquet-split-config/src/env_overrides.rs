use crate::{Compression, LogFormat, WorkerConfig};
use anyhow::{Context, Result};

pub const ENV_PREFIX: &str = "PARQUET_SPLIT_";

/// Abstraction over environment-variable lookups so tests and embedding
/// harnesses can supply their own source of overrides.
pub trait EnvSource {
    /// Look up `key` with the `PARQUET_SPLIT_` prefix applied.
    fn get(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides to the worker config.
pub fn apply_env_overrides<E: EnvSource>(config: &mut WorkerConfig, env: &E) -> Result<()> {
    // Output directories
    if let Some(dir) = get_env_string(env, "OUTPUT_DIR_TRAIN") {
        config.output.train_dir = dir;
    }
    if let Some(dir) = get_env_string(env, "OUTPUT_DIR_TEST") {
        config.output.test_dir = dir;
    }

    if let Some(ratio) = get_env_f64(env, "TRAIN_RATIO")? {
        config.split.train_ratio = ratio;
    }

    if let Some(delimiter) = get_env_string(env, "DELIMITER") {
        config.input.delimiter = delimiter;
    }

    // Parquet output
    if let Some(compression) = get_env_string(env, "COMPRESSION") {
        config.parquet.compression = compression
            .parse::<Compression>()
            .with_context(|| format!("Invalid {}COMPRESSION value", ENV_PREFIX))?;
    }
    if let Some(size) = get_env_usize(env, "ROW_GROUP_SIZE")? {
        config.parquet.row_group_size = size;
    }

    // Logging
    if let Some(level) = get_env_string(env, "LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = get_env_string(env, "LOG_FORMAT") {
        config.log.format = format
            .parse::<LogFormat>()
            .with_context(|| format!("Invalid {}LOG_FORMAT value", ENV_PREFIX))?;
    }

    Ok(())
}

fn get_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|value| !value.is_empty())
}

fn get_env_usize<E: EnvSource>(env: &E, key: &str) -> Result<Option<usize>> {
    get_env_string(env, key)
        .map(|value| {
            value
                .parse::<usize>()
                .with_context(|| format!("{}{} must be a positive integer", ENV_PREFIX, key))
        })
        .transpose()
}

fn get_env_f64<E: EnvSource>(env: &E, key: &str) -> Result<Option<f64>> {
    get_env_string(env, key)
        .map(|value| {
            value
                .parse::<f64>()
                .with_context(|| format!("{}{} must be a number", ENV_PREFIX, key))
        })
        .transpose()
}
