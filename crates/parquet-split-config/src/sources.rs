// Configuration source loading.
//
// Priority order:
// 1. Environment variables (PARQUET_SPLIT_* prefix)
// 2. Explicit config file path, else PARQUET_SPLIT_CONFIG
// 3. Default config file (./parquet-split.toml)
// 4. Built-in defaults

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::WorkerConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "./parquet-split.toml";

/// Load configuration using the process environment.
pub fn load_config(path: Option<&Path>) -> Result<WorkerConfig> {
    load_config_with_env(path, &StdEnvSource)
}

/// Load configuration with a caller-supplied environment.
///
/// Output directories are not required here; the worker rejects empty ones
/// at startup so command line flags can still fill them in.
pub fn load_config_with_env<E: EnvSource>(path: Option<&Path>, env: &E) -> Result<WorkerConfig> {
    let mut config = match resolve_config_path(path, env) {
        Some(path) => load_from_file(&path)?,
        None => WorkerConfig::default(),
    };

    env_overrides::apply_env_overrides(&mut config, env)?;
    config.validate()?;
    Ok(config)
}

fn resolve_config_path<E: EnvSource>(path: Option<&Path>, env: &E) -> Option<PathBuf> {
    if let Some(path) = path {
        return Some(path.to_path_buf());
    }

    if let Some(path) = env.get("CONFIG").filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let default = Path::new(DEFAULT_CONFIG_FILE);
    default.exists().then(|| default.to_path_buf())
}

fn load_from_file(path: &Path) -> Result<WorkerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    WorkerConfig::from_toml(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Reads `PARQUET_SPLIT_*` variables from the process environment.
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }
}
