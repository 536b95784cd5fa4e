//! Per-process worker initialization
//!
//! Resolves and prepares the two output directories once, before any batch
//! is processed. The context is immutable afterwards and is borrowed by
//! every [`BatchSplitter`](crate::BatchSplitter).

use crate::error::{Result, SplitError};
use parquet_split_config::{Compression, WorkerConfig};
use parquet_split_core::{CsvOptions, OutputCompression, ParquetOptions, Partition};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, info_span, Span};

const WRITE_PROBE_PREFIX: &str = ".parquet-split-write-test";

/// Processing options resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    pub train_ratio: f64,
    pub csv: CsvOptions,
    pub parquet: ParquetOptions,
}

impl SplitOptions {
    pub fn from_config(config: &WorkerConfig) -> Result<Self> {
        let train_ratio = config.split.train_ratio;
        if !(0.0..=1.0).contains(&train_ratio) {
            return Err(SplitError::configuration(format!(
                "split.train_ratio must be between 0 and 1, got {}",
                train_ratio
            )));
        }

        let delimiter = config.input.delimiter_byte().ok_or_else(|| {
            SplitError::configuration(format!(
                "input.delimiter must be a single ASCII character, got {:?}",
                config.input.delimiter
            ))
        })?;

        let compression = match config.parquet.compression {
            Compression::None => OutputCompression::Uncompressed,
            Compression::Snappy => OutputCompression::Snappy,
        };

        Ok(Self {
            train_ratio,
            csv: CsvOptions { delimiter },
            parquet: ParquetOptions {
                compression,
                row_group_size: config.parquet.row_group_size,
            },
        })
    }
}

/// Output locations and logging span for one worker process.
#[derive(Debug)]
pub struct WorkerContext {
    train_dir: PathBuf,
    test_dir: PathBuf,
    options: SplitOptions,
    span: Span,
}

impl WorkerContext {
    /// Create both output directories and bind the worker's logging span.
    ///
    /// Idempotent for directories that already exist. Fails with
    /// [`SplitError::Configuration`] when a directory is not configured and
    /// [`SplitError::Storage`] when it cannot be created or written to.
    pub fn new(config: &WorkerConfig) -> Result<Self> {
        let options = SplitOptions::from_config(config)?;
        let train_dir = prepare_output_dir("train_dir", &config.output.train_dir)?;
        let test_dir = prepare_output_dir("test_dir", &config.output.test_dir)?;

        let span = info_span!(
            "split_worker",
            train_dir = %train_dir.display(),
            test_dir = %test_dir.display(),
        );
        span.in_scope(|| {
            info!(path = %train_dir.display(), "Train output directory ready");
            info!(path = %test_dir.display(), "Test output directory ready");
        });

        Ok(Self {
            train_dir,
            test_dir,
            options,
            span,
        })
    }

    pub fn train_dir(&self) -> &Path {
        &self.train_dir
    }

    pub fn test_dir(&self) -> &Path {
        &self.test_dir
    }

    pub fn output_dir(&self, partition: Partition) -> &Path {
        match partition {
            Partition::Train => &self.train_dir,
            Partition::Test => &self.test_dir,
        }
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Span that all batch processing for this worker is recorded under.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

fn prepare_output_dir(key: &str, configured: &str) -> Result<PathBuf> {
    if configured.trim().is_empty() {
        return Err(SplitError::configuration(format!(
            "output.{} is required",
            key
        )));
    }

    let dir = PathBuf::from(configured);
    fs::create_dir_all(&dir)
        .map_err(|e| SplitError::storage(&dir, format!("failed to create directory: {}", e)))?;

    // Probe file is per-process so concurrent workers sharing a directory
    // never remove each other's probe.
    let probe = dir.join(format!("{}-{}", WRITE_PROBE_PREFIX, std::process::id()));
    fs::write(&probe, b"probe")
        .map_err(|e| SplitError::storage(&dir, format!("directory is not writable: {}", e)))?;
    match fs::remove_file(&probe) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(SplitError::storage(
                &probe,
                format!("failed to remove write probe: {}", e),
            ))
        }
    }

    Ok(dir)
}
