// parquet-split - harness driver
//
// Stands in for the external parallel-execution harness: initializes one
// worker context per process and feeds it mini-batches of input paths.

use anyhow::{Context, Result};
use parquet_split_config::WorkerConfig;
use parquet_split_worker::{BatchSplitter, WorkerContext};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

mod init;

pub use init::init_tracing;

/// Command line values that take priority over file and environment config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir_train: Option<PathBuf>,
    pub output_dir_test: Option<PathBuf>,
    pub train_ratio: Option<f64>,
    pub log_level: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut WorkerConfig) {
        if let Some(dir) = &self.output_dir_train {
            config.output.train_dir = dir.to_string_lossy().to_string();
        }
        if let Some(dir) = &self.output_dir_test {
            config.output.test_dir = dir.to_string_lossy().to_string();
        }
        if let Some(ratio) = self.train_ratio {
            config.split.train_ratio = ratio;
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
    }
}

/// Read newline-separated input paths, skipping blank lines.
pub fn read_input_list<R: BufRead>(reader: R) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read input list")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            inputs.push(PathBuf::from(trimmed));
        }
    }
    Ok(inputs)
}

/// Process `inputs` in mini-batches of `mini_batch_size`, writing each status
/// line to `out` as soon as its batch completes.
///
/// Stops at the first failing batch. Returns the number of files processed.
pub fn run_batches<W: Write>(
    ctx: &WorkerContext,
    inputs: &[PathBuf],
    mini_batch_size: usize,
    out: &mut W,
) -> Result<usize> {
    let splitter = BatchSplitter::new(ctx);
    let mut processed = 0;

    for (index, batch) in inputs.chunks(mini_batch_size.max(1)).enumerate() {
        info!(batch = index, files = batch.len(), "Dispatching mini-batch");

        let results = splitter
            .process(batch)
            .with_context(|| format!("Mini-batch {} failed", index))?;
        for status in &results {
            writeln!(out, "{}", status).context("Failed to write status")?;
        }
        processed += results.len();
    }

    out.flush().context("Failed to flush status output")?;
    Ok(processed)
}

/// Initialize the worker from `config` and run every input through it.
pub fn run_with_config<W: Write>(
    config: &WorkerConfig,
    inputs: &[PathBuf],
    mini_batch_size: usize,
    out: &mut W,
) -> Result<usize> {
    let ctx = WorkerContext::new(config).context("Failed to initialize worker")?;
    run_batches(&ctx, inputs, mini_batch_size, out)
}
