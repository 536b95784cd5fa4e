//! Per-batch train/test splitting
//!
//! Each input file is decoded, split at floor(ratio * rows), and written as
//! two Parquet files sharing the input's base name. Files are processed in
//! input order and the first failure aborts the batch.

use crate::context::WorkerContext;
use crate::error::{Result, SplitError};
use parquet_split_core::{
    input_file_name, output_base_name, split_csv_to_parquet, Partition, ProcessError,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const OUTPUT_EXTENSION: &str = "parquet";

/// What happened to a single input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    pub input: PathBuf,
    /// Final path segment of the input, extension included
    pub file_name: String,
    /// Name shared by both outputs, without extension
    pub base_name: String,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl SplitOutcome {
    /// Status entry reported back to the harness.
    pub fn status(&self) -> String {
        format!("{}: done", self.file_name)
    }
}

/// Stateless splitter borrowing the worker's output locations.
#[derive(Debug, Clone, Copy)]
pub struct BatchSplitter<'a> {
    ctx: &'a WorkerContext,
}

impl<'a> BatchSplitter<'a> {
    pub fn new(ctx: &'a WorkerContext) -> Self {
        Self { ctx }
    }

    /// Split every file of a mini-batch, in order.
    ///
    /// Returns one `"{file_name}: done"` entry per input. The first error
    /// aborts the call and no partial result is returned; outputs already
    /// written for earlier files are left in place.
    pub fn process<P: AsRef<Path>>(&self, batch: &[P]) -> Result<Vec<String>> {
        let _entered = self.ctx.span().enter();
        debug!(files = batch.len(), "Processing mini-batch");

        let mut results = Vec::with_capacity(batch.len());
        let mut written: HashMap<String, PathBuf> = HashMap::new();

        for input in batch {
            let outcome = self.split_file(input.as_ref())?;

            if let Some(previous) = written.insert(outcome.base_name.clone(), outcome.input.clone())
            {
                warn!(
                    base_name = %outcome.base_name,
                    previous = %previous.display(),
                    current = %outcome.input.display(),
                    "Inputs share an output name; earlier partitions were overwritten"
                );
            }

            results.push(outcome.status());
        }

        Ok(results)
    }

    /// Split a single input file and write both partitions.
    pub fn split_file(&self, input: &Path) -> Result<SplitOutcome> {
        info!(input = %input.display(), "Splitting input file");

        let file_name = input_file_name(input)
            .ok_or_else(|| SplitError::input_read(input, "path has no file name"))?
            .into_owned();
        let base_name = output_base_name(input)
            .ok_or_else(|| SplitError::input_read(input, "path has no file name"))?;

        let bytes = fs::read(input).map_err(|e| SplitError::input_read(input, e))?;

        let options = self.ctx.options();
        let output_name = format!("{}.{}", base_name, OUTPUT_EXTENSION);
        let encoded = split_csv_to_parquet(
            &bytes,
            &options.csv,
            options.train_ratio,
            &options.parquet,
        )
        .map_err(|e| match e {
            ProcessError::Decode(source) => SplitError::input_read(input, source),
            ProcessError::Encode { partition, source } => {
                SplitError::storage(self.ctx.output_dir(partition).join(&output_name), source)
            }
        })?;

        let train_path = self.ctx.output_dir(Partition::Train).join(&output_name);
        let test_path = self.ctx.output_dir(Partition::Test).join(&output_name);
        write_output(&train_path, &encoded.train.parquet_bytes)?;
        write_output(&test_path, &encoded.test.parquet_bytes)?;

        debug!(
            input = %input.display(),
            train_rows = encoded.train.row_count,
            test_rows = encoded.test.row_count,
            "Wrote train/test partitions"
        );

        Ok(SplitOutcome {
            input: input.to_path_buf(),
            file_name,
            base_name,
            train_path,
            test_path,
            train_rows: encoded.train.row_count,
            test_rows: encoded.test.row_count,
        })
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| SplitError::storage(path, e))
}
