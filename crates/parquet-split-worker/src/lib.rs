//! Mini-batch worker for train/test Parquet splitting
//!
//! A harness constructs one [`WorkerContext`] per process, then hands each
//! mini-batch of input paths to [`BatchSplitter::process`]:
//!
//! ```no_run
//! use parquet_split_config::WorkerConfig;
//! use parquet_split_worker::{BatchSplitter, WorkerContext};
//!
//! # fn main() -> parquet_split_worker::Result<()> {
//! let config = WorkerConfig::with_output_dirs("out/train", "out/test");
//! let ctx = WorkerContext::new(&config)?;
//! let results = BatchSplitter::new(&ctx).process(&["data/a.csv", "data/b.csv"])?;
//! assert_eq!(results, vec!["a.csv: done", "b.csv: done"]);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod splitter;

pub use context::{SplitOptions, WorkerContext};
pub use error::{ErrorCode, Result, SplitError};
pub use splitter::{BatchSplitter, SplitOutcome};

// Re-export commonly used crates for convenience
pub use parquet_split_config;
pub use parquet_split_core;
