use anyhow::{Context, Result};
use clap::Parser;
use parquet_split::{init_tracing, read_input_list, run_with_config, Overrides};
use parquet_split_config::WorkerConfig;
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::info;

/// Split CSV files into train/test Parquet partitions
#[derive(Parser)]
#[command(name = "parquet-split")]
#[command(version)]
#[command(about = "Split CSV files into train/test Parquet partitions", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory for train partitions
    #[arg(long, value_name = "DIR", alias = "output_dir_train")]
    output_dir_train: Option<PathBuf>,

    /// Output directory for test partitions
    #[arg(long, value_name = "DIR", alias = "output_dir_test")]
    output_dir_test: Option<PathBuf>,

    /// Fraction of each file's rows written to the train partition
    #[arg(long, value_name = "RATIO")]
    train_ratio: Option<f64>,

    /// Number of input files per mini-batch
    #[arg(short = 'b', long, value_name = "N", default_value = "10")]
    mini_batch_size: NonZeroUsize,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Input files; a single `-` reads newline-separated paths from stdin
    #[arg(value_name = "INPUTS", required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Step 1: Load base configuration (file + environment)
    let mut config =
        WorkerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Step 2: Apply CLI overrides (highest priority)
    Overrides {
        output_dir_train: cli.output_dir_train.clone(),
        output_dir_test: cli.output_dir_test.clone(),
        train_ratio: cli.train_ratio,
        log_level: cli.log_level.clone(),
    }
    .apply(&mut config);
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.log);

    let inputs = if cli.inputs.len() == 1 && cli.inputs[0].as_os_str() == "-" {
        read_input_list(io::stdin().lock())?
    } else {
        cli.inputs
    };

    let stdout = io::stdout();
    let processed = run_with_config(
        &config,
        &inputs,
        cli.mini_batch_size.get(),
        &mut stdout.lock(),
    )?;

    info!(processed, "All mini-batches complete");
    Ok(())
}
