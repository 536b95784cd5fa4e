// parquet-split-core - Platform-agnostic core logic
//
// This crate contains the PURE processing logic for splitting delimited
// tabular files into train/test Parquet partitions. No filesystem access,
// no logging sinks, no runtime dependencies.
//
// - Essence: CSV bytes -> Arrow RecordBatch -> two Parquet byte buffers
// - Accident: directories, file names on disk, batching (worker crate)

use arrow::array::RecordBatch;

pub mod input;
pub mod naming;
pub mod parquet;
pub mod split;

pub use input::{decode_csv, CsvOptions, DecodeError};
pub use naming::{input_file_name, output_base_name};
pub use crate::parquet::{write_parquet, write_parquet_into, OutputCompression, ParquetOptions};
pub use split::{split_batch, split_index, Partition, Partitions, DEFAULT_TRAIN_RATIO};

/// Train and test partitions of one input, encoded as Parquet.
#[derive(Debug)]
pub struct EncodedPartitions {
    pub train: EncodedPartition,
    pub test: EncodedPartition,
}

#[derive(Debug)]
pub struct EncodedPartition {
    pub parquet_bytes: Vec<u8>,
    pub row_count: usize,
}

/// Errors from the full bytes-to-partitions pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("failed to encode {partition} partition: {source}")]
    Encode {
        partition: Partition,
        #[source]
        source: ::parquet::errors::ParquetError,
    },
}

/// Decode delimited bytes, split them, and encode both partitions.
///
/// Deterministic: the same bytes and options always yield the same row split.
pub fn split_csv_to_parquet(
    csv_bytes: &[u8],
    csv: &CsvOptions,
    train_ratio: f64,
    parquet: &ParquetOptions,
) -> Result<EncodedPartitions, ProcessError> {
    let batch = decode_csv(csv_bytes, csv)?;
    let partitions = split_batch(&batch, train_ratio);

    Ok(EncodedPartitions {
        train: encode(&partitions.train, Partition::Train, parquet)?,
        test: encode(&partitions.test, Partition::Test, parquet)?,
    })
}

fn encode(
    batch: &RecordBatch,
    partition: Partition,
    options: &ParquetOptions,
) -> Result<EncodedPartition, ProcessError> {
    let parquet_bytes = write_parquet(batch, partition, options)
        .map_err(|source| ProcessError::Encode { partition, source })?;
    Ok(EncodedPartition {
        parquet_bytes,
        row_count: batch.num_rows(),
    })
}
