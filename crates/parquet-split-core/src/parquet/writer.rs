// Minimal Parquet writer for one partition
//
// Partitions are small enough to buffer, so the worker encodes into memory
// and writes the finished file in one call.

use super::encoding::{writer_properties, ParquetOptions};
use crate::split::Partition;
use arrow::array::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::errors::Result;
use std::io::Write;

/// Write Arrow `RecordBatch` into an arbitrary `Write` sink.
///
/// An empty batch still produces a valid file carrying the schema.
pub fn write_parquet_into<W>(
    batch: &RecordBatch,
    partition: Partition,
    options: &ParquetOptions,
    writer: &mut W,
) -> Result<()>
where
    W: Write + Send,
{
    let props = writer_properties(options, partition);
    let mut arrow_writer = ArrowWriter::try_new(writer, batch.schema(), Some(props))?;

    if batch.num_rows() > 0 {
        arrow_writer.write(batch)?;
    }
    arrow_writer.close()?;

    Ok(())
}

/// Write Arrow RecordBatch to Parquet format (in-memory buffer)
pub fn write_parquet(
    batch: &RecordBatch,
    partition: Partition,
    options: &ParquetOptions,
) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_parquet_into(batch, partition, options, &mut buffer)?;
    Ok(buffer)
}
