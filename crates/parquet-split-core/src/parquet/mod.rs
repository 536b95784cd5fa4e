// Parquet encoding for output partitions

mod encoding;
mod writer;

pub use encoding::{writer_properties, OutputCompression, ParquetOptions};
pub use writer::{write_parquet, write_parquet_into};
