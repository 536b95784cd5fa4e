use crate::split::Partition;
use parquet::basic::Compression;
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;

const DEFAULT_ROW_GROUP_SIZE: usize = 32 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputCompression {
    #[default]
    Uncompressed,
    Snappy,
}

impl OutputCompression {
    fn codec(self) -> Compression {
        match self {
            OutputCompression::Uncompressed => Compression::UNCOMPRESSED,
            OutputCompression::Snappy => Compression::SNAPPY,
        }
    }
}

/// Parquet writer settings for output partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParquetOptions {
    pub compression: OutputCompression,
    pub row_group_size: usize,
}

impl Default for ParquetOptions {
    fn default() -> Self {
        Self {
            compression: OutputCompression::default(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

/// Build writer properties for one partition file.
///
/// - Uncompressed unless configured otherwise
/// - Dictionary encoding enabled
/// - Tool version and partition name embedded in file metadata
pub fn writer_properties(options: &ParquetOptions, partition: Partition) -> WriterProperties {
    let metadata = vec![
        KeyValue {
            key: "parquet_split.version".to_string(),
            value: Some(env!("CARGO_PKG_VERSION").to_string()),
        },
        KeyValue {
            key: "parquet_split.partition".to_string(),
            value: Some(partition.as_str().to_string()),
        },
    ];

    WriterProperties::builder()
        .set_dictionary_enabled(true)
        .set_statistics_enabled(EnabledStatistics::Page)
        .set_compression(options.compression.codec())
        .set_max_row_group_size(options.row_group_size.max(1))
        .set_key_value_metadata(Some(metadata))
        .build()
}
