// Order-preserving train/test split
//
// The train partition is the first floor(ratio * rows) rows and the test
// partition is everything after it. Partitions are zero-copy slices of the
// decoded batch, so train followed by test is exactly the input.

use arrow::array::RecordBatch;

/// Fraction of rows assigned to the train partition unless configured otherwise.
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Test,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Test => "test",
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Partitions {
    pub train: RecordBatch,
    pub test: RecordBatch,
}

/// Number of leading rows that go to the train partition.
///
/// Clamped to `[0, row_count]`; a NaN ratio yields an empty train partition.
pub fn split_index(row_count: usize, train_ratio: f64) -> usize {
    let index = (row_count as f64 * train_ratio).floor();
    if index.is_nan() || index <= 0.0 {
        0
    } else {
        (index as usize).min(row_count)
    }
}

pub fn split_batch(batch: &RecordBatch, train_ratio: f64) -> Partitions {
    let rows = batch.num_rows();
    let index = split_index(rows, train_ratio);
    Partitions {
        train: batch.slice(0, index),
        test: batch.slice(index, rows - index),
    }
}
