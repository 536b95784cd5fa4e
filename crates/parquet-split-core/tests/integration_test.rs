// Integration tests for parquet-split-core
//
// Tests the complete workflow from delimited bytes to Parquet partitions

use arrow::array::{Array, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow::compute::concat_batches;
use arrow::datatypes::DataType;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet_split_core::{
    decode_csv, split_csv_to_parquet, CsvOptions, OutputCompression, ParquetOptions,
    ProcessError, DEFAULT_TRAIN_RATIO,
};

fn sample_csv(rows: usize) -> String {
    let mut csv = String::from("id,temperature,station\n");
    for i in 0..rows {
        csv.push_str(&format!("{},{}.25,station-{}\n", i, i * 3, i % 4));
    }
    csv
}

fn read_parquet(bytes: &[u8]) -> RecordBatch {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes.to_vec()))
        .expect("failed to create parquet reader");
    let schema = builder.schema().clone();
    let batches = builder
        .build()
        .expect("failed to build parquet reader")
        .collect::<Result<Vec<_>, _>>()
        .expect("failed to read record batches");
    concat_batches(&schema, &batches).expect("failed to concat batches")
}

fn assert_same_records(actual: &RecordBatch, expected: &RecordBatch) {
    assert_eq!(actual.num_rows(), expected.num_rows());
    assert_eq!(actual.schema().fields(), expected.schema().fields());
    assert_eq!(actual.columns(), expected.columns());
}

#[test]
fn split_round_trips_through_parquet() {
    let csv = sample_csv(10);
    let original = decode_csv(csv.as_bytes(), &CsvOptions::default()).unwrap();

    let encoded = split_csv_to_parquet(
        csv.as_bytes(),
        &CsvOptions::default(),
        DEFAULT_TRAIN_RATIO,
        &ParquetOptions::default(),
    )
    .expect("split should succeed");

    assert_eq!(encoded.train.row_count, 8);
    assert_eq!(encoded.test.row_count, 2);

    let train = read_parquet(&encoded.train.parquet_bytes);
    let test = read_parquet(&encoded.test.parquet_bytes);

    assert_same_records(&train, &original.slice(0, 8));
    assert_same_records(&test, &original.slice(8, 2));

    let ids = test
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .expect("id column should stay Int64");
    assert_eq!(ids.value(0), 8);
    assert_eq!(ids.value(1), 9);

    let temps = train
        .column(1)
        .as_any()
        .downcast_ref::<Float64Array>()
        .expect("temperature column should stay Float64");
    assert_eq!(temps.value(7), 21.25);

    let stations = train
        .column(2)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("station column should stay Utf8");
    assert_eq!(stations.value(5), "station-1");
}

#[test]
fn header_only_input_writes_two_empty_partitions() {
    let encoded = split_csv_to_parquet(
        b"a,b,c\n",
        &CsvOptions::default(),
        DEFAULT_TRAIN_RATIO,
        &ParquetOptions::default(),
    )
    .unwrap();

    assert_eq!(encoded.train.row_count, 0);
    assert_eq!(encoded.test.row_count, 0);

    let test = read_parquet(&encoded.test.parquet_bytes);
    assert_eq!(test.num_rows(), 0);
    let names: Vec<String> = test
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn single_row_lands_in_test_partition() {
    let encoded = split_csv_to_parquet(
        sample_csv(1).as_bytes(),
        &CsvOptions::default(),
        DEFAULT_TRAIN_RATIO,
        &ParquetOptions::default(),
    )
    .unwrap();

    assert_eq!(encoded.train.row_count, 0);
    assert_eq!(encoded.test.row_count, 1);
    assert_eq!(read_parquet(&encoded.test.parquet_bytes).num_rows(), 1);
}

#[test]
fn snappy_output_reads_back_identically() {
    let csv = sample_csv(50);
    let original = decode_csv(csv.as_bytes(), &CsvOptions::default()).unwrap();
    let options = ParquetOptions {
        compression: OutputCompression::Snappy,
        row_group_size: 16,
    };

    let encoded =
        split_csv_to_parquet(csv.as_bytes(), &CsvOptions::default(), 0.5, &options).unwrap();

    let train = read_parquet(&encoded.train.parquet_bytes);
    assert_same_records(&train, &original.slice(0, 25));
    assert_eq!(train.schema().field(0).data_type(), &DataType::Int64);
}

#[test]
fn malformed_input_is_a_decode_error() {
    let err = split_csv_to_parquet(
        b"a,b\n1,2,3\n",
        &CsvOptions::default(),
        DEFAULT_TRAIN_RATIO,
        &ParquetOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ProcessError::Decode(_)), "got {:?}", err);
}
