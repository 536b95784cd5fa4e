//! Delimited text decoding into a single Arrow `RecordBatch`.
//!
//! Column types are inferred from every row so that later rows can never
//! disagree with the inferred schema. Column order follows the header.

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use std::io::Cursor;
use std::sync::Arc;

const READ_BATCH_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("no columns to parse")]
    NoColumns,
    #[error("malformed delimited input: {0}")]
    Malformed(#[from] ArrowError),
}

/// Decode a delimited file with a header row.
///
/// Columns with no values at all are typed as nullable strings. Rows with
/// fewer fields than the header are padded with nulls; rows with more fields
/// are malformed.
pub fn decode_csv(bytes: &[u8], options: &CsvOptions) -> Result<RecordBatch, DecodeError> {
    let format = Format::default()
        .with_header(true)
        .with_delimiter(options.delimiter)
        .with_truncated_rows(true);
    let (inferred, _) = format.infer_schema(Cursor::new(bytes), None)?;

    if inferred.fields().is_empty() {
        return Err(DecodeError::NoColumns);
    }
    let schema = untyped_columns_as_utf8(&inferred);

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_delimiter(options.delimiter)
        .with_batch_size(READ_BATCH_SIZE)
        .with_truncated_rows(true)
        .build(Cursor::new(bytes))?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;

    Ok(concat_batches(&schema, &batches)?)
}

fn untyped_columns_as_utf8(schema: &Schema) -> SchemaRef {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| match field.data_type() {
            DataType::Null => field.as_ref().clone().with_data_type(DataType::Utf8),
            _ => field.as_ref().clone(),
        })
        .collect();
    Arc::new(Schema::new(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, StringArray};

    #[test]
    fn test_infers_column_types_in_header_order() {
        let csv = b"id,score,name,active\n1,0.5,alice,true\n2,1.25,bob,false\n";
        let batch = decode_csv(csv, &CsvOptions::default()).unwrap();

        assert_eq!(batch.num_rows(), 2);
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["id", "score", "name", "active"]);

        let ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .expect("id should be Int64");
        assert_eq!(ids.value(0), 1);
        assert_eq!(ids.value(1), 2);

        let scores = batch
            .column(1)
            .as_any()
            .downcast_ref::<Float64Array>()
            .expect("score should be Float64");
        assert_eq!(scores.value(1), 1.25);

        let names = batch
            .column(2)
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("name should be Utf8");
        assert_eq!(names.value(0), "alice");

        let active = batch
            .column(3)
            .as_any()
            .downcast_ref::<BooleanArray>()
            .expect("active should be Boolean");
        assert!(active.value(0));
        assert!(!active.value(1));
    }

    #[test]
    fn test_late_float_widens_whole_column() {
        let mut csv = String::from("x\n");
        for i in 0..20_000 {
            csv.push_str(&format!("{}\n", i));
        }
        csv.push_str("0.5\n");

        let batch = decode_csv(csv.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(batch.num_rows(), 20_001);
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Float64);
    }

    #[test]
    fn test_header_only_has_zero_rows() {
        let batch = decode_csv(b"a,b\n", &CsvOptions::default()).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_custom_delimiter() {
        let options = CsvOptions { delimiter: b';' };
        let batch = decode_csv(b"a;b\n1;2\n", &options).unwrap();
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.column(1).len(), 1);
    }

    #[test]
    fn test_empty_input_has_no_columns() {
        let err = decode_csv(b"", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, DecodeError::NoColumns));
    }

    #[test]
    fn test_short_rows_are_padded_with_nulls() {
        let batch = decode_csv(b"a,b\n1,2\n3\n", &CsvOptions::default()).unwrap();
        assert_eq!(batch.num_rows(), 2);

        let b = batch.column(1);
        assert!(b.is_valid(0));
        assert!(b.is_null(1));
        assert_eq!(b.null_count(), 1);
    }

    #[test]
    fn test_extra_fields_are_malformed() {
        let err = decode_csv(b"a,b\n1,2\n3,4,5\n", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }
}
