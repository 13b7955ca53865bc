//! Encoding page records as Snappy-compressed Parquet.

use std::sync::{Arc, LazyLock};

use arrow_array::{ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};

use crate::{pages::PageRecord, prelude::*};

/// The MIME type we store Parquet files under.
pub const PARQUET_CONTENT_TYPE: &str = "application/vnd.apache.parquet";

/// The file extension for our output files.
pub const PARQUET_EXTENSION: &str = "snappy.parquet";

/// The Arrow schema of our output files.
static PAGE_RECORD_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("Document", DataType::Utf8, false),
        Field::new("Page", DataType::Int64, false),
        Field::new("Content", DataType::Utf8, false),
    ]))
});

/// Encode `records` as a single Parquet file, one row per record.
pub fn page_records_to_parquet(records: &[PageRecord]) -> Result<Vec<u8>> {
    let schema = PAGE_RECORD_SCHEMA.clone();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.document.as_str()),
        )),
        Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.page))),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.content.as_str()),
        )),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns)
        .context("failed to build record batch")?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(Vec::new(), schema, Some(props))
        .context("failed to create Parquet writer")?;
    writer
        .write(&batch)
        .context("failed to write Parquet rows")?;
    writer
        .into_inner()
        .context("failed to finish Parquet file")
}

#[cfg(test)]
mod tests {
    use arrow_array::Array as _;
    use bytes::Bytes;
    use parquet::{
        arrow::arrow_reader::ParquetRecordBatchReaderBuilder,
        file::reader::{FileReader as _, SerializedFileReader},
    };

    use super::*;

    fn sample_records() -> Vec<PageRecord> {
        vec![
            PageRecord {
                document: "doc.pdf".to_owned(),
                page: 1,
                content: "A B".to_owned(),
            },
            PageRecord {
                document: "doc.pdf".to_owned(),
                page: 2,
                content: "C".to_owned(),
            },
        ]
    }

    #[test]
    fn parquet_output_contains_one_row_per_record() {
        let bytes = Bytes::from(page_records_to_parquet(&sample_records()).unwrap());
        let reader = ParquetRecordBatchReaderBuilder::try_new(bytes)
            .unwrap()
            .build()
            .unwrap();
        let batches = reader.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];
        assert_eq!(batch.schema().fields().len(), 3);
        assert_eq!(batch.num_rows(), 2);

        let documents = batch
            .column_by_name("Document")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        let pages = batch
            .column_by_name("Page")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        let contents = batch
            .column_by_name("Content")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(documents.value(0), "doc.pdf");
        assert_eq!(pages.values().to_vec(), vec![1, 2]);
        assert_eq!(contents.value(0), "A B");
        assert_eq!(contents.value(1), "C");
        assert_eq!(contents.null_count(), 0);
    }

    #[test]
    fn parquet_output_is_snappy_compressed() {
        let bytes = Bytes::from(page_records_to_parquet(&sample_records()).unwrap());
        let reader = SerializedFileReader::new(bytes).unwrap();
        let row_group = reader.metadata().row_group(0);
        for column in row_group.columns() {
            assert_eq!(column.compression(), Compression::SNAPPY);
        }
    }

    #[test]
    fn empty_input_still_writes_a_valid_file() {
        let bytes = Bytes::from(page_records_to_parquet(&[]).unwrap());
        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes).unwrap();
        assert_eq!(builder.schema().fields().len(), 3);
        assert_eq!(builder.metadata().file_metadata().num_rows(), 0);
    }
}
