//! # Result Emitter Module
//!
//! Serializes a [`Table`] as delimited text or as a Parquet file.
//!
//! Delimited output always carries a header row, keeps the table's column
//! order and writes nulls as empty fields. Parquet output stores every column
//! as a nullable UTF-8 column, so the untyped text model survives intact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;
use serde::Deserialize;

use crate::table::Table;

/// Default ZSTD level for Parquet output
pub const PARQUET_COMPRESSION_LEVEL: i32 = 3;

/// Errors that can occur while writing the result
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),
}

/// Serialization format of the result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Comma-separated text
    #[default]
    Csv,
    /// Tab-separated text
    Tsv,
    /// Apache Parquet, all columns UTF-8
    Parquet,
}

impl OutputFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(OutputFormat::Csv),
            "tsv" | "txt" => Some(OutputFormat::Tsv),
            "parquet" => Some(OutputFormat::Parquet),
            _ => None,
        }
    }

    /// Field delimiter for text formats
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            OutputFormat::Csv => Some(b','),
            OutputFormat::Tsv => Some(b'\t'),
            OutputFormat::Parquet => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "parquet" => Ok(OutputFormat::Parquet),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Options for delimited output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Write `table` as delimited text with a header row.
///
/// Returns the number of data rows written.
pub fn emit<W: Write>(table: &Table, writer: W, options: &EmitOptions) -> Result<usize, EmitError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    csv_writer.flush()?;

    Ok(table.len())
}

/// Write `table` as a single-row-group Parquet file.
///
/// Returns the number of rows written.
pub fn write_parquet<W: Write + Send>(table: &Table, writer: W) -> Result<usize, EmitError> {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays: Vec<ArrayRef> = (0..table.columns().len())
        .map(|idx| {
            let values: Vec<Option<&str>> =
                table.rows().iter().map(|row| row[idx].as_deref()).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::try_new(
            PARQUET_COMPRESSION_LEVEL,
        )?))
        .set_key_value_metadata(Some(vec![KeyValue {
            key: "pepvar:version".to_string(),
            value: Some(env!("CARGO_PKG_VERSION").to_string()),
        }]))
        .build();

    let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))?;
    arrow_writer.write(&batch)?;
    arrow_writer.close()?;

    Ok(table.len())
}

/// Write `table` to `path` in the given format
pub fn emit_to_path(table: &Table, path: &Path, format: OutputFormat) -> Result<usize, EmitError> {
    let file = File::create(path)?;
    let rows = match format.delimiter() {
        Some(delimiter) => emit(table, BufWriter::new(file), &EmitOptions { delimiter })?,
        None => write_parquet(table, file)?,
    };

    info!("Wrote {} rows to {}", rows, path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn result_table() -> Table {
        Table::from_rows(
            "output",
            ["Raw file", "Sequence_dbPepVar", "Sequence_refSeq", "Gene"],
            vec![
                vec![s("R1"), s("KXX"), s("KXX"), s("TP53")],
                vec![s("R2"), s("PEP, X"), s("PEP"), None],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_csv_output() {
        let mut buf = Vec::new();
        let rows = emit(&result_table(), &mut buf, &EmitOptions::default()).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Raw file,Sequence_dbPepVar,Sequence_refSeq,Gene\n\
             R1,KXX,KXX,TP53\n\
             R2,\"PEP, X\",PEP,\n"
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let table = Table::new("output", ["a", "b"]).unwrap();
        let mut buf = Vec::new();
        assert_eq!(emit(&table, &mut buf, &EmitOptions::default()).unwrap(), 0);
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\n");
    }

    #[test]
    fn test_tsv_output() {
        let mut buf = Vec::new();
        emit(&result_table(), &mut buf, &EmitOptions { delimiter: b'\t' }).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Raw file\tSequence_dbPepVar\tSequence_refSeq\tGene\n"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.csv")), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_path(Path::new("out.TSV")), Some(OutputFormat::Tsv));
        assert_eq!(
            OutputFormat::from_path(Path::new("out.parquet")),
            Some(OutputFormat::Parquet)
        );
        assert_eq!(OutputFormat::from_path(Path::new("out")), None);
        assert_eq!("Parquet".parse::<OutputFormat>().unwrap(), OutputFormat::Parquet);
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parquet_output_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.parquet");
        let rows = emit_to_path(&result_table(), &path, OutputFormat::Parquet).unwrap();
        assert_eq!(rows, 2);

        let file = File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 2);

        let batch = &batches[0];
        let names: Vec<&str> = batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, vec!["Raw file", "Sequence_dbPepVar", "Sequence_refSeq", "Gene"]);

        let gene = batch
            .column(3)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(gene.value(0), "TP53");
        assert!(gene.is_null(1));
    }
}
