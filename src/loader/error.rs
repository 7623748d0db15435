/// Errors that can occur while loading a delimited table
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error reading the source
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Structural fault in the delimited text
    #[error("Parse error in '{source_name}' at line {line}: {message}")]
    Parse {
        /// Name of the source being parsed
        source_name: String,
        /// 1-based line number of the offending record
        line: u64,
        /// Description of the fault
        message: String,
    },

    /// The source has no header row
    #[error("No columns to parse from '{0}'")]
    Empty(String),

    /// Error raised by the CSV reader itself
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Header produced an invalid table layout
    #[error(transparent)]
    Schema(#[from] crate::table::SchemaError),
}

impl LoadError {
    /// Whether a lenient retry can recover from this error
    pub fn is_parse_fault(&self) -> bool {
        matches!(self, LoadError::Parse { .. })
    }
}
