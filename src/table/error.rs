/// Errors raised when a table does not have the shape an operation expects
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A required column is absent
    #[error("Missing required column '{column}' in table '{table}'")]
    MissingColumn {
        /// Name of the table that was searched
        table: String,
        /// Name of the column that was expected
        column: String,
    },

    /// The same column name was declared twice
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn {
        /// Name of the table being built
        table: String,
        /// The repeated column name
        column: String,
    },

    /// A row does not carry exactly one cell per column
    #[error("Row has {actual} cells but table '{table}' has {expected} columns")]
    RowWidth {
        /// Name of the table the row was pushed into
        table: String,
        /// Number of declared columns
        expected: usize,
        /// Number of cells in the offending row
        actual: usize,
    },
}
