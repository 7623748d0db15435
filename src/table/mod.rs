//! # Table Module
//!
//! In-memory tabular value shared by every pipeline stage.
//!
//! Cells are deliberately untyped: every value is text or null. Accessions and
//! scan numbers are compared as strings, never coerced to numbers, so `"007"`
//! and `"7"` remain distinct keys.
//!
//! ## Example
//!
//! ```rust
//! use pepvar::table::Table;
//!
//! let mut table = Table::new("evidence", ["Raw file", "Sequence"])?;
//! table.push_row(vec![Some("R1".to_string()), Some("PEPTIDE".to_string())])?;
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.value(0, "Sequence")?, Some("PEPTIDE"));
//! # Ok::<(), pepvar::table::SchemaError>(())
//! ```

mod error;

#[cfg(test)]
mod tests;

pub use error::SchemaError;

/// A single cell: text or null
pub type Cell = Option<String>;

/// A row of cells, positionally aligned with the table's columns
pub type Row = Vec<Cell>;

/// Ordered rows over a fixed list of uniquely named text columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given column names.
    ///
    /// Fails if a column name is repeated.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut declared: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if declared.contains(&column) {
                return Err(SchemaError::DuplicateColumn {
                    table: name,
                    column,
                });
            }
            declared.push(column);
        }

        Ok(Self {
            name,
            columns: declared,
            rows: Vec::new(),
        })
    }

    /// Create a table and fill it with rows, checking every row's width
    pub fn from_rows<I, S>(
        name: impl Into<String>,
        columns: I,
        rows: Vec<Row>,
    ) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(name, columns)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Display name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the table (columns are unaffected)
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Column names in declaration order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a column with this name exists
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Position of a column, or a [`SchemaError::MissingColumn`]
    pub fn column_index(&self, column: &str) -> Result<usize, SchemaError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| SchemaError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Check that every listed column is present
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), SchemaError> {
        for column in columns {
            self.column_index(column)?;
        }
        Ok(())
    }

    /// Append a row; its width must match the column count
    pub fn push_row(&mut self, row: Row) -> Result<(), SchemaError> {
        if row.len() != self.columns.len() {
            return Err(SchemaError::RowWidth {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Cell value at `row` in `column`.
    ///
    /// Returns `Ok(None)` for a null cell; panics if `row` is out of bounds.
    pub fn value(&self, row: usize, column: &str) -> Result<Option<&str>, SchemaError> {
        let idx = self.column_index(column)?;
        Ok(self.rows[row][idx].as_deref())
    }

    /// Iterate over the cells of one column
    pub fn column_values(
        &self,
        column: &str,
    ) -> Result<impl Iterator<Item = Option<&str>> + '_, SchemaError> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| row[idx].as_deref()))
    }

    /// Rewrite every cell of a column in place
    pub fn map_column<F>(&mut self, column: &str, mut f: F) -> Result<(), SchemaError>
    where
        F: FnMut(Cell) -> Cell,
    {
        let idx = self.column_index(column)?;
        for row in &mut self.rows {
            let cell = row[idx].take();
            row[idx] = f(cell);
        }
        Ok(())
    }

    /// Rewrite every cell of a column in place, stopping at the first error.
    ///
    /// The closure receives the row position alongside the cell. Rows already
    /// rewritten when an error occurs keep their new value; callers treat the
    /// table as spent after a failure.
    pub fn try_map_column<F, E>(&mut self, column: &str, mut f: F) -> Result<(), E>
    where
        F: FnMut(usize, Cell) -> Result<Cell, E>,
        E: From<SchemaError>,
    {
        let idx = self.column_index(column)?;
        for (pos, row) in self.rows.iter_mut().enumerate() {
            let cell = row[idx].take();
            row[idx] = f(pos, cell)?;
        }
        Ok(())
    }

    /// Keep only rows for which `keep` returns true, preserving order
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, &Row) -> bool,
    {
        let mut pos = 0;
        self.rows.retain(|row| {
            let kept = keep(pos, row);
            pos += 1;
            kept
        });
    }
}
