use anyhow::{Context, Result};
use std::path::PathBuf;

use pepvar::dedup::count_duplicates;
use pepvar::loader::{load, LoadOptions};

/// Display load diagnostics for a delimited file
pub fn run(file: PathBuf, delimiter: Option<u8>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let mut options = LoadOptions::default();
    if let Some(delimiter) = delimiter {
        options = options.with_delimiter(delimiter);
    }

    let loaded = load(&file, &options)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let duplicates = count_duplicates(&loaded.table);

    println!("Table Information");
    println!("=================");
    println!("File: {}", file.display());
    println!();
    println!("Rows: {}", loaded.report.rows);
    println!("Duplicate rows: {}", duplicates);
    if loaded.report.lenient {
        println!("Malformed rows skipped: {}", loaded.report.skipped_rows);
    }
    println!();

    println!("Columns:");
    for (i, column) in loaded.report.columns.iter().enumerate() {
        let nulls = loaded
            .table
            .column_values(column)?
            .filter(|v| v.is_none())
            .count();
        println!("  {:3}. {} ({} null)", i + 1, column, nulls);
    }

    Ok(())
}
