//! # pepvar
//!
//! Command-line front end for the evidence/missense reconciliation pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Join the four standard files under ./processed_files into output.csv
//! pepvar run
//!
//! # Explicit inputs, Parquet output and a JSON run report
//! pepvar run --input-dir data -o joined.parquet --report run.json
//!
//! # Keep going when an NP accession is missing from the conversion table
//! pepvar run --on-unknown null
//!
//! # Print load diagnostics for one table
//! pepvar inspect processed_files/missense.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
