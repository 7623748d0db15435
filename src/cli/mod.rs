use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pepvar::dedup::DuplicatePolicy;
use pepvar::emit::OutputFormat;
use pepvar::translate::UnknownPolicy;

mod config;
mod inspect;
mod run;

/// pepvar - reconcile dbPepVar and RefSeq evidence against missense variants
#[derive(Parser)]
#[command(name = "pepvar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output format override.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Comma-separated text
    Csv,
    /// Tab-separated text
    Tsv,
    /// Apache Parquet
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Tsv => OutputFormat::Tsv,
            FormatArg::Parquet => OutputFormat::Parquet,
        }
    }
}

/// Handling of accessions missing from the conversion table.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum UnknownArg {
    /// Stop on the first unknown accession
    Abort,
    /// Blank unknown accessions and continue
    Null,
}

impl From<UnknownArg> for UnknownPolicy {
    fn from(arg: UnknownArg) -> Self {
        match arg {
            UnknownArg::Abort => UnknownPolicy::Abort,
            UnknownArg::Null => UnknownPolicy::Null,
        }
    }
}

/// Which copies of a duplicated row to keep.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DuplicatesArg {
    /// Keep the first copy
    KeepFirst,
    /// Drop every copy
    DropAll,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::KeepFirst => DuplicatePolicy::KeepFirst,
            DuplicatesArg::DropAll => DuplicatePolicy::DropAll,
        }
    }
}

/// Arguments of the `run` command
#[derive(Args)]
pub struct RunArgs {
    /// Directory holding the four standard input files
    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// NP to GI conversion table
    #[arg(long, value_name = "FILE")]
    conversion: Option<PathBuf>,

    /// dbPepVar evidence table
    #[arg(long, value_name = "FILE")]
    dbpepvar: Option<PathBuf>,

    /// RefSeq evidence table
    #[arg(long, value_name = "FILE")]
    refseq: Option<PathBuf>,

    /// Missense variant table
    #[arg(long, value_name = "FILE")]
    missense: Option<PathBuf>,

    /// Output file path (defaults to output.csv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (inferred from the output extension when omitted)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Input field delimiter (a single character, or "tab")
    #[arg(short, long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Handling of unknown NP accessions
    #[arg(long, value_enum)]
    on_unknown: Option<UnknownArg>,

    /// Duplicate row handling
    #[arg(long, value_enum)]
    duplicates: Option<DuplicatesArg>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Join both evidence tables with the missense table
    Run(RunArgs),

    /// Load a table and print its diagnostics
    Inspect {
        /// Delimited input file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (a single character, or "tab")
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,
    },
}

/// Parse a delimiter given as a single ASCII character or the word "tab"
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    value
                )),
            }
        }
    }
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run::run(args),
        Commands::Inspect { file, delimiter } => inspect::run(file, delimiter),
    }
}
