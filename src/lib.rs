//! # pepvar - Variant Peptide Evidence Reconciliation
//!
//! `pepvar` joins peptide identifications from two proteomics searches, one
//! against a variant-peptide database (dbPepVar) and one against the RefSeq
//! reference proteome, with a table of missense variants. The result lists
//! every peptide pair that both searches support and that a known variant
//! explains.
//!
//! ## Pipeline
//!
//! ```text
//! load -> deduplicate -> canonicalize / translate -> join -> emit
//! ```
//!
//! - **Load**: delimited text read as untyped text cells, retrying leniently
//!   when a record is malformed ([`loader`])
//! - **Deduplicate**: fully repeated rows removed in place ([`dedup`])
//! - **Canonicalize**: sequences upper-cased, `I` and `L` collapsed to `X`
//!   ([`sequence`])
//! - **Translate**: dbPepVar `NP_` accessions mapped to `GI` numbers
//!   ([`translate`])
//! - **Join**: evidence tables joined on raw file and accession, then joined
//!   with the missense table on the (mutant, reference) sequence pair
//!   ([`join`], [`pipeline`])
//! - **Emit**: CSV, TSV or Parquet ([`emit`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pepvar::dedup::DuplicatePolicy;
//! use pepvar::emit::{emit_to_path, OutputFormat};
//! use pepvar::loader::LoadOptions;
//! use pepvar::pipeline::{load_inputs, InputPaths, Pipeline, PipelineConfig};
//!
//! let loaded = load_inputs(
//!     &InputPaths::in_dir("processed_files"),
//!     &LoadOptions::default(),
//!     DuplicatePolicy::KeepFirst,
//! )?;
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let map = pipeline.identifier_map(&loaded.conversion)?;
//! let output = pipeline.run(&map, loaded.inputs)?;
//!
//! emit_to_path(&output.table, "output.csv".as_ref(), OutputFormat::Csv)?;
//! println!("{} joined rows", output.summary.output_rows);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Output Layout
//!
//! | Columns | Source |
//! |---------|--------|
//! | `Raw file`, `Leading Razor Protein` | shared evidence join keys (GI accession) |
//! | other dbPepVar columns | suffixed `_dbPepVar` when RefSeq has the same name |
//! | other RefSeq columns | suffixed `_refSeq` when dbPepVar has the same name |
//! | missense columns | all, suffixed `_missense` on any remaining collision |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod dedup;
pub mod emit;
pub mod join;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod sequence;
pub mod table;
pub mod translate;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::dedup::{deduplicate, DedupOutcome, DuplicatePolicy};
    pub use crate::emit::{emit, emit_to_path, write_parquet, EmitError, EmitOptions, OutputFormat};
    pub use crate::join::{count_matches, inner_join, JoinSpec};
    pub use crate::loader::{load, load_bytes, LoadError, LoadOptions, LoadReport, LoadedTable};
    pub use crate::pipeline::{
        load_inputs, ColumnNames, InputPaths, Pipeline, PipelineConfig, PipelineError,
        PipelineInputs, PipelineOutput, PipelineSummary,
    };
    pub use crate::report::{InputSummary, RunReport};
    pub use crate::sequence::{canonical, canonicalize};
    pub use crate::table::{Cell, Row, SchemaError, Table};
    pub use crate::translate::{IdentifierMap, TranslateError, UnknownPolicy};
}
