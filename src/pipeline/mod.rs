//! # Pipeline Module
//!
//! Runs the normalization-and-join pipeline over four tables:
//!
//! 1. check every required column is present
//! 2. canonicalize peptide sequences in both evidence tables and the missense table
//! 3. translate dbPepVar protein accessions through the [`IdentifierMap`]
//! 4. count dbPepVar/RefSeq rows sharing a raw file and scan number (a sanity
//!    figure only, no table is kept)
//! 5. inner join the evidence tables on raw file and protein accession
//! 6. inner join the result with the missense table on the
//!    (mutant, reference) sequence pair
//!
//! Each stage owns the tables it is handed; nothing flows backwards.
//!
//! ## Example
//!
//! ```rust
//! use pepvar::pipeline::{Pipeline, PipelineConfig, PipelineInputs};
//! use pepvar::table::Table;
//! use pepvar::translate::IdentifierMap;
//!
//! let s = |v: &str| Some(v.to_string());
//! let map = IdentifierMap::from_pairs([("NP001", "GI100")])?;
//! let inputs = PipelineInputs {
//!     dbpepvar: Table::from_rows(
//!         "evidence_dbpepvar",
//!         ["Raw file", "MS MS Scan Number", "Sequence", "Leading Razor Protein"],
//!         vec![vec![s("R1"), s("5"), s("KIL"), s("NP001")]],
//!     )?,
//!     refseq: Table::from_rows(
//!         "evidence_refseq",
//!         ["Raw file", "MS/MS Scan Number", "Sequence", "Leading Razor Protein"],
//!         vec![vec![s("R1"), s("5"), s("kil"), s("GI100")]],
//!     )?,
//!     missense: Table::from_rows(
//!         "missense",
//!         ["PepRef", "PepMut"],
//!         vec![vec![s("KIL"), s("kil")]],
//!     )?,
//! };
//!
//! let output = Pipeline::new(PipelineConfig::default()).run(&map, inputs)?;
//! assert_eq!(output.table.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;


pub use config::{ColumnNames, PipelineConfig, DBPEPVAR, REFSEQ};
pub use error::PipelineError;

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::dedup::{deduplicate, DuplicatePolicy};
use crate::join::{count_matches, inner_join, JoinSpec, Side};
use crate::loader::{load, LoadOptions};
use crate::report::InputSummary;
use crate::sequence::canonicalize_column;
use crate::table::Table;
use crate::translate::{IdentifierMap, TranslationSummary};

/// Suffixes applied to collisions between the evidence result and the missense table
pub const MISSENSE_SUFFIXES: (&str, &str) = ("_evidence", "_missense");

/// Locations of the four input files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// NP to GI conversion table
    pub conversion: PathBuf,
    /// dbPepVar evidence
    pub dbpepvar: PathBuf,
    /// RefSeq evidence
    pub refseq: PathBuf,
    /// Missense variant table
    pub missense: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self::in_dir("processed_files")
    }
}

impl InputPaths {
    /// Standard file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            conversion: dir.join("tabela_np_gi.csv"),
            dbpepvar: dir.join("evidence_dbpepvar.csv"),
            refseq: dir.join("evidence_refseq.csv"),
            missense: dir.join("missense.csv"),
        }
    }
}

/// The three tables consumed by [`Pipeline::run`]
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    /// dbPepVar evidence
    pub dbpepvar: Table,
    /// RefSeq evidence
    pub refseq: Table,
    /// Missense variant table
    pub missense: Table,
}

/// All inputs loaded from disk and deduplicated
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    /// Conversion table used to build the [`IdentifierMap`]
    pub conversion: Table,
    /// Evidence and missense tables
    pub inputs: PipelineInputs,
    /// Load and dedup diagnostics, one per file
    pub summaries: Vec<InputSummary>,
}

/// Figures describing one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    /// Result of translating the dbPepVar protein column
    pub translation: TranslationSummary,
    /// dbPepVar/RefSeq row pairs sharing raw file and scan number
    pub scan_pairs: usize,
    /// Rows after the evidence join
    pub evidence_rows: usize,
    /// Rows after the missense join
    pub output_rows: usize,
}

/// Final table and run figures
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Joined result
    pub table: Table,
    /// Run figures
    pub summary: PipelineSummary,
}

/// Load and deduplicate all four inputs
pub fn load_inputs(
    paths: &InputPaths,
    options: &LoadOptions,
    policy: DuplicatePolicy,
) -> Result<LoadedInputs, PipelineError> {
    let mut summaries = Vec::with_capacity(4);

    let conversion = load_one("tabela_np_gi", &paths.conversion, options, policy, &mut summaries)?;
    let dbpepvar = load_one("evidence_dbpepvar", &paths.dbpepvar, options, policy, &mut summaries)?;
    let refseq = load_one("evidence_refseq", &paths.refseq, options, policy, &mut summaries)?;
    let missense = load_one("missense", &paths.missense, options, policy, &mut summaries)?;

    Ok(LoadedInputs {
        conversion,
        inputs: PipelineInputs {
            dbpepvar,
            refseq,
            missense,
        },
        summaries,
    })
}

fn load_one(
    role: &str,
    path: &Path,
    options: &LoadOptions,
    policy: DuplicatePolicy,
    summaries: &mut Vec<InputSummary>,
) -> Result<Table, PipelineError> {
    let loaded = load(path, options).map_err(|source| PipelineError::Load {
        role: role.to_string(),
        source,
    })?;

    let mut table = loaded.table;
    table.set_name(role);
    let dedup = deduplicate(&mut table, policy);

    summaries.push(InputSummary {
        role: role.to_string(),
        load: loaded.report,
        dedup,
        rows: table.len(),
    });

    Ok(table)
}

/// Normalization-and-join pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given settings
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build the accession map from the conversion table
    pub fn identifier_map(&self, conversion: &Table) -> Result<IdentifierMap, PipelineError> {
        let c = &self.config.columns;
        Ok(IdentifierMap::from_table(conversion, &c.np, &c.gi)?)
    }

    /// Join spec for the evidence tables
    pub fn evidence_spec(&self) -> JoinSpec {
        let c = &self.config.columns;
        JoinSpec::on([c.raw_file.as_str(), c.protein.as_str()])
            .with_suffixes(format!("_{}", DBPEPVAR), format!("_{}", REFSEQ))
    }

    /// Join spec pairing RefSeq and dbPepVar rows by raw file and scan number
    pub fn scan_spec(&self) -> JoinSpec {
        let c = &self.config.columns;
        JoinSpec::pairs([
            (c.raw_file.as_str(), c.raw_file.as_str()),
            (c.refseq_scan.as_str(), c.dbpepvar_scan.as_str()),
        ])
    }

    /// Join spec for the evidence result against the missense table
    pub fn missense_spec(&self) -> JoinSpec {
        let c = &self.config.columns;
        let evidence = self.evidence_spec();
        JoinSpec::pairs([
            (evidence.suffixed(&c.sequence, Side::Left), c.pep_mut.clone()),
            (evidence.suffixed(&c.sequence, Side::Right), c.pep_ref.clone()),
        ])
        .with_suffixes(MISSENSE_SUFFIXES.0, MISSENSE_SUFFIXES.1)
    }

    /// Check that every column the run needs is present
    pub fn check_schema(&self, inputs: &PipelineInputs) -> Result<(), PipelineError> {
        let c = &self.config.columns;
        inputs.dbpepvar.require_columns(&[
            c.raw_file.as_str(),
            c.dbpepvar_scan.as_str(),
            c.sequence.as_str(),
            c.protein.as_str(),
        ])?;
        inputs.refseq.require_columns(&[
            c.raw_file.as_str(),
            c.refseq_scan.as_str(),
            c.sequence.as_str(),
            c.protein.as_str(),
        ])?;
        inputs
            .missense
            .require_columns(&[c.pep_ref.as_str(), c.pep_mut.as_str()])?;
        Ok(())
    }

    /// Run every stage and return the joined table
    pub fn run(
        &self,
        map: &IdentifierMap,
        inputs: PipelineInputs,
    ) -> Result<PipelineOutput, PipelineError> {
        self.check_schema(&inputs)?;

        let c = &self.config.columns;
        let PipelineInputs {
            mut dbpepvar,
            mut refseq,
            mut missense,
        } = inputs;

        canonicalize_column(&mut refseq, &c.sequence)?;
        canonicalize_column(&mut dbpepvar, &c.sequence)?;
        canonicalize_column(&mut missense, &c.pep_ref)?;
        canonicalize_column(&mut missense, &c.pep_mut)?;

        let translation = map.translate_column(&mut dbpepvar, &c.protein, self.config.on_unknown)?;
        info!(
            "Translated {} accessions in '{}'",
            translation.translated, translation.column
        );

        let scan_pairs = count_matches(&refseq, &dbpepvar, &self.scan_spec())?;
        info!("Evidence rows sharing raw file and scan number: {}", scan_pairs);

        info!("Merging evidence tables");
        let evidence = inner_join(&dbpepvar, &refseq, &self.evidence_spec())?;
        let evidence_rows = evidence.len();
        info!("Evidence join: {} rows", evidence_rows);

        info!("Merging missense table");
        let mut table = inner_join(&evidence, &missense, &self.missense_spec())?;
        table.set_name("output");
        info!("Missense join: {} rows", table.len());

        Ok(PipelineOutput {
            summary: PipelineSummary {
                translation,
                scan_pairs,
                evidence_rows,
                output_rows: table.len(),
            },
            table,
        })
    }
}
