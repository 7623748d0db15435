use serde::Deserialize;

use crate::translate::UnknownPolicy;

/// Label of the variant-peptide search, used as a column suffix
pub const DBPEPVAR: &str = "dbPepVar";

/// Label of the reference-proteome search, used as a column suffix
pub const REFSEQ: &str = "refSeq";

/// Column names the pipeline reads.
///
/// Defaults match MaxQuant `evidence.txt` exports and the conversion and
/// missense tables produced upstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Instrument run, shared by both evidence tables
    pub raw_file: String,
    /// Leading protein accession, shared by both evidence tables
    pub protein: String,
    /// Peptide sequence, shared by both evidence tables
    pub sequence: String,
    /// Scan number column of the dbPepVar evidence
    pub dbpepvar_scan: String,
    /// Scan number column of the RefSeq evidence
    pub refseq_scan: String,
    /// Source accession column of the conversion table
    pub np: String,
    /// Target accession column of the conversion table
    pub gi: String,
    /// Reference peptide column of the missense table
    pub pep_ref: String,
    /// Mutant peptide column of the missense table
    pub pep_mut: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            raw_file: "Raw file".to_string(),
            protein: "Leading Razor Protein".to_string(),
            sequence: "Sequence".to_string(),
            dbpepvar_scan: "MS MS Scan Number".to_string(),
            refseq_scan: "MS/MS Scan Number".to_string(),
            np: "NP".to_string(),
            gi: "GI".to_string(),
            pep_ref: "PepRef".to_string(),
            pep_mut: "PepMut".to_string(),
        }
    }
}

/// Settings for a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Column names to read
    pub columns: ColumnNames,
    /// Handling of accessions missing from the conversion table
    pub on_unknown: UnknownPolicy,
}
