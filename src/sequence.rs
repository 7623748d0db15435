//! Peptide sequence canonicalization.
//!
//! Isoleucine and leucine have identical mass and are usually indistinguishable
//! by the search engines feeding this pipeline. Sequences are upper-cased and
//! both residues collapsed to `X` before any comparison.

use crate::table::{SchemaError, Table};

/// Symbol that replaces both `I` and `L`
pub const AMBIGUOUS_RESIDUE: char = 'X';

/// Canonical form of a peptide sequence
///
/// ```rust
/// use pepvar::sequence::canonical;
///
/// assert_eq!(canonical("KIIL"), "KXXX");
/// assert_eq!(canonical("peptide"), "PEPTXDE");
/// ```
pub fn canonical(seq: &str) -> String {
    seq.to_uppercase()
        .chars()
        .map(|c| match c {
            'I' | 'L' => AMBIGUOUS_RESIDUE,
            other => other,
        })
        .collect()
}

/// Null-preserving [`canonical`]
pub fn canonicalize(seq: Option<&str>) -> Option<String> {
    seq.map(canonical)
}

/// Rewrite a sequence column of `table` in canonical form
pub fn canonicalize_column(table: &mut Table, column: &str) -> Result<(), SchemaError> {
    table.map_column(column, |cell| cell.map(|s| canonical(&s)))
}
