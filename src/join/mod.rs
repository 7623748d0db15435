//! # Join Engine Module
//!
//! Inner equi-joins over [`Table`]s, with the column layout of a pandas
//! `merge`:
//!
//! - left columns first, then right columns, each in their original order
//! - a key pair naming the same column on both sides is coalesced into the
//!   left column
//! - every other name present on both sides is suffixed on both sides
//!
//! Every `(left, right)` pair whose key cells are all equal appears exactly
//! once in the output. A null key cell never matches anything. Output rows
//! follow left row order, then right row order within each left row.
//!
//! ## Example
//!
//! ```rust
//! use pepvar::join::{inner_join, JoinSpec};
//! use pepvar::table::Table;
//!
//! let s = |v: &str| Some(v.to_string());
//! let left = Table::from_rows("left", ["Raw file", "Sequence"], vec![vec![s("R1"), s("KXX")]])?;
//! let right = Table::from_rows("right", ["Raw file", "Sequence"], vec![vec![s("R1"), s("PXP")]])?;
//!
//! let spec = JoinSpec::on(["Raw file"]).with_suffixes("_dbPepVar", "_refSeq");
//! let joined = inner_join(&left, &right, &spec)?;
//!
//! assert_eq!(joined.columns(), ["Raw file", "Sequence_dbPepVar", "Sequence_refSeq"]);
//! assert_eq!(joined.len(), 1);
//! # Ok::<(), pepvar::table::SchemaError>(())
//! ```

#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::table::{Row, SchemaError, Table};

/// Default suffixes, as used by pandas
pub const DEFAULT_SUFFIXES: (&str, &str) = ("_x", "_y");

/// Key columns and collision suffixes for a join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec {
    keys: Vec<(String, String)>,
    suffixes: (String, String),
}

impl JoinSpec {
    /// Join on columns that carry the same name on both sides
    pub fn on<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::pairs(columns.into_iter().map(|c| {
            let c = c.into();
            (c.clone(), c)
        }))
    }

    /// Join on `(left column, right column)` pairs
    pub fn pairs<I, L, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, R)>,
        L: Into<String>,
        R: Into<String>,
    {
        Self {
            keys: pairs
                .into_iter()
                .map(|(l, r)| (l.into(), r.into()))
                .collect(),
            suffixes: (
                DEFAULT_SUFFIXES.0.to_string(),
                DEFAULT_SUFFIXES.1.to_string(),
            ),
        }
    }

    /// Set the suffixes appended to colliding left and right column names
    pub fn with_suffixes(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.suffixes = (left.into(), right.into());
        self
    }

    /// Key column pairs
    pub fn keys(&self) -> &[(String, String)] {
        &self.keys
    }

    /// Left and right suffixes
    pub fn suffixes(&self) -> (&str, &str) {
        (&self.suffixes.0, &self.suffixes.1)
    }

    /// Name a non-key column gets in the output when it collides
    pub fn suffixed(&self, column: &str, side: Side) -> String {
        match side {
            Side::Left => format!("{}{}", column, self.suffixes.0),
            Side::Right => format!("{}{}", column, self.suffixes.1),
        }
    }
}

/// Side of a join
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The left input
    Left,
    /// The right input
    Right,
}

/// Resolved key positions for both inputs
struct KeyLayout {
    left: Vec<usize>,
    right: Vec<usize>,
}

impl KeyLayout {
    fn resolve(left: &Table, right: &Table, spec: &JoinSpec) -> Result<Self, SchemaError> {
        let mut layout = Self {
            left: Vec::with_capacity(spec.keys.len()),
            right: Vec::with_capacity(spec.keys.len()),
        };
        for (l, r) in &spec.keys {
            layout.left.push(left.column_index(l)?);
            layout.right.push(right.column_index(r)?);
        }
        Ok(layout)
    }
}

/// Key cells of a row, or `None` if any of them is null
fn row_key<'a>(row: &'a Row, idx: &[usize]) -> Option<Vec<&'a str>> {
    idx.iter().map(|&i| row[i].as_deref()).collect()
}

/// Positions of the rows of `table` grouped by key
fn index_rows<'a>(table: &'a Table, idx: &[usize]) -> HashMap<Vec<&'a str>, Vec<usize>> {
    let mut index: HashMap<Vec<&str>, Vec<usize>> = HashMap::with_capacity(table.len());
    for (pos, row) in table.rows().iter().enumerate() {
        if let Some(key) = row_key(row, idx) {
            index.entry(key).or_default().push(pos);
        }
    }
    index
}

/// Number of row pairs an inner join would produce, without building it
pub fn count_matches(left: &Table, right: &Table, spec: &JoinSpec) -> Result<usize, SchemaError> {
    let layout = KeyLayout::resolve(left, right, spec)?;
    let index = index_rows(right, &layout.right);

    Ok(left
        .rows()
        .iter()
        .filter_map(|row| row_key(row, &layout.left))
        .filter_map(|key| index.get(&key))
        .map(Vec::len)
        .sum())
}

/// Inner equi-join of `left` and `right`
pub fn inner_join(left: &Table, right: &Table, spec: &JoinSpec) -> Result<Table, SchemaError> {
    let layout = KeyLayout::resolve(left, right, spec)?;

    // Right key columns that merge into a same-named left column
    let coalesced: HashSet<usize> = spec
        .keys
        .iter()
        .zip(&layout.right)
        .filter(|((l, r), _)| l == r)
        .map(|(_, &idx)| idx)
        .collect();

    let right_kept: Vec<usize> = (0..right.columns().len())
        .filter(|i| !coalesced.contains(i))
        .collect();

    let left_names: HashSet<&str> = left.columns().iter().map(String::as_str).collect();
    let right_names: HashSet<&str> = right_kept
        .iter()
        .map(|&i| right.columns()[i].as_str())
        .collect();

    let mut columns: Vec<String> = Vec::with_capacity(left.columns().len() + right_kept.len());
    for name in left.columns() {
        if right_names.contains(name.as_str()) {
            columns.push(spec.suffixed(name, Side::Left));
        } else {
            columns.push(name.clone());
        }
    }
    for &i in &right_kept {
        let name = &right.columns()[i];
        if left_names.contains(name.as_str()) {
            columns.push(spec.suffixed(name, Side::Right));
        } else {
            columns.push(name.clone());
        }
    }

    let mut output = Table::new(format!("{}_{}", left.name(), right.name()), columns)?;
    let index = index_rows(right, &layout.right);

    for left_row in left.rows() {
        let Some(key) = row_key(left_row, &layout.left) else {
            continue;
        };
        let Some(matches) = index.get(&key) else {
            continue;
        };

        for &pos in matches {
            let right_row = &right.rows()[pos];
            let mut row: Row = Vec::with_capacity(left_row.len() + right_kept.len());
            row.extend(left_row.iter().cloned());
            row.extend(right_kept.iter().map(|&i| right_row[i].clone()));
            output.push_row(row)?;
        }
    }

    debug!(
        "Inner join {} ({} rows) x {} ({} rows) -> {} rows",
        left.name(),
        left.len(),
        right.name(),
        right.len(),
        output.len()
    );

    Ok(output)
}
