//! Removal of fully duplicated rows.
//!
//! Two rows are duplicates when every cell is equal, nulls included. The table
//! is edited in place and the caller gets counts back, so there is no result
//! value that could be dropped by mistake.

use std::collections::{HashMap, HashSet};

use log::info;
use serde::{Deserialize, Serialize};

use crate::table::{Row, Table};

/// Which copies of a duplicated row survive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the first occurrence, drop later repeats
    #[default]
    KeepFirst,
    /// Drop every copy of a row that occurs more than once
    DropAll,
}

/// Counts reported by [`deduplicate`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DedupOutcome {
    /// Rows that repeat an earlier row
    pub duplicates: usize,
    /// Rows actually removed under the chosen policy
    pub removed: usize,
}

/// Number of rows that repeat an earlier row
pub fn count_duplicates(table: &Table) -> usize {
    let mut seen: HashSet<&Row> = HashSet::with_capacity(table.len());
    table.rows().iter().filter(|row| !seen.insert(*row)).count()
}

/// Remove duplicate rows from `table` according to `policy`
pub fn deduplicate(table: &mut Table, policy: DuplicatePolicy) -> DedupOutcome {
    let keep: Vec<bool> = match policy {
        DuplicatePolicy::KeepFirst => {
            let mut seen: HashSet<&Row> = HashSet::with_capacity(table.len());
            table.rows().iter().map(|row| seen.insert(row)).collect()
        }
        DuplicatePolicy::DropAll => {
            let mut counts: HashMap<&Row, usize> = HashMap::with_capacity(table.len());
            for row in table.rows() {
                *counts.entry(row).or_insert(0) += 1;
            }
            table.rows().iter().map(|row| counts[row] == 1).collect()
        }
    };

    let duplicates = count_duplicates(table);
    let removed = keep.iter().filter(|k| !**k).count();

    if removed > 0 {
        table.retain_rows(|pos, _| keep[pos]);
        info!("{}: duplicate rows removed: {}", table.name(), removed);
    } else {
        info!("{}: no duplicate rows found", table.name());
    }

    DedupOutcome {
        duplicates,
        removed,
    }
}
