//! # Identifier Translator Module
//!
//! Maps protein accessions from one numbering scheme to another (RefSeq `NP_`
//! accessions to `GI` numbers) through a lookup table built once from a
//! reference [`Table`].
//!
//! The map is an ordinary value: build it, then pass it by reference to
//! whatever needs to translate. Lookups are exact string matches.
//!
//! ## Example
//!
//! ```rust
//! use pepvar::translate::IdentifierMap;
//!
//! let map = IdentifierMap::from_pairs([("NP_001", "GI_100")])?;
//! assert_eq!(map.translate("NP_001")?, Some("GI_100"));
//! assert!(map.translate("NP_999").is_err());
//! # Ok::<(), pepvar::translate::TranslateError>(())
//! ```

mod error;


pub use error::TranslateError;

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// What to do with an identifier that is absent from the map
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownPolicy {
    /// Fail on the first unknown or null identifier
    #[default]
    Abort,
    /// Replace unknown identifiers with null and record them
    Null,
}

/// Outcome of translating one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationSummary {
    /// Column that was translated
    pub column: String,
    /// Cells resolved through the map
    pub translated: usize,
    /// Distinct identifiers that were not found, in first-seen order
    pub unresolved: Vec<String>,
    /// Cells left null (null input, or unresolved under [`UnknownPolicy::Null`])
    pub nulled: usize,
}

/// Immutable lookup from source identifier to target identifier
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    entries: HashMap<String, Option<String>>,
}

impl IdentifierMap {
    /// Build a map from `(source, target)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, TranslateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::default();
        for (key, value) in pairs {
            map.insert(key.into(), Some(value.into()))?;
        }
        Ok(map)
    }

    /// Build a map from two columns of a reference table.
    ///
    /// Rows with a null key are skipped. A null target is kept and translates
    /// to null. A key listed twice with different targets is rejected.
    pub fn from_table(
        table: &Table,
        key_column: &str,
        value_column: &str,
    ) -> Result<Self, TranslateError> {
        let key_idx = table.column_index(key_column)?;
        let value_idx = table.column_index(value_column)?;

        let mut map = Self {
            entries: HashMap::with_capacity(table.len()),
        };
        let mut null_keys = 0;

        for row in table.rows() {
            match &row[key_idx] {
                Some(key) => map.insert(key.clone(), row[value_idx].clone())?,
                None => null_keys += 1,
            }
        }

        if null_keys > 0 {
            warn!(
                "{}: skipped {} rows with a null '{}'",
                table.name(),
                null_keys,
                key_column
            );
        }
        debug!(
            "Identifier map built from '{}': {} entries",
            table.name(),
            map.len()
        );

        Ok(map)
    }

    fn insert(&mut self, key: String, value: Option<String>) -> Result<(), TranslateError> {
        if let Some(existing) = self.entries.get(&key) {
            if *existing != value {
                return Err(TranslateError::AmbiguousKey {
                    first: display_target(existing),
                    second: display_target(&value),
                    key,
                });
            }
            return Ok(());
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Number of distinct source identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is a known source identifier
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Resolve one identifier.
    ///
    /// `Ok(None)` means the key is known but its target is null.
    pub fn translate(&self, key: &str) -> Result<Option<&str>, TranslateError> {
        self.entries
            .get(key)
            .map(|target| target.as_deref())
            .ok_or_else(|| TranslateError::NotFound(key.to_string()))
    }

    /// Rewrite every cell of `column` through the map
    pub fn translate_column(
        &self,
        table: &mut Table,
        column: &str,
        policy: UnknownPolicy,
    ) -> Result<TranslationSummary, TranslateError> {
        let mut summary = TranslationSummary {
            column: column.to_string(),
            ..Default::default()
        };
        let mut reported: HashSet<String> = HashSet::new();

        table.try_map_column(column, |row, cell| {
            let Some(key) = cell else {
                return match policy {
                    UnknownPolicy::Abort => Err(TranslateError::NullIdentifier {
                        column: column.to_string(),
                        row,
                    }),
                    UnknownPolicy::Null => {
                        summary.nulled += 1;
                        Ok(None)
                    }
                };
            };

            match self.entries.get(&key) {
                Some(target) => {
                    summary.translated += 1;
                    Ok(target.clone())
                }
                None if policy == UnknownPolicy::Abort => Err(TranslateError::UnknownIdentifier {
                    key,
                    column: column.to_string(),
                    row,
                }),
                None => {
                    if reported.insert(key.clone()) {
                        warn!("Unknown identifier '{}' in column '{}' set to null", key, column);
                        summary.unresolved.push(key);
                    }
                    summary.nulled += 1;
                    Ok(None)
                }
            }
        })?;

        Ok(summary)
    }
}

fn display_target(target: &Option<String>) -> String {
    target.clone().unwrap_or_else(|| "<null>".to_string())
}
