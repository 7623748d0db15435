/// Errors raised while building or applying an identifier map
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// Identifier not present in the map
    #[error("Unknown identifier '{key}' in column '{column}' (row {row})")]
    UnknownIdentifier {
        /// The identifier that was looked up
        key: String,
        /// Column being translated
        column: String,
        /// 0-based row position
        row: usize,
    },

    /// Null identifier encountered in a column being translated
    #[error("Null identifier in column '{column}' (row {row})")]
    NullIdentifier {
        /// Column being translated
        column: String,
        /// 0-based row position
        row: usize,
    },

    /// Single lookup against the map failed
    #[error("Identifier '{0}' not found in map")]
    NotFound(String),

    /// The reference table maps one key to several targets
    #[error("Identifier '{key}' maps to both '{first}' and '{second}'")]
    AmbiguousKey {
        /// The repeated key
        key: String,
        /// Target recorded first
        first: String,
        /// Conflicting target
        second: String,
    },

    /// Reference or evidence table lacks a needed column
    #[error(transparent)]
    Schema(#[from] crate::table::SchemaError),
}
