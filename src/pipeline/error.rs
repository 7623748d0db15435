/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An input could not be loaded
    #[error("Failed to load {role}: {source}")]
    Load {
        /// Which input failed
        role: String,
        /// Underlying loader error
        #[source]
        source: crate::loader::LoadError,
    },

    /// A table lacks a required column
    #[error("Schema error: {0}")]
    Schema(#[from] crate::table::SchemaError),

    /// Identifier translation failed
    #[error("Translation error: {0}")]
    Translate(#[from] crate::translate::TranslateError),
}
