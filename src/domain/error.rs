use thiserror::Error;

/// Library-wide error type for promptloom operations.
///
/// The composition pipeline itself never fails: catalog lookup misses
/// degrade to raw-value echo and empty fields are omitted. Errors exist
/// only at the shell boundary (closed-enum parsing), for embedded asset
/// corruption, and for session store misses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Output language outside the closed enumeration.
    #[error("Unknown output language '{0}': must be one of en, zh")]
    UnknownLanguage(String),

    /// Output format outside the closed enumeration.
    #[error("Unknown output format '{0}': must be one of text, markdown, json, yaml")]
    UnknownFormat(String),

    /// An embedded catalog asset is missing or failed to parse.
    #[error("Invalid catalog asset '{file}': {reason}")]
    InvalidCatalogAsset { file: String, reason: String },

    /// A named session snapshot was not found in the store.
    #[error("Session snapshot '{0}' not found")]
    SnapshotNotFound(String),
}
