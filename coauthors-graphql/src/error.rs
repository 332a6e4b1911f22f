// Error types for co-author resolution

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoAuthorsError {
    /// The same GraphQL field name was mapped twice.
    #[error("Field mapped more than once: {0}")]
    DuplicateField(String),

    /// A resolver was wired for a field that has no backing key.
    #[error("No backing key mapped for field: {0}")]
    UnmappedField(String),

    /// The author lookup service failed (not a miss).
    #[error("Author lookup failed: {0}")]
    Lookup(String),

    /// The user metadata store failed (not a miss).
    #[error("User metadata lookup failed: {0}")]
    Metadata(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoAuthorsError>;
