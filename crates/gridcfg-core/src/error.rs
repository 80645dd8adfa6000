use thiserror::Error;

/// Core error type for domain model import
#[derive(Error, Debug)]
pub enum GridcfgError {
    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unsupported database type: {0}")]
    UnsupportedType(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GridcfgError>;

/// A local validation failure pointing at the offending field.
///
/// `field` uses the wire name of the field (`keyType`, `packageName`, ...) so a
/// form can focus the right input. Validation errors never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
