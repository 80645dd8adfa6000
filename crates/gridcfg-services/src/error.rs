use gridcfg_core::{GridcfgError, ValidationError};
use gridcfg_interchange::WizardError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Discovery failed: {0}")]
    DiscoveryFailed(String),

    #[error("Save failed: {0}")]
    PersistenceFailed(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("JDBC drivers not found!")]
    NoDrivers,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Domain model not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    /// Maps an agent error onto the discovery failure reported to the user
    pub(crate) fn discovery(err: GridcfgError) -> Self {
        match err {
            GridcfgError::Cancelled => Self::Cancelled,
            GridcfgError::Discovery(msg) => Self::DiscoveryFailed(msg),
            other => Self::DiscoveryFailed(other.to_string()),
        }
    }

    /// Maps a console error onto the persistence failure reported to the user
    pub(crate) fn persistence(err: GridcfgError) -> Self {
        match err {
            GridcfgError::Cancelled => Self::Cancelled,
            GridcfgError::Validation(e) => Self::Validation(e),
            GridcfgError::NotFound(what) => Self::NotFound(what),
            GridcfgError::Persistence(msg) => Self::PersistenceFailed(msg),
            other => Self::PersistenceFailed(other.to_string()),
        }
    }
}
