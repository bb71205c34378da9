use thiserror::Error;

use crate::access::PermissionSet;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] tanto_core::error::CoreError),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid permission token: {0}")]
    InvalidPermission(String),

    #[error("Permission denied: {needed} on {path}")]
    PermissionDenied { path: String, needed: PermissionSet },

    #[error("Authentication rejected")]
    AuthenticationRejected,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
