use salvo::http::StatusCode;
use thiserror::Error;

use tanto_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    CoreError(#[from] tanto_core::error::CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// ## Summary
    /// Status code answered for this error. Bodies never carry the reason.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(err) => match err {
                ServiceError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
                ServiceError::AuthenticationRejected => StatusCode::UNAUTHORIZED,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::AlreadyExists(_) => StatusCode::METHOD_NOT_ALLOWED,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::CoreError(_)
                | ServiceError::InvalidPattern(_)
                | ServiceError::InvalidPermission(_)
                | ServiceError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Sets the status code on `res`, logging server-side failures.
    pub fn write_to(&self, res: &mut salvo::Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }
        res.status_code(status);
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
