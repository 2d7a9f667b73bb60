//! Likes Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Likes-specific result type alias
pub type LikeResult<T> = Result<T, LikeError>;

/// Likes-specific error variants
#[derive(Debug, Error)]
pub enum LikeError {
    /// No like with the given id
    #[error("Like not found")]
    NotFound,

    /// Path parameter is not a valid id
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LikeError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LikeError::NotFound => StatusCode::NOT_FOUND,
            LikeError::InvalidId(_) => StatusCode::BAD_REQUEST,
            LikeError::Database(_) | LikeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LikeError::NotFound => ErrorKind::NotFound,
            LikeError::InvalidId(_) => ErrorKind::BadRequest,
            LikeError::Database(_) | LikeError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            LikeError::Database(e) => {
                tracing::error!(error = %e, "Likes database error");
            }
            LikeError::Internal(msg) => {
                tracing::error!(message = %msg, "Likes internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Likes error");
            }
        }
    }
}

impl IntoResponse for LikeError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
