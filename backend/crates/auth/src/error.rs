//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account with the given email
    #[error("User not found")]
    UserNotFound,

    /// Email is already registered
    #[error("User already exists")]
    EmailTaken,

    /// Seeded role is missing from the database
    #[error("Role {0} not found")]
    RoleNotFound(String),

    /// Wrong email or password (deliberately undifferentiated)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Account exists but has not been activated
    #[error("Account is not activated")]
    AccountDisabled,

    /// Activation requested for an already-active account
    #[error("Account is already activated")]
    AlreadyActivated,

    /// Token failed signature or structural validation
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token was valid once but its lifetime has passed
    #[error("Token is expired")]
    TokenExpired,

    /// Email address failed validation
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Password policy violation
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Mail microservice refused or was unreachable
    #[error("Email could not be sent: {0}")]
    EmailDelivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken | AuthError::AlreadyActivated => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::AccountDisabled => StatusCode::FORBIDDEN,
            AuthError::InvalidEmail(_) | AuthError::PasswordValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::EmailDelivery(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::RoleNotFound(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken | AuthError::AlreadyActivated => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::AccountDisabled => ErrorKind::Forbidden,
            AuthError::InvalidEmail(_) | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::EmailDelivery(_) => ErrorKind::ServiceUnavailable,
            AuthError::RoleNotFound(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::RoleNotFound(role) => {
                tracing::error!(role = %role, "Seeded role missing");
            }
            AuthError::EmailDelivery(msg) => {
                tracing::error!(message = %msg, "Mail delivery failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::TokenExpired => {
                tracing::warn!(error = %self, "Token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
