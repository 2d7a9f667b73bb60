//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Resend activation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendActivationRequest {
    pub email: String,
}

// ============================================================================
// Login / Validate
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Session JWT for the `Authorization: Bearer` header
    pub token: String,
}

/// Validate request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub token: String,
}

/// Validate response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    /// Token subject, present when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Failure description, present when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Activation
// ============================================================================

/// Activation query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ActivateQuery {
    pub token: String,
}

// ============================================================================
// Password change / reset
// ============================================================================

/// Change password request (old-password authenticated)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: String,
    pub password: String,
    pub new_password: String,
}

/// Forgotten-password query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ForgottenPasswordQuery {
    pub email: String,
}

/// Reset-token query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ResetTokenQuery {
    pub token: String,
}

// ============================================================================
// OTP
// ============================================================================

/// OTP request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpRequest {
    pub email: String,
}
