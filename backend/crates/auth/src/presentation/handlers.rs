//! HTTP Handlers
//!
//! Boundary translation between the HTTP surface and the use cases. A few
//! handlers deliberately collapse distinct failure variants into a single
//! response so the endpoint does not become an account-enumeration oracle.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    ActivateUseCase, ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
    OtpUseCase, PasswordResetUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::mailer::MailGateway;
use crate::domain::repository::{RoleRepository, UserRepository, VerificationTokenRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ActivateQuery, ChangePasswordRequest, ForgottenPasswordQuery, LoginRequest, LoginResponse,
    RegisterRequest, RequestOtpRequest, ResendActivationRequest, ResetTokenQuery, ValidateRequest,
    ValidateResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, "User Registered Successfully"))
}

/// POST /resend-activation
pub async fn resend_activation<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ResendActivationRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    use_case.resend_activation(&req.email).await?;

    Ok((StatusCode::OK, "Activation email sent"))
}

// ============================================================================
// Login / Validate
// ============================================================================

/// POST /login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}

/// POST /validate
pub async fn validate<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ValidateRequest>,
) -> impl IntoResponse
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    match state.tokens.claims(&req.token) {
        Ok(claims) => (
            StatusCode::OK,
            Json(ValidateResponse {
                valid: true,
                user: Some(claims.sub),
                error: None,
            }),
        ),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(ValidateResponse {
                valid: false,
                user: None,
                error: Some("Invalid or expired token".to_string()),
            }),
        ),
    }
}

// ============================================================================
// Activation
// ============================================================================

/// GET /activate?token=
pub async fn activate<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Query(query): Query<ActivateQuery>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let use_case = ActivateUseCase::new(state.repo.clone(), state.tokens.clone());

    match use_case.execute(&query.token).await {
        Ok(()) => Ok((StatusCode::OK, "User Activated")),
        // Bad tokens and vanished accounts answer alike
        Err(AuthError::UserNotFound | AuthError::InvalidToken | AuthError::TokenExpired) => {
            Ok((StatusCode::NOT_FOUND, "User Not Found"))
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Password change / reset
// ============================================================================

/// POST /reset-password
pub async fn change_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    match use_case
        .execute(ChangePasswordInput {
            email: req.email,
            old_password: req.password,
            new_password: req.new_password,
        })
        .await
    {
        Ok(()) => Ok((StatusCode::OK, "Password reset successful")),
        // One answer for unknown email and wrong password
        Err(AuthError::UserNotFound | AuthError::InvalidCredentials) => Ok((
            StatusCode::BAD_REQUEST,
            "Password reset failed: Incorrect email or password",
        )),
        Err(e) => Err(e),
    }
}

/// GET /forgotten-password?email=
pub async fn forgotten_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Query(query): Query<ForgottenPasswordQuery>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case.request(&query.email).await?;

    Ok((StatusCode::OK, "Password reset successful"))
}

/// GET /reset-password-Token?token= (new password as raw request body)
pub async fn reset_password_by_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Query(query): Query<ResetTokenQuery>,
    new_password: String,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    match use_case.reset(&query.token, new_password).await {
        Ok(()) => Ok((StatusCode::OK, "Password reset successful")),
        Err(AuthError::InvalidToken | AuthError::TokenExpired) => Ok((
            StatusCode::BAD_REQUEST,
            "Password reset failed: Incorrect token",
        )),
        Err(e) => Err(e),
    }
}

// ============================================================================
// OTP
// ============================================================================

/// POST /request-otp
pub async fn request_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RequestOtpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let use_case = OtpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case.request(&req.email).await?;

    Ok((StatusCode::OK, "OTP sent"))
}
