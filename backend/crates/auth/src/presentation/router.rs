//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::mailer::MailGateway;
use crate::domain::repository::{RoleRepository, UserRepository, VerificationTokenRepository};
use crate::infra::mailer::HttpMailGateway;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository and HTTP mail gateway
pub fn auth_router(repo: PgAuthRepository, mailer: HttpMailGateway, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository/gateway implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: UserRepository + RoleRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: MailGateway + Clone + Send + Sync + 'static,
{
    let tokens = Arc::new(TokenService::new(&config));
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        tokens,
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/resend-activation", post(handlers::resend_activation::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/validate", post(handlers::validate::<R, M>))
        .route("/activate", get(handlers::activate::<R, M>))
        .route("/reset-password", post(handlers::change_password::<R, M>))
        .route("/forgotten-password", get(handlers::forgotten_password::<R, M>))
        .route(
            "/reset-password-Token",
            get(handlers::reset_password_by_token::<R, M>),
        )
        .route("/request-otp", post(handlers::request_otp::<R, M>))
        .with_state(state)
}
