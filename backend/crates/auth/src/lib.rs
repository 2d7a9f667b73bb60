//! Auth (Authentication/Identity) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and mail gateway implementations
//! - `presentation/` - HTTP handlers, DTOs, router, request filter
//!
//! ## Features
//! - Registration with email activation (signed activation tokens)
//! - Login issuing short-lived session JWTs carrying role names
//! - Password change and token-based password reset
//! - One-time-password issuance via the mail microservice
//! - Bearer-token request filter installing a per-request principal
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - HS256 JWTs signed with a secret injected through [`AuthConfig`]
//! - At most one live verification token per (email, kind); replacement
//!   is a single upsert and redemption consumes the token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::mailer::HttpMailGateway;
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
