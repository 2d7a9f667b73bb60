//! Likes Backend Module
//!
//! Read-only social "likes" API:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Paginated query use cases
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, DTOs with navigational links, router
//!
//! Likes are immutable after creation; this module only queries them and
//! assembles paginated responses with self/next/prev links.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LikesConfig;
pub use error::{LikeError, LikeResult};
pub use infra::postgres::PgLikeRepository;
pub use presentation::router::likes_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgLikeRepository as LikeStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
