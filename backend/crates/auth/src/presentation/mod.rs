//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the bearer-token request filter.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{BearerAuthState, CurrentUser, PUBLIC_PATH_PREFIXES, bearer_auth};
pub use router::{auth_router, auth_router_generic};
