//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::LikesAppState;
pub use router::{likes_router, likes_router_generic};
