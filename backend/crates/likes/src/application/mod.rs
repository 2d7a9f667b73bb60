//! Application Layer

pub mod config;
pub mod get_like;
pub mod list_likes;

// Re-exports
pub use config::LikesConfig;
pub use get_like::GetLikeUseCase;
pub use list_likes::{LikePageOutput, ListLikesUseCase};
