//! Domain Layer

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{Like, LikeId, PostId};
pub use repository::LikeRepository;
pub use value_objects::{PageRequest, PostType};
