//! Like Entity

use chrono::{DateTime, Utc};
use kernel::id::Id;
use uuid::Uuid;

use crate::domain::value_objects::PostType;

pub struct LikeMarker;
pub type LikeId = Id<LikeMarker>;

pub struct PostMarker;
pub type PostId = Id<PostMarker>;

/// A single like on a post
///
/// Immutable after creation; the API only reads them.
#[derive(Debug, Clone)]
pub struct Like {
    pub like_id: LikeId,
    /// Target post
    pub post_id: PostId,
    /// What kind of post was liked
    pub post_type: PostType,
    /// The user who liked it (owned by the identity service)
    pub user_id: Uuid,
    /// Creation timestamp; pages are ordered newest-first on this
    pub created_at: DateTime<Utc>,
}
