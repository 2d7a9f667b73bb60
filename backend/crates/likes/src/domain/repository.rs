//! Repository Trait
//!
//! Read-only persistence interface for likes. The implementation is in the
//! infrastructure layer; swapping the backing store only touches that layer.

use uuid::Uuid;

use crate::domain::entities::{Like, LikeId, PostId};
use crate::domain::value_objects::PageRequest;
use crate::error::LikeResult;

/// Like repository trait
#[trait_variant::make(LikeRepository: Send)]
pub trait LocalLikeRepository {
    /// One page of all likes, newest first, plus the total count
    async fn find_page(&self, page: PageRequest) -> LikeResult<(Vec<Like>, i64)>;

    /// Find a like by id
    async fn find_by_id(&self, like_id: &LikeId) -> LikeResult<Option<Like>>;

    /// One page of likes targeting a post, newest first, plus the total count
    async fn find_by_post(
        &self,
        post_id: &PostId,
        page: PageRequest,
    ) -> LikeResult<(Vec<Like>, i64)>;

    /// One page of likes made by a user, newest first, plus the total count
    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> LikeResult<(Vec<Like>, i64)>;
}
