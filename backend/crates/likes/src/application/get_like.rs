//! Get Like Use Case

use std::sync::Arc;

use crate::domain::entities::{Like, LikeId};
use crate::domain::repository::LikeRepository;
use crate::error::{LikeError, LikeResult};

/// Get like use case
pub struct GetLikeUseCase<L>
where
    L: LikeRepository,
{
    repo: Arc<L>,
}

impl<L> GetLikeUseCase<L>
where
    L: LikeRepository,
{
    pub fn new(repo: Arc<L>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, like_id: &LikeId) -> LikeResult<Like> {
        tracing::debug!(like_id = %like_id, "Fetching like");

        self.repo
            .find_by_id(like_id)
            .await?
            .ok_or(LikeError::NotFound)
    }
}
