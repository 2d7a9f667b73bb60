//! List Likes Use Case
//!
//! Paginated queries: all likes, likes for a post, likes by a user.

use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::LikesConfig;
use crate::domain::entities::{Like, PostId};
use crate::domain::repository::LikeRepository;
use crate::domain::value_objects::PageRequest;
use crate::error::LikeResult;

/// One page of likes with its pagination facts
pub struct LikePageOutput {
    pub likes: Vec<Like>,
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
    pub last: bool,
}

impl LikePageOutput {
    /// Derive the pagination facts from a page of rows and the total count
    pub fn assemble(likes: Vec<Like>, page: PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            let size = page.size as i64;
            ((total_elements + size - 1) / size) as u32
        };
        let last = (page.page as i64 + 1) * page.size as i64 >= total_elements;

        Self {
            likes,
            page: page.page,
            size: page.size,
            total_elements,
            total_pages,
            last,
        }
    }
}

/// List likes use case
pub struct ListLikesUseCase<L>
where
    L: LikeRepository,
{
    repo: Arc<L>,
    config: Arc<LikesConfig>,
}

impl<L> ListLikesUseCase<L>
where
    L: LikeRepository,
{
    pub fn new(repo: Arc<L>, config: Arc<LikesConfig>) -> Self {
        Self { repo, config }
    }

    fn page_request(&self, page: Option<u32>, size: Option<u32>) -> PageRequest {
        PageRequest::new(page.unwrap_or(0), self.config.clamp_size(size))
    }

    /// All likes, newest first
    pub async fn execute(&self, page: Option<u32>, size: Option<u32>) -> LikeResult<LikePageOutput> {
        let request = self.page_request(page, size);
        tracing::debug!(page = request.page, size = request.size, "Fetching likes page");

        let (likes, total) = self.repo.find_page(request).await?;
        Ok(LikePageOutput::assemble(likes, request, total))
    }

    /// Likes targeting one post
    pub async fn by_post(
        &self,
        post_id: &PostId,
        page: Option<u32>,
        size: Option<u32>,
    ) -> LikeResult<LikePageOutput> {
        let request = self.page_request(page, size);
        tracing::debug!(post_id = %post_id, page = request.page, "Fetching likes for post");

        let (likes, total) = self.repo.find_by_post(post_id, request).await?;
        Ok(LikePageOutput::assemble(likes, request, total))
    }

    /// Likes made by one user
    pub async fn by_user(
        &self,
        user_id: Uuid,
        page: Option<u32>,
        size: Option<u32>,
    ) -> LikeResult<LikePageOutput> {
        let request = self.page_request(page, size);
        tracing::debug!(user_id = %user_id, page = request.page, "Fetching likes by user");

        let (likes, total) = self.repo.find_by_user(user_id, request).await?;
        Ok(LikePageOutput::assemble(likes, request, total))
    }
}
