//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Like, LikeId, PostId};
use crate::domain::repository::LikeRepository;
use crate::domain::value_objects::{PageRequest, PostType};
use crate::error::{LikeError, LikeResult};

/// PostgreSQL-backed like repository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LikeRepository for PgLikeRepository {
    async fn find_page(&self, page: PageRequest) -> LikeResult<(Vec<Like>, i64)> {
        let rows = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT like_id, post_id, post_type, user_id, created_at
            FROM likes
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes")
            .fetch_one(&self.pool)
            .await?;

        let likes = rows
            .into_iter()
            .map(|r| r.into_like())
            .collect::<LikeResult<Vec<_>>>()?;

        Ok((likes, total))
    }

    async fn find_by_id(&self, like_id: &LikeId) -> LikeResult<Option<Like>> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT like_id, post_id, post_type, user_id, created_at
            FROM likes
            WHERE like_id = $1
            "#,
        )
        .bind(like_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_like()).transpose()
    }

    async fn find_by_post(
        &self,
        post_id: &PostId,
        page: PageRequest,
    ) -> LikeResult<(Vec<Like>, i64)> {
        let rows = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT like_id, post_id, post_type, user_id, created_at
            FROM likes
            WHERE post_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
                .bind(post_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        let likes = rows
            .into_iter()
            .map(|r| r.into_like())
            .collect::<LikeResult<Vec<_>>>()?;

        Ok((likes, total))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> LikeResult<(Vec<Like>, i64)> {
        let rows = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT like_id, post_id, post_type, user_id, created_at
            FROM likes
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        let likes = rows
            .into_iter()
            .map(|r| r.into_like())
            .collect::<LikeResult<Vec<_>>>()?;

        Ok((likes, total))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct LikeRow {
    like_id: Uuid,
    post_id: Uuid,
    post_type: i16,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl LikeRow {
    fn into_like(self) -> LikeResult<Like> {
        let post_type = PostType::from_id(self.post_type)
            .ok_or_else(|| LikeError::Internal(format!("Invalid post type: {}", self.post_type)))?;

        Ok(Like {
            like_id: LikeId::from_uuid(self.like_id),
            post_id: PostId::from_uuid(self.post_id),
            post_type,
            user_id: self.user_id,
            created_at: self.created_at,
        })
    }
}
