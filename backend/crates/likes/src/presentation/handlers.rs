//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::LikesConfig;
use crate::application::{GetLikeUseCase, ListLikesUseCase};
use crate::domain::entities::{LikeId, PostId};
use crate::domain::repository::LikeRepository;
use crate::error::{LikeError, LikeResult};
use crate::presentation::dto::{LIKES_BASE_PATH, LikeDto, PageQuery, PageResponse};

/// Shared state for likes handlers
#[derive(Clone)]
pub struct LikesAppState<L>
where
    L: LikeRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<L>,
    pub config: Arc<LikesConfig>,
}

fn parse_uuid(raw: &str) -> LikeResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| LikeError::InvalidId(raw.to_string()))
}

// ============================================================================
// Listing
// ============================================================================

/// GET /api/v1/likes
pub async fn get_all_likes<L>(
    State(state): State<LikesAppState<L>>,
    Query(query): Query<PageQuery>,
) -> LikeResult<Json<PageResponse<LikeDto>>>
where
    L: LikeRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListLikesUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(query.page, query.size).await?;

    Ok(Json(PageResponse::from_output(LIKES_BASE_PATH, &output)))
}

/// GET /api/v1/likes/post/{postId}
pub async fn get_likes_by_post<L>(
    State(state): State<LikesAppState<L>>,
    Path(post_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> LikeResult<Json<PageResponse<LikeDto>>>
where
    L: LikeRepository + Clone + Send + Sync + 'static,
{
    let post_id = PostId::from_uuid(parse_uuid(&post_id)?);

    let use_case = ListLikesUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.by_post(&post_id, query.page, query.size).await?;

    let collection_path = format!("{}/post/{}", LIKES_BASE_PATH, post_id);
    Ok(Json(PageResponse::from_output(&collection_path, &output)))
}

/// GET /api/v1/likes/user/{userId}
pub async fn get_likes_by_user<L>(
    State(state): State<LikesAppState<L>>,
    Path(user_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> LikeResult<Json<PageResponse<LikeDto>>>
where
    L: LikeRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_uuid(&user_id)?;

    let use_case = ListLikesUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.by_user(user_id, query.page, query.size).await?;

    let collection_path = format!("{}/user/{}", LIKES_BASE_PATH, user_id);
    Ok(Json(PageResponse::from_output(&collection_path, &output)))
}

// ============================================================================
// Single like
// ============================================================================

/// GET /api/v1/likes/{id}
pub async fn get_like_by_id<L>(
    State(state): State<LikesAppState<L>>,
    Path(id): Path<String>,
) -> LikeResult<Json<LikeDto>>
where
    L: LikeRepository + Clone + Send + Sync + 'static,
{
    let like_id = LikeId::from_uuid(parse_uuid(&id)?);

    let use_case = GetLikeUseCase::new(state.repo.clone());
    let like = use_case.execute(&like_id).await?;

    Ok(Json(LikeDto::from_like(&like)))
}
