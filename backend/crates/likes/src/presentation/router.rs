//! Likes Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::application::config::LikesConfig;
use crate::domain::repository::LikeRepository;
use crate::infra::postgres::PgLikeRepository;
use crate::presentation::handlers::{self, LikesAppState};

/// Create the Likes router with PostgreSQL repository
pub fn likes_router(repo: PgLikeRepository, config: LikesConfig) -> Router {
    likes_router_generic(repo, config)
}

/// Create a generic Likes router for any repository implementation
pub fn likes_router_generic<L>(repo: L, config: LikesConfig) -> Router
where
    L: LikeRepository + Clone + Send + Sync + 'static,
{
    let state = LikesAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::get_all_likes::<L>))
        .route("/{id}", get(handlers::get_like_by_id::<L>))
        .route("/post/{post_id}", get(handlers::get_likes_by_post::<L>))
        .route("/user/{user_id}", get(handlers::get_likes_by_user::<L>))
        .with_state(state)
}
