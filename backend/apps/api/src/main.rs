//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::middleware::{BearerAuthState, bearer_auth};
use auth::{AuthConfig, HttpMailGateway, PgAuthRepository, TokenService, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use likes::{LikesConfig, PgLikeRepository, likes_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,likes=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: drop verification tokens that expired while down.
    // Errors here should not prevent server startup
    let auth_store_for_cleanup = PgAuthRepository::new(pool.clone());
    match auth_store_for_cleanup.cleanup_expired().await {
        Ok(tokens) => {
            tracing::info!(tokens_deleted = tokens, "Verification token cleanup completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Verification token cleanup failed, continuing anyway"
            );
        }
    }

    // Auth configuration
    let mut auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load the signing secret from environment
        let secret_b64 = env::var("JWT_SECRET").expect("JWT_SECRET must be set in production");
        let jwt_secret = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        AuthConfig {
            jwt_secret,
            ..AuthConfig::default()
        }
    };

    if let Ok(base_url) = env::var("EXTERNAL_BASE_URL") {
        auth_config.external_base_url = base_url;
    }

    let email_service_url =
        env::var("EMAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8081".to_string());

    let auth_repo = PgAuthRepository::new(pool.clone());
    let mailer = HttpMailGateway::new(email_service_url);
    let likes_repo = PgLikeRepository::new(pool.clone());

    // Bearer filter shares the token service configuration with the router
    let bearer_state = BearerAuthState {
        repo: Arc::new(auth_repo.clone()),
        tokens: Arc::new(TokenService::new(&auth_config)),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(auth_router(auth_repo, mailer, auth_config))
        .nest("/api/v1/likes", likes_router(likes_repo, LikesConfig::default()))
        .layer(axum::middleware::from_fn_with_state(
            bearer_state,
            bearer_auth::<PgAuthRepository>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
