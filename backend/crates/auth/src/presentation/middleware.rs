//! Bearer Token Request Filter
//!
//! Single pass per request: public path prefixes bypass the filter
//! entirely; everywhere else a bearer token, when present, is resolved to
//! claims and a [`CurrentUser`] principal is installed into the request
//! extensions. Requests without a token continue unauthenticated - route
//! policy decides what that means downstream.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;

/// Path prefixes that skip token handling altogether.
///
/// Matching is a plain prefix test, so any path merely starting with one of
/// these segments is public as well.
pub const PUBLIC_PATH_PREFIXES: &[&str] = &["/login", "/register", "/validate", "/activate"];

/// Middleware state
#[derive(Clone)]
pub struct BearerAuthState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

/// Authenticated principal stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub roles: Vec<String>,
}

/// Bearer-token filter middleware
pub async fn bearer_auth<R>(
    State(state): State<BearerAuthState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let path = req.uri().path();
    if PUBLIC_PATH_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return Ok(next.run(req).await);
    }

    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = bearer else {
        // No credentials offered; pass through unauthenticated
        return Ok(next.run(req).await);
    };

    let claims = match state.tokens.claims(&token) {
        Ok(claims) => claims,
        Err(e) => return Err(e.into_response()),
    };

    // The subject denoted a live account at issuance time; re-load it now
    let subject = Email::from_db(&claims.sub);
    match state.repo.find_by_email(&subject).await {
        Ok(Some(user)) => {
            // Install only when no upstream principal exists and the token
            // subject matches the loaded account
            if req.extensions().get::<CurrentUser>().is_none()
                && user.email.as_str() == claims.sub
            {
                req.extensions_mut().insert(CurrentUser {
                    email: claims.sub,
                    roles: claims.roles,
                });
            }
        }
        Ok(None) => {
            tracing::warn!(subject = %claims.sub, "Bearer token subject no longer exists");
        }
        Err(e) => return Err(e.into_response()),
    }

    Ok(next.run(req).await)
}
