use axum::{Router, routing::get};

use super::app_error::AppError;
use super::handlers::health::healthz;
use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod comments;
pub(crate) mod posts;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/posts", posts::router(state.clone()))
        .nest("/api/comments", comments::router(state.clone()))
        .nest("/api/users", users::router(state.clone()))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
