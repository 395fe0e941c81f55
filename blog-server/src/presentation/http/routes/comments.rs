use axum::{Router, middleware, routing::delete};

use crate::presentation::AppState;
use crate::presentation::http::handlers::comments::delete_comment;
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(delete_comment))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
