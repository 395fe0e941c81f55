use axum::{Router, middleware, routing::get};

use crate::presentation::AppState;
use crate::presentation::http::handlers::users::{
    get_profile, get_user, list_users, update_profile,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user));

    let protected = Router::new()
        .route("/profile", get(get_profile).patch(update_profile))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
