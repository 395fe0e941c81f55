use axum::Router;
use axum::middleware;
use axum::routing::{get, patch, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::comments::{create_comment, list_comments};
use crate::presentation::http::handlers::posts::{
    create_post, delete_post, get_post, like_post, list_most_liked, list_posts, list_recommended,
    my_posts, posts_by_user, search_posts, update_post,
};
use crate::presentation::http::middleware::auth::{jwt_auth_middleware, optional_auth_middleware};

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_posts))
        .route("/recommended", get(list_recommended))
        .route("/most-liked", get(list_most_liked))
        .route("/search", get(search_posts))
        .route("/by-user/{id}", get(posts_by_user))
        .route("/{id}", get(get_post))
        .route("/{id}/comments", get(list_comments));

    let optional = Router::new()
        .route("/{id}/like", post(like_post))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    let protected = Router::new()
        .route("/", post(create_post))
        .route("/my-posts", get(my_posts))
        .route("/{id}", patch(update_post).delete(delete_post))
        .route("/{id}/comments", post(create_comment))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(optional).merge(protected)
}
