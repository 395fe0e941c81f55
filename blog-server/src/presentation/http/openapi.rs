use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::extract::PostBodyDto;
use crate::presentation::http::handlers::MessageDto;
use crate::presentation::http::handlers::auth::{AuthResponseDto, LoginDto, RegisterDto, UserDto};
use crate::presentation::http::handlers::comments::{CommentDto, CreateCommentDto};
use crate::presentation::http::handlers::health::HealthzResponse;
use crate::presentation::http::handlers::posts::{AuthorDto, PostDto, PostsResponseDto};
use crate::presentation::http::handlers::users::UpdateProfileDto;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::health::healthz,
        crate::presentation::http::handlers::auth::register,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::auth::me,
        crate::presentation::http::handlers::auth::logout,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::list_recommended,
        crate::presentation::http::handlers::posts::list_most_liked,
        crate::presentation::http::handlers::posts::my_posts,
        crate::presentation::http::handlers::posts::posts_by_user,
        crate::presentation::http::handlers::posts::search_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::posts::like_post,
        crate::presentation::http::handlers::comments::list_comments,
        crate::presentation::http::handlers::comments::create_comment,
        crate::presentation::http::handlers::comments::delete_comment,
        crate::presentation::http::handlers::users::list_users,
        crate::presentation::http::handlers::users::get_user,
        crate::presentation::http::handlers::users::get_profile,
        crate::presentation::http::handlers::users::update_profile
    ),
    components(
        schemas(
            HealthzResponse,
            MessageDto,
            RegisterDto,
            LoginDto,
            AuthResponseDto,
            UserDto,
            AuthorDto,
            PostDto,
            PostBodyDto,
            PostsResponseDto,
            CommentDto,
            CreateCommentDto,
            UpdateProfileDto
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "posts", description = "Post endpoints"),
        (name = "comments", description = "Comment endpoints"),
        (name = "users", description = "User and profile endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
