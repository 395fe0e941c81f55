use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::MessageDto;
use crate::domain::page::{Page, Pagination};
use crate::domain::post::{Post, PostSort};
use crate::domain::user::Author;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::{ApiPath, ApiQuery, PostBodyDto, PostForm};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub(crate) struct PageQuery {
    /// Page number, starts at 1
    #[validate(range(min = 1, message = "page must be >= 1"))]
    pub(crate) page: Option<u32>,
    /// Items per page (1..=100)
    #[validate(range(min = 1, max = 100, message = "limit must be 1..100"))]
    pub(crate) limit: Option<u32>,
}

/// `page`/`limit` повторяют `PageQuery`: `#[serde(flatten)]` ломает разбор
/// чисел из query-строки.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub(crate) struct ListPostsQuery {
    /// Page number, starts at 1
    pub(crate) page: Option<u32>,
    /// Items per page (1..=100)
    pub(crate) limit: Option<u32>,
    /// `likes` or `latest` (default)
    pub(crate) sort: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub(crate) struct SearchQuery {
    pub(crate) query: Option<String>,
    /// Page number, starts at 1
    pub(crate) page: Option<u32>,
    /// Items per page (1..=100)
    pub(crate) limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) avatar_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) image_url: Option<String>,
    pub(crate) author: AuthorDto,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) likes: u64,
    pub(crate) comments: u64,
    pub(crate) published: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostsResponseDto {
    pub(crate) data: Vec<PostDto>,
    pub(crate) total: usize,
    pub(crate) page: u32,
    pub(crate) last_page: u32,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            email: author.email,
            headline: author.headline,
            avatar_url: author.avatar_url,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            tags: post.tags,
            image_url: post.image_url,
            author: post.author.into(),
            created_at: post.created_at,
            likes: post.likes,
            comments: post.comments,
            published: post.published,
        }
    }
}

impl From<Page<Post>> for PostsResponseDto {
    fn from(page: Page<Post>) -> Self {
        Self {
            data: page.data.into_iter().map(PostDto::from).collect(),
            total: page.total,
            page: page.page,
            last_page: page.last_page,
        }
    }
}

impl PageQuery {
    fn pagination(&self) -> AppResult<Pagination> {
        self.validate()?;
        Ok(Pagination::new(self.page, self.limit)?)
    }
}

impl From<&ListPostsQuery> for PageQuery {
    fn from(query: &ListPostsQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
        }
    }
}

impl From<&SearchQuery> for PageQuery {
    fn from(query: &SearchQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Posts listed", body = PostsResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListPostsQuery>,
) -> AppResult<(StatusCode, Json<PostsResponseDto>)> {
    let pagination = PageQuery::from(&query).pagination()?;
    let sort = PostSort::parse(query.sort.as_deref());

    let result = state.blog_service.list_posts(pagination, sort).await?;

    Ok((StatusCode::OK, Json(PostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/recommended",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Posts with an image, newest first", body = PostsResponseDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn list_recommended(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<(StatusCode, Json<PostsResponseDto>)> {
    let result = state
        .blog_service
        .list_recommended(query.pagination()?)
        .await?;
    Ok((StatusCode::OK, Json(PostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/most-liked",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Text posts ordered by likes", body = PostsResponseDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn list_most_liked(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<(StatusCode, Json<PostsResponseDto>)> {
    let result = state
        .blog_service
        .list_most_liked(query.pagination()?)
        .await?;
    Ok((StatusCode::OK, Json(PostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/my-posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(PageQuery),
    responses(
        (status = 200, description = "Posts of the caller", body = PostsResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn my_posts(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<(StatusCode, Json<PostsResponseDto>)> {
    let result = state
        .blog_service
        .list_by_author(auth.user_id, query.pagination()?)
        .await?;
    Ok((StatusCode::OK, Json(PostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/by-user/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Author id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Posts of the author", body = PostsResponseDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn posts_by_user(
    State(state): State<AppState>,
    ApiPath(author_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<(StatusCode, Json<PostsResponseDto>)> {
    let result = state
        .blog_service
        .list_by_author(author_id, query.pagination()?)
        .await?;
    Ok((StatusCode::OK, Json(PostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/search",
    tag = "posts",
    params(SearchQuery),
    responses(
        (status = 200, description = "Posts matching the query", body = PostsResponseDto),
        (status = 400, description = "Missing query or validation error")
    )
)]
pub(crate) async fn search_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<(StatusCode, Json<PostsResponseDto>)> {
    let pagination = PageQuery::from(&query).pagination()?;

    let result = state
        .blog_service
        .search_posts(query.query.as_deref().unwrap_or_default(), pagination)
        .await?;
    Ok((StatusCode::OK, Json(PostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state.blog_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body(
        content = PostBodyDto,
        description = "JSON body, or multipart/form-data with the same fields and an optional `image` file"
    ),
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    form: PostForm,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state
        .blog_service
        .create_post(auth.user_id, form.into_create())
        .await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(result))))
}

#[utoipa::path(
    patch,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body(
        content = PostBodyDto,
        description = "Only present fields are changed; multipart/form-data is accepted too"
    ),
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    form: PostForm,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state
        .blog_service
        .update_post(auth.user_id, id, form.into_update())
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageDto>> {
    state.blog_service.delete_post(auth.user_id, id).await?;
    Ok(Json(MessageDto::ok("Post deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Like counted", body = PostDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn like_post(
    State(state): State<AppState>,
    auth: Option<AuthenticatedUser>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state.blog_service.like_post(id).await?;
    debug!(post_id = id, user_id = ?auth.map(|a| a.user_id), "post liked");
    Ok((StatusCode::OK, Json(PostDto::from(result))))
}
