use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use crate::cache::Feed;
use crate::models::{
    AuthResponse, Comment, CreateCommentRequest, ErrorBody, LoginRequest, MessageResponse, Post,
    PostPayload, PostsPage, ProfileUpdate, RegisterRequest, User,
};

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8080",
};

pub(crate) const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl ApiError {
    pub(crate) fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn network(err: impl ToString) -> ApiError {
    ApiError::Network(err.to_string())
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn with_token(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn parse_error_body(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let fallback = match status {
        400 => "Некорректный запрос".to_string(),
        401 => "Требуется авторизация".to_string(),
        403 => "Недостаточно прав для этой операции".to_string(),
        404 => "Ресурс не найден".to_string(),
        409 => "Конфликт данных (например, пользователь уже существует)".to_string(),
        500..=599 => "Ошибка сервера".to_string(),
        _ => format!("HTTP ошибка {status}"),
    };

    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.describe())
        .unwrap_or(fallback);

    ApiError::Http { status, message }
}

async fn send<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
    let response = request.send().await.map_err(network)?;
    if !response.ok() {
        return Err(parse_error_body(response).await);
    }
    parse_json(response).await
}

async fn send_empty<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    send(builder.build().map_err(network)?).await
}

pub(crate) async fn register(payload: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    let request = Request::post(&endpoint("/api/auth/register"))
        .json(payload)
        .map_err(network)?;
    send(request).await
}

pub(crate) async fn login(payload: &LoginRequest) -> Result<AuthResponse, ApiError> {
    let request = Request::post(&endpoint("/api/auth/login"))
        .json(payload)
        .map_err(network)?;
    send(request).await
}

pub(crate) async fn logout(token: Option<&str>) -> Result<MessageResponse, ApiError> {
    send_empty(with_token(Request::post(&endpoint("/api/auth/logout")), token)).await
}

pub(crate) async fn list_feed(
    feed: &Feed,
    page: u32,
    token: Option<&str>,
) -> Result<PostsPage, ApiError> {
    let path = match feed {
        Feed::Latest | Feed::Likes => "/api/posts".to_string(),
        Feed::Recommended => "/api/posts/recommended".to_string(),
        Feed::MostLiked => "/api/posts/most-liked".to_string(),
        Feed::Mine => "/api/posts/my-posts".to_string(),
        Feed::Search(_) => "/api/posts/search".to_string(),
        Feed::ByUser(user_id) => format!("/api/posts/by-user/{user_id}"),
    };

    let mut params = vec![("page", page.to_string()), ("limit", PAGE_SIZE.to_string())];
    match feed {
        Feed::Likes => params.push(("sort", "likes".to_string())),
        Feed::Search(query) => params.push(("query", query.clone())),
        _ => {}
    }

    let token = if matches!(feed, Feed::Mine) { token } else { None };
    send_empty(with_token(Request::get(&endpoint(&path)), token).query(params)).await
}

/// JSON без файла, `multipart/form-data` с файлом.
async fn send_post_payload(
    builder: RequestBuilder,
    payload: &PostPayload,
    image: Option<File>,
) -> Result<Post, ApiError> {
    let request = match image {
        Some(file) => builder
            .body(post_form(payload, &file).map_err(|_| network("failed to build form data"))?)
            .map_err(network)?,
        None => builder.json(payload).map_err(network)?,
    };
    send(request).await
}

fn post_form(payload: &PostPayload, image: &File) -> Result<FormData, wasm_bindgen::JsValue> {
    let form = FormData::new()?;
    if let Some(title) = &payload.title {
        form.append_with_str("title", title)?;
    }
    if let Some(content) = &payload.content {
        form.append_with_str("content", content)?;
    }
    if let Some(tags) = &payload.tags {
        form.append_with_str("tags", tags)?;
    }
    if let Some(image_url) = &payload.image_url {
        form.append_with_str("imageUrl", image_url)?;
    }
    if let Some(published) = payload.published {
        form.append_with_str("published", if published { "true" } else { "false" })?;
    }
    form.append_with_blob_and_filename("image", image, &image.name())?;
    Ok(form)
}

pub(crate) async fn create_post(
    token: &str,
    payload: &PostPayload,
    image: Option<File>,
) -> Result<Post, ApiError> {
    let builder = with_token(Request::post(&endpoint("/api/posts")), Some(token));
    send_post_payload(builder, payload, image).await
}

pub(crate) async fn update_post(
    token: &str,
    id: i64,
    payload: &PostPayload,
    image: Option<File>,
) -> Result<Post, ApiError> {
    let builder = with_token(
        Request::patch(&endpoint(&format!("/api/posts/{id}"))),
        Some(token),
    );
    send_post_payload(builder, payload, image).await
}

pub(crate) async fn delete_post(token: &str, id: i64) -> Result<MessageResponse, ApiError> {
    send_empty(with_token(
        Request::delete(&endpoint(&format!("/api/posts/{id}"))),
        Some(token),
    ))
    .await
}

pub(crate) async fn like_post(token: Option<&str>, id: i64) -> Result<Post, ApiError> {
    send_empty(with_token(
        Request::post(&endpoint(&format!("/api/posts/{id}/like"))),
        token,
    ))
    .await
}

pub(crate) async fn list_comments(post_id: i64) -> Result<Vec<Comment>, ApiError> {
    send_empty(Request::get(&endpoint(&format!("/api/posts/{post_id}/comments")))).await
}

pub(crate) async fn create_comment(
    token: &str,
    post_id: i64,
    content: &str,
) -> Result<Comment, ApiError> {
    let request = with_token(
        Request::post(&endpoint(&format!("/api/posts/{post_id}/comments"))),
        Some(token),
    )
    .json(&CreateCommentRequest {
        content: content.to_string(),
    })
    .map_err(network)?;
    send(request).await
}

pub(crate) async fn delete_comment(token: &str, id: i64) -> Result<MessageResponse, ApiError> {
    send_empty(with_token(
        Request::delete(&endpoint(&format!("/api/comments/{id}"))),
        Some(token),
    ))
    .await
}

pub(crate) async fn get_profile(token: &str) -> Result<User, ApiError> {
    send_empty(with_token(
        Request::get(&endpoint("/api/users/profile")),
        Some(token),
    ))
    .await
}

pub(crate) async fn update_profile(token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
    let request = with_token(Request::patch(&endpoint("/api/users/profile")), Some(token))
        .json(update)
        .map_err(network)?;
    send(request).await
}
